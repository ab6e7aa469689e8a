//! Distance from the shopper to the store, travel estimates and map links.
//!
//! The shopper's position is resolved by the caller; nothing here talks to a
//! geolocation service.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> DomainResult<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::validation(format!(
                "coordinates out of range: {lat}, {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }
}

impl core::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Great-circle distance in km, rounded to two decimals.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_KM * c * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TravelMode {
    Walking,
    Bicycle,
    ElectricBike,
    Motorcycle,
    Car,
}

impl TravelMode {
    pub const ALL: [TravelMode; 5] = [
        TravelMode::Walking,
        TravelMode::Bicycle,
        TravelMode::ElectricBike,
        TravelMode::Motorcycle,
        TravelMode::Car,
    ];

    /// Average urban speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Walking => 4.0,
            TravelMode::Bicycle => 15.0,
            TravelMode::ElectricBike => 25.0,
            TravelMode::Motorcycle => 35.0,
            TravelMode::Car => 40.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TravelMode::Walking => "Caminando",
            TravelMode::Bicycle => "Bicicleta de pedales",
            TravelMode::ElectricBike => "Bicicleta eléctrica",
            TravelMode::Motorcycle => "Moto eléctrica",
            TravelMode::Car => "Automóvil",
        }
    }

    pub fn minutes_for(self, distance_km: f64) -> u64 {
        (distance_km / self.speed_kmh() * 60.0).round() as u64
    }
}

/// `N min` under an hour, otherwise `Hh Mmin`, or `Hh` on the hour.
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rest}min")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    pub mode: TravelMode,
    pub minutes: u64,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLinks {
    pub google_maps: String,
    pub apple_maps: String,
    pub waze: String,
}

impl MapLinks {
    pub fn route(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            google_maps: format!("https://www.google.com/maps/dir/{from}/{to}"),
            apple_maps: format!("https://maps.apple.com/?saddr={from}&daddr={to}"),
            waze: format!("https://waze.com/ul?ll={to}&navigate=yes"),
        }
    }
}

/// Everything the store page shows about getting to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInfo {
    pub distance_km: f64,
    pub estimates: Vec<TravelEstimate>,
    pub map_links: MapLinks,
}

impl TravelInfo {
    pub fn to_store(shopper: GeoPoint, store: GeoPoint) -> Self {
        let distance_km = haversine_km(shopper, store);
        let estimates = TravelMode::ALL
            .into_iter()
            .map(|mode| {
                let minutes = mode.minutes_for(distance_km);
                TravelEstimate {
                    mode,
                    minutes,
                    time: format_duration(minutes),
                }
            })
            .collect();
        Self {
            distance_km,
            estimates,
            map_links: MapLinks::route(shopper, store),
        }
    }

    pub fn estimate(&self, mode: TravelMode) -> Option<&TravelEstimate> {
        self.estimates.iter().find(|e| e.mode == mode)
    }
}
