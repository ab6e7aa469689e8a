//! Delivery zones and the fulfilment choice.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Money};

/// A neighbourhood the store delivers to, with its flat delivery cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: String,
    pub name: String,
    pub cost: Money,
}

impl DeliveryZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: Money::new(cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoneTable(Vec<DeliveryZone>);

impl ZoneTable {
    pub fn new(zones: Vec<DeliveryZone>) -> DomainResult<Self> {
        for (i, zone) in zones.iter().enumerate() {
            if zones[..i].iter().any(|z| z.id == zone.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate delivery zone '{}'",
                    zone.id
                )));
            }
        }
        Ok(Self(zones))
    }

    /// Santiago de Cuba neighbourhoods served by the store.
    pub fn santiago() -> Self {
        let zones = [
            ("centro", "Nuevo Vista Alegre", 100),
            ("vista_alegre", "Vista Alegre", 500),
            ("sueno", "Sueño", 300),
            ("san_pedrito", "San Pedrito", 250),
            ("altamira", "Altamira", 500),
            ("micro_9", "Micro 7, 8 , 9", 300),
            ("alameda", "Alameda", 250),
            ("puerto", "El Caney", 1_000),
            ("siboney", "Quintero", 500),
            ("ciudamar", "Distrito José Martí", 200),
            ("marimon", "Marimon", 150),
            ("los_cangrejitos", "Los cangrejitos", 350),
            ("trocha", "Trocha", 350),
            ("versalles", "Versalles", 1_000),
            ("portuondo", "Portuondo", 600),
            ("30_de_noviembre", "30 de Noviembre", 600),
            ("rajayoga", "Rajayoga", 800),
            ("antonio_maceo", "Antonio Maceo", 600),
            ("los_pinos", "Los Pinos", 300),
        ];
        Self(
            zones
                .into_iter()
                .map(|(id, name, cost)| DeliveryZone::new(id, name, cost))
                .collect(),
        )
    }

    pub fn zones(&self) -> &[DeliveryZone] {
        &self.0
    }

    pub fn get(&self, id: &str) -> DomainResult<&DeliveryZone> {
        self.0
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| DomainError::not_found(format!("delivery zone '{id}'")))
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::santiago()
    }
}

/// How the order reaches the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "serviceType", rename_all = "snake_case")]
pub enum Fulfilment {
    HomeDelivery {
        #[serde(rename = "zone")]
        zone_id: String,
    },
    Pickup,
}

impl Fulfilment {
    pub fn home_delivery(zone_id: impl Into<String>) -> Self {
        Self::HomeDelivery {
            zone_id: zone_id.into(),
        }
    }

    /// Zone cost for home delivery, zero for pickup.
    pub fn cost(&self, zones: &ZoneTable) -> DomainResult<Money> {
        match self {
            Fulfilment::HomeDelivery { zone_id } => Ok(zones.get(zone_id)?.cost),
            Fulfilment::Pickup => Ok(Money::ZERO),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Fulfilment::HomeDelivery { .. } => "Entrega a domicilio",
            Fulfilment::Pickup => "Recoger en tienda",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_delivery_costs_the_zone_price() {
        let zones = ZoneTable::santiago();
        let cost = Fulfilment::home_delivery("versalles").cost(&zones).unwrap();
        assert_eq!(cost, Money::new(1_000));
    }

    #[test]
    fn pickup_is_free() {
        assert_eq!(Fulfilment::Pickup.cost(&ZoneTable::santiago()).unwrap(), Money::ZERO);
    }

    #[test]
    fn unknown_zone_is_not_found() {
        let err = Fulfilment::home_delivery("habana")
            .cost(&ZoneTable::santiago())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn santiago_table_has_unique_ids() {
        let zones = ZoneTable::santiago();
        assert_eq!(zones.zones().len(), 19);
        assert!(ZoneTable::new(zones.zones().to_vec()).is_ok());

        let dup = vec![DeliveryZone::new("a", "A", 1), DeliveryZone::new("a", "B", 2)];
        assert!(matches!(ZoneTable::new(dup), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn fulfilment_serializes_with_service_type_tag() {
        let json = serde_json::to_value(Fulfilment::home_delivery("centro")).unwrap();
        assert_eq!(json, serde_json::json!({"serviceType": "home_delivery", "zone": "centro"}));

        let pickup: Fulfilment = serde_json::from_str(r#"{"serviceType":"pickup"}"#).unwrap();
        assert_eq!(pickup, Fulfilment::Pickup);
    }
}
