//! Phone numbers and their dialing codes.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// A dialing code and the local number length it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCode {
    pub code: &'static str,
    pub country: &'static str,
    pub min_length: usize,
    pub max_length: usize,
}

impl CountryCode {
    pub const ALL: &'static [CountryCode] = &[
        CountryCode::new("+53", "Cuba", 8, 8),
        CountryCode::new("+1", "Estados Unidos/Canadá", 10, 10),
        CountryCode::new("+52", "México", 10, 10),
        CountryCode::new("+54", "Argentina", 10, 11),
        CountryCode::new("+55", "Brasil", 10, 11),
        CountryCode::new("+56", "Chile", 8, 9),
        CountryCode::new("+57", "Colombia", 10, 10),
        CountryCode::new("+58", "Venezuela", 10, 10),
        CountryCode::new("+34", "España", 9, 9),
        CountryCode::new("+33", "Francia", 10, 10),
        CountryCode::new("+39", "Italia", 10, 10),
        CountryCode::new("+49", "Alemania", 10, 12),
        CountryCode::new("+44", "Reino Unido", 10, 10),
        CountryCode::new("+7", "Rusia", 10, 10),
        CountryCode::new("+86", "China", 11, 11),
        CountryCode::new("+81", "Japón", 10, 11),
        CountryCode::new("+82", "Corea del Sur", 10, 11),
        CountryCode::new("+91", "India", 10, 10),
    ];

    const fn new(code: &'static str, country: &'static str, min: usize, max: usize) -> Self {
        Self {
            code,
            country,
            min_length: min,
            max_length: max,
        }
    }

    pub fn lookup(code: &str) -> DomainResult<&'static CountryCode> {
        let code = code.trim();
        Self::ALL
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| DomainError::not_found(format!("dialing code '{code}'")))
    }

    pub fn accepts(&self, digits: &str) -> bool {
        (self.min_length..=self.max_length).contains(&digits.len())
    }
}

/// Only the ASCII digits of `raw`.
pub fn digits_of(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// A validated local number under a dialing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    country_code: String,
    digits: String,
}

impl ValueObject for PhoneNumber {}

impl PhoneNumber {
    /// Validate `local` (any formatting) against the dialing code's lengths.
    pub fn parse(country_code: &str, local: &str) -> DomainResult<Self> {
        let country = CountryCode::lookup(country_code)?;
        let digits = digits_of(local);
        if !country.accepts(&digits) {
            let expected = if country.min_length == country.max_length {
                country.min_length.to_string()
            } else {
                format!("{}-{}", country.min_length, country.max_length)
            };
            return Err(DomainError::validation(format!(
                "{} numbers need {expected} digits, got {}",
                country.country,
                digits.len()
            )));
        }
        Ok(Self {
            country_code: country.code.to_string(),
            digits,
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// International digits without `+`, as `wa.me` links expect.
    pub fn international_digits(&self) -> String {
        format!("{}{}", digits_of(&self.country_code), self.digits)
    }
}

impl core::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.country_code, self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuban_numbers_need_eight_digits() {
        let phone = PhoneNumber::parse("+53", "5469 0878").unwrap();
        assert_eq!(phone.digits(), "54690878");
        assert_eq!(phone.international_digits(), "5354690878");
        assert_eq!(phone.to_string(), "+53 54690878");

        assert!(matches!(
            PhoneNumber::parse("+53", "5469087"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn ranges_are_inclusive() {
        assert!(PhoneNumber::parse("+49", "0301234567").is_ok());
        assert!(PhoneNumber::parse("+49", "030123456789").is_ok());
        assert!(PhoneNumber::parse("+49", "0301234567890").is_err());
    }

    #[test]
    fn unknown_dialing_code_is_not_found() {
        assert!(matches!(
            PhoneNumber::parse("+999", "12345678"),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn dialing_codes_are_unique() {
        for (i, c) in CountryCode::ALL.iter().enumerate() {
            assert!(CountryCode::ALL[..i].iter().all(|o| o.code != c.code));
            assert!(c.min_length <= c.max_length);
        }
    }
}
