//! Display currencies and price formatting.
//!
//! Prices are stored in CUP. Every other currency carries a rate (CUP per
//! unit) and amounts are converted only for display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_catalog::FormatPrice;
use storefront_core::{DomainError, DomainResult, Money};

/// Code of the currency prices are stored in.
pub const BASE_CURRENCY: &str = "CUP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCurrency")]
pub struct Currency {
    code: String,
    name: String,
    symbol: String,
    rate: f64,
}

#[derive(Deserialize)]
struct RawCurrency {
    code: String,
    name: String,
    symbol: String,
    rate: f64,
}

impl TryFrom<RawCurrency> for Currency {
    type Error = DomainError;

    fn try_from(raw: RawCurrency) -> Result<Self, Self::Error> {
        Currency::new(raw.code, raw.name, raw.symbol, raw.rate)
    }
}

impl Currency {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        rate: f64,
    ) -> DomainResult<Self> {
        let code = code.into().trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("currency code cannot be empty"));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DomainError::validation(format!(
                "currency '{code}' rate must be positive, got {rate}"
            )));
        }
        Ok(Self {
            code,
            name: name.into(),
            symbol: symbol.into(),
            rate,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// CUP per one unit of this currency.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_base(&self) -> bool {
        self.code == BASE_CURRENCY
    }

    /// Amount in this currency for a CUP amount.
    pub fn convert(&self, amount: Money) -> f64 {
        amount.amount() as f64 / self.rate
    }

    /// `symbol` + grouped amount. Whole numbers for CUP, cents otherwise.
    pub fn format_price(&self, amount: Money) -> String {
        let value = self.convert(amount);
        if self.is_base() {
            format!("{}{}", self.symbol, group_thousands(value.round() as u64))
        } else {
            let cents = (value * 100.0).round() as u64;
            format!(
                "{}{}.{:02}",
                self.symbol,
                group_thousands(cents / 100),
                cents % 100
            )
        }
    }

    pub fn format_price_with_code(&self, amount: Money) -> String {
        format!("{} {}", self.format_price(amount), self.code)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The currencies a shopper can pick from, and the current pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTable {
    currencies: Vec<Currency>,
    selected: String,
}

impl CurrencyTable {
    /// Build a table. Must contain the base currency and no duplicate codes.
    pub fn new(currencies: Vec<Currency>) -> DomainResult<Self> {
        for (i, currency) in currencies.iter().enumerate() {
            if currencies[..i].iter().any(|c| c.code == currency.code) {
                return Err(DomainError::conflict(format!(
                    "duplicate currency '{}'",
                    currency.code
                )));
            }
        }
        if !currencies.iter().any(Currency::is_base) {
            return Err(DomainError::validation(format!(
                "currency table must include {BASE_CURRENCY}"
            )));
        }
        Ok(Self {
            currencies,
            selected: BASE_CURRENCY.to_string(),
        })
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn get(&self, code: &str) -> DomainResult<&Currency> {
        let code = code.trim().to_uppercase();
        self.currencies
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| DomainError::not_found(format!("currency '{code}'")))
    }

    pub fn select(&mut self, code: &str) -> DomainResult<()> {
        let code = self.get(code)?.code.clone();
        debug!(currency = %code, "display currency selected");
        self.selected = code;
        Ok(())
    }

    /// The selected currency. The table is never empty: it always holds the
    /// base currency.
    pub fn current(&self) -> &Currency {
        self.currencies
            .iter()
            .find(|c| c.code == self.selected)
            .or_else(|| self.currencies.iter().find(|c| c.is_base()))
            .unwrap_or(&self.currencies[0])
    }

    /// Add a currency, or replace the one with the same code.
    pub fn upsert(&mut self, currency: Currency) -> DomainResult<()> {
        if currency.is_base() && currency.rate != 1.0 {
            return Err(DomainError::validation(format!(
                "{BASE_CURRENCY} rate is fixed at 1"
            )));
        }
        match self.currencies.iter_mut().find(|c| c.code == currency.code) {
            Some(existing) => *existing = currency,
            None => self.currencies.push(currency),
        }
        Ok(())
    }

    /// Remove a currency. The base currency cannot be removed; removing the
    /// selected one falls back to the base.
    pub fn remove(&mut self, code: &str) -> DomainResult<Currency> {
        let currency = self.get(code)?;
        if currency.is_base() {
            return Err(DomainError::validation(format!(
                "{BASE_CURRENCY} cannot be removed"
            )));
        }
        let code = currency.code.clone();
        if self.selected == code {
            self.selected = BASE_CURRENCY.to_string();
        }
        let pos = self
            .currencies
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| DomainError::not_found(format!("currency '{code}'")))?;
        Ok(self.currencies.remove(pos))
    }

    /// Formatter for the selected currency.
    pub fn formatter(&self, with_code: bool) -> PriceFormatter<'_> {
        PriceFormatter {
            currency: self.current(),
            with_code,
        }
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let currencies = [
            ("CUP", "Peso Cubano", "$", 1.0),
            ("USD", "Dólar Estadounidense", "$", 385.0),
            ("EUR", "Euro", "€", 425.0),
            ("MLC", "Moneda Libremente Convertible", "MLC", 232.0),
        ]
        .into_iter()
        .map(|(code, name, symbol, rate)| Currency {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            rate,
        })
        .collect();
        Self {
            currencies,
            selected: BASE_CURRENCY.to_string(),
        }
    }
}

/// Formats catalog prices (CUP amounts) in one currency.
#[derive(Debug, Clone, Copy)]
pub struct PriceFormatter<'a> {
    currency: &'a Currency,
    with_code: bool,
}

impl<'a> PriceFormatter<'a> {
    pub fn new(currency: &'a Currency, with_code: bool) -> Self {
        Self { currency, with_code }
    }
}

impl FormatPrice for PriceFormatter<'_> {
    fn format_price(&self, amount: u64) -> String {
        if self.with_code {
            self.currency.format_price_with_code(Money::new(amount))
        } else {
            self.currency.format_price(Money::new(amount))
        }
    }
}
