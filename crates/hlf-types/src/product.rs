//! Product data supplied by the caller.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{ParseError, ProductError};

/// Currency a product price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro.
    #[default]
    Eur,
    /// Israeli new shekel.
    Ils,
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Ils => "ILS",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Ils => "₪",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EUR" | "€" => Ok(Self::Eur),
            "ILS" | "NIS" | "₪" => Ok(Self::Ils),
            _ => Err(ParseError {
                kind: "currency",
                value: s.to_string(),
                expected: "EUR, ILS",
            }),
        }
    }
}

/// A product to estimate landed cost for.
///
/// Price is always positive and weight, when known, is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", rename_all = "camelCase")]
pub struct ProductData {
    price: f64,
    currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
}

impl ProductData {
    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is not a positive finite number.
    pub fn new(
        price: f64,
        currency: Currency,
        url: impl Into<String>,
    ) -> Result<Self, ProductError> {
        if !(price.is_finite() && price > 0.0) {
            return Err(ProductError::InvalidPrice(price));
        }
        Ok(Self {
            price,
            currency,
            weight: None,
            category: None,
            url: url.into(),
            product_name: None,
        })
    }

    /// Creates a EUR-priced product with no URL, for ad-hoc estimates.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is not a positive finite number.
    pub fn eur(price: f64) -> Result<Self, ProductError> {
        Self::new(price, Currency::Eur, "")
    }

    /// Sets the shipping weight in kilograms.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is not a positive finite number.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, ProductError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(ProductError::InvalidWeight(weight));
        }
        self.weight = Some(weight);
        Ok(self)
    }

    /// Sets the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the product display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Returns the product price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the price currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the shipping weight in kilograms, if known.
    #[must_use]
    pub const fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns the product category, if known.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the product page URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the product display name, if known.
    #[must_use]
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }
}

/// Unvalidated product as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    price: f64,
    #[serde(default)]
    currency: Currency,
    weight: Option<f64>,
    category: Option<String>,
    #[serde(default)]
    url: String,
    product_name: Option<String>,
}

impl TryFrom<RawProduct> for ProductData {
    type Error = ProductError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let mut product = Self::new(raw.price, raw.currency, raw.url)?;
        if let Some(weight) = raw.weight {
            product = product.with_weight(weight)?;
        }
        product.category = raw.category;
        product.product_name = raw.product_name;
        Ok(product)
    }
}
