use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fees::CostInputs;

/// Cost fields exactly as the seller typed them.
///
/// Saved records keep this text untouched; numbers are only derived through
/// [`CostForm::to_inputs`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostForm {
    #[serde(default)]
    pub product_price: String,
    #[serde(default)]
    pub material_cost: String,
    #[serde(default)]
    pub shipping_cost: String,
    #[serde(default)]
    pub labor_cost: String,
    #[serde(default)]
    pub marketing_cost: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostField {
    ProductPrice,
    MaterialCost,
    ShippingCost,
    LaborCost,
    MarketingCost,
}

impl CostField {
    pub const ALL: [CostField; 5] = [
        CostField::ProductPrice,
        CostField::MaterialCost,
        CostField::ShippingCost,
        CostField::LaborCost,
        CostField::MarketingCost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostField::ProductPrice => "Product Price ($)",
            CostField::MaterialCost => "Material Cost ($)",
            CostField::ShippingCost => "Shipping Cost ($)",
            CostField::LaborCost => "Labor Cost ($)",
            CostField::MarketingCost => "Marketing Cost ($)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least the product price")]
    MissingProductPrice,
    #[error("These amounts are too large to calculate")]
    AmountTooLarge,
}

impl CostForm {
    pub fn field(&self, field: CostField) -> &str {
        match field {
            CostField::ProductPrice => &self.product_price,
            CostField::MaterialCost => &self.material_cost,
            CostField::ShippingCost => &self.shipping_cost,
            CostField::LaborCost => &self.labor_cost,
            CostField::MarketingCost => &self.marketing_cost,
        }
    }

    pub fn set_field(&mut self, field: CostField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CostField::ProductPrice => self.product_price = value,
            CostField::MaterialCost => self.material_cost = value,
            CostField::ShippingCost => self.shipping_cost = value,
            CostField::LaborCost => self.labor_cost = value,
            CostField::MarketingCost => self.marketing_cost = value,
        }
    }

    /// Only presence of the price is checked; a typed `0` is valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_price.trim().is_empty() {
            return Err(ValidationError::MissingProductPrice);
        }
        Ok(())
    }

    /// Parses every field, treating missing or unreadable text as zero.
    pub fn to_inputs(&self) -> CostInputs {
        CostInputs {
            product_price: parse_amount(&self.product_price),
            material_cost: parse_amount(&self.material_cost),
            shipping_cost: parse_amount(&self.shipping_cost),
            labor_cost: parse_amount(&self.labor_cost),
            marketing_cost: parse_amount(&self.marketing_cost),
        }
    }
}

/// Reads the leading decimal number of `raw`, falling back to `0.0`.
///
/// `"12.50 USD"` reads as `12.5`; `""`, `"abc"` and overflowing values read
/// as zero.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let end = numeric_prefix_len(trimmed);
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_digits = count_digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        if integer_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    end
}
