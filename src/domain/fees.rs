//! Marketplace fee schedule and the profit estimate derived from it.

use serde::{Deserialize, Serialize};

/// Flat fee charged for every listing.
pub const LISTING_FEE: f64 = 0.20;
/// Share of the sale price taken as transaction fee.
pub const TRANSACTION_FEE_RATE: f64 = 0.065;
/// Share of the sale price taken by the payment processor.
pub const PAYMENT_PROCESSING_RATE: f64 = 0.03;
/// Fixed part of the payment processing fee.
pub const PAYMENT_PROCESSING_FLAT_FEE: f64 = 0.25;

/// Numeric cost inputs for a single listing estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CostInputs {
    pub product_price: f64,
    pub material_cost: f64,
    pub shipping_cost: f64,
    pub labor_cost: f64,
    pub marketing_cost: f64,
}

/// Profit as a percentage of the sale price.
///
/// Serialized as a plain number, or `null` when the percentage has no value
/// (a zero sale price).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum ProfitMargin {
    Percent(f64),
    #[default]
    NotComputable,
}

impl ProfitMargin {
    fn from_ratio(profit: f64, price: f64) -> Self {
        if price == 0.0 {
            return ProfitMargin::NotComputable;
        }
        let percent = profit / price * 100.0;
        if percent.is_finite() {
            ProfitMargin::Percent(percent)
        } else {
            ProfitMargin::NotComputable
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            ProfitMargin::Percent(value) => Some(*value),
            ProfitMargin::NotComputable => None,
        }
    }

    pub fn is_computable(&self) -> bool {
        matches!(self, ProfitMargin::Percent(_))
    }
}

impl From<Option<f64>> for ProfitMargin {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(percent) if percent.is_finite() => ProfitMargin::Percent(percent),
            _ => ProfitMargin::NotComputable,
        }
    }
}

impl From<ProfitMargin> for Option<f64> {
    fn from(margin: ProfitMargin) -> Self {
        margin.percent()
    }
}

/// Fees and resulting profit for one set of [`CostInputs`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub listing_fee: f64,
    pub transaction_fee: f64,
    pub payment_processing_fee: f64,
    pub total_costs: f64,
    pub profit: f64,
    #[serde(default)]
    pub profit_margin: ProfitMargin,
}

impl FeeBreakdown {
    /// False when a sum overflowed; such values cannot be stored as JSON numbers.
    pub fn is_finite(&self) -> bool {
        [
            self.listing_fee,
            self.transaction_fee,
            self.payment_processing_fee,
            self.total_costs,
            self.profit,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Applies the fee schedule to `inputs`.
///
/// Pure: the same inputs always produce a bit-identical breakdown.
pub fn compute(inputs: &CostInputs) -> FeeBreakdown {
    let price = inputs.product_price;

    let listing_fee = LISTING_FEE;
    let transaction_fee = price * TRANSACTION_FEE_RATE;
    let payment_processing_fee = price * PAYMENT_PROCESSING_RATE + PAYMENT_PROCESSING_FLAT_FEE;

    let total_costs = inputs.material_cost
        + inputs.shipping_cost
        + inputs.labor_cost
        + inputs.marketing_cost
        + listing_fee
        + transaction_fee
        + payment_processing_fee;
    let profit = price - total_costs;

    FeeBreakdown {
        listing_fee,
        transaction_fee,
        payment_processing_fee,
        total_costs,
        profit,
        profit_margin: ProfitMargin::from_ratio(profit, price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn inputs(price: f64, material: f64, shipping: f64, labor: f64, marketing: f64) -> CostInputs {
        CostInputs {
            product_price: price,
            material_cost: material,
            shipping_cost: shipping,
            labor_cost: labor,
            marketing_cost: marketing,
        }
    }

    #[test]
    fn worked_example_matches_fee_schedule() {
        let breakdown = compute(&inputs(20.0, 5.0, 3.0, 2.0, 1.0));

        assert!((breakdown.transaction_fee - 1.30).abs() < EPSILON);
        assert!((breakdown.payment_processing_fee - 0.85).abs() < EPSILON);
        assert_eq!(breakdown.listing_fee, 0.20);
        assert!((breakdown.total_costs - 13.35).abs() < EPSILON);
        assert!((breakdown.profit - 6.65).abs() < EPSILON);
        let margin = breakdown.profit_margin.percent().expect("margin is computable");
        assert!((margin - 33.25).abs() < 1e-6);
    }

    #[test]
    fn zero_price_margin_is_not_computable() {
        let breakdown = compute(&inputs(0.0, 4.0, 1.0, 0.0, 0.0));

        assert_eq!(breakdown.profit_margin, ProfitMargin::NotComputable);
        assert_eq!(breakdown.transaction_fee, 0.0);
        assert_eq!(breakdown.payment_processing_fee, 0.25);
        assert!((breakdown.profit + 5.45).abs() < EPSILON);
    }

    #[test]
    fn all_zero_inputs_still_charge_flat_fees() {
        let breakdown = compute(&CostInputs::default());

        assert!((breakdown.total_costs - 0.45).abs() < EPSILON);
        assert!((breakdown.profit + 0.45).abs() < EPSILON);
        assert!(!breakdown.profit_margin.is_computable());
    }

    #[test]
    fn margin_serializes_as_number_or_null() {
        let computable = serde_json::to_string(&ProfitMargin::Percent(12.5)).unwrap();
        let missing = serde_json::to_string(&ProfitMargin::NotComputable).unwrap();

        assert_eq!(computable, "12.5");
        assert_eq!(missing, "null");
        assert_eq!(
            serde_json::from_str::<ProfitMargin>("null").unwrap(),
            ProfitMargin::NotComputable
        );
    }

    #[test]
    fn overflowing_costs_are_flagged() {
        let breakdown = compute(&inputs(1.7e308, 1.7e308, 0.0, 0.0, 0.0));

        assert!(!breakdown.is_finite());
        assert!(compute(&inputs(20.0, 5.0, 3.0, 2.0, 1.0)).is_finite());
    }

    proptest! {
        #[test]
        fn fees_are_non_negative_for_non_negative_prices(price in 0.0f64..1e6) {
            let breakdown = compute(&inputs(price, 0.0, 0.0, 0.0, 0.0));

            prop_assert!(breakdown.listing_fee >= 0.0);
            prop_assert!(breakdown.transaction_fee >= 0.0);
            prop_assert!(breakdown.payment_processing_fee >= 0.0);
        }

        #[test]
        fn everyday_amounts_never_overflow(
            price in 0.0f64..1e12,
            material in 0.0f64..1e12,
            shipping in 0.0f64..1e12,
            labor in 0.0f64..1e12,
            marketing in 0.0f64..1e12,
        ) {
            let breakdown = compute(&inputs(price, material, shipping, labor, marketing));

            prop_assert!(breakdown.is_finite());
        }

        #[test]
        fn totals_are_the_literal_sum(
            price in 0.01f64..100_000.0,
            material in 0.0f64..10_000.0,
            shipping in 0.0f64..10_000.0,
            labor in 0.0f64..10_000.0,
            marketing in 0.0f64..10_000.0,
        ) {
            let breakdown = compute(&inputs(price, material, shipping, labor, marketing));

            let expected_total = material
                + shipping
                + labor
                + marketing
                + 0.20
                + price * 0.065
                + (price * 0.03 + 0.25);
            prop_assert_eq!(breakdown.listing_fee, 0.20);
            prop_assert_eq!(breakdown.transaction_fee, price * 0.065);
            prop_assert_eq!(breakdown.payment_processing_fee, price * 0.03 + 0.25);
            prop_assert_eq!(breakdown.total_costs, expected_total);
            prop_assert_eq!(breakdown.profit, price - expected_total);
            prop_assert!(breakdown.profit_margin.is_computable());
        }

        #[test]
        fn recomputing_is_bit_identical(
            price in 0.0f64..100_000.0,
            material in 0.0f64..10_000.0,
            shipping in 0.0f64..10_000.0,
        ) {
            let first = compute(&inputs(price, material, shipping, 1.0, 2.0));
            let second = compute(&inputs(price, material, shipping, 1.0, 2.0));

            prop_assert_eq!(first.total_costs.to_bits(), second.total_costs.to_bits());
            prop_assert_eq!(first.profit.to_bits(), second.profit.to_bits());
            prop_assert_eq!(first.profit_margin, second.profit_margin);
        }
    }
}
