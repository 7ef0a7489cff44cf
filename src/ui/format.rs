//! Display formatting for amounts and margins.

use crate::domain::{parse_amount, ProfitMargin};

/// Two-decimal dollar amount, sign in front of the symbol.
pub fn currency(value: f64) -> String {
    if value < 0.0 && format!("{:.2}", value.abs()) != "0.00" {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value.abs())
    }
}

/// Currency display for an amount stored as the seller's original text.
pub fn currency_text(raw: &str) -> String {
    currency(parse_amount(raw))
}

pub fn margin(margin: ProfitMargin) -> String {
    match margin {
        ProfitMargin::Percent(percent) => format!("{percent:.1}%"),
        ProfitMargin::NotComputable => "n/a".to_string(),
    }
}
