use dioxus::prelude::*;

use crate::{domain::FeeBreakdown, ui::format};

/// Estimated profit with its margin, tinted by whether the listing loses money.
#[component]
pub fn ProfitIndicator(breakdown: FeeBreakdown) -> Element {
    let (tone, label) = if breakdown.profit >= 0.0 {
        ("profit-card profit-positive", "Estimated Profit")
    } else {
        ("profit-card profit-negative", "Estimated Loss")
    };
    let margin_line = if breakdown.profit_margin.is_computable() {
        format!("Profit Margin: {}", format::margin(breakdown.profit_margin))
    } else {
        "Profit Margin: n/a (enter a price above zero)".to_string()
    };

    rsx! {
        div { class: "{tone}",
            p { class: "kpi-title", "{label}" }
            p { class: "profit-value", "{format::currency(breakdown.profit)}" }
            p { class: "kpi-description", "{margin_line}" }
        }
    }
}
