use dioxus::prelude::*;

use crate::{domain::CalculationRecord, ui::format};

#[component]
pub fn SavedCalculations(records: Vec<CalculationRecord>) -> Element {
    rsx! {
        section { class: "panel",
            h2 { class: "panel-title", "Saved Calculations" }
            ul { class: "saved-list",
                for record in records {
                    SavedRow { key: "{record.id.0}", record: record.clone() }
                }
            }
        }
    }
}

#[component]
fn SavedRow(record: CalculationRecord) -> Element {
    let price = format::currency_text(&record.form.product_price);
    let profit = format::currency(record.breakdown.profit);
    let margin = format::margin(record.breakdown.profit_margin);

    rsx! {
        li { class: "saved-row",
            div {
                p { class: "saved-price", "Product Price: {price}" }
                p { class: "saved-profit", "Profit: {profit} ({margin})" }
            }
            p { class: "saved-date", "{record.date}" }
        }
    }
}
