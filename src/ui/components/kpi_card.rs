use dioxus::prelude::*;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div { class: "kpi-card",
            p { class: "kpi-title", "{title}" }
            p { class: "kpi-value", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi-description", "{desc}" }
            }
        }
    }
}
