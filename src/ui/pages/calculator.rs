use dioxus::prelude::*;

use crate::{
    domain::{compute, dates, AppState, CalculationRecord, CostField, FeeBreakdown, LedgerError},
    ui::{
        components::{
            kpi_card::KpiCard,
            profit_indicator::ProfitIndicator,
            saved_calculations::SavedCalculations,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        format,
    },
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let preview = state.with(|st| st.preview());
    let records = state.with(|st| st.ledger.records().to_vec());
    let ready = state.with(|st| st.ledger.is_loaded());

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        save_calculation(state, toasts);
    };

    rsx! {
        div { class: "page",
            section { class: "panel",
                form { class: "cost-form", onsubmit: on_submit,
                    div { class: "field-grid",
                        for field in CostField::ALL {
                            CostInput { key: "{field.label()}", field }
                        }
                    }
                    button {
                        class: "btn-primary btn-wide",
                        r#type: "submit",
                        disabled: !ready,
                        "Save Calculation"
                    }
                }
            }

            ResultsPanel { breakdown: preview }

            if !records.is_empty() {
                SavedCalculations { records }
            }
        }
    }
}

#[component]
fn CostInput(field: CostField) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let value = state.with(|st| st.form.field(field).to_string());

    rsx! {
        div {
            label { class: "field-label", "{field.label()}" }
            input {
                class: "field-input",
                r#type: "number",
                inputmode: "decimal",
                step: "0.01",
                placeholder: "0.00",
                value: value,
                oninput: move |evt| state.with_mut(|st| st.form.set_field(field, evt.value())),
            }
        }
    }
}

#[component]
fn ResultsPanel(breakdown: FeeBreakdown) -> Element {
    rsx! {
        section { class: "panel",
            h2 { class: "panel-title", "Results" }
            div { class: "results-grid",
                KpiCard { title: "Listing Fee".to_string(), value: format::currency(breakdown.listing_fee) }
                KpiCard { title: "Transaction Fee".to_string(), value: format::currency(breakdown.transaction_fee) }
                KpiCard {
                    title: "Payment Processing Fee".to_string(),
                    value: format::currency(breakdown.payment_processing_fee),
                }
                KpiCard {
                    title: "Total Costs".to_string(),
                    value: format::currency(breakdown.total_costs),
                    description: Some("Your costs plus all marketplace fees".to_string()),
                }
                div { class: "results-wide",
                    ProfitIndicator { breakdown }
                }
            }
        }
    }
}

fn save_calculation(mut state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let outcome: Result<CalculationRecord, LedgerError> = state.with_mut(|st| {
        let form = st.form.clone();
        form.validate()?;
        let breakdown = compute(&form.to_inputs());
        st.ledger
            .append(&form, breakdown, dates::now())
            .map(|appended| appended.record)
    });

    match outcome {
        Ok(record) => {
            tracing::debug!(id = record.id.0, "calculation saved from form");
            push_toast(
                toasts,
                ToastKind::Success,
                "Calculation saved!",
                "Your profit calculation has been saved successfully.",
            );
        }
        Err(LedgerError::Validation(err)) => {
            push_toast(toasts, ToastKind::Error, "Error", err.to_string());
        }
        Err(err @ LedgerError::Persistence { .. }) => {
            push_toast(
                toasts,
                ToastKind::Warning,
                "Saved for this session only",
                err.to_string(),
            );
        }
        Err(err @ LedgerError::NotLoaded) => {
            push_toast(toasts, ToastKind::Error, "Error", err.to_string());
        }
    }
}
