use dioxus::prelude::*;

use crate::{
    domain::{dates, AppState, DateStyle},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
    util::persistence::{save_preferences, PersistenceError},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let current = state.with(|st| st.preferences.date_style);
    let record_count = state.with(|st| st.ledger.len());
    let storage_label = state.with(|st| {
        st.ledger
            .store()
            .root()
            .map(|root| root.display().to_string())
            .unwrap_or_else(|| "Unavailable (saves will fail)".to_string())
    });
    let sample_date = current.format(dates::now());

    let on_style_change = move |evt: FormEvent| {
        let Some(style) = DateStyle::from_key(&evt.value()) else {
            return;
        };
        match apply_date_style(state, style) {
            Ok(()) => push_toast(
                toasts,
                ToastKind::Info,
                "Preferences saved",
                format!("New calculations will be dated {}.", style.name()),
            ),
            Err(err) => push_toast(
                toasts,
                ToastKind::Warning,
                "Preference not saved",
                format!("Applied for this session only: {err}"),
            ),
        }
    };

    rsx! {
        div { class: "page",
            section { class: "panel",
                h2 { class: "panel-title", "Date Format" }
                p { class: "panel-note", "Used for calculations saved from now on. Existing records keep their date." }
                div { class: "settings-row",
                    select {
                        class: "field-input",
                        value: current.key(),
                        onchange: on_style_change,
                        for style in DateStyle::ALL {
                            option { value: style.key(), selected: style == current, "{style.name()}" }
                        }
                    }
                    span { class: "panel-note", "Today: {sample_date}" }
                }
            }

            section { class: "panel",
                h2 { class: "panel-title", "Storage" }
                dl { class: "settings-list",
                    dt { "Location" }
                    dd { "{storage_label}" }
                    dt { "Saved calculations" }
                    dd { "{record_count}" }
                }
            }
        }
    }
}

fn apply_date_style(mut state: Signal<AppState>, style: DateStyle) -> Result<(), PersistenceError> {
    state.with_mut(|st| {
        st.set_date_style(style);
        let preferences = st.preferences.clone();
        save_preferences(st.ledger.store_mut(), &preferences)
    })
}
