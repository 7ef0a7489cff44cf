use dioxus::prelude::*;

use crate::{
    domain::AppState,
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{CalculatorPage, SettingsPage},
        shell::Shell,
    },
    util::{assets, config::AppConfig},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    // Storage is read exactly once, when the root signal is created.
    let state = use_signal(|| AppState::open(&AppConfig::from_env()));
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
