use dioxus::prelude::*;

use crate::app::Route;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "header-inner",
                    div {
                        h1 { class: "app-title", "{APP_NAME}" }
                        p { class: "app-version", "{version_label()}" }
                    }
                    nav { class: "app-nav",
                        NavButton {
                            active: matches!(current_route, Route::Calculator {}),
                            onclick: move |_| { nav.push(Route::Calculator {}); },
                            label: "Calculator",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "Settings",
                        }
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active { "nav-button nav-active" } else { "nav-button" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
