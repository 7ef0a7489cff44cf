use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Error => "toast toast-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ️",
            ToastKind::Success => "✅",
            ToastKind::Warning => "⚠️",
            ToastKind::Error => "⛔",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Queues a notification, dropping the oldest once the stack is full.
pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    title: impl Into<String>,
    text: impl Into<String>,
) {
    let message = ToastMessage::new(kind, title, text);
    tracing::debug!(kind = ?message.kind, title = %message.title, "toast");
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_VISIBLE_TOASTS {
            entries.remove(0);
        }
        entries.push(message);
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let messages = toasts();

    if messages.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "toast-stack",
            ul {
                for message in messages {
                    ToastCard { key: "{message.id}", message: message.clone(), toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let timer_id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts;
        let id = timer_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let dismiss_id = message.id.clone();
    let mut toasts = toasts;
    rsx! {
        li { class: "{message.kind.class()}",
            span { class: "toast-icon", "{message.kind.icon()}" }
            div {
                p { class: "toast-title", "{message.title}" }
                if !message.text.is_empty() {
                    p { class: "toast-text", "{message.text}" }
                }
            }
            button {
                class: "toast-dismiss",
                onclick: move |_| {
                    let target = dismiss_id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}
