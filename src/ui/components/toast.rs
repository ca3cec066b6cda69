use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const TOAST_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Error => "toast toast-error",
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

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    title: impl Into<String>,
    text: impl Into<String>,
) {
    let message = ToastMessage::new(kind, title, text);
    toasts.with_mut(|entries| {
        if entries.len() >= TOAST_LIMIT {
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
        ul { class: "toast-stack",
            for message in messages {
                ToastCard { key: "{message.id}", message, toasts }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let timer_id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let id = timer_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            dismiss(toasts, &id);
        }
    });

    let dismiss_id = message.id.clone();
    rsx! {
        li { class: "{message.kind.class()}",
            div {
                p { class: "toast-title", "{message.title}" }
                p { class: "toast-text", "{message.text}" }
            }
            button {
                class: "btn",
                onclick: move |_| dismiss(toasts, &dismiss_id),
                "Dismiss"
            }
        }
    }
}

fn dismiss(mut toasts: Signal<Vec<ToastMessage>>, id: &str) {
    toasts.with_mut(|items| items.retain(|toast| toast.id != id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_style() {
        let error = ToastMessage::new(ToastKind::Error, "Comparison failed", "boom");
        assert_eq!(error.kind.class(), "toast toast-error");
        assert_eq!(ToastKind::Warning.class(), "toast toast-warning");
        assert_eq!(ToastKind::Info.class(), "toast toast-info");
    }

    #[test]
    fn messages_get_distinct_ids() {
        let first = ToastMessage::new(ToastKind::Info, "a", "b");
        let second = ToastMessage::new(ToastKind::Info, "a", "b");
        assert_ne!(first.id, second.id);
    }
}
