use dioxus::prelude::*;

use crate::{
    domain::AppState,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{ComparePage, HomePage, SelectPage},
        shell::Shell,
    },
    util::{assets, settings::load_settings},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/compare")]
    Select {},
    #[route("/compare/:first/:second")]
    Compare { first: String, second: String },
}

#[component]
pub fn App() -> Element {
    let state = use_signal(|| AppState::new(load_settings()));
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_hook(move || {
        let has_key = state.with(|st| {
            st.settings
                .pricing
                .api_key
                .as_deref()
                .is_some_and(|key| !key.is_empty())
        });
        if !has_key {
            push_toast(
                toasts,
                ToastKind::Info,
                "No pricing API key configured",
                "Set CITYCOST_API_KEY to load live prices; estimates are shown until then.",
            );
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Home() -> Element {
    rsx! { Shell { HomePage {} } }
}

#[component]
pub fn Select() -> Element {
    rsx! { Shell { SelectPage {} } }
}

#[component]
pub fn Compare(first: String, second: String) -> Element {
    rsx! { Shell { ComparePage { first, second } } }
}
