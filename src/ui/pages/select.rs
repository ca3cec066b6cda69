use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::AppState,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

#[component]
pub fn SelectPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let selection = state.with(|st| st.selection.clone());

    let on_compare = move |_| {
        let selection = state.with(|st| st.selection.clone());
        match selection.validated() {
            Ok((first, second)) => {
                nav.push(Route::Compare { first, second });
            }
            Err(_) => push_toast(
                toasts,
                ToastKind::Warning,
                "Please select two cities",
                "Both cities are required for comparison",
            ),
        }
    };

    rsx! {
        div {
            section { class: "hero",
                h1 { "Pick two cities" }
                p { "Costs of the first city are compared against the second." }
            }
            div { class: "grid-2",
                div { class: "card field",
                    label { "First city" }
                    input {
                        placeholder: "e.g. New York",
                        value: "{selection.first}",
                        oninput: move |evt| state.with_mut(|st| st.selection.first = evt.value()),
                    }
                }
                div { class: "card field",
                    label { "Second city" }
                    input {
                        placeholder: "e.g. London",
                        value: "{selection.second}",
                        oninput: move |evt| state.with_mut(|st| st.selection.second = evt.value()),
                    }
                }
            }
            div { class: "actions",
                button {
                    class: "btn",
                    onclick: move |_| state.with_mut(|st| st.selection = st.selection.swapped()),
                    "Swap"
                }
                button { class: "btn btn-primary", onclick: on_compare, "Compare cities" }
            }
        }
    }
}
