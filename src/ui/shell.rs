use dioxus::prelude::*;

use crate::app::Route;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let version = version_label();

    rsx! {
        div {
            header { class: "shell-header",
                div {
                    span { class: "shell-title", "{APP_NAME}" }
                    span { class: "shell-version", "{version}" }
                }
                nav { class: "shell-nav",
                    NavButton {
                        active: matches!(current_route, Route::Home {}),
                        onclick: move |_| { nav.push(Route::Home {}); },
                        label: "Home",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Select {} | Route::Compare { .. }),
                        onclick: move |_| { nav.push(Route::Select {}); },
                        label: "Compare",
                    }
                }
            }
            main { class: "shell-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "nav-button active"
    } else {
        "nav-button"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
