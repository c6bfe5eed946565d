//! Top navigation bar

use awty_core::views::Route;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn NavBar() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let current = (state.route)();
    let signed_in = (state.signed_in)();

    let link_style = |active: bool| {
        let color = if active {
            colors.accent
        } else {
            colors.text_secondary
        };
        format!(
            "background: none; border: none; cursor: pointer; padding: 6px 10px; font-size: 14px; color: {color};"
        )
    };

    rsx! {
        nav {
            class: "nav-bar",
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 12px 24px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_secondary};
            ",

            button {
                style: "background: none; border: none; cursor: pointer; font-weight: 700; font-size: 16px; color: {colors.text_primary};",
                onclick: move |_| state.navigate(Route::Home),
                "Are We There Yet?"
            }
            button {
                style: link_style(matches!(current, Route::Trips | Route::Trip(_))),
                onclick: move |_| state.navigate(Route::Trips),
                "Trips"
            }

            div { style: "flex: 1;" }

            if signed_in {
                button {
                    style: link_style(false),
                    onclick: move |_| state.sign_out(),
                    "Log Out"
                }
            } else {
                button {
                    style: link_style(current == Route::Login),
                    onclick: move |_| state.navigate(Route::Login),
                    "Log In"
                }
                button {
                    style: link_style(current == Route::Signup),
                    onclick: move |_| state.navigate(Route::Signup),
                    "Sign Up"
                }
            }
        }
    }
}
