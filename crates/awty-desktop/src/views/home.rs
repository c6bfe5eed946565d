//! Home view - landing screen

use awty_core::views::Route;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            class: "jumbotron",
            style: "text-align: center; padding: 64px 16px;",

            h1 { style: "font-size: 40px; margin: 0 0 12px;", "Welcome to Trip Planner" }
            p {
                style: "font-size: 18px; color: {colors.text_secondary}; margin: 0 0 24px;",
                "Plan and manage your trips with ease!"
            }
            button {
                style: "
                    padding: 10px 22px;
                    font-size: 16px;
                    border: none;
                    border-radius: 6px;
                    cursor: pointer;
                    background: {colors.accent};
                    color: {colors.accent_text};
                ",
                onclick: move |_| state.navigate(Route::Trips),
                "View Trips"
            }
        }
    }
}
