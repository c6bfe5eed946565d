//! Timed success/error notice

use awty_core::views::BannerKind;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn NoticeBanner(kind: BannerKind, message: String) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let color = match kind {
        BannerKind::Success => colors.success,
        BannerKind::Error => colors.error,
    };

    rsx! {
        div {
            class: "alert",
            role: "alert",
            style: "
                margin-bottom: 16px;
                padding: 12px 16px;
                border: 1px solid {color};
                border-radius: 6px;
                color: {color};
                background: {colors.bg_secondary};
            ",
            "{message}"
        }
    }
}
