//! Signup and login pages

use awty_core::views::{AuthForm, AuthMode, AuthOutcome};
use awty_core::TripApi;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn AuthPage(mode: AuthMode) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut form = use_signal(|| AuthForm::new(mode));

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(client) = state.client() else {
            return;
        };
        let Some(credentials) = form.write().begin_submit() else {
            return;
        };
        spawn(async move {
            let result = match mode {
                AuthMode::Signup => client.signup(&credentials).await,
                AuthMode::Login => client.login(&credentials).await,
            };
            let outcome = form.write().finish_submit(result);
            if let AuthOutcome::Redirect(route) = outcome {
                state.signed_in.set(true);
                state.navigate(route);
            }
        });
    };

    let current = form.read();
    let username = current.username.clone();
    let password = current.password.clone();
    let error = current.error().map(str::to_string);
    let submitting = current.is_submitting();
    drop(current);

    let title = mode.title();
    let input_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 10px; border: 1px solid {}; border-radius: 6px; background: {}; color: {}; font: inherit;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "auth-page",
            style: "max-width: 380px; margin: 40px auto; display: flex; flex-direction: column; gap: 12px;",

            h2 { style: "margin: 0;", "{title}" }

            if let Some(error) = error {
                div {
                    class: "alert",
                    role: "alert",
                    style: "padding: 10px 12px; border: 1px solid {colors.error}; border-radius: 6px; color: {colors.error};",
                    "{error}"
                }
            }

            form {
                style: "display: flex; flex-direction: column; gap: 12px;",
                onsubmit: submit,

                label {
                    "Username"
                    input {
                        style: "{input_style}",
                        value: "{username}",
                        required: true,
                        disabled: submitting,
                        oninput: move |evt| form.write().username = evt.value(),
                    }
                }
                label {
                    "Password"
                    input {
                        style: "{input_style}",
                        r#type: "password",
                        value: "{password}",
                        required: true,
                        disabled: submitting,
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                }
                button {
                    r#type: "submit",
                    style: "padding: 8px 14px; border: none; border-radius: 6px; background: {colors.accent}; color: {colors.accent_text}; cursor: pointer;",
                    disabled: submitting,
                    if submitting { "Working..." } else { "{title}" }
                }
            }
        }
    }
}
