//! Trip creation modal

use awty_core::views::TripListView;
use awty_core::NewTrip;
use dioxus::prelude::*;

use crate::state::AppState;

/// Validate the open form and hand the payload to `on_submit`.
///
/// The request runs in the caller's scope; this modal unmounts as soon as
/// the create succeeds.
pub fn request_submit(mut view: Signal<TripListView>, on_submit: EventHandler<NewTrip>) {
    let payload = view.write().begin_submit();
    if let Some(payload) = payload {
        on_submit.call(payload);
    }
}

/// Modal over the trip map, bound to the form held by `view`.
#[component]
pub fn TripFormModal(mut view: Signal<TripListView>, on_submit: EventHandler<NewTrip>) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let Some(form) = view.read().form().cloned() else {
        return rsx! {};
    };
    let submitting = form.is_submitting();
    let start_location = form.start_location().to_string();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        request_submit(view, on_submit);
    };

    let input_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 10px; border: 1px solid {}; border-radius: 6px; background: {}; color: {}; font: inherit;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "modal-backdrop",
            style: "
                position: fixed;
                inset: 0;
                background: rgba(0, 0, 0, 0.45);
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 10;
            ",

            form {
                class: "modal",
                style: "
                    width: 420px;
                    padding: 20px 24px;
                    border-radius: 10px;
                    background: {colors.bg_secondary};
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                ",
                onsubmit: submit,

                h3 { style: "margin: 0;", "Create a New Trip" }

                if let Some(error) = form.error() {
                    div {
                        class: "alert",
                        role: "alert",
                        style: "display: flex; justify-content: space-between; gap: 8px; color: {colors.error}; border: 1px solid {colors.error}; border-radius: 6px; padding: 8px 10px;",
                        span { "{error}" }
                        button {
                            r#type: "button",
                            style: "background: none; border: none; cursor: pointer; color: {colors.error};",
                            onclick: move |_| {
                                if let Some(form) = view.write().form_mut() {
                                    form.dismiss_error();
                                }
                            },
                            "×"
                        }
                    }
                }

                label {
                    "Start location"
                    input {
                        style: "{input_style}",
                        value: "{start_location}",
                        readonly: true,
                    }
                }
                label {
                    "Name"
                    input {
                        style: "{input_style}",
                        value: "{form.name}",
                        required: true,
                        disabled: submitting,
                        oninput: move |evt| {
                            if let Some(form) = view.write().form_mut() {
                                form.name = evt.value();
                            }
                        },
                    }
                }
                label {
                    "Description"
                    textarea {
                        style: "{input_style} min-height: 70px; resize: vertical;",
                        value: "{form.description}",
                        required: true,
                        disabled: submitting,
                        oninput: move |evt| {
                            if let Some(form) = view.write().form_mut() {
                                form.description = evt.value();
                            }
                        },
                    }
                }
                label {
                    "End location (optional)"
                    input {
                        style: "{input_style}",
                        value: "{form.end_location}",
                        disabled: submitting,
                        oninput: move |evt| {
                            if let Some(form) = view.write().form_mut() {
                                form.end_location = evt.value();
                            }
                        },
                    }
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        r#type: "button",
                        style: "padding: 6px 14px; border: 1px solid {colors.border}; border-radius: 6px; background: none; color: {colors.text_primary}; cursor: pointer;",
                        disabled: submitting,
                        onclick: move |_| view.write().close_form(),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        style: "padding: 6px 14px; border: none; border-radius: 6px; background: {colors.accent}; color: {colors.accent_text}; cursor: pointer;",
                        disabled: submitting,
                        if submitting { "Creating..." } else { "Create Trip" }
                    }
                }
            }
        }
    }
}
