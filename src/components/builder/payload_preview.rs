//! Payload review overlay.
//!
//! Shows the pretty-printed request and offers copy, download, saving to
//! history and sending to the merge webhook.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::MergePayload;
use mergedesk_core::payload::{payload_file_name, to_pretty_json};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::log;
use crate::models::Notice;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/builder/payload_preview.module.css");

#[component]
pub fn PayloadPreview(payload: MergePayload) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let preview = ctx.builder.preview;
    let sending = ctx.sending;

    let json = match to_pretty_json(&payload) {
        Ok(json) => json,
        Err(e) => {
            log::error(&format!("payload not rendered: {}", e));
            format!("/* {} */", e)
        }
    };
    let file_name = payload_file_name(&payload.request_id);
    let payload = StoredValue::new(payload);
    let json = StoredValue::new(json);

    let close = move || {
        if !sending.get_untracked() {
            preview.set(None);
        }
    };

    let on_copy = move |_: ev::MouseEvent| {
        let text = json.get_value();
        spawn_local(async move {
            if dom::copy_to_clipboard(&text).await {
                ctx.notify(Notice::success("Copied to clipboard"));
            } else {
                ctx.notify(Notice::error("Clipboard is not available"));
            }
        });
    };

    let on_download = move |_: ev::MouseEvent| {
        let saved = json.with_value(|text| dom::download_text(text, "application/json", &file_name));
        if !saved {
            ctx.notify(Notice::error("Download failed"));
        }
    };

    let on_save = move |_: ev::MouseEvent| {
        ctx.save_to_history(payload.get_value());
        preview.set(None);
    };

    let on_send = move |_: ev::MouseEvent| ctx.send(payload.get_value());

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    let dialog_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move || {
        if let Some(el) = dialog_ref.get() {
            let _ = el.focus();
        }
    });

    view! {
        <div class=css::backdrop on:click=move |_| close()>
            <div
                node_ref=dialog_ref
                class=css::dialog
                role="dialog"
                aria-modal="true"
                aria-label="Payload preview"
                tabindex="-1"
                on:click=|ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <header class=css::header>
                    <h2 class=css::title>"Payload preview"</h2>
                    <button class=css::iconButton aria-label="Close" on:click=move |_| close()>
                        <Icon icon=ic::CLOSE />
                    </button>
                </header>

                <pre class=css::json>{json.get_value()}</pre>

                <footer class=css::actions>
                    <button class=css::button on:click=on_copy>
                        <Icon icon=ic::COPY />
                        <span>"Copy JSON"</span>
                    </button>
                    <button class=css::button on:click=on_download>
                        <Icon icon=ic::DOWNLOAD />
                        <span>"Download JSON"</span>
                    </button>
                    <button class=css::button on:click=on_save disabled=move || sending.get()>
                        <Icon icon=ic::HISTORY />
                        <span>"Save to History"</span>
                    </button>
                    <button
                        class=format!("{} {}", css::button, css::primary)
                        on:click=on_send
                        disabled=move || sending.get()
                    >
                        {move || if sending.get() {
                            view! {
                                <span class=css::spinner><Icon icon=ic::LOADER /></span>
                                <span>"Sending…"</span>
                            }.into_any()
                        } else {
                            view! {
                                <Icon icon=ic::SEND />
                                <span>"Send"</span>
                            }.into_any()
                        }}
                    </button>
                </footer>
            </div>
        </div>
    }
}
