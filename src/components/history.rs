//! Saved payload history.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::HistoryItem;
use mergedesk_core::payload::{payload_file_name, to_pretty_json};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::log;
use crate::models::Notice;
use crate::utils::dom;
use crate::utils::format::{format_timestamp, pluralize_files};

stylance::import_crate_style!(css, "src/components/history.module.css");

const CLEAR_CONFIRM: &str = "Clear all history? This action cannot be undone.";

#[component]
pub fn HistoryView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let entries = ctx.history_entries;

    let on_clear = move |_: ev::MouseEvent| {
        if dom::confirm(CLEAR_CONFIRM) {
            ctx.clear_history();
        }
    };

    view! {
        <section class=css::history>
            <header class=css::header>
                <h2 class=css::title>"History"</h2>
                <Show when=move || !entries.with(Vec::is_empty)>
                    <button class=css::danger on:click=on_clear>
                        <Icon icon=ic::TRASH />
                        <span>"Clear All"</span>
                    </button>
                </Show>
            </header>

            <Show
                when=move || !entries.with(Vec::is_empty)
                fallback=|| view! {
                    <div class=css::empty>
                        <Icon icon=ic::HISTORY />
                        <p>"No history yet"</p>
                        <p class=css::emptyHint>"Generate your first payload to see it here"</p>
                    </div>
                }
            >
                <div class=css::cards>
                    <For
                        each=move || entries.get()
                        key=|item| item.payload.request_id.clone()
                        children=move |item| view! { <HistoryCard item=item /> }
                    />
                </div>
            </Show>
        </section>
    }
}

#[component]
fn HistoryCard(item: HistoryItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let title = if item.payload.output_file_name.is_empty() {
        "(untitled)".to_string()
    } else {
        item.payload.output_file_name.clone()
    };
    let when = format_timestamp(&item.payload.timestamp);
    let files = pluralize_files(item.file_count);
    let status = item.status.as_str();
    let file_name = payload_file_name(&item.payload.request_id);
    let item = StoredValue::new(item);

    let json = move || {
        item.with_value(|i| to_pretty_json(i)).map_err(|e| {
            log::error(&format!("history entry not rendered: {}", e));
        })
    };

    let on_copy = move |_: ev::MouseEvent| {
        let Ok(text) = json() else { return };
        spawn_local(async move {
            if dom::copy_to_clipboard(&text).await {
                ctx.notify(Notice::success("Copied to clipboard"));
            } else {
                ctx.notify(Notice::error("Clipboard is not available"));
            }
        });
    };

    let on_download = move |_: ev::MouseEvent| {
        let saved = json().is_ok_and(|text| dom::download_text(&text, "application/json", &file_name));
        if !saved {
            ctx.notify(Notice::error("Download failed"));
        }
    };

    let on_recreate = move |_: ev::MouseEvent| item.with_value(|i| ctx.recreate(i));

    view! {
        <article class=css::card>
            <div class=css::cardBody>
                <h3 class=css::cardTitle>{title}</h3>
                <p class=css::meta>
                    <span>{when}</span>
                    <span>{files}</span>
                    <span class=css::status>{status}</span>
                </p>
            </div>
            <div class=css::cardActions>
                <button class=css::iconButton title="Copy JSON" aria-label="Copy JSON" on:click=on_copy>
                    <Icon icon=ic::COPY />
                </button>
                <button class=css::iconButton title="Download JSON" aria-label="Download JSON" on:click=on_download>
                    <Icon icon=ic::DOWNLOAD />
                </button>
                <button class=css::iconButton title="Recreate" aria-label="Recreate" on:click=on_recreate>
                    <Icon icon=ic::RESTORE />
                </button>
            </div>
        </article>
    }
}
