//! Manual ordering of the open folder's audio files.
//!
//! Clicking a card appends it to the order; clicking a ranked card (or the
//! chip's close button) removes it and the remaining ranks close the gap.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::{OrderedAudio, SelectableItem};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/builder/audio_picker.module.css");

/// `1:intro.mp3 → 2:main.mp3`
fn order_summary(ordered: &[OrderedAudio]) -> String {
    ordered
        .iter()
        .map(|a| format!("{}:{}", a.order, a.name))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[component]
pub fn AudioPicker() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let order = ctx.builder.order;
    let ordered = ctx.builder.ordered;

    view! {
        <section class=css::picker>
            <header class=css::header>
                <h3 class=css::title>"Select audios"</h3>
                <button
                    class=css::reset
                    disabled=move || ordered.with(Vec::is_empty)
                    on:click=move |_| order.update(|o| o.reset())
                >
                    <Icon icon=ic::RESTORE />
                    <span>"Reset"</span>
                </button>
            </header>

            <div class=css::dock aria-label="Selected order">
                <Show
                    when=move || !ordered.with(Vec::is_empty)
                    fallback=|| view! {
                        <span class=css::hint>"Tap audios below to set the merge order"</span>
                    }
                >
                    <For
                        each=move || ordered.get()
                        key=|audio| (audio.id.clone(), audio.order)
                        children=move |audio| {
                            let id = audio.id.clone();
                            view! {
                                <span class=css::chip>
                                    <span class=css::badge>{audio.order}</span>
                                    <span class=css::chipName title=audio.name.clone()>{audio.name.clone()}</span>
                                    <button
                                        class=css::chipRemove
                                        aria-label="Remove from order"
                                        on:click=move |_| order.update(|o| o.remove(&id))
                                    >
                                        <Icon icon=ic::CLOSE />
                                    </button>
                                </span>
                            }
                        }
                    />
                </Show>
            </div>

            <Show
                when=move || !ctx.audio_files.with(Vec::is_empty)
                fallback=|| view! { <p class=css::hint>"No audio files in this folder"</p> }
            >
                <div class=css::grid role="listbox" aria-multiselectable="true">
                    <For
                        each=move || ctx.audio_files.get()
                        key=|item| item.id.clone()
                        children=move |item| view! { <AudioCard item=item /> }
                    />
                </div>
            </Show>

            <Show when=move || ordered.with(|o| o.len() > 1)>
                <p class=css::summary>
                    "Final order: " {move || ordered.with(|o| order_summary(o))}
                </p>
            </Show>
        </section>
    }
}

#[component]
fn AudioCard(item: SelectableItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let order = ctx.builder.order;
    let ordered = ctx.builder.ordered;

    let id = item.id.clone();
    let rank = {
        let id = id.clone();
        Memo::new(move |_| {
            ordered.with(|o| o.iter().find(|a| a.id == id).map(|a| a.order))
        })
    };

    let toggle = move || {
        order.update(|o| match o.rank_of(&id) {
            Some(_) => o.remove(&id),
            None => o.select(&id),
        })
    };
    let toggle_by_key = toggle.clone();

    let on_keydown = move |ev: ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" | " " => {
            ev.prevent_default();
            toggle_by_key();
        }
        _ => {}
    };

    let card_class = move || {
        if rank.get().is_some() {
            format!("{} {}", css::card, css::cardSelected)
        } else {
            css::card.to_string()
        }
    };

    let mime = if item.mime_type.is_empty() {
        "audio".to_string()
    } else {
        item.mime_type.clone()
    };

    view! {
        <div
            class=card_class
            role="option"
            tabindex="0"
            aria-selected=move || rank.get().is_some()
            on:click=move |_| toggle()
            on:keydown=on_keydown
        >
            {move || rank.get().map(|r| view! { <span class=css::cardBadge>{r}</span> })}
            <span class=css::cardIcon aria-hidden="true"><Icon icon=ic::FILE_AUDIO /></span>
            <span class=css::cardName title=item.name.clone()>{item.name.clone()}</span>
            <span class=css::cardMime>{mime}</span>
        </div>
    }
}
