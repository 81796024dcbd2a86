//! Output, thumbnail and audio processing settings.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::{ConcatOrder, ThumbnailInput};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use super::{FieldError, form_css};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::{log, thumbnail};
use crate::models::Notice;
use crate::utils::format::pluralize_files;

stylance::import_crate_style!(css, "src/components/builder/configuration.module.css");

/// Optional number input: blank is `None`, garbage is ignored.
fn parse_optional_number(value: &str) -> Option<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

#[component]
pub fn Configuration() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let draft = ctx.builder.draft;
    let selected = Memo::new(move |_| ctx.selected_count());

    let normalize = Memo::new(move |_| draft.with(|d| d.options.normalize_audio));

    view! {
        <section class=form_css::section>
            <h3 class=form_css::heading>"Configuration"</h3>

            <label class=form_css::field>
                <span class=form_css::label>"Output file name"</span>
                <input
                    class=form_css::input
                    type="text"
                    placeholder="output"
                    prop:value=move || draft.with(|d| d.output_file_name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.output_file_name = value);
                    }
                />
                <p class=form_css::hint>".mp4 is appended by the renderer"</p>
                <FieldError field="outputFileName" />
            </label>

            <ThumbnailPicker />

            <label class=form_css::field>
                <span class=form_css::label>"Constant image URL"</span>
                <input
                    class=form_css::input
                    type="url"
                    placeholder="https://..."
                    prop:value=move || draft.with(|d| d.constant_image_url.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.constant_image_url = value);
                    }
                />
                <FieldError field="constantImageUrl" />
            </label>

            <div class=form_css::row>
                <label class=form_css::field>
                    <span class=form_css::label>"Concatenation order"</span>
                    <select
                        class=form_css::select
                        prop:value=move || draft.with(|d| d.options.concat_order.value())
                        on:change=move |ev| {
                            if let Some(order) = ConcatOrder::from_value(&event_target_value(&ev)) {
                                draft.update(|d| d.options.concat_order = order);
                            }
                        }
                    >
                        {ConcatOrder::ALL
                            .into_iter()
                            .map(|o| view! { <option value=o.value()>{o.label()}</option> })
                            .collect_view()}
                    </select>
                    <Show when=move || !ctx.builder.ordered.with(Vec::is_empty)>
                        <p class=form_css::hint>"Manual order is used while audios are ordered"</p>
                    </Show>
                </label>

                <label class=form_css::field>
                    <span class=form_css::label>"Gap between files (s)"</span>
                    <input
                        class=form_css::input
                        type="number"
                        min="0"
                        max="60"
                        step="0.5"
                        prop:value=move || draft.with(|d| d.options.gap_seconds.to_string())
                        on:change=move |ev| {
                            if let Some(Some(gap)) = parse_optional_number(&event_target_value(&ev)) {
                                draft.update(|d| d.options.gap_seconds = gap);
                            }
                        }
                    />
                    <FieldError field="gapSeconds" />
                </label>
            </div>

            <div class=form_css::row>
                <label class=form_css::checkbox>
                    <input
                        type="checkbox"
                        prop:checked=move || normalize.get()
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            draft.update(|d| d.options.normalize_audio = checked);
                        }
                    />
                    <span>"Normalize loudness"</span>
                </label>

                <label class=form_css::field>
                    <span class=form_css::label>"Target loudness (LUFS)"</span>
                    <input
                        class=form_css::input
                        type="number"
                        min="-70"
                        max="0"
                        step="0.5"
                        placeholder="-16"
                        disabled=move || !normalize.get()
                        prop:value=move || {
                            draft.with(|d| {
                                d.options.target_loudness_lufs.map(|v| v.to_string()).unwrap_or_default()
                            })
                        }
                        on:change=move |ev| {
                            if let Some(lufs) = parse_optional_number(&event_target_value(&ev)) {
                                draft.update(|d| d.options.target_loudness_lufs = lufs);
                            }
                        }
                    />
                    <FieldError field="targetLoudnessLUFS" />
                </label>
            </div>

            <label class=form_css::field>
                <span class=form_css::label>"Extra ffmpeg arguments"</span>
                <input
                    class=form_css::input
                    type="text"
                    placeholder="optional"
                    prop:value=move || draft.with(|d| d.options.ffmpeg_args.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let args = (!value.trim().is_empty()).then_some(value);
                        draft.update(|d| d.options.ffmpeg_args = args);
                    }
                />
            </label>

            <p class=form_css::count>{move || format!("{} selected", pluralize_files(selected.get()))}</p>
            <FieldError field="selection" />
        </section>
    }
}

/// Thumbnail from an uploaded image or an image link.
#[component]
fn ThumbnailPicker() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let draft = ctx.builder.draft;
    let file_ref = NodeRef::<leptos::html::Input>::new();
    let (reading, set_reading) = signal(false);

    let preview = Memo::new(move |_| {
        draft.with(|d| match &d.thumbnail {
            Some(ThumbnailInput::Inline { name, data_url, .. }) => {
                Some((data_url.clone(), name.clone()))
            }
            Some(ThumbnailInput::Url { url }) => Some((url.clone(), url.clone())),
            None => None,
        })
    });
    let link_value = Memo::new(move |_| {
        draft.with(|d| match &d.thumbnail {
            Some(ThumbnailInput::Url { url }) => url.clone(),
            _ => String::new(),
        })
    });

    let on_file = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_reading.set(true);
        spawn_local(async move {
            match thumbnail::read_inline(file).await {
                Ok(thumb) => draft.update(|d| d.thumbnail = Some(thumb)),
                Err(e) => {
                    log::warn(&format!("thumbnail rejected: {}", e));
                    ctx.notify(Notice::error(e.to_string()));
                }
            }
            set_reading.set(false);
        });
    };

    let clear = move |_: ev::MouseEvent| {
        draft.update(|d| d.thumbnail = None);
        if let Some(input) = file_ref.get() {
            input.set_value("");
        }
    };

    view! {
        <div class=form_css::field>
            <span class=form_css::label>"Thumbnail"</span>
            <div class=css::thumbRow>
                <input
                    node_ref=file_ref
                    class=css::fileInput
                    type="file"
                    accept="image/*"
                    on:change=on_file
                />
                <span class=css::or>"or"</span>
                <input
                    class=form_css::input
                    type="url"
                    placeholder="Image link"
                    prop:value=move || link_value.get()
                    on:change=move |ev| {
                        let url = event_target_value(&ev).trim().to_string();
                        draft.update(|d| {
                            d.thumbnail = (!url.is_empty()).then_some(ThumbnailInput::Url { url });
                        });
                    }
                />
            </div>
            <Show when=move || reading.get()>
                <p class=form_css::hint>"Reading image..."</p>
            </Show>
            {move || preview.get().map(|(src, alt)| view! {
                <div class=css::preview>
                    <img class=css::previewImage src=src alt=alt />
                    <button class=css::clear aria-label="Remove thumbnail" on:click=clear>
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            })}
        </div>
    }
}
