//! File list of the open folder with checkbox selection.
//!
//! Size, duration and date columns only appear when at least one file in
//! the folder carries that value.

use icondata::Icon as IconData;
use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::SelectableItem;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::utils::format::{MediaKind, format_bytes, format_date, format_duration};

stylance::import_crate_style!(css, "src/components/drive/file_list.module.css");

fn get_icon(mime_type: &str) -> IconData {
    match MediaKind::from_mime(mime_type) {
        MediaKind::Audio => ic::FILE_AUDIO,
        MediaKind::Video => ic::FILE_VIDEO,
        MediaKind::Image => ic::FILE_IMAGE,
        MediaKind::Other => ic::FILE,
    }
}

/// Which optional columns the open folder needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Columns {
    size: bool,
    duration: bool,
    date: bool,
}

impl Columns {
    fn for_items(items: &[SelectableItem]) -> Self {
        Self {
            size: items.iter().any(|i| i.size.is_some()),
            duration: items.iter().any(|i| i.duration.is_some()),
            date: items.iter().any(|i| i.modified_time.is_some()),
        }
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let files = ctx.builder.files;
    let items = ctx.folder_files;

    let columns = Memo::new(move |_| items.with(|i| Columns::for_items(i)));
    let all_selected =
        Memo::new(move |_| items.with(|i| files.with(|sel| !i.is_empty() && sel.covers(i))));
    let some_selected = Memo::new(move |_| items.with(|i| files.with(|sel| sel.touches(i))));
    let selected_count = Memo::new(move |_| ctx.selected_count());

    let toggle_all = move |_: ev::Event| {
        if all_selected.get_untracked() {
            files.update(|f| f.clear());
        } else {
            items.with_untracked(|i| files.update(|f| f.select_all(i.iter().map(|i| i.id.as_str()))));
        }
    };

    view! {
        <div class=css::fileList>
            <Show
                when=move || !items.with(Vec::is_empty)
                fallback=|| view! {
                    <div class=css::empty>
                        <Icon icon=ic::FOLDER_OPEN />
                        <p>"This folder has no files"</p>
                    </div>
                }
            >
                <div class=css::toolbar>
                    <label class=css::selectAll>
                        <input
                            type="checkbox"
                            prop:checked=move || all_selected.get()
                            prop:indeterminate=move || some_selected.get() && !all_selected.get()
                            on:change=toggle_all
                        />
                        <span>
                            {move || match selected_count.get() {
                                0 => "Select all".to_string(),
                                n => format!("{} selected", n),
                            }}
                        </span>
                    </label>
                    <Show when=move || some_selected.get()>
                        <button class=css::clear on:click=move |_| files.update(|f| f.clear())>
                            "Clear selection"
                        </button>
                    </Show>
                </div>

                <div class=css::list role="grid" aria-label="Files">
                    <div class=css::listHeader role="row">
                        <span class=css::headerCheck></span>
                        <span class=css::headerIcon></span>
                        <span class=css::headerName>"Name"</span>
                        <Show when=move || columns.get().size>
                            <span class=css::headerMeta>"Size"</span>
                        </Show>
                        <Show when=move || columns.get().duration>
                            <span class=css::headerMeta>"Duration"</span>
                        </Show>
                        <Show when=move || columns.get().date>
                            <span class=css::headerMeta>"Modified"</span>
                        </Show>
                    </div>
                    <For
                        each=move || items.get()
                        key=|item| item.id.clone()
                        children=move |item| view! { <FileListItem item=item columns=columns /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FileListItem(item: SelectableItem, columns: Memo<Columns>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let files = ctx.builder.files;

    let id = item.id.clone();
    let is_selected = {
        let id = id.clone();
        Signal::derive(move || files.with(|f| f.contains(&id)))
    };
    let toggle = move || files.update(|f| f.toggle(&id));

    let icon = get_icon(&item.mime_type);
    let name = if item.name.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        item.name.clone()
    };
    let size = format_bytes(item.size);
    let duration = format_duration(item.duration);
    let date = format_date(item.modified_time.as_deref());

    let mobile_meta = [size.clone(), duration.clone(), date.clone()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    let item_class = move || {
        if is_selected.get() {
            format!("{} {}", css::listItem, css::selected)
        } else {
            css::listItem.to_string()
        }
    };

    let aria_label = format!("File: {}", name);
    let toggle_by_check = toggle.clone();

    view! {
        <div
            class=item_class
            role="row"
            aria-label=aria_label
            aria-selected=move || is_selected.get()
            on:click=move |_| toggle()
        >
            <span class=css::check>
                <input
                    type="checkbox"
                    prop:checked=move || is_selected.get()
                    on:click=|ev| ev.stop_propagation()
                    on:change=move |_| toggle_by_check()
                />
            </span>
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <div class=css::nameWrapper>
                <span class=css::name title=name.clone()>{name.clone()}</span>
                <div class=css::mobileMeta>{mobile_meta}</div>
            </div>
            <Show when=move || columns.get().size>
                <span class=css::meta>{size.clone()}</span>
            </Show>
            <Show when=move || columns.get().duration>
                <span class=css::meta>{duration.clone()}</span>
            </Show>
            <Show when=move || columns.get().date>
                <span class=css::meta>{date.clone()}</span>
            </Show>
        </div>
    }
}
