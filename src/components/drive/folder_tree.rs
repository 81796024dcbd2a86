//! Folder tree with search.
//!
//! Only folders are listed. While the search box is non-empty every
//! matching branch is forced open and the chevrons are inert.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use mergedesk_core::TreeRow;
use mergedesk_core::tree::visible_rows;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/drive/folder_tree.module.css");

/// Search box plus the folder tree.
#[component]
pub fn FolderTree() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let rows = Memo::new(move |_| {
        ctx.query.with(|query| {
            ctx.drive
                .with(|d| ctx.tree.with(|state| visible_rows(d.roots(), query, state)))
        })
    });

    view! {
        <div class=css::tree>
            <label class=css::search>
                <span class=css::searchIcon aria-hidden="true"><Icon icon=ic::SEARCH /></span>
                <input
                    type="search"
                    class=css::searchInput
                    placeholder="Search folders..."
                    aria-label="Search folders"
                    prop:value=ctx.query
                    on:input=move |ev| ctx.query.set(event_target_value(&ev))
                />
            </label>

            <div class=css::rows role="tree" aria-label="Folders">
                <For
                    each=move || rows.get()
                    key=|row| (row.id.clone(), row.is_open, row.can_toggle)
                    children=move |row| view! { <FolderRow row=row /> }
                />
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class=css::empty>"No folders match"</p>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn FolderRow(row: TreeRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let id = row.id.clone();
    let is_current = {
        let id = id.clone();
        Memo::new(move |_| ctx.current_folder.with(|c| c.as_deref() == Some(id.as_str())))
    };

    let indent = format!("padding-left: {}rem", 0.5 + row.depth as f32 * 1.0);
    let folder_icon = if row.is_open { ic::FOLDER_OPEN } else { ic::FOLDER };
    let chevron = if row.is_open { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT };

    let open = {
        let id = id.clone();
        move || ctx.open_folder(&id)
    };

    let toggle_row = row.clone();
    let on_toggle = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        ctx.tree.update(|t| t.toggle(&toggle_row));
    };

    let key_row = row.clone();
    let open_by_key = open.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| match ev.key().as_str() {
        "ArrowRight" => {
            ev.prevent_default();
            ctx.tree.update(|t| t.expand(&key_row));
        }
        "ArrowLeft" => {
            ev.prevent_default();
            ctx.tree.update(|t| t.collapse(&key_row));
        }
        "Enter" | " " => {
            ev.prevent_default();
            open_by_key();
        }
        _ => {}
    };

    let row_class = move || {
        if is_current.get() {
            format!("{} {}", css::row, css::current)
        } else {
            css::row.to_string()
        }
    };

    view! {
        <div
            class=row_class
            style=indent
            role="treeitem"
            tabindex="0"
            aria-expanded=row
                .has_folder_children
                .then_some(if row.is_open { "true" } else { "false" })
            aria-selected=move || is_current.get()
            on:click=move |_| open()
            on:keydown=on_keydown
        >
            <span class=css::chevron>
                {row.has_folder_children.then(|| view! {
                    <button
                        class=css::toggle
                        tabindex="-1"
                        disabled=!row.can_toggle
                        aria-label="Toggle folder"
                        on:click=on_toggle
                    >
                        <Icon icon=chevron />
                    </button>
                })}
            </span>
            <span class=css::icon aria-hidden="true"><Icon icon=folder_icon /></span>
            <span class=css::name>{row.name.clone()}</span>
        </div>
    }
}
