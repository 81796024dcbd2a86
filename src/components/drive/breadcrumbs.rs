//! Breadcrumb trail of the open folder.
//!
//! Every ancestor is a clickable segment; the open folder itself is shown
//! disabled at the end.

use leptos::prelude::*;
use leptos_icons::Icon;
use mergedesk_core::navigator::{breadcrumbs, navigate_to};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/drive/breadcrumbs.module.css");

#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let trail = Memo::new(move |_| {
        ctx.current_folder.with(|id| match id {
            Some(id) => ctx.drive.with(|d| breadcrumbs(d.roots(), id)),
            None => Vec::new(),
        })
    });

    view! {
        <nav class=css::breadcrumbs aria-label="Folder path">
            {move || {
                let trail = trail.get();
                if trail.is_empty() {
                    return view! {
                        <span class=css::placeholder>"Select a folder"</span>
                    }.into_any();
                }

                let last = trail.len() - 1;
                trail
                    .into_iter()
                    .enumerate()
                    .map(|(idx, crumb)| {
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator aria-hidden="true">
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                {if idx == last {
                                    view! { <SegmentCurrent label=crumb.name /> }.into_any()
                                } else {
                                    let id = crumb.id;
                                    view! {
                                        <SegmentLink
                                            label=crumb.name
                                            on_click=move || {
                                                let folder = ctx.drive.with_untracked(|d| {
                                                    navigate_to(d.roots(), &id).map(|n| n.id.clone())
                                                });
                                                if let Some(folder) = folder {
                                                    ctx.open_folder(&folder);
                                                }
                                            }
                                        />
                                    }.into_any()
                                }}
                            </>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </nav>
    }
}

/// Clickable ancestor segment.
#[component]
fn SegmentLink<F>(label: String, on_click: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button class=css::segment on:click=move |_| on_click()>
            <span class=css::icon><Icon icon=ic::FOLDER /></span>
            <span class=css::label>{label}</span>
        </button>
    }
}

/// Open folder (disabled) segment.
#[component]
fn SegmentCurrent(label: String) -> impl IntoView {
    view! {
        <button class=format!("{} {}", css::segment, css::segmentCurrent) disabled=true aria-current="page">
            <span class=css::icon><Icon icon=ic::FOLDER_OPEN /></span>
            <span class=css::label>{label}</span>
        </button>
    }
}
