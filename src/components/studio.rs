//! Main studio screen.
//!
//! Loads the drive once after login, then hosts the Builder and History
//! tabs, the notice line and the bottom action bar.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::builder::{AudioPicker, Configuration, PayloadPreview, Publishing};
use crate::components::drive::{Breadcrumbs, FileList, FolderTree};
use crate::components::history::HistoryView;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::core::drive::load_drive;
use crate::core::log;
use crate::models::{DriveState, NoticeKind, Tab};
use crate::utils::format::pluralize_files;

stylance::import_crate_style!(css, "src/components/studio.module.css");

#[component]
pub fn Studio() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Load the drive whenever it is (back) in the loading state.
    Effect::new(move |_| {
        if ctx.drive.with(|d| matches!(d, DriveState::Loading)) {
            spawn_local(async move {
                match load_drive().await {
                    Ok(roots) => {
                        log::info(&format!("drive loaded ({} roots)", roots.len()));
                        ctx.set_drive(roots);
                    }
                    Err(e) => {
                        log::error(&format!("drive not loaded: {}", e));
                        ctx.drive.set(DriveState::Failed(e.to_string()));
                    }
                }
            });
        }
    });

    view! {
        {move || match ctx.drive.get() {
            DriveState::Loading => view! {
                <div class=css::fullscreen>
                    <span class=css::spinner><Icon icon=ic::LOADER /></span>
                    <p>"Loading drive..."</p>
                </div>
            }.into_any(),
            DriveState::Failed(message) => view! {
                <div class=css::fullscreen>
                    <h2 class=css::failTitle>"Could not load the drive"</h2>
                    <p class=css::failMessage>{message}</p>
                    <button class=css::primary on:click=move |_| ctx.drive.set(DriveState::Loading)>
                        "Try again"
                    </button>
                </div>
            }.into_any(),
            DriveState::Ready(_) => view! { <Workspace /> }.into_any(),
        }}
    }
}

#[component]
fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tab = ctx.tab;

    view! {
        <div class=css::studio>
            <header class=css::header>
                <h1 class=css::brand>{APP_NAME}</h1>
                <nav class=css::tabs role="tablist">
                    <TabButton target=Tab::Builder />
                    <TabButton target=Tab::History />
                </nav>
                <button class=css::logout on:click=move |_| ctx.logout()>
                    <Icon icon=ic::LOGOUT />
                    <span>"Logout"</span>
                </button>
            </header>

            <main class=css::main>
                <Show when=move || tab.get() == Tab::Builder fallback=|| view! { <HistoryView /> }>
                    <Builder />
                </Show>
            </main>

            <NoticeLine />

            <Show when=move || tab.get() == Tab::Builder>
                <ActionBar />
            </Show>

            {move || ctx.builder.preview.get().map(|payload| view! { <PayloadPreview payload=payload /> })}
        </div>
    }
}

#[component]
fn TabButton(target: Tab) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let active = move || ctx.tab.get() == target;

    view! {
        <button
            class=move || if active() { format!("{} {}", css::tab, css::tabActive) } else { css::tab.to_string() }
            role="tab"
            aria-selected=active
            on:click=move |_| ctx.tab.set(target)
        >
            {target.label()}
        </button>
    }
}

#[component]
fn Builder() -> impl IntoView {
    view! {
        <div class=css::builder>
            <aside class=css::panel>
                <h2 class=css::panelTitle>"Drive Browser"</h2>
                <FolderTree />
            </aside>
            <div class=css::column>
                <section class=css::panel>
                    <h2 class=css::panelTitle>"Folder Contents"</h2>
                    <Breadcrumbs />
                    <FileList />
                </section>
                <section class=css::panel>
                    <AudioPicker />
                </section>
                <section class=css::panel>
                    <Configuration />
                </section>
                <section class=css::panel>
                    <Publishing />
                </section>
            </div>
        </div>
    }
}

#[component]
fn NoticeLine() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    move || {
        ctx.notice.get().map(|notice| {
            let kind = match notice.kind {
                NoticeKind::Success => css::success,
                NoticeKind::Error => css::failure,
                NoticeKind::Info => css::info,
            };
            let icon = match notice.kind {
                NoticeKind::Success => ic::CHECK,
                NoticeKind::Error | NoticeKind::Info => ic::INFO,
            };
            view! {
                <div class=format!("{} {}", css::notice, kind) role="status">
                    <Icon icon=icon />
                    <span>{notice.text}</span>
                    <button class=css::noticeClose aria-label="Dismiss" on:click=move |_| ctx.notice.set(None)>
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn ActionBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let selected = Memo::new(move |_| ctx.selected_count());

    view! {
        <footer class=css::actionBar>
            <span class=css::actionInfo>
                {move || format!("{} selected", pluralize_files(selected.get()))}
            </span>
            <button
                class=css::primary
                disabled=move || selected.get() == 0
                on:click=move |_| {
                    ctx.generate();
                }
            >
                <Icon icon=ic::FILE_TEXT />
                <span>"Generate"</span>
            </button>
        </footer>
    }
}
