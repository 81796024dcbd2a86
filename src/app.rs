//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] shared by every
//! screen, and the [`BuilderState`] behind the payload builder.

use std::collections::HashSet;

use chrono::{Local, Utc};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use mergedesk_core::drive::{audio_items, file_items};
use mergedesk_core::history::Recreate;
use mergedesk_core::navigator::{build_path, first_folder};
use mergedesk_core::payload::{RequestStamp, assemble};
use mergedesk_core::schedule::publishing_options;
use mergedesk_core::validation::{validate_merge_request, validate_schedule};
use mergedesk_core::{
    DriveNode, FileSelection, History, HistoryItem, MergeDraft, MergePayload, OrderedAudio,
    OrderedSelection, ReplyOutcome, SelectableItem, TreeState, ValidationError, find_by_id,
};
use wasm_bindgen_futures::spawn_local;

use crate::components::{Login, Studio};
use crate::config::{NOTICE_TIMEOUT_MS, RELOAD_DELAY_MS};
use crate::core::history_store::HistoryBackend;
use crate::core::{log, session, webhook};
use crate::models::{DriveState, Notice, Tab};
use crate::utils::dom;

// ============================================================================
// BuilderState
// ============================================================================

/// Form and selection state of the payload builder.
///
/// The ordered selection lives in a single signal so every rank mutation is
/// serialized through `update`. Its change listener mirrors the derived
/// order into [`BuilderState::ordered`], which is what views subscribe to.
#[derive(Clone, Copy)]
pub struct BuilderState {
    /// Checked files of the open folder.
    pub files: RwSignal<FileSelection>,
    /// Manual order over the open folder's audio files.
    pub order: RwSignal<OrderedSelection>,
    /// Last derived order published by `order`.
    pub ordered: RwSignal<Vec<OrderedAudio>>,
    /// Output name, thumbnail, options and publishing choices.
    pub draft: RwSignal<MergeDraft>,
    /// Raw `datetime-local` value for scheduled publishing.
    pub scheduled_local: RwSignal<String>,
    /// Errors from the last Generate attempt.
    pub errors: RwSignal<Vec<ValidationError>>,
    /// Payload awaiting review in the preview overlay.
    pub preview: RwSignal<Option<MergePayload>>,
}

impl BuilderState {
    pub fn new() -> Self {
        let ordered = RwSignal::new(Vec::new());

        let mut tracker = OrderedSelection::new();
        tracker.on_change(move |order| ordered.set(order.to_vec()));

        Self {
            files: RwSignal::new(FileSelection::new()),
            order: RwSignal::new(tracker),
            ordered,
            draft: RwSignal::new(MergeDraft::default()),
            scheduled_local: RwSignal::new(String::new()),
            errors: RwSignal::new(Vec::new()),
            preview: RwSignal::new(None),
        }
    }

    /// Drop checked files and the manual order.
    pub fn clear_selection(&self) {
        self.files.update(|f| f.clear());
        self.order.update(|o| o.reset());
    }

    /// Put a history entry's form values back.
    pub fn restore(&self, recreate: Recreate) {
        self.scheduled_local.set(recreate.scheduled_input(&Local));
        self.draft.update(|d| {
            d.output_file_name = recreate.output_file_name;
            d.constant_image_url = recreate.constant_image_url;
            d.options = recreate.options;
            d.publishing = recreate.publishing;
        });
        self.files.update(|f| f.replace(recreate.selected_ids));
        self.errors.set(Vec::new());
    }
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read by every screen with
/// `use_context::<AppContext>()`. All fields are signals or memos, so the
/// context is `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Logged in for this tab.
    pub authed: RwSignal<bool>,
    /// Drive forest loading state.
    pub drive: RwSignal<DriveState>,
    /// Folder tree expansion.
    pub tree: RwSignal<TreeState>,
    /// Folder search query.
    pub query: RwSignal<String>,
    /// Identifier of the open folder.
    pub current_folder: RwSignal<Option<String>>,
    /// Files of the open folder.
    pub folder_files: Memo<Vec<SelectableItem>>,
    /// Audio files of the open folder (the ordering catalog).
    pub audio_files: Memo<Vec<SelectableItem>>,
    pub builder: BuilderState,
    /// Saved payloads, newest first.
    pub history_entries: RwSignal<Vec<HistoryItem>>,
    history: StoredValue<History<HistoryBackend>>,
    pub tab: RwSignal<Tab>,
    pub notice: RwSignal<Option<Notice>>,
    /// A webhook request is in flight.
    pub sending: RwSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        let drive = RwSignal::new(DriveState::Loading);
        let current_folder = RwSignal::new(None::<String>);

        let folder_files = Memo::new(move |_| {
            current_folder.with(|id| {
                drive.with(|d| {
                    id.as_deref()
                        .and_then(|id| find_by_id(d.roots(), id))
                        .map(file_items)
                        .unwrap_or_default()
                })
            })
        });
        let audio_files = Memo::new(move |_| {
            current_folder.with(|id| {
                drive.with(|d| {
                    id.as_deref()
                        .and_then(|id| find_by_id(d.roots(), id))
                        .map(audio_items)
                        .unwrap_or_default()
                })
            })
        });

        let history = History::new(HistoryBackend::detect());
        let entries = history.entries().unwrap_or_else(|e| {
            log::warn(&format!("history not loaded: {}", e));
            Vec::new()
        });

        Self {
            authed: RwSignal::new(session::is_authed()),
            drive,
            tree: RwSignal::new(TreeState::new()),
            query: RwSignal::new(String::new()),
            current_folder,
            folder_files,
            audio_files,
            builder: BuilderState::new(),
            history_entries: RwSignal::new(entries),
            history: StoredValue::new(history),
            tab: RwSignal::new(Tab::default()),
            notice: RwSignal::new(None),
            sending: RwSignal::new(false),
        }
    }

    // ------------------------------------------------------------------------
    // Drive navigation
    // ------------------------------------------------------------------------

    /// Install a loaded forest and open its first folder.
    pub fn set_drive(&self, roots: Vec<DriveNode>) {
        let first = first_folder(&roots).map(|f| f.id.clone());
        self.drive.set(DriveState::Ready(roots));
        if let Some(id) = first {
            self.open_folder(&id);
        }
    }

    /// Open a folder. Switching folders clears the selection.
    pub fn open_folder(&self, id: &str) {
        if self.current_folder.with_untracked(|c| c.as_deref() == Some(id)) {
            return;
        }
        self.current_folder.set(Some(id.to_string()));
        self.builder.clear_selection();
    }

    /// Number of checked files in the open folder.
    pub fn selected_count(&self) -> usize {
        let files = self.builder.files;
        self.folder_files
            .with(|items| files.with(|sel| items.iter().filter(|i| sel.contains(&i.id)).count()))
    }

    // ------------------------------------------------------------------------
    // Payload
    // ------------------------------------------------------------------------

    /// Validate the form and open the preview.
    ///
    /// Returns `false` and records the errors if the form is incomplete.
    pub fn generate(&self) -> bool {
        let builder = self.builder;
        let now = Utc::now();
        let mut draft = builder.draft.get_untracked();
        let scheduled = builder.scheduled_local.get_untracked();
        let count = self.selected_count();

        let mut errors = validate_merge_request(&draft, count);
        errors.extend(validate_schedule(
            draft.publishing.visibility,
            &scheduled,
            now,
            &Local,
        ));

        if let Some(first) = errors.first() {
            self.notify(Notice::error(first.message.clone()));
            builder.errors.set(errors);
            return false;
        }
        builder.errors.set(Vec::new());

        draft.publishing = publishing_options(
            draft.publishing.channel,
            draft.publishing.visibility,
            &scheduled,
            &Local,
        );

        let request_id = dom::random_uuid()
            .unwrap_or_else(|| format!("req-{}", now.timestamp_millis()));
        let stamp = RequestStamp::new(request_id, now);

        let payload = self.folder_files.with_untracked(|items| {
            let selected: HashSet<String> = builder.files.with_untracked(|sel| {
                items
                    .iter()
                    .filter(|i| sel.contains(&i.id))
                    .map(|i| i.id.clone())
                    .collect()
            });
            builder
                .ordered
                .with_untracked(|ordered| assemble(&draft, items, &selected, ordered, &stamp))
        });

        builder.preview.set(Some(payload));
        true
    }

    /// Send a payload to the merge webhook.
    ///
    /// On success the page is reloaded to start over; on failure the
    /// preview stays open so the user can retry.
    pub fn send(&self, payload: MergePayload) {
        if self.sending.get_untracked() {
            return;
        }
        self.sending.set(true);
        let ctx = *self;

        spawn_local(async move {
            match webhook::send(&payload).await {
                Ok(outcome) => {
                    let text = match outcome {
                        ReplyOutcome::Download { file_name } => format!("Downloaded {}", file_name),
                        ReplyOutcome::OpenLink(_) => "Opened result link".to_string(),
                        ReplyOutcome::Sent => "Request sent".to_string(),
                    };
                    ctx.notify(Notice::success(text));
                    Timeout::new(RELOAD_DELAY_MS, dom::reload_to_root).forget();
                }
                Err(e) => {
                    log::error(&format!("webhook failed: {}", e));
                    ctx.notify(Notice::error(e.to_string()));
                    ctx.sending.set(false);
                }
            }
        });
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    pub fn save_to_history(&self, payload: MergePayload) {
        let result = self
            .history
            .try_update_value(|h| h.record(HistoryItem::from_payload(payload)));

        match result {
            Some(Ok(items)) => {
                self.history_entries.set(items);
                self.notify(Notice::success("Saved to history"));
            }
            Some(Err(e)) => {
                log::error(&format!("history not saved: {}", e));
                self.notify(Notice::error(format!("Could not save history: {}", e)));
            }
            None => log::error("history store disposed"),
        }
    }

    pub fn clear_history(&self) {
        match self.history.try_update_value(|h| h.clear()) {
            Some(Ok(())) => self.history_entries.set(Vec::new()),
            Some(Err(e)) => {
                log::error(&format!("history not cleared: {}", e));
                self.notify(Notice::error(format!("Could not clear history: {}", e)));
            }
            None => log::error("history store disposed"),
        }
    }

    /// Restore a history entry into the builder.
    pub fn recreate(&self, item: &HistoryItem) {
        let recreate = item.recreate();

        let folder = recreate.selected_ids.first().and_then(|file_id| {
            self.drive.with_untracked(|d| {
                let path = build_path(d.roots(), file_id);
                path.len()
                    .checked_sub(2)
                    .map(|parent| path[parent].id.clone())
            })
        });
        if let Some(folder) = folder {
            self.open_folder(&folder);
        }

        self.builder.restore(recreate);
        self.tab.set(Tab::Builder);
        self.notify(Notice::info("Restored from history"));
    }

    // ------------------------------------------------------------------------
    // Session & notices
    // ------------------------------------------------------------------------

    pub fn logout(&self) {
        session::logout();
        self.authed.set(false);
    }

    /// Show a notice for `NOTICE_TIMEOUT_MS`.
    pub fn notify(&self, notice: Notice) {
        let slot = self.notice;
        slot.set(Some(notice.clone()));
        Timeout::new(NOTICE_TIMEOUT_MS, move || {
            if slot.with_untracked(|n| n.as_ref() == Some(&notice)) {
                slot.set(None);
            }
        })
        .forget();
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Keeps the ordering catalog in sync with the open folder
/// - Shows the login card until the tab is authenticated
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    // Ranks of files that left the catalog are pruned here.
    Effect::new(move |_| {
        let audio = ctx.audio_files.get();
        ctx.builder.order.update(|o| o.set_catalog(audio));
    });

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f6f7fb;
                    color: #1f2937;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #dc2626; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #6b7280; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #ffffff;
                            padding: 1rem;
                            border-radius: 8px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #6b7280;">
                                "Error details"
                            </summary>
                            <ul style="margin: 1rem 0 0 0; padding-left: 1.5rem; color: #dc2626;">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| dom::reload()
                            style="
                                background: #4f46e5;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 8px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <Show when=move || ctx.authed.get() fallback=|| view! { <Login /> }>
                <Studio />
            </Show>
        </ErrorBoundary>
    }
}
