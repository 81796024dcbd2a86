//! Channel, visibility and scheduled publish time.

use chrono::{Local, Utc};
use leptos::prelude::*;
use mergedesk_core::schedule::{is_schedule_in_future, to_input_local};
use mergedesk_core::{Channel, Visibility};

use super::{FieldError, form_css};
use crate::app::AppContext;

#[component]
pub fn Publishing() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let draft = ctx.builder.draft;
    let scheduled_local = ctx.builder.scheduled_local;

    let is_scheduled =
        Memo::new(move |_| draft.with(|d| d.publishing.visibility == Visibility::Schedule));
    let in_past = move || {
        scheduled_local.with(|s| !s.is_empty() && !is_schedule_in_future(s, Utc::now(), &Local))
    };

    view! {
        <section class=form_css::section>
            <h3 class=form_css::heading>"Publishing"</h3>

            <div class=form_css::row>
                <label class=form_css::field>
                    <span class=form_css::label>"Channel"</span>
                    <select
                        class=form_css::select
                        prop:value=move || draft.with(|d| d.publishing.channel.label())
                        on:change=move |ev| {
                            if let Some(channel) = Channel::from_label(&event_target_value(&ev)) {
                                draft.update(|d| d.publishing.channel = channel);
                            }
                        }
                    >
                        {Channel::ALL
                            .into_iter()
                            .map(|c| view! { <option value=c.label()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label class=form_css::field>
                    <span class=form_css::label>"Visibility"</span>
                    <select
                        class=form_css::select
                        prop:value=move || draft.with(|d| d.publishing.visibility.value())
                        on:change=move |ev| {
                            if let Some(visibility) = Visibility::from_value(&event_target_value(&ev)) {
                                draft.update(|d| d.publishing.visibility = visibility);
                            }
                        }
                    >
                        {Visibility::ALL
                            .into_iter()
                            .map(|v| view! { <option value=v.value()>{v.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <Show when=move || is_scheduled.get()>
                <label class=form_css::field>
                    <span class=form_css::label>"Publish at (local time)"</span>
                    <input
                        class=move || {
                            if in_past() {
                                format!("{} {}", form_css::input, form_css::invalid)
                            } else {
                                form_css::input.to_string()
                            }
                        }
                        type="datetime-local"
                        min=move || to_input_local(&Local::now())
                        prop:value=scheduled_local
                        on:input=move |ev| scheduled_local.set(event_target_value(&ev))
                    />
                    <Show when=in_past>
                        <p class=form_css::error>"Pick a time in the future"</p>
                    </Show>
                    <FieldError field="scheduledTime" />
                </label>
            </Show>
        </section>
    }
}
