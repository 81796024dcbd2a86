//! Payload builder UI.
//!
//! Components:
//! - [`AudioPicker`] - manual merge order
//! - [`Configuration`] - output name, thumbnail and audio options
//! - [`Publishing`] - channel, visibility and schedule
//! - [`PayloadPreview`] - review overlay with copy/download/save/send

mod audio_picker;
mod configuration;
mod payload_preview;
mod publishing;

use leptos::prelude::*;
use mergedesk_core::validation::message_for;

use crate::app::AppContext;

pub use audio_picker::AudioPicker;
pub use configuration::Configuration;
pub use payload_preview::PayloadPreview;
pub use publishing::Publishing;

stylance::import_crate_style!(form_css, "src/components/builder/form.module.css");

/// Inline message for one form field from the last Generate attempt.
#[component]
fn FieldError(field: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let message =
        move || ctx.builder.errors.with(|e| message_for(e, field).map(str::to_string));

    view! {
        {move || message().map(|m| view! { <p class=form_css::error role="alert">{m}</p> })}
    }
}
