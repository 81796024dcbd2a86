//! Merge webhook submission.
//!
//! The payload is POSTed as JSON. A video reply is saved straight to disk,
//! a JSON reply may carry a result link that is opened in a new tab.

use mergedesk_core::MergePayload;
use mergedesk_core::webhook::{ReplyOutcome, is_video_content_type, json_outcome, video_file_name};

use crate::config::WEBHOOK_URL;
use crate::core::error::{FetchError, WebhookError};
use crate::core::log;
use crate::utils::dom;
use crate::utils::{header, post_json, response_blob, response_text};

/// Send the payload and act on the reply.
pub async fn send(payload: &MergePayload) -> Result<ReplyOutcome, WebhookError> {
    let url = WEBHOOK_URL
        .filter(|url| !url.trim().is_empty())
        .ok_or(FetchError::NotConfigured("MERGEDESK_WEBHOOK_URL"))?;

    let body = serde_json::to_string(payload).map_err(|e| WebhookError::Serialize(e.to_string()))?;
    let resp = post_json(url, &body).await?;

    let content_type = header(&resp, "content-type").unwrap_or_default();
    if is_video_content_type(&content_type) {
        let blob = response_blob(&resp).await?;
        let disposition = header(&resp, "content-disposition");
        let file_name = video_file_name(disposition.as_deref(), &payload.output_file_name);
        if !dom::download_blob(&blob, &file_name) {
            return Err(WebhookError::DownloadFailed);
        }
        log::info(&format!("saved {} from webhook", file_name));
        return Ok(ReplyOutcome::Download { file_name });
    }

    let text = response_text(&resp).await.unwrap_or_default();
    let outcome = json_outcome(&text);
    if let ReplyOutcome::OpenLink(link) = &outcome
        && !dom::open_in_new_tab(link)
    {
        log::warn("result tab was blocked by the browser");
    }
    Ok(outcome)
}
