// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Simulated post creation endpoint.
//!
//! Rejects titles containing `error` (any case) with errors on `title` and
//! `description`, and rejects the public ID `taken` for public posts.
//! Everything else is accepted.

use std::thread;
use std::time::Duration;

use jiff::Timestamp;

use crate::models::post::{PostDraft, Visibility};
use crate::validation::ApiError;
use crate::validation::schema::post::fields;

/// Public ID the simulated backend reports as already in use.
pub const TAKEN_PUBLIC_ID: &str = "taken";

pub const TITLE_CONTAINS_ERROR: &str = "post.errors.titleContainsError";
pub const DESCRIPTION_TOO_VAGUE: &str = "post.errors.descriptionTooVague";
pub const PUBLIC_ID_TAKEN: &str = "post.errors.publicIdTaken";

/// Acknowledgement for an accepted post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub public_id: Option<String>,
    pub accepted_at: Timestamp,
}

/// Answer a submission immediately.
pub fn submit_post(draft: &PostDraft) -> Result<SubmitReceipt, Vec<ApiError>> {
    if draft.title.to_lowercase().contains("error") {
        tracing::warn!(title = %draft.title, "post rejected: title contains \"error\"");
        return Err(vec![
            api_error(
                fields::TITLE,
                TITLE_CONTAINS_ERROR,
                "Title cannot contain the word \"error\"",
            ),
            api_error(
                fields::DESCRIPTION,
                DESCRIPTION_TOO_VAGUE,
                "Description must be more descriptive when title contains \"error\"",
            ),
        ]);
    }

    if draft.visibility == Visibility::Public
        && draft.public_id.as_deref() == Some(TAKEN_PUBLIC_ID)
    {
        tracing::warn!(public_id = TAKEN_PUBLIC_ID, "post rejected: public ID taken");
        return Err(vec![api_error(
            fields::PUBLIC_ID,
            PUBLIC_ID_TAKEN,
            "This public ID is already taken",
        )]);
    }

    tracing::info!(visibility = %draft.visibility, public_id = ?draft.public_id, "post accepted");
    Ok(SubmitReceipt {
        public_id: draft.public_id.clone(),
        accepted_at: Timestamp::now(),
    })
}

/// Answer a submission after `delay`, mimicking network latency.
pub fn submit_post_with_delay(
    draft: &PostDraft,
    delay: Duration,
) -> Result<SubmitReceipt, Vec<ApiError>> {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    submit_post(draft)
}

fn api_error(field: &str, code: &str, message: &str) -> ApiError {
    ApiError {
        message: message.to_string(),
        field: Some(field.to_string()),
        code: Some(code.to_string()),
    }
}
