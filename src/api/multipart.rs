//! Multipart form parsing for the submission form.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;

use crate::domain::{ImageUpload, SubmissionFields};
use crate::error::DeskError;

/// A submission form as read off the wire, before validation.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    /// Text fields.
    pub fields: SubmissionFields,
    /// The `image` part, if one with content was sent.
    pub image: Option<ImageUpload>,
}

impl SubmissionForm {
    /// Reads every part of the form. Unknown parts are skipped.
    ///
    /// At most `max_image_bytes + 1` bytes of the image are kept, which is
    /// enough for validation to report it as too large. When an oversized
    /// image also overruns the request body limit, reading stops there and
    /// the parts read so far are returned.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::InvalidRequest`] if the body is not valid
    /// multipart data.
    pub async fn read(
        mut multipart: Multipart,
        max_image_bytes: usize,
    ) -> Result<Self, DeskError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let (image, complete) = read_image(field, max_image_bytes).await?;
                // Browsers send an empty part when no file was chosen.
                if !image.bytes.is_empty() {
                    form.image = Some(image);
                }
                if !complete {
                    tracing::debug!(max_image_bytes, "oversized image cut the form short");
                    break;
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| DeskError::InvalidRequest(format!("unreadable field {name}: {e}")))?;
            match name.as_str() {
                "name" => form.fields.name = text,
                "email" => form.fields.email = text,
                "event" => form.fields.event = text,
                "location" => form.fields.location = text,
                "category" => form.fields.category = text,
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

/// Streams the image part, keeping at most `max_bytes + 1` bytes. The
/// flag is `false` when the body limit ended the stream after the image
/// was already known to be too large.
async fn read_image(
    mut field: Field<'_>,
    max_bytes: usize,
) -> Result<(ImageUpload, bool), DeskError> {
    let keep = max_bytes.saturating_add(1);
    let mut image = ImageUpload {
        file_name: field.file_name().unwrap_or_default().to_string(),
        content_type: field.content_type().unwrap_or_default().to_string(),
        bytes: Vec::new(),
    };

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                let room = keep.saturating_sub(image.bytes.len());
                image
                    .bytes
                    .extend_from_slice(chunk.get(..room.min(chunk.len())).unwrap_or_default());
            }
            Ok(None) => return Ok((image, true)),
            Err(e)
                if image.bytes.len() > max_bytes
                    && e.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                return Ok((image, false));
            }
            Err(e) => return Err(invalid(e)),
        }
    }
}

fn invalid(e: MultipartError) -> DeskError {
    DeskError::InvalidRequest(format!("invalid multipart data: {e}"))
}
