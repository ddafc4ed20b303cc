//! Submission form validation.
//!
//! Field rules are declared with `validator` derives; the image checks
//! (presence, size, media type) run alongside them so the caller gets every
//! problem in one pass, keyed by form field name.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use super::Category;
use crate::error::DeskError;

/// Default upper bound on image size: 2 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Media types accepted for the event image.
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Field name -> messages, in form order when serialized.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Text fields of the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmissionFields {
    /// Submitter name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Submitter email.
    #[validate(
        length(min = 1, message = "Email is required"),
        custom(function = "valid_email")
    )]
    pub email: String,
    /// Event title.
    #[validate(length(min = 1, message = "Event name is required"))]
    pub event: String,
    /// Event location.
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    /// Category name as typed or selected.
    #[validate(
        length(min = 1, message = "Category is required"),
        custom(function = "known_category")
    )]
    pub category: String,
}

fn valid_email(email: &str) -> Result<(), ValidationError> {
    // Emptiness is reported by the length rule.
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message(Cow::Borrowed("Invalid email")))
}

fn known_category(category: &str) -> Result<(), ValidationError> {
    if category.is_empty() || category.parse::<Category>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("category").with_message(Cow::Borrowed("Select a valid category")))
}

/// An uploaded image held in memory until the draft is confirmed.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original client-side file name.
    pub file_name: String,
    /// Declared media type.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// File extension for the stored object, derived from the validated
    /// media type. The client's file name never reaches the object path.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            _ => "bin",
        }
    }

    fn check(&self, max_bytes: usize) -> Vec<String> {
        let mut problems = Vec::new();
        if self.bytes.is_empty() {
            problems.push("Image is required".to_string());
            return problems;
        }
        if self.bytes.len() > max_bytes {
            problems.push(format!(
                "Image size too large (max {})",
                human_size(max_bytes)
            ));
        }
        if !ACCEPTED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            problems.push("Unsupported file format".to_string());
        }
        problems
    }
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// A form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Validated text fields.
    pub fields: SubmissionFields,
    /// Parsed category.
    pub category: Category,
    /// Validated image.
    pub image: ImageUpload,
}

impl Submission {
    /// Validates the form. All field and image problems are collected.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Validation`] listing the messages per field.
    pub fn validate(
        fields: SubmissionFields,
        image: Option<ImageUpload>,
        max_image_bytes: usize,
    ) -> Result<Self, DeskError> {
        let fields = fields.normalized();
        let mut errors = match fields.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_messages(&e),
        };

        match &image {
            Some(img) => {
                let problems = img.check(max_image_bytes);
                if !problems.is_empty() {
                    errors.insert("image".to_string(), problems);
                }
            }
            None => {
                errors.insert("image".to_string(), vec!["Image is required".to_string()]);
            }
        }

        let category = fields.category.parse::<Category>().ok();
        match (errors.is_empty(), category, image) {
            (true, Some(category), Some(image)) => Ok(Self {
                fields,
                category,
                image,
            }),
            _ => Err(DeskError::Validation(errors)),
        }
    }
}

impl SubmissionFields {
    /// Trims surrounding whitespace from every field.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            event: self.event.trim().to_string(),
            location: self.location.trim().to_string(),
            category: self.category.trim().to_string(),
        }
    }
}

fn collect_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fields() -> SubmissionFields {
        SubmissionFields {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            event: "Graduation".to_string(),
            location: "Main Hall".to_string(),
            category: "Education".to_string(),
        }
    }

    fn png(len: usize) -> ImageUpload {
        ImageUpload {
            file_name: "poster.PNG".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![7u8; len],
        }
    }

    fn expect_errors(result: Result<Submission, DeskError>) -> FieldErrors {
        match result {
            Err(DeskError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_submission() {
        let Ok(sub) = Submission::validate(fields(), Some(png(10)), DEFAULT_MAX_IMAGE_BYTES)
        else {
            panic!("valid submission rejected");
        };
        assert_eq!(sub.category, Category::Education);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = expect_errors(Submission::validate(
            SubmissionFields::default(),
            None,
            DEFAULT_MAX_IMAGE_BYTES,
        ));
        assert_eq!(errors["name"], vec!["Name is required"]);
        assert_eq!(errors["email"], vec!["Email is required"]);
        assert_eq!(errors["event"], vec!["Event name is required"]);
        assert_eq!(errors["location"], vec!["Location is required"]);
        assert_eq!(errors["category"], vec!["Category is required"]);
        assert_eq!(errors["image"], vec!["Image is required"]);
    }

    #[test]
    fn rejects_bad_email_and_category() {
        let mut f = fields();
        f.email = "not-an-address".to_string();
        f.category = "Concert".to_string();
        let errors = expect_errors(Submission::validate(f, Some(png(1)), DEFAULT_MAX_IMAGE_BYTES));
        assert_eq!(errors["email"], vec!["Invalid email"]);
        assert_eq!(errors["category"], vec!["Select a valid category"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut f = fields();
        f.location = "   ".to_string();
        let errors = expect_errors(Submission::validate(f, Some(png(1)), DEFAULT_MAX_IMAGE_BYTES));
        assert_eq!(errors["location"], vec!["Location is required"]);
    }

    #[test]
    fn image_size_limit_is_inclusive() {
        let at_limit = Submission::validate(fields(), Some(png(2048)), 2048);
        assert!(at_limit.is_ok());
        let errors = expect_errors(Submission::validate(fields(), Some(png(2049)), 2048));
        assert_eq!(errors["image"], vec!["Image size too large (max 2048 bytes)"]);
    }

    #[test]
    fn default_limit_message_mentions_megabytes() {
        let errors = expect_errors(Submission::validate(
            fields(),
            Some(png(DEFAULT_MAX_IMAGE_BYTES + 1)),
            DEFAULT_MAX_IMAGE_BYTES,
        ));
        assert_eq!(errors["image"], vec!["Image size too large (max 2MB)"]);
    }

    #[test]
    fn rejects_unsupported_media_type() {
        let mut img = png(5);
        img.content_type = "image/webp".to_string();
        let errors = expect_errors(Submission::validate(fields(), Some(img), DEFAULT_MAX_IMAGE_BYTES));
        assert_eq!(errors["image"], vec!["Unsupported file format"]);
    }

    #[test]
    fn extension_follows_media_type_not_file_name() {
        let mut img = png(1);
        img.file_name = "evil.html".to_string();
        assert_eq!(img.extension(), "png");
        img.content_type = "image/jpeg".to_string();
        assert_eq!(img.extension(), "jpg");
        img.content_type = "image/gif".to_string();
        assert_eq!(img.extension(), "gif");
        img.content_type = "text/html".to_string();
        assert_eq!(img.extension(), "bin");
    }

    #[test]
    fn url_syntax_in_file_name_is_ignored() {
        for name in ["pic.png?v=2", "pic.png#top", "../../etc/pic.png", "a/b.png"] {
            let mut img = png(1);
            img.file_name = name.to_string();
            assert_eq!(img.extension(), "png", "{name}");
        }
    }
}
