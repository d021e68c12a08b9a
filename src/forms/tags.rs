use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::{NewTag, UpdateTag};
use crate::forms::resolve_alias;

/// Maximum allowed length for a tag name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag payloads.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Neither name spelling carried a usable value.
    #[error("Tag name (tag_name/tagName) is required")]
    MissingName,
}

/// JSON payload accepted when creating or renaming a tag.
///
/// Accepts `tagName` or `tag_name`; `tagName` wins when both are non-blank.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default, rename = "tagName")]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub camel_name: Option<String>,
    #[serde(default, rename = "tag_name")]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub snake_name: Option<String>,
}

impl TagForm {
    /// Validates the payload and returns the canonical, sanitized name.
    pub fn name(&self) -> TagFormResult<String> {
        self.validate()?;

        resolve_alias(self.camel_name.as_deref(), self.snake_name.as_deref())
            .ok_or(TagFormError::MissingName)
    }

    /// Validates and sanitizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        Ok(NewTag::new(self.name()?))
    }

    /// Validates and sanitizes the payload into a domain `UpdateTag`.
    pub fn into_update_tag(self) -> TagFormResult<UpdateTag> {
        Ok(UpdateTag::new(self.name()?))
    }
}
