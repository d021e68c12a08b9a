use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::resolve_alias;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category payloads.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Neither name spelling carried a usable value.
    #[error("Category name (categoryName/category_name) is required")]
    MissingName,
}

/// JSON payload accepted when creating or renaming a category.
///
/// The name may be sent as `categoryName` or `category_name`. The camel-case
/// spelling wins when both carry a value; blank values count as absent.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default, rename = "categoryName")]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub camel_name: Option<String>,
    #[serde(default, rename = "category_name")]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub snake_name: Option<String>,
}

impl CategoryForm {
    /// Validates the payload and returns the canonical, sanitized name.
    pub fn name(&self) -> CategoryFormResult<String> {
        self.validate()?;

        resolve_alias(self.camel_name.as_deref(), self.snake_name.as_deref())
            .ok_or(CategoryFormError::MissingName)
    }

    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        Ok(NewCategory::new(self.name()?))
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        Ok(UpdateCategory::new(self.name()?))
    }
}
