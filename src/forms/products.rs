use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Largest price accepted, `99999999.99` expressed in cents.
const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// Message returned when a create payload lacks one of the required fields.
const MISSING_FIELDS_MESSAGE: &str = "Missing required information, product_name, price, and \
stock are required, please structure your request like this: {\"product_name\": \"Basketball\", \
\"price\": 200.00, \"stock\": 3, \"tagIds\": [1, 2, 3]}";

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// `product_name`, `price` or `stock` is missing on creation.
    #[error("{MISSING_FIELDS_MESSAGE}")]
    MissingFields,
    /// The provided name is empty after sanitization.
    #[error("product_name cannot be empty")]
    EmptyName,
    /// The price is negative, not a number or too large.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// A `category` object was sent without an identifier.
    #[error("category.category_id (or category.categoryId) is required")]
    MissingCategoryId,
}

/// Price as sent by clients: a JSON number (`200.5`) or a numeric string
/// (`"200.50"`, `"$200.50"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Converts the price into cents, rounding to the nearest cent.
    pub fn to_cents(&self) -> ProductFormResult<i64> {
        let value = match self {
            PriceInput::Number(value) => *value,
            PriceInput::Text(text) => {
                let trimmed = text.trim();
                let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
                digits.parse::<f64>().map_err(|_| self.invalid())?
            }
        };

        if !value.is_finite() || value < 0.0 {
            return Err(self.invalid());
        }

        let cents = (value * 100.0).round();
        if cents > MAX_PRICE_CENTS as f64 {
            return Err(self.invalid());
        }

        Ok(cents as i64)
    }

    fn invalid(&self) -> ProductFormError {
        let value = match self {
            PriceInput::Number(value) => value.to_string(),
            PriceInput::Text(text) => text.clone(),
        };
        ProductFormError::InvalidPrice { value }
    }
}

/// JSON payload accepted by `POST /api/products`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub product_name: Option<String>,
    pub price: Option<PriceInput>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    /// Tags attached on creation; defaults to none.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = self
            .product_name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        let (Some(name), Some(price), Some(stock)) = (name, self.price, self.stock) else {
            return Err(ProductFormError::MissingFields);
        };

        let mut new_product = NewProduct::new(name, price.to_cents()?, stock)
            .with_tag_ids(self.tag_ids.unwrap_or_default());

        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }

        Ok(new_product)
    }
}

/// Category reference inside a product update, `{"category_id": 1}` or
/// `{"categoryId": 1}`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryReference {
    #[serde(default, rename = "category_id")]
    pub snake_id: Option<i32>,
    #[serde(default, rename = "categoryId")]
    pub camel_id: Option<i32>,
}

impl CategoryReference {
    /// The referenced id; `category_id` wins over `categoryId`.
    pub fn id(&self) -> Option<i32> {
        self.snake_id.or(self.camel_id)
    }
}

/// Tag reference inside a product update, `{"tag_id": 1}`.
#[derive(Debug, Deserialize)]
pub struct TagReference {
    pub tag_id: i32,
}

/// JSON payload accepted by `PUT /api/products/{id}`. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub product_name: Option<String>,
    pub price: Option<PriceInput>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// `null` clears the category, a number moves the product.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category_id: Option<Option<i32>>,
    /// Takes precedence over `category_id`.
    pub category: Option<CategoryReference>,
    /// Flat tag list; takes precedence over `tags`.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
    pub tags: Option<Vec<TagReference>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.product_name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(price) = self.price {
            updates = updates.price_cents(price.to_cents()?);
        }

        if let Some(stock) = self.stock {
            updates = updates.stock(stock);
        }

        match (self.category, self.category_id) {
            (Some(reference), _) => {
                let category_id = reference.id().ok_or(ProductFormError::MissingCategoryId)?;
                updates = updates.category_id(Some(category_id));
            }
            (None, Some(category_id)) => updates = updates.category_id(category_id),
            (None, None) => {}
        }

        let requested_tags = self.tag_ids.or_else(|| {
            self.tags
                .map(|tags| tags.into_iter().map(|tag| tag.tag_id).collect())
        });
        if let Some(tag_ids) = requested_tags {
            updates = updates.tag_ids(tag_ids);
        }

        Ok(updates)
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`).
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
