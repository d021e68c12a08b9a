use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::tag::Tag;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Units currently in stock.
    pub stock: i32,
    /// Identifier of the category the product belongs to.
    pub category_id: Option<i32>,
    /// Category record, loaded by the product readers.
    pub category: Option<Category>,
    /// Tags attached to the product ordered by id, loaded by the product readers.
    pub tags: Vec<Tag>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Price rendered for display, e.g. `$12.50`.
    pub fn display_price(&self) -> String {
        format_price(self.price_cents)
    }
}

/// Renders a price stored in cents as a dollar amount with two decimals.
pub fn format_price(price_cents: i64) -> String {
    let sign = if price_cents < 0 { "-" } else { "" };
    let cents = price_cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Units in stock.
    pub stock: i32,
    /// Optional category assignment.
    pub category_id: Option<i32>,
    /// Tags attached to the product on creation.
    pub tag_ids: Vec<i32>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i32) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            price_cents,
            stock,
            category_id: None,
            tag_ids: Vec::new(),
            updated_at: now,
        }
    }

    /// Assign the product to a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach tags to the product payload.
    pub fn with_tag_ids(mut self, tag_ids: impl Into<Vec<i32>>) -> Self {
        self.tag_ids = tag_ids.into();
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional price update in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Optional stock update.
    pub stock: Option<i32>,
    /// Optional category update; `Some(None)` clears the category.
    pub category_id: Option<Option<i32>>,
    /// Requested tag set; `None` leaves the associations untouched.
    pub tag_ids: Option<Vec<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            price_cents: None,
            stock: None,
            category_id: None,
            tag_ids: None,
            updated_at: now,
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the stock level.
    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Move the product to another category, using `None` to clear it.
    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Replace the product's tags with the given set.
    pub fn tag_ids(mut self, tag_ids: impl Into<Vec<i32>>) -> Self {
        self.tag_ids = Some(tag_ids.into());
        self
    }
}
