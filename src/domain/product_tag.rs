use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: i32,
    /// Identifier of the product the tag is attached to.
    pub product_id: i32,
    /// Identifier of the referenced tag record.
    pub tag_id: i32,
    /// Timestamp for when the association was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the association.
    pub updated_at: NaiveDateTime,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: i32,
    /// Identifier of the tag being attached to the product.
    pub tag_id: i32,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}

/// Rows to delete and insert so a product carries exactly the requested tags.
///
/// The plan is a full rewrite: every current association is removed and every
/// requested one inserted, even when a tag appears in both sets. The final
/// association set matches what a minimal diff would produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReconciliation {
    /// Existing associations, each deleted by exact `(product_id, tag_id)` match.
    pub to_remove: Vec<NewProductTag>,
    /// Associations inserted after the removals.
    pub to_add: Vec<NewProductTag>,
}

impl TagReconciliation {
    /// Plan the rewrite of `product_id`'s associations from `current_tag_ids`
    /// to `requested_tag_ids`.
    ///
    /// Duplicate requested ids collapse to one association, keeping the order
    /// of first occurrence.
    pub fn plan(product_id: i32, current_tag_ids: &[i32], requested_tag_ids: &[i32]) -> Self {
        let to_remove = current_tag_ids
            .iter()
            .map(|&tag_id| NewProductTag::new(product_id, tag_id))
            .collect();

        let to_add = unique_tag_ids(requested_tag_ids)
            .into_iter()
            .map(|tag_id| NewProductTag::new(product_id, tag_id))
            .collect();

        Self { to_remove, to_add }
    }

    /// Returns `true` when the plan neither removes nor adds rows.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Deduplicates tag ids while preserving the order of first occurrence.
pub fn unique_tag_ids(tag_ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    tag_ids
        .iter()
        .copied()
        .filter(|tag_id| seen.insert(*tag_id))
        .collect()
}
