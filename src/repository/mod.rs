use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::product_tag::ProductTag;
use crate::domain::tag::{NewTag, Tag, UpdateTag};

pub mod category;
pub mod product;
pub mod product_tag;
pub mod tag;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over category records.
///
/// Returned categories carry their products (ordered by id).
pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Deletes the category and detaches its products, which are kept.
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
///
/// Returned products carry their category and tags.
pub trait ProductReader {
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>>;
}

/// Write operations over product records and their tag associations.
///
/// Every method runs in a single transaction.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Applies the field patch and, when `updates.tag_ids` is set, rewrites
    /// the product's tag associations to match it.
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    /// Deletes the product together with its tag associations.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tag records.
///
/// Returned tags carry their products (ordered by id).
pub trait TagReader {
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    fn get_tag_by_id(&self, tag_id: i32) -> RepositoryResult<Option<Tag>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    /// Deletes the tag and removes it from every product.
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only access to the raw product/tag join rows.
pub trait ProductTagReader {
    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<ProductTag>>;
}
