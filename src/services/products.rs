use serde::Serialize;

use crate::domain::product::{Product, format_price};
use crate::domain::product_tag::unique_tag_ids;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{CategoryReader, ProductReader, ProductWriter, TagReader};
use crate::services::{ServiceError, ServiceResult, not_found_as};

/// Category reference embedded in a product response.
///
/// Both fields are `null` when the product has no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCategoryView {
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
}

/// Tag reference embedded in a product response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTagView {
    pub tag_id: i32,
    pub tag_name: String,
}

/// Product as returned by the `/api/products` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub product_name: String,
    /// Dollar formatted price, e.g. `$12.50`.
    pub price: String,
    pub stock: i32,
    pub category: ProductCategoryView,
    pub tags: Vec<ProductTagView>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let price = product.display_price();
        let Product {
            id,
            name,
            stock,
            category,
            tags,
            ..
        } = product;

        let category = ProductCategoryView {
            category_id: category.as_ref().map(|category| category.id),
            category_name: category.map(|category| category.name),
        };

        let tags = tags
            .into_iter()
            .map(|tag| ProductTagView {
                tag_id: tag.id,
                tag_name: tag.name,
            })
            .collect();

        Self {
            id,
            product_name: name,
            price,
            stock,
            category,
            tags,
        }
    }
}

/// Product nested inside category and tag responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummaryView {
    pub product_id: i32,
    pub product_name: String,
    pub price: String,
    pub stock: i32,
}

impl From<Product> for ProductSummaryView {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            price: format_price(product.price_cents),
            product_name: product.name,
            stock: product.stock,
        }
    }
}

fn product_not_found(product_id: i32) -> String {
    format!("No product found with id {product_id}")
}

/// Lists every product with its category and tags.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products()?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// Loads a single product.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .map(ProductView::from)
        .ok_or_else(|| ServiceError::NotFound(product_not_found(product_id)))
}

/// Creates a product and attaches the tags listed in `tagIds`.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<ProductView>
where
    R: ProductWriter + CategoryReader + TagReader + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if let Some(category_id) = new_product.category_id {
        ensure_category_exists(repo, category_id)?;
    }
    ensure_tags_exist(repo, &new_product.tag_ids)?;

    let created = repo.create_product(&new_product)?;
    Ok(created.into())
}

/// Updates a product's fields and, when tags are supplied, rewrites its tag
/// associations.
///
/// Every referenced category and tag must exist; otherwise nothing changes.
pub fn update_product<R>(
    repo: &R,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<ProductView>
where
    R: ProductReader + ProductWriter + CategoryReader + TagReader + ?Sized,
{
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound(product_not_found(product_id)));
    }

    if let Some(Some(category_id)) = updates.category_id {
        ensure_category_exists(repo, category_id)?;
    }
    if let Some(tag_ids) = updates.tag_ids.as_deref() {
        ensure_tags_exist(repo, tag_ids)?;
    }

    let updated = repo
        .update_product(product_id, &updates)
        .map_err(not_found_as(product_not_found(product_id)))?;

    Ok(updated.into())
}

/// Deletes a product together with its tag associations.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id)
        .map_err(not_found_as(product_not_found(product_id)))
}

fn ensure_category_exists<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    match repo.get_category_by_id(category_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound(format!(
            "No category found with id {category_id}"
        ))),
    }
}

fn ensure_tags_exist<R>(repo: &R, tag_ids: &[i32]) -> ServiceResult<()>
where
    R: TagReader + ?Sized,
{
    for tag_id in unique_tag_ids(tag_ids) {
        if repo.get_tag_by_id(tag_id)?.is_none() {
            return Err(ServiceError::NotFound(format!("No tag found with id {tag_id}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
    use serde_json::json;

    use crate::domain::category::Category;
    use crate::domain::product::{NewProduct, UpdateProduct};
    use crate::domain::tag::Tag;
    use crate::repository::mock::{
        MockCategoryReader, MockProductReader, MockProductWriter, MockTagReader,
    };

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            products: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            products: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_product(id: i32, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_cents,
            stock: 3,
            category_id: None,
            category: None,
            tags: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        product_writer: MockProductWriter,
        category_reader: MockCategoryReader,
        tag_reader: MockTagReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                product_writer: MockProductWriter::new(),
                category_reader: MockCategoryReader::new(),
                tag_reader: MockTagReader::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn list_products(&self) -> RepositoryResult<Vec<Product>> {
            self.product_reader.list_products()
        }

        fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(product_id)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.product_writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.product_writer.update_product(product_id, updates)
        }

        fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
            self.product_writer.delete_product(product_id)
        }
    }

    impl CategoryReader for FakeRepo {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.category_reader.list_categories()
        }

        fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>> {
            self.category_reader.get_category_by_id(category_id)
        }
    }

    impl TagReader for FakeRepo {
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>> {
            self.tag_reader.list_tags()
        }

        fn get_tag_by_id(&self, tag_id: i32) -> RepositoryResult<Option<Tag>> {
            self.tag_reader.get_tag_by_id(tag_id)
        }
    }

    fn add_form(value: serde_json::Value) -> AddProductForm {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    fn edit_form(value: serde_json::Value) -> EditProductForm {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn product_view_shapes_category_and_tags() {
        let mut product = sample_product(4, "Basketball", 20000);
        product.category_id = Some(2);
        product.category = Some(sample_category(2, "Sports"));
        product.tags = vec![sample_tag(1, "rare"), sample_tag(5, "vintage")];

        let value = serde_json::to_value(ProductView::from(product)).expect("serializable");

        assert_eq!(
            value,
            json!({
                "id": 4,
                "product_name": "Basketball",
                "price": "$200.00",
                "stock": 3,
                "category": { "category_id": 2, "category_name": "Sports" },
                "tags": [
                    { "tag_id": 1, "tag_name": "rare" },
                    { "tag_id": 5, "tag_name": "vintage" }
                ]
            })
        );
    }

    #[test]
    fn product_view_without_category_has_null_reference() {
        let view = ProductView::from(sample_product(1, "Cap", 999));

        assert_eq!(view.category.category_id, None);
        assert_eq!(view.category.category_name, None);
        assert!(view.tags.is_empty());
    }

    #[test]
    fn product_summary_view_formats_price() {
        let summary = ProductSummaryView::from(sample_product(7, "Cap", 1250));

        assert_eq!(summary.product_id, 7);
        assert_eq!(summary.price, "$12.50");
    }

    #[test]
    fn list_products_returns_views() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_list_products()
            .times(1)
            .returning(|| {
                Ok(vec![
                    sample_product(1, "Cap", 100),
                    sample_product(2, "Bat", 250),
                ])
            });

        let views = list_products(&repo).expect("expected success");

        assert_eq!(views.len(), 2);
        assert_eq!(views[1].price, "$2.50");
    }

    #[test]
    fn get_product_reports_missing_id() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_product(&repo, 42);

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "No product found with id 42")
        );
    }

    #[test]
    fn create_product_checks_tags_then_persists() {
        let mut repo = FakeRepo::new();
        repo.tag_reader
            .expect_get_tag_by_id()
            .times(2)
            .returning(|tag_id| Ok(Some(sample_tag(tag_id, "tag"))));
        repo.product_writer
            .expect_create_product()
            .times(1)
            .withf(|new_product| {
                assert_eq!(new_product.name, "Basketball");
                assert_eq!(new_product.price_cents, 20000);
                assert_eq!(new_product.tag_ids, vec![1, 2]);
                true
            })
            .returning(|new_product| {
                let mut product = sample_product(9, &new_product.name, new_product.price_cents);
                product.tags = vec![sample_tag(1, "one"), sample_tag(2, "two")];
                Ok(product)
            });

        let view = create_product(
            &repo,
            add_form(json!({
                "product_name": "Basketball",
                "price": 200.00,
                "stock": 3,
                "tagIds": [1, 2]
            })),
        )
        .expect("expected success");

        assert_eq!(view.price, "$200.00");
        assert_eq!(view.tags.len(), 2);
    }

    #[test]
    fn create_product_rejects_missing_fields_without_touching_repo() {
        let repo = FakeRepo::new();

        let result = create_product(&repo, add_form(json!({ "product_name": "Cap" })));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_product_rejects_unknown_category() {
        let mut repo = FakeRepo::new();
        repo.category_reader
            .expect_get_category_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.product_writer.expect_create_product().times(0);

        let result = create_product(
            &repo,
            add_form(json!({ "product_name": "Cap", "price": 1, "stock": 1, "category_id": 8 })),
        );

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "No category found with id 8")
        );
    }

    #[test]
    fn update_product_rejects_unknown_tag() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_product(id, "Cap", 100))));
        repo.tag_reader
            .expect_get_tag_by_id()
            .returning(|tag_id| match tag_id {
                4 => Ok(None),
                _ => Ok(Some(sample_tag(tag_id, "tag"))),
            });
        repo.product_writer.expect_update_product().times(0);

        let result = update_product(&repo, 1, edit_form(json!({ "tagIds": [2, 3, 4] })));

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "No tag found with id 4")
        );
    }

    #[test]
    fn update_product_passes_requested_tags() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_product(id, "Cap", 100))));
        repo.tag_reader
            .expect_get_tag_by_id()
            .times(3)
            .returning(|tag_id| Ok(Some(sample_tag(tag_id, "tag"))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|product_id, updates| {
                assert_eq!(*product_id, 1);
                assert_eq!(updates.tag_ids, Some(vec![2, 3, 4]));
                assert_eq!(updates.stock, None);
                true
            })
            .returning(|id, _| Ok(sample_product(id, "Cap", 100)));

        let form = edit_form(json!({
            "tags": [{ "tag_id": 2 }, { "tag_id": 3 }, { "tag_id": 4 }]
        }));
        let view = update_product(&repo, 1, form).expect("expected success");

        assert_eq!(view.id, 1);
    }

    #[test]
    fn update_product_reports_missing_product() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = update_product(&repo, 5, edit_form(json!({ "stock": 1 })));

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn delete_product_maps_not_found() {
        let mut repo = FakeRepo::new();
        repo.product_writer
            .expect_delete_product()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_product(&repo, 3);

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "No product found with id 3")
        );
    }
}
