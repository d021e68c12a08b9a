use serde::Serialize;

use crate::domain::category::Category;
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::products::ProductSummaryView;
use crate::services::{ServiceError, ServiceResult, not_found_as};

/// Category as returned by the `/api/categories` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub category_id: i32,
    pub category_name: String,
    pub products: Vec<ProductSummaryView>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            category_name: category.name,
            products: category
                .products
                .into_iter()
                .map(ProductSummaryView::from)
                .collect(),
        }
    }
}

fn category_not_found(category_id: i32) -> String {
    format!("Category id {category_id} not found")
}

/// Lists every category with its products.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryView>>
where
    R: CategoryReader + ?Sized,
{
    let categories = repo.list_categories()?;
    Ok(categories.into_iter().map(CategoryView::from).collect())
}

/// Loads a single category with its products.
pub fn get_category<R>(repo: &R, category_id: i32) -> ServiceResult<CategoryView>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)?
        .map(CategoryView::from)
        .ok_or_else(|| ServiceError::NotFound(category_not_found(category_id)))
}

/// Creates a category from either name spelling.
pub fn create_category<R>(repo: &R, form: CategoryForm) -> ServiceResult<CategoryView>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let created = repo.create_category(&new_category)?;
    Ok(created.into())
}

/// Renames an existing category.
pub fn update_category<R>(
    repo: &R,
    category_id: i32,
    form: CategoryForm,
) -> ServiceResult<CategoryView>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let updates = form
        .into_update_category()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_category_by_id(category_id)?.is_none() {
        return Err(ServiceError::NotFound(category_not_found(category_id)));
    }

    let updated = repo
        .update_category(category_id, &updates)
        .map_err(not_found_as(category_not_found(category_id)))?;

    Ok(updated.into())
}

/// Deletes a category; its products stay in the catalog without a category.
pub fn delete_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id)
        .map_err(not_found_as(category_not_found(category_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
    use serde_json::json;

    use crate::domain::category::{NewCategory, UpdateCategory};
    use crate::domain::product::Product;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_product(id: i32, category_id: i32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price_cents: 1000 + i64::from(id),
            stock: id,
            category_id: Some(category_id),
            category: None,
            tags: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_category(id: i32, name: &str, products: Vec<Product>) -> Category {
        Category {
            id,
            name: name.to_string(),
            products,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    struct FakeRepo {
        reader: MockCategoryReader,
        writer: MockCategoryWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockCategoryReader::new(),
                writer: MockCategoryWriter::new(),
            }
        }
    }

    impl CategoryReader for FakeRepo {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.reader.list_categories()
        }

        fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>> {
            self.reader.get_category_by_id(category_id)
        }
    }

    impl CategoryWriter for FakeRepo {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
            self.writer.create_category(new_category)
        }

        fn update_category(
            &self,
            category_id: i32,
            updates: &UpdateCategory,
        ) -> RepositoryResult<Category> {
            self.writer.update_category(category_id, updates)
        }

        fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
            self.writer.delete_category(category_id)
        }
    }

    fn form(value: serde_json::Value) -> CategoryForm {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn category_view_nests_every_product() {
        let products = (1..=3).map(|id| sample_product(id, 2)).collect();
        let view = CategoryView::from(sample_category(2, "Sports", products));

        assert_eq!(view.products.len(), 3);

        let value = serde_json::to_value(&view.products[0]).expect("serializable");
        assert_eq!(
            value,
            json!({
                "product_id": 1,
                "product_name": "Product 1",
                "price": "$10.01",
                "stock": 1
            })
        );
    }

    #[test]
    fn list_categories_returns_views() {
        let mut repo = MockCategoryReader::new();
        repo.expect_list_categories().times(1).returning(|| {
            Ok(vec![
                sample_category(1, "Shirts", Vec::new()),
                sample_category(2, "Shorts", vec![sample_product(5, 2)]),
            ])
        });

        let views = list_categories(&repo).expect("expected success");

        assert_eq!(views.len(), 2);
        assert_eq!(views[1].category_name, "Shorts");
        assert_eq!(views[1].products.len(), 1);
    }

    #[test]
    fn get_category_reports_missing_id() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_category(&repo, 11);

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "Category id 11 not found")
        );
    }

    #[test]
    fn create_category_accepts_snake_case_name() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .times(1)
            .withf(|new_category| new_category.name == "Music")
            .returning(|new_category| Ok(sample_category(6, &new_category.name, Vec::new())));

        let view = create_category(&repo, form(json!({ "category_name": "Music" })))
            .expect("expected success");

        assert_eq!(view.category_id, 6);
        assert!(view.products.is_empty());
    }

    #[test]
    fn create_category_without_name_never_reaches_repository() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category().times(0);

        let result = create_category(&repo, form(json!({})));

        assert!(
            matches!(result, Err(ServiceError::Validation(message)) if message == "Category name (categoryName/category_name) is required")
        );
    }

    #[test]
    fn update_category_requires_existing_row() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_category_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.writer.expect_update_category().times(0);

        let result = update_category(&repo, 4, form(json!({ "categoryName": "Hats" })));

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn update_category_renames() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_category_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_category(id, "Hats", Vec::new()))));
        repo.writer
            .expect_update_category()
            .times(1)
            .withf(|category_id, updates| *category_id == 4 && updates.name == "Caps")
            .returning(|id, updates| Ok(sample_category(id, &updates.name, Vec::new())));

        let view = update_category(
            &repo,
            4,
            form(json!({ "categoryName": "Caps", "category_name": "Ignored" })),
        )
        .expect("expected success");

        assert_eq!(view.category_name, "Caps");
    }

    #[test]
    fn delete_category_reports_missing_id() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_category(&repo, 99);

        assert!(
            matches!(result, Err(ServiceError::NotFound(message)) if message == "Category id 99 not found")
        );
    }
}
