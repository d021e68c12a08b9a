use std::collections::HashMap;

use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::product::Product as DomainProduct;
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::models::product::Product as DbProduct;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let db_categories = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        with_products(&mut conn, db_categories)
    }

    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match category {
            Some(db_category) => Ok(with_products(&mut conn, vec![db_category])?.pop()),
            None => Ok(None),
        }
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCategory::from(updates);

        let updated = diesel::update(categories::table.filter(categories::id.eq(category_id)))
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        with_products(&mut conn, vec![updated])?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let now = Local::now().naive_utc();

            let detached =
                diesel::update(products::table.filter(products::category_id.eq(category_id)))
                    .set((
                        products::category_id.eq::<Option<i32>>(None),
                        products::updated_at.eq(now),
                    ))
                    .execute(conn)?;

            let deleted =
                diesel::delete(categories::table.filter(categories::id.eq(category_id)))
                    .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            log::debug!("Deleted category {category_id}, detached {detached} products");
            Ok(())
        })
    }
}

/// Fails with `NotFound` unless a category with `category_id` exists.
pub(crate) fn ensure_category_exists(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = select(exists(
        categories::table.filter(categories::id.eq(category_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn with_products(
    conn: &mut SqliteConnection,
    db_categories: Vec<DbCategory>,
) -> RepositoryResult<Vec<DomainCategory>> {
    let category_ids: Vec<i32> = db_categories.iter().map(|category| category.id).collect();
    let mut products = load_products_for_categories(conn, &category_ids)?;

    Ok(db_categories
        .into_iter()
        .map(|db_category| {
            let mut domain: DomainCategory = db_category.into();
            domain.products = products.remove(&domain.id).unwrap_or_default();
            domain
        })
        .collect())
}

fn load_products_for_categories(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainProduct>>> {
    use crate::schema::products;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = products::table
        .filter(products::category_id.eq_any(category_ids))
        .order(products::id.asc())
        .load::<DbProduct>(conn)?;

    let mut map: HashMap<i32, Vec<DomainProduct>> = HashMap::new();
    for row in rows {
        if let Some(category_id) = row.category_id {
            map.entry(category_id).or_default().push(row.into());
        }
    }

    Ok(map)
}
