use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::category::Category as DomainCategory,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct,
        UpdateProduct as DomainUpdateProduct,
    },
    domain::product_tag::TagReconciliation,
    domain::tag::Tag as DomainTag,
    models::category::Category as DbCategory,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_tag::NewProductTag as DbNewProductTag,
    models::tag::Tag as DbTag,
    repository::category::ensure_category_exists,
    repository::tag::ensure_tags_exist,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        with_category_and_tags(&mut conn, db_products)
    }

    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(product_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => Ok(with_category_and_tags(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            if let Some(category_id) = new_product.category_id {
                ensure_category_exists(conn, category_id)?;
            }
            ensure_tags_exist(conn, &new_product.tag_ids)?;

            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            let plan = TagReconciliation::plan(created.id, &[], &new_product.tag_ids);
            if !plan.to_add.is_empty() {
                let rows: Vec<DbNewProductTag> =
                    plan.to_add.iter().map(DbNewProductTag::from).collect();
                diesel::insert_into(product_tags::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            with_category_and_tags(conn, vec![created])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            if let Some(Some(category_id)) = updates.category_id {
                ensure_category_exists(conn, category_id)?;
            }

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            if let Some(tag_ids) = updates.tag_ids.as_deref() {
                ensure_tags_exist(conn, tag_ids)?;
                reconcile_product_tags(conn, product_id, tag_ids)?;
            }

            with_category_and_tags(conn, vec![updated])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Rewrites the tag associations of `product_id` so they match `requested`.
///
/// All current rows are deleted and all requested rows inserted, see
/// [`TagReconciliation`]. Must run inside the caller's transaction.
fn reconcile_product_tags(
    conn: &mut SqliteConnection,
    product_id: i32,
    requested: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::product_tags;

    let current = product_tags::table
        .filter(product_tags::product_id.eq(product_id))
        .order(product_tags::tag_id.asc())
        .select(product_tags::tag_id)
        .load::<i32>(conn)?;

    let plan = TagReconciliation::plan(product_id, &current, requested);

    for pair in &plan.to_remove {
        diesel::delete(
            product_tags::table
                .filter(product_tags::product_id.eq(pair.product_id))
                .filter(product_tags::tag_id.eq(pair.tag_id)),
        )
        .execute(conn)?;
    }

    if !plan.to_add.is_empty() {
        let rows: Vec<DbNewProductTag> = plan.to_add.iter().map(DbNewProductTag::from).collect();
        diesel::insert_into(product_tags::table)
            .values(&rows)
            .execute(conn)?;
    }

    log::debug!(
        "Rewrote tags of product {product_id}: removed {}, added {}",
        plan.to_remove.len(),
        plan.to_add.len()
    );

    Ok(())
}

fn with_category_and_tags(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let mut category_ids: Vec<i32> = db_products
        .iter()
        .filter_map(|product| product.category_id)
        .collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let categories = load_categories(conn, &category_ids)?;
    let mut tags = load_tags_for_products(conn, &product_ids)?;

    Ok(db_products
        .into_iter()
        .map(|db_product| {
            let mut domain: DomainProduct = db_product.into();
            domain.category = domain
                .category_id
                .and_then(|category_id| categories.get(&category_id).cloned());
            domain.tags = tags.remove(&domain.id).unwrap_or_default();
            domain
        })
        .collect())
}

fn load_categories(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainCategory>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| (row.id, DomainCategory::from(row)))
        .collect())
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order((product_tags::product_id.asc(), tags::id.asc()))
        .select((product_tags::product_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}
