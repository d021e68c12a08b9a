use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::product::Product as DomainProduct;
use crate::domain::product_tag::unique_tag_ids;
use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};
use crate::models::product::Product as DbProduct;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn list_tags(&self) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let db_tags = tags::table
            .order(tags::id.asc())
            .load::<DbTag>(&mut conn)?;

        with_products(&mut conn, db_tags)
    }

    fn get_tag_by_id(&self, tag_id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .filter(tags::id.eq(tag_id))
            .first::<DbTag>(&mut conn)
            .optional()?;

        match tag {
            Some(db_tag) => Ok(with_products(&mut conn, vec![db_tag])?.pop()),
            None => Ok(None),
        }
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tag(&self, tag_id: i32, updates: &DomainUpdateTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let updated = diesel::update(tags::table.filter(tags::id.eq(tag_id)))
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        with_products(&mut conn, vec![updated])?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tags, tags};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let detached =
                diesel::delete(product_tags::table.filter(product_tags::tag_id.eq(tag_id)))
                    .execute(conn)?;

            let deleted = diesel::delete(tags::table.filter(tags::id.eq(tag_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            log::debug!("Deleted tag {tag_id}, removed it from {detached} products");
            Ok(())
        })
    }
}

/// Fails with `NotFound` unless every id in `tag_ids` references an existing tag.
pub(crate) fn ensure_tags_exist(
    conn: &mut SqliteConnection,
    tag_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::tags;

    let unique = unique_tag_ids(tag_ids);
    if unique.is_empty() {
        return Ok(());
    }

    let found = tags::table
        .filter(tags::id.eq_any(unique.as_slice()))
        .count()
        .get_result::<i64>(conn)?;

    if found as usize == unique.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn with_products(
    conn: &mut SqliteConnection,
    db_tags: Vec<DbTag>,
) -> RepositoryResult<Vec<DomainTag>> {
    let tag_ids: Vec<i32> = db_tags.iter().map(|tag| tag.id).collect();
    let mut products = load_products_for_tags(conn, &tag_ids)?;

    Ok(db_tags
        .into_iter()
        .map(|db_tag| {
            let mut domain: DomainTag = db_tag.into();
            domain.products = products.remove(&domain.id).unwrap_or_default();
            domain
        })
        .collect())
}

fn load_products_for_tags(
    conn: &mut SqliteConnection,
    tag_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainProduct>>> {
    use crate::schema::{product_tags, products};

    if tag_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(products::table)
        .filter(product_tags::tag_id.eq_any(tag_ids))
        .order((product_tags::tag_id.asc(), products::id.asc()))
        .select((product_tags::tag_id, DbProduct::as_select()))
        .load::<(i32, DbProduct)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainProduct>> = HashMap::new();
    for (tag_id, product) in rows {
        map.entry(tag_id).or_default().push(product.into());
    }

    Ok(map)
}
