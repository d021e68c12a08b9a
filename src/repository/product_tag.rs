use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::product_tag::ProductTag as DomainProductTag;
use crate::models::product_tag::ProductTag as DbProductTag;
use crate::repository::{DieselRepository, ProductTagReader};

impl ProductTagReader for DieselRepository {
    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<DomainProductTag>> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        let rows = product_tags::table
            .filter(product_tags::product_id.eq(product_id))
            .order(product_tags::tag_id.asc())
            .load::<DbProductTag>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProductTag::from).collect())
    }
}
