use serde::Serialize;

use crate::domain::tag::Tag;
use crate::forms::tags::TagForm;
use crate::repository::{TagReader, TagWriter};
use crate::services::products::ProductSummaryView;
use crate::services::{ServiceError, ServiceResult, not_found_as};

/// Tag as returned by the `/api/tags` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagView {
    pub id: i32,
    pub tag_name: String,
    pub products: Vec<ProductSummaryView>,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            tag_name: tag.name,
            products: tag
                .products
                .into_iter()
                .map(ProductSummaryView::from)
                .collect(),
        }
    }
}

fn tag_not_found(tag_id: i32) -> String {
    format!("No tag found with id {tag_id}")
}

/// Lists every tag with the products carrying it.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<TagView>>
where
    R: TagReader + ?Sized,
{
    let tags = repo.list_tags()?;
    Ok(tags.into_iter().map(TagView::from).collect())
}

/// Loads a single tag with the products carrying it.
pub fn get_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<TagView>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)?
        .map(TagView::from)
        .ok_or_else(|| ServiceError::NotFound(tag_not_found(tag_id)))
}

/// Creates a tag from either name spelling.
pub fn create_tag<R>(repo: &R, form: TagForm) -> ServiceResult<TagView>
where
    R: TagWriter + ?Sized,
{
    let new_tag = form
        .into_new_tag()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let created = repo.create_tag(&new_tag)?;
    Ok(created.into())
}

/// Renames an existing tag.
pub fn update_tag<R>(repo: &R, tag_id: i32, form: TagForm) -> ServiceResult<TagView>
where
    R: TagReader + TagWriter + ?Sized,
{
    let updates = form
        .into_update_tag()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_tag_by_id(tag_id)?.is_none() {
        return Err(ServiceError::NotFound(tag_not_found(tag_id)));
    }

    let updated = repo
        .update_tag(tag_id, &updates)
        .map_err(not_found_as(tag_not_found(tag_id)))?;

    Ok(updated.into())
}

/// Deletes a tag and detaches it from every product.
pub fn delete_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    repo.delete_tag(tag_id)
        .map_err(not_found_as(tag_not_found(tag_id)))
}
