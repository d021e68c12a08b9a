use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::tags::TagForm;
use crate::repository::DieselRepository;
use crate::routes::{deleted_response, error_response};
use crate::services::tags as tag_service;

#[get("/tags")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match tag_service::list_tags(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response(&err, "list tags"),
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(
    tag_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tag_service::get_tag(repo.get_ref(), tag_id.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(&err, "load tag"),
    }
}

#[post("/tags")]
pub async fn add_tag(
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    match tag_service::create_tag(repo.get_ref(), form.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(&err, "create tag"),
    }
}

#[put("/tags/{tag_id}")]
pub async fn edit_tag(
    tag_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<TagForm>,
) -> impl Responder {
    match tag_service::update_tag(repo.get_ref(), tag_id.into_inner(), form.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(&err, "update tag"),
    }
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(
    tag_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = tag_id.into_inner();
    match tag_service::delete_tag(repo.get_ref(), tag_id) {
        Ok(()) => deleted_response("Tag", tag_id),
        Err(err) => error_response(&err, "delete tag"),
    }
}
