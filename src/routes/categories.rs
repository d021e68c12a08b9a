use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::CategoryForm;
use crate::repository::DieselRepository;
use crate::routes::{deleted_response, error_response};
use crate::services::categories as category_service;

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match category_service::list_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(&err, "list categories"),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_category(repo.get_ref(), category_id.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err, "load category"),
    }
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    match category_service::create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err, "create category"),
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    match category_service::update_category(
        repo.get_ref(),
        category_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err, "update category"),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    match category_service::delete_category(repo.get_ref(), category_id) {
        Ok(()) => deleted_response("Category", category_id),
        Err(err) => error_response(&err, "delete category"),
    }
}
