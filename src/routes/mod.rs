use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod products;
pub mod tags;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body returned by the delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Registers the `/api` scope with its JSON error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api")
                .service(categories::list_categories)
                .service(categories::show_category)
                .service(categories::add_category)
                .service(categories::edit_category)
                .service(categories::delete_category)
                .service(products::list_products)
                .service(products::show_product)
                .service(products::add_product)
                .service(products::edit_product)
                .service(products::delete_product)
                .service(tags::list_tags)
                .service(tags::show_tag)
                .service(tags::add_tag)
                .service(tags::edit_tag)
                .service(tags::delete_tag),
        );
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Maps a service failure to its status code and error body.
///
/// Repository failures are logged and answered with a generic message.
pub(crate) fn error_response(err: &ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(ErrorBody::new(message)),
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        ServiceError::Repository(source) => {
            log::error!("Failed to {action}: {source}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

pub(crate) fn deleted_response(resource: &str, id: i32) -> HttpResponse {
    HttpResponse::Ok().json(MessageBody {
        message: format!("{resource} id {id} deleted"),
    })
}
