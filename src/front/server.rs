//! Handlers not linked to a specific url

use ntex::web;

use crate::front::errors;

/// Liveness endpoint
#[web::get("/")]
async fn index() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().body("Calico Backend is running"))
}

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}
