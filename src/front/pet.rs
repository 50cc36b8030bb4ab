use ntex::web;

use crate::{
    api,
    front::{ApiResponse, AppState, errors},
};

#[web::get("")]
async fn list_pets(
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::pet::get_pets_display_list(&app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "function get_pets_display_list raised an error: {}",
                e
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&ApiResponse::ok(pets)))
}
