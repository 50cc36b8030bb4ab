use ntex::web;
use serde::Deserialize;

use crate::{
    api,
    front::{ApiResponse, AppState, errors, forms},
    services::extraction::ExtractionError,
};

#[derive(Deserialize)]
pub struct VaccineListQuery {
    #[serde(rename = "petId")]
    pub pet_id: Option<i64>,
}

fn map_add_record_error(e: api::vaccine::AddRecordError) -> web::Error {
    match e {
        api::vaccine::AddRecordError::MissingFields => errors::UserError::ValidationError.into(),
        api::vaccine::AddRecordError::UnknownPet(pet_id) => {
            errors::UserError::ForeignKeyError(pet_id).into()
        }
        api::vaccine::AddRecordError::Storage(e) => {
            errors::ServerError::StorageError(e.to_string()).into()
        }
    }
}

fn map_analyze_error(e: api::vaccine::AnalyzeError) -> web::Error {
    match e {
        api::vaccine::AnalyzeError::Storage(e) => {
            errors::ServerError::StorageError(e.to_string()).into()
        }
        api::vaccine::AnalyzeError::Extraction(extraction_error) => match extraction_error {
            ExtractionError::RequestError(msg) | ExtractionError::ServiceError(msg) => {
                errors::ServerError::ExtractionServiceError(msg).into()
            }
            ExtractionError::EmptyResponse => errors::ServerError::EmptyResponseError.into(),
            ExtractionError::MalformedResponse => {
                errors::ServerError::MalformedExtractionError.into()
            }
        },
    }
}

#[web::get("")]
async fn list_vaccine_records(
    query: web::types::Query<VaccineListQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let records = api::vaccine::get_vaccine_records(query.pet_id, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::StorageError(format!(
                "vaccine records couldnt be fetched: {}",
                e
            ))
        })?;

    Ok(web::HttpResponse::Ok().json(&ApiResponse::ok(records)))
}

/// Runs extraction on an uploaded certificate and returns the draft record
/// for the caller to review. Persists nothing except the image itself.
#[web::post("/analyze")]
async fn analyze_certificate(
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let upload = forms::vaccine::deserialize_analyze_form(payload)
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?
        .ok_or(errors::UserError::NoFileError)?;

    let draft = api::vaccine::analyze_certificate(
        upload,
        &app_state.storage_service,
        &app_state.extraction_service,
    )
    .await
    .map_err(map_analyze_error)?;

    Ok(web::HttpResponse::Ok().json(&ApiResponse::ok(draft)))
}

/// Persists a confirmed vaccine record.
#[web::post("")]
async fn add_vaccine_record(
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let form = forms::vaccine::deserialize_add_vaccine_form(payload)
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    let stored = api::vaccine::add_vaccine_record(form, &app_state.repo, &app_state.storage_service)
        .await
        .map_err(map_add_record_error)?;

    Ok(web::HttpResponse::Created().json(&ApiResponse::ok_with_message(
        stored,
        "Vaccine record added successfully",
    )))
}
