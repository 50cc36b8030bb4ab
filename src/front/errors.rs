use super::ApiResponse;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

/// Errors caused by the caller's input, answered with 400.
#[derive(Debug, Display, Error)]
pub enum UserError {
    #[display("Pet ID and Vaccine Name are required")]
    ValidationError,
    #[display("pet with id {_0} does not exist")]
    ForeignKeyError(#[error(not(source))] i64),
    #[display("No image uploaded")]
    NoFileError,
    #[display("invalid form input: {_0}")]
    FormInputValueError(#[error(not(source))] String),
    #[display("url not found")]
    UrlNotFound,
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        web::HttpResponse::build(self.status_code())
            .json(&ApiResponse::failure(&self.to_string()))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }
}

/// Infrastructure and external-service failures, answered with 500.
#[derive(Debug, Display, Error)]
pub enum ServerError {
    #[display("{_0}")]
    ExtractionServiceError(#[error(not(source))] String),
    #[display("No content received from AI")]
    EmptyResponseError,
    #[display("Failed to parse AI response")]
    MalformedExtractionError,
    #[display("{_0}")]
    StorageError(#[error(not(source))] String),
    #[display("{_0}")]
    InternalServerError(#[error(not(source))] String),
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::ExtractionServiceError(msg) => {
                format!("[ExtractionServiceError] {:#?}", msg)
            }
            ServerError::EmptyResponseError => "[EmptyResponseError]".to_string(),
            ServerError::MalformedExtractionError => "[MalformedExtractionError]".to_string(),
            ServerError::StorageError(msg) => format!("[StorageError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        web::HttpResponse::build(self.status_code())
            .json(&ApiResponse::failure(&self.to_string()))
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }
}
