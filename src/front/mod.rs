pub mod errors;
pub mod forms;
pub mod pet;
pub mod routes;
pub mod server;
pub mod utils;
pub mod vaccine;

use crate::{repo, services};
use serde::Serialize;

pub struct AppState {
    pub repo: repo::ImplAppRepo,
    pub storage_service: services::ImplStorageService,
    pub extraction_service: services::ImplExtractionService,
}

/// Uniform `{success, data|message}` envelope every endpoint replies with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}
