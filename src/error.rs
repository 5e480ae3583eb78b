//! Error types shared by the shell and the HTTP surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::state::View;

/// Everything a click can be rejected for
#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("{expected} panel is not active (current view: {active})")]
    PanelNotActive { expected: View, active: View },

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("unknown checklist item: {0}")]
    UnknownItem(String),

    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("unknown radio channel index: {0}")]
    UnknownChannel(usize),

    #[error("invalid flashlight mode: {0}")]
    InvalidMode(String),

    #[error("failed to lock {0}")]
    StateLock(&'static str),
}

impl ToolkitError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ToolkitError::PanelNotActive { .. } => StatusCode::CONFLICT,
            ToolkitError::UnknownView(_)
            | ToolkitError::UnknownItem(_)
            | ToolkitError::UnknownTopic(_)
            | ToolkitError::UnknownChannel(_) => StatusCode::NOT_FOUND,
            ToolkitError::InvalidMode(_) => StatusCode::BAD_REQUEST,
            ToolkitError::StateLock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ToolkitError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
