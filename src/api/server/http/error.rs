use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::core::{ErrorKind, PluginError};
use crate::api::plugin::ErrorRepresentation;

/// HTTP 边界上的错误
///
/// 响应体统一为错误表示：`message`、`exception`、`causes`。
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    InternalError(String),
    Plugin(PluginError),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Plugin(e) => match e.kind() {
                ErrorKind::Syntax | ErrorKind::Execution | ErrorKind::BadInput => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn representation(&self) -> ErrorRepresentation {
        match self {
            HttpError::BadRequest(msg) => {
                ErrorRepresentation::new(msg.clone(), ErrorKind::BadInput.as_str())
            }
            HttpError::NotFound(msg) => ErrorRepresentation::new(msg.clone(), "NotFoundError"),
            HttpError::MethodNotAllowed(msg) => {
                ErrorRepresentation::new(msg.clone(), "MethodNotAllowedError")
            }
            HttpError::InternalError(msg) => {
                ErrorRepresentation::new(msg.clone(), ErrorKind::Internal.as_str())
            }
            HttpError::Plugin(e) => ErrorRepresentation::from_plugin_error(e),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.representation())).into_response()
    }
}

impl From<PluginError> for HttpError {
    fn from(err: PluginError) -> Self {
        HttpError::Plugin(err)
    }
}
