//! Response envelope shared by every route.
//!
//! ```json
//! { "status": true, "data": { ... }, "message": "Price tier created" }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: bool, data: Option<T>, message: Option<String>) -> Self {
        ApiResponse {
            status,
            data,
            message,
        }
    }

    /// 200 with data.
    pub fn ok(data: T) -> HttpResponse {
        Self::new(true, Some(data), None).respond(StatusCode::OK)
    }

    /// 201 with data and a message.
    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(true, Some(data), Some(message.into())).respond(StatusCode::CREATED)
    }

    /// 200 with data and a message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(true, Some(data), Some(message.into())).respond(StatusCode::OK)
    }

    pub fn respond(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
