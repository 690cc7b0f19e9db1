//! # Request Context
//!
//! The business (tenant) a request acts for travels with the request itself
//! in the `X-Business-Id` header. There is no session or global state.
//!
//! ```text
//! X-Business-Id: biz-001
//!        │
//!        ▼
//! BusinessContext ──► outlet(db, 7) ──► Outlet #7 if owned by biz-001
//!                                  └──► NotFound otherwise
//! ```

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use bountip_core::validation::validate_business_id;
use bountip_core::Outlet;
use bountip_db::Database;

use crate::error::{ApiError, ApiResult, ErrorCode};

pub const BUSINESS_ID_HEADER: &str = "X-Business-Id";

/// The caller's business, extracted from the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessContext {
    pub business_id: String,
}

impl BusinessContext {
    /// Loads an outlet owned by this business.
    pub async fn outlet(&self, db: &Database, outlet_id: i64) -> ApiResult<Outlet> {
        Ok(db.outlets().require(&self.business_id, outlet_id).await?)
    }

    fn from_request_head(req: &HttpRequest) -> ApiResult<Self> {
        let value = req
            .headers()
            .get(BUSINESS_ID_HEADER)
            .ok_or_else(|| {
                ApiError::new(
                    ErrorCode::MissingContext,
                    format!("{} header is required", BUSINESS_ID_HEADER),
                )
            })?
            .to_str()
            .map_err(|_| ApiError::validation(format!("{} header is not valid text", BUSINESS_ID_HEADER)))?;

        Ok(BusinessContext {
            business_id: validate_business_id(value)?,
        })
    }
}

impl FromRequest for BusinessContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_head(req))
    }
}
