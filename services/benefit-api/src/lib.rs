//! HTTP surface of the benefit resolver: `POST /verify-benefit`.

use actix_cors::Cors;
use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use futures_util::StreamExt as _;
use shared::benefit_resolver::DOCUMENT_MIN_CHARS;
use shared::dto::{
    BenefitEnvelope, ErrorBody, RawBenefitRequest, MISSING_FIELDS, PROCESSING_FAILED,
};
use shared::utils::char_len;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Largest request body accepted by `POST /verify-benefit`. Sized for long
/// terms documents carried in `pdfContent`.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing required fields")]
    MissingFields,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingFields => MISSING_FIELDS,
            ApiError::Internal(_) => PROCESSING_FAILED,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            error!(%detail, "error processing benefit request");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message().to_string(),
        })
    }
}

pub async fn health() -> impl Responder {
    "OK"
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Collects the body up to [`MAX_REQUEST_BYTES`]. Oversized or broken bodies
/// are answered like any other unreadable request.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, ApiError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            debug!(%e, "benefit request body interrupted");
            ApiError::MissingFields
        })?;
        if body.len() + chunk.len() > MAX_REQUEST_BYTES {
            warn!(limit = MAX_REQUEST_BYTES, "benefit request body too large");
            return Err(ApiError::MissingFields);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

pub async fn verify_benefit(payload: web::Payload) -> Result<HttpResponse, ApiError> {
    let body = read_body(payload).await?;
    let raw: RawBenefitRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(%e, "unreadable benefit request body");
        ApiError::MissingFields
    })?;
    let req = raw.validate().ok_or(ApiError::MissingFields)?;

    let doc_chars = req.pdf_content.as_deref().map(char_len).unwrap_or(0);
    info!(
        location = %req.location,
        language = %req.language,
        doc_chars,
        document_rules = doc_chars > DOCUMENT_MIN_CHARS,
        "verifying benefit"
    );

    let benefit = shared::resolve(&req.query, req.location, req.language, req.pdf_content.as_deref());
    let payload = serde_json::to_string(&BenefitEnvelope { benefit })
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(payload))
}

/// Every origin may call the service.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/verify-benefit", web::post().to(verify_benefit))
        .route("/verify-benefit", web::method(Method::OPTIONS).to(preflight));
}
