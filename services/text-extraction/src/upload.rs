//! `POST /documents`: accepts a PDF, extracts its text and records the upload.

use actix_multipart::Multipart;
use actix_web::{web, Error, HttpRequest, HttpResponse, Responder};
use futures_util::StreamExt as _;
use shared::db::InteractionLog;
use shared::dto::{DocumentUploaded, ErrorBody, UploadedDocument};
use shared::utils::{char_len, new_session_id};
use tracing::{error, info, warn};

use crate::extract_document_text;

pub const SESSION_HEADER: &str = "X-Session-Id";

/// Largest accepted upload in bytes when no [`UploadLimit`] is registered.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Per-app cap on the size of an uploaded file.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

fn is_pdf(content_type: Option<&str>, filename: &str) -> bool {
    match content_type {
        Some("application/pdf") => true,
        None | Some("application/octet-stream") => filename.to_ascii_lowercase().ends_with(".pdf"),
        _ => false,
    }
}

fn bad_request(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody { error: msg.to_string() })
}

pub async fn health() -> impl Responder {
    "OK"
}

pub async fn upload(
    req: HttpRequest,
    mut payload: Multipart,
    log: web::Data<dyn InteractionLog>,
    limit: Option<web::Data<UploadLimit>>,
) -> Result<HttpResponse, Error> {
    let max_bytes = limit.map(|l| l.0).unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
    let session = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_session_id);

    while let Some(field_res) = payload.next().await {
        let mut field = field_res?;
        if field.name() != "file" {
            continue;
        }
        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload.pdf")
            .to_string();
        let content_type = field.content_type().map(|m| m.essence_str().to_string());
        if !is_pdf(content_type.as_deref(), &filename) {
            warn!(file = %filename, ?content_type, "rejected non-pdf upload");
            return Ok(bad_request("Only PDF documents are accepted"));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > max_bytes {
                warn!(file = %filename, limit = max_bytes, "rejected oversized upload");
                return Ok(bad_request("Document exceeds the upload size limit"));
            }
            data.extend_from_slice(&chunk);
        }
        let file_size = data.len() as i64;
        let content = extract_document_text(data).await;
        info!(file = %filename, bytes = file_size, chars = char_len(&content), session = %session, "document processed");

        let record = UploadedDocument {
            filename: filename.clone(),
            file_size,
            content: content.clone(),
            user_session: session.clone(),
        };
        if let Err(e) = log.record_document(&record).await {
            error!(%e, file = %filename, "failed to record uploaded document");
        }

        return Ok(HttpResponse::Created().json(DocumentUploaded {
            filename,
            file_size,
            context_chars: char_len(&content),
            content,
            session_id: session,
        }));
    }

    Ok(bad_request("Missing file field"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/documents", web::post().to(upload));
}
