//! Streaming report files from disk.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use insightplace_core::ReportFile;
use tower_http::services::ServeFile;

use crate::error::HttpError;

/// How the browser should treat the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Render as HTML in the viewer.
    InlineHtml,
    /// Content type guessed from the extension.
    Inline,
    /// Save with the file's own name.
    Attachment,
}

/// `attachment` header value. Non-ASCII names also get an RFC 5987 `filename*`.
pub fn attachment_header(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    if file_name.is_ascii() {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(file_name)
        )
    }
}

/// Serve `file` for `req`, honouring conditional and range headers.
pub async fn serve(
    file: &ReportFile,
    req: Request,
    disposition: Disposition,
) -> Result<Response, HttpError> {
    let mut service = ServeFile::new(&file.path);
    let mut response = service
        .try_call(req)
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HttpError::NotFound("File not found".to_string())
            } else {
                HttpError::Internal(format!("Failed to read {}: {e}", file.relative))
            }
        })?
        .map(Body::new);

    if response.status() == StatusCode::NOT_FOUND {
        return Err(HttpError::NotFound("File not found".to_string()));
    }

    let headers = response.headers_mut();
    match disposition {
        Disposition::InlineHtml => {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
        }
        Disposition::Inline => {}
        Disposition::Attachment => {
            let value = HeaderValue::from_str(&attachment_header(file.file_name()))
                .map_err(|e| HttpError::Internal(e.to_string()))?;
            headers.insert(CONTENT_DISPOSITION, value);
        }
    }
    Ok(response)
}
