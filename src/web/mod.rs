//! Web app: CSV upload form, HTML results, summary-CSV export.

pub mod store;
pub mod view;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzers::aggregate::aggregate;
use crate::output::summary_csv_bytes;
use crate::parser::parse_rows;
use crate::web::store::ResultStore;

/// Maximum upload size (10MB); dashboard exports are far smaller.
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Result sets kept for download before the oldest is evicted.
const STORE_CAPACITY: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResultStore>,
}

/// Builds the application router with a fresh result store.
pub fn app() -> Router {
    let state = AppState {
        store: Arc::new(ResultStore::new(STORE_CAPACITY)),
    };

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/export/{token}", get(export))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}

/// Binds `addr` and serves the app until the process is stopped.
pub async fn serve(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Web app listening");
    axum::serve(listener, app()).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(view::render_page(&[], None, None))
}

async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("csv_file") {
                    continue;
                }
                match field.bytes().await {
                    Ok(bytes) => {
                        file_bytes = Some(bytes.to_vec());
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "Upload body could not be read");
                        return error_page(
                            StatusCode::BAD_REQUEST,
                            &format!("Could not read upload: {err}"),
                        );
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "Malformed multipart request");
                return error_page(
                    StatusCode::BAD_REQUEST,
                    &format!("Could not read upload: {err}"),
                );
            }
        }
    }

    let Some(bytes) = file_bytes.filter(|b| !b.is_empty()) else {
        return error_page(StatusCode::BAD_REQUEST, "Please choose a CSV file.");
    };

    let rows = match parse_rows(bytes.as_slice()) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "Uploaded CSV rejected");
            return error_page(
                StatusCode::BAD_REQUEST,
                &format!("Could not parse CSV: {err}"),
            );
        }
    };

    let results = aggregate(&rows);
    if results.is_empty() {
        return Html(view::render_page(
            &[],
            Some("No instructor survey rows were found in this file."),
            None,
        ))
        .into_response();
    }

    let token = state.store.insert(results.clone());
    info!(rows = rows.len(), groups = results.len(), %token, "Survey aggregated");

    Html(view::render_page(&results, None, Some(&token.to_string()))).into_response()
}

async fn export(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    let Ok(token) = Uuid::parse_str(&token) else {
        return (
            StatusCode::BAD_REQUEST,
            "No results for this token. Upload a CSV and use the download link on the results page.",
        )
            .into_response();
    };

    let Some(results) = state.store.get(&token) else {
        return (
            StatusCode::BAD_REQUEST,
            "No results for this token. Upload a CSV and use the download link on the results page.",
        )
            .into_response();
    };

    match summary_csv_bytes(&results) {
        Ok(bytes) => {
            let filename = format!("far_summary_{}.csv", Utc::now().format("%Y-%m-%d"));
            (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "Summary CSV rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not render summary CSV.",
            )
                .into_response()
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    (status, Html(view::render_page(&[], Some(message), None))).into_response()
}
