//! HTTP adapter for trip submissions.
//!
//! One thread, one request at a time: every ledger mutation runs to
//! completion before the next request is read.

use crate::config::Config;
use crate::core::api::{ApiResponse, handle_payload, handle_submission, status_info};
use crate::core::append::TripSubmission;
use crate::errors::{AppError, AppResult};
use crate::store::LedgerStore;
use crate::ui::messages::info;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Route one request. Pure apart from the store, so it is tested without
/// a socket.
pub fn route<S: LedgerStore + ?Sized>(
    store: &mut S,
    cfg: &Config,
    method: &Method,
    url: &str,
    body: &[u8],
    now: NaiveDateTime,
    at: DateTime<Utc>,
) -> ApiResponse {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let path = path.trim_end_matches('/');

    match (method, path) {
        (Method::Post, "/trips") => handle_payload(store, cfg, body, now, at),
        (Method::Get, "/trips") => match submission_from_query(query) {
            Ok(submission) => handle_submission(store, cfg, &submission, now, at),
            Err(err) => ApiResponse::from_error(&err, at),
        },
        (Method::Get, "") | (Method::Get, "/status") => status_info(cfg, at),
        _ => ApiResponse::new(404, format!("No route for {} {}", method, url), None, at),
    }
}

/// Build a submission from `distanceKm=..&category=..&date=..&route=..&time=..`.
/// Unknown keys are ignored.
pub fn submission_from_query(query: &str) -> AppResult<TripSubmission> {
    serde_urlencoded::from_str(query)
        .map_err(|e| AppError::Validation(format!("Invalid query string: {e}")))
}

fn json_response(payload: &ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_data(payload.to_json().into_bytes())
        .with_status_code(StatusCode(payload.status));
    if let Ok(h) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(h);
    }
    response
}

fn handle_request<S: LedgerStore + ?Sized>(store: &mut S, cfg: &Config, mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = Vec::new();
    let response = if let Err(e) = request.as_reader().read_to_end(&mut body) {
        let err = AppError::Validation(format!("Unreadable request body: {e}"));
        ApiResponse::from_error(&err, Utc::now())
    } else {
        route(
            store,
            cfg,
            &method,
            &url,
            &body,
            Local::now().naive_local(),
            Utc::now(),
        )
    };

    tracing::info!(%method, %url, status = response.status, "request handled");

    if let Err(e) = request.respond(json_response(&response)) {
        tracing::warn!(error = %e, "failed to send response");
    }
}

/// Bind `addr` and serve until the process is stopped.
pub fn serve<S: LedgerStore + ?Sized>(store: &mut S, cfg: &Config, addr: &str) -> AppResult<()> {
    let server = Server::http(addr).map_err(|e| AppError::Server(format!("{addr}: {e}")))?;

    info(format!("Listening on http://{addr} (POST /trips, GET /trips, GET /status)"));

    for request in server.incoming_requests() {
        handle_request(store, cfg, request);
    }

    Ok(())
}
