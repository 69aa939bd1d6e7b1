use std::io::Read;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tiny_http::{Header, Request, Response, Server, StatusCode};
use tracing::{debug, error, info};

use crate::config::{MAX_BODY_BYTES, ServiceConfig};
use crate::error::{INTERNAL_MESSAGE, PredictError};
use crate::service::InferenceService;
use crate::service::routes::{ApiResponse, dispatch};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {msg}")]
    Bind { addr: String, msg: String },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Blocks serving requests on a fixed pool of worker threads.
pub fn serve(config: &ServiceConfig, service: Arc<InferenceService>) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let server = Server::http(addr.as_str()).map_err(|e| ServerError::Bind {
        addr: addr.clone(),
        msg: e.to_string(),
    })?;
    let server = Arc::new(server);
    info!(
        addr = %addr,
        workers = config.workers,
        model_loaded = service.is_ready(),
        "listening"
    );

    let mut handles = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        let server = Arc::clone(&server);
        let service = Arc::clone(&service);
        let handle = thread::Builder::new()
            .name(format!("http-worker-{id}"))
            .spawn(move || worker_loop(&server, &service))?;
        handles.push(handle);
    }
    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread panicked");
        }
    }
    Ok(())
}

fn worker_loop(server: &Server, service: &InferenceService) {
    loop {
        match server.recv() {
            Ok(request) => handle_request(service, request),
            Err(err) => {
                error!(error = %err, "failed to receive request, worker stopping");
                return;
            }
        }
    }
}

fn handle_request(service: &InferenceService, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let body = read_body(&mut request);
    let response = catch_unwind(AssertUnwindSafe(|| {
        dispatch(service, &method, &url, body.as_deref().map_err(PredictError::clone))
    }))
    .unwrap_or_else(|_| {
        error!(method = %method, url = %url, "request handler panicked");
        ApiResponse::error(&PredictError::Internal(INTERNAL_MESSAGE.to_string()))
    });

    debug!(status = response.status, url = %url, "responding");
    if let Err(err) = request.respond(into_tiny_response(response)) {
        error!(error = %err, url = %url, "failed to write response");
    }
}

fn read_body(request: &mut Request) -> Result<Vec<u8>, PredictError> {
    let too_large = || PredictError::Malformed(format!("body melebihi {MAX_BODY_BYTES} byte"));
    if request.body_length().is_some_and(|len| len > MAX_BODY_BYTES) {
        return Err(too_large());
    }
    let mut body = Vec::new();
    Read::take(request.as_reader(), MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| PredictError::Malformed(format!("body tidak dapat dibaca: {e}")))?;
    if body.len() > MAX_BODY_BYTES {
        return Err(too_large());
    }
    Ok(body)
}

fn into_tiny_response(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let headers = response.headers();
    let mut out = Response::from_data(response.body).with_status_code(StatusCode(response.status));
    for (name, value) in headers {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            out = out.with_header(header);
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/server.rs"]
mod tests;
