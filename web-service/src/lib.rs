//! `student-type-web`: HTTP front end for the student type classifier.
//!
//! ## Routes
//! - `GET  /`            input form
//! - `POST /predict`     form submission, rendered result or error page
//! - `POST /api/predict` JSON in, JSON out
//! - `GET  /about`       project information
//!
//! Anything else gets the 404 error page.

pub mod api;
pub mod config;
pub mod routes;
pub mod views;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use student_type_core::ClassifierState;
use tokio::net::TcpListener;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub classifier: Arc<ClassifierState>,
}

impl AppState {
    pub fn new(classifier: ClassifierState) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict_form))
        .route("/api/predict", post(routes::api_predict))
        .route("/about", get(routes::about))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Student type service listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
