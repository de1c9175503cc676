//! HTML views rendered with askama.

use askama::Template;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use student_type_core::Assessment;
use student_type_core::StudentFeatures;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Served when a template itself fails to render.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error (500)";
pub const NOT_FOUND_MESSAGE: &str = "Page not found (404)";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub version: &'static str,
    pub error_message: String,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub version: &'static str,
    pub student_type: String,
    pub emoji: &'static str,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    pub advice: &'static str,
    pub color: &'static str,
    pub confidence: f64,
    pub summary: InputSummary,
}

/// The submitted answers echoed back on the result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSummary {
    pub study_hours: u8,
    pub attendance: u8,
    pub assignments: &'static str,
    pub social_media: u8,
    pub sleep_hours: u8,
    pub backlogs: &'static str,
}

impl From<&StudentFeatures> for InputSummary {
    fn from(features: &StudentFeatures) -> Self {
        Self {
            study_hours: features.study_hours,
            attendance: features.attendance,
            assignments: yes_no(features.assignments_done),
            social_media: features.social_media_hours,
            sleep_hours: features.sleep_hours,
            backlogs: yes_no(features.has_backlogs),
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

impl IndexPage {
    pub fn new() -> Self {
        Self { version: VERSION }
    }
}

impl Default for IndexPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AboutPage {
    pub fn new() -> Self {
        Self { version: VERSION }
    }
}

impl Default for AboutPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorPage {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            version: VERSION,
            error_message: error_message.into(),
        }
    }
}

impl From<&Assessment> for ResultPage {
    fn from(assessment: &Assessment) -> Self {
        let info = assessment.info;
        Self {
            version: VERSION,
            student_type: assessment.prediction.label.clone(),
            emoji: info.emoji,
            description: info.description,
            characteristics: info.characteristics,
            advice: info.advice,
            color: info.color,
            confidence: assessment.prediction.rounded_confidence(),
            summary: InputSummary::from(&assessment.features),
        }
    }
}

/// Render `page` with `status`, degrading to a fixed message on failure.
pub fn render<T: Template>(page: &T, status: StatusCode) -> Response {
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!("Template rendering failed: {err}");
            internal_error()
        }
    }
}

pub fn error_page(status: StatusCode, message: impl Into<String>) -> Response {
    render(&ErrorPage::new(message), status)
}

/// Last-resort 500 that does not go through a template.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<h1>{INTERNAL_ERROR_MESSAGE}</h1>")),
    )
        .into_response()
}
