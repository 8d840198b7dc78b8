use crate::list::form::InvalidForm;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use maud::html;
use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::{fmt, num::ParseIntError};

pub type KampusResult<T> = Result<T, KampusError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum KampusError {
    #[snafu(display("Error opening database: {source}"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error making SQL query: {source}"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema: {source}"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{name}`"))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{name}` as a number"))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unknown store kind {kind:?}, expected `postgres` or `memory`"))]
    UnknownStoreKind { kind: String },
    #[snafu(display("Unable to read JSON body: {source}"))]
    BadJsonBody { source: JsonRejection },
    #[snafu(display("Unable to read path: {source}"))]
    BadPath { source: PathRejection },
}

impl From<JsonRejection> for KampusError {
    fn from(source: JsonRejection) -> Self {
        Self::BadJsonBody { source }
    }
}

impl From<PathRejection> for KampusError {
    fn from(source: PathRejection) -> Self {
        Self::BadPath { source }
    }
}

/// Body of every failed API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for KampusError {
    fn into_response(self) -> Response {
        error!(?self, "Error!");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// A failure inside one of the htmx routes. Rendered as an alert in the modal
/// slot, naming the operation that failed.
#[derive(Debug)]
pub struct HtmlError {
    operation: Operation,
    source: KampusError,
}

impl HtmlError {
    pub fn during(operation: Operation) -> impl FnOnce(KampusError) -> Self {
        move |source| Self { operation, source }
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        error!(source = ?self.source, operation = %self.operation, "Error!");

        let markup = html! {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                strong class="font-bold" {"Gagal " (self.operation.to_string()) ": "}
                span {(self.source.to_string())}
                div class="mt-2 text-right" {
                    button class="bg-slate-600 hover:bg-slate-800 text-white font-bold py-1 px-3 rounded" hx-get="/internal/modal/close" hx-target="#modal" {
                        "Tutup"
                    }
                }
            }
        };

        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Html(markup)).into_response();
        let headers = response.headers_mut();
        headers.insert("HX-Retarget", HeaderValue::from_static("#modal"));
        headers.insert("HX-Reswap", HeaderValue::from_static("innerHTML"));
        response
    }
}

/// Errors seen by the REST client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("Unable to reach the server: {source}"))]
    Transport { source: reqwest::Error },
    #[snafu(display("Server responded with {status}: {message}"))]
    Server { status: u16, message: String },
    #[snafu(display("Unable to decode server response: {source}"))]
    Decode { source: reqwest::Error },
}

/// The user-facing operation a [`ListError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "memuat data",
            Self::Create => "menambah mahasiswa",
            Self::Update => "update mahasiswa",
            Self::Delete => "menghapus mahasiswa",
        })
    }
}

/// What the list controller reports to the user when an action fails.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ListError {
    #[snafu(display("Gagal {operation}: {source}"))]
    Request {
        operation: Operation,
        source: ApiError,
    },
    #[snafu(display("Gagal {operation}: {source}"))]
    Invalid {
        operation: Operation,
        source: InvalidForm,
    },
}

impl ListError {
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Request { operation, .. } | Self::Invalid { operation, .. } => *operation,
        }
    }
}
