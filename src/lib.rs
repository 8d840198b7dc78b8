#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

use crate::{
    routes::{
        api::{delete_student, get_students, post_student, put_student},
        index::get_index_route,
        students::{
            internal_delete_student, internal_get_close_modal, internal_get_delete_confirmation,
            internal_get_student_form, internal_get_students, internal_post_cancel_form,
            internal_post_student_form,
        },
    },
    state::KampusState,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod list;
pub mod maud_conveniences;
pub mod routes;
pub mod state;
pub mod store;

/// Every route: the REST API under `/api` and the htmx interface.
pub fn app(state: KampusState) -> Router {
    let api = Router::new()
        .route("/api/students", get(get_students).post(post_student))
        .route(
            "/api/students/{id}",
            put(put_student).delete(delete_student),
        )
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(get_index_route))
        .route(
            "/internal/students",
            get(internal_get_students).delete(internal_delete_student),
        )
        .route(
            "/internal/students/form",
            get(internal_get_student_form).post(internal_post_student_form),
        )
        .route(
            "/internal/students/form/cancel",
            post(internal_post_cancel_form),
        )
        .route(
            "/internal/students/confirm_delete",
            get(internal_get_delete_confirmation),
        )
        .route("/internal/modal/close", get(internal_get_close_modal))
        .merge(api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
