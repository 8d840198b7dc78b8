use crate::{
    client::DeleteConfirmation,
    data::student::{Student, StudentForm},
    error::{KampusError, KampusResult},
    state::KampusState,
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, State},
    http::StatusCode,
};

pub const DELETED_MESSAGE: &str = "Mahasiswa berhasil dihapus";

/// `Json`, but a malformed body is reported like every other failure.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(KampusError))]
pub struct ApiJson<T>(pub T);

/// `Path`, but a malformed id is reported like every other failure.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(KampusError))]
pub struct ApiPath<T>(pub T);

pub async fn get_students(State(state): State<KampusState>) -> KampusResult<Json<Vec<Student>>> {
    Ok(Json(state.list().await?))
}

pub async fn post_student(
    State(state): State<KampusState>,
    ApiJson(form): ApiJson<StudentForm>,
) -> KampusResult<(StatusCode, Json<Student>)> {
    let student = state.create(form).await?;
    info!(id = student.id, "Created student");
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn put_student(
    State(state): State<KampusState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(form): ApiJson<StudentForm>,
) -> KampusResult<Json<Student>> {
    let student = state.update(id, form).await?;
    info!(id, "Updated student");
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<KampusState>,
    ApiPath(id): ApiPath<i32>,
) -> KampusResult<Json<DeleteConfirmation>> {
    state.delete(id).await?;
    info!(id, "Deleted student");
    Ok(Json(DeleteConfirmation {
        message: DELETED_MESSAGE.to_string(),
    }))
}
