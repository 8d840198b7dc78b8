use crate::{
    data::student::{Student, StudentForm},
    error::KampusResult,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;

/// Persistence for student records. Every operation maps to one statement.
#[async_trait]
pub trait StudentStore: Send + Sync + Debug {
    /// All students, most recently inserted first.
    async fn list(&self) -> KampusResult<Vec<Student>>;

    /// Inserts a student and returns it with its newly assigned id.
    async fn create(&self, form: StudentForm) -> KampusResult<Student>;

    /// Overwrites all three fields of `id` and echoes what was submitted.
    /// A missing `id` is not an error.
    async fn update(&self, id: i32, form: StudentForm) -> KampusResult<Student>;

    /// Removes `id` if present. Removing a missing `id` is not an error.
    async fn delete(&self, id: i32) -> KampusResult<()>;

    async fn close(&self) {}
}

#[async_trait]
impl<T: StudentStore + ?Sized> StudentStore for Arc<T> {
    async fn list(&self) -> KampusResult<Vec<Student>> {
        (**self).list().await
    }

    async fn create(&self, form: StudentForm) -> KampusResult<Student> {
        (**self).create(form).await
    }

    async fn update(&self, id: i32, form: StudentForm) -> KampusResult<Student> {
        (**self).update(id, form).await
    }

    async fn delete(&self, id: i32) -> KampusResult<()> {
        (**self).delete(id).await
    }

    async fn close(&self) {
        (**self).close().await;
    }
}
