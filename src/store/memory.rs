use crate::{
    data::student::{Student, StudentForm},
    error::KampusResult,
    store::StudentStore,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keeps students in process. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    by_id: BTreeMap<i32, Student>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> KampusResult<Vec<Student>> {
        Ok(self.inner.read().await.by_id.values().rev().cloned().collect())
    }

    async fn create(&self, form: StudentForm) -> KampusResult<Student> {
        let mut rows = self.inner.write().await;
        rows.last_id += 1;
        let student = Student::from_form(rows.last_id, form);
        rows.by_id.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: i32, form: StudentForm) -> KampusResult<Student> {
        let student = Student::from_form(id, form);
        if let Some(existing) = self.inner.write().await.by_id.get_mut(&id) {
            *existing = student.clone();
        }
        Ok(student)
    }

    async fn delete(&self, id: i32) -> KampusResult<()> {
        self.inner.write().await.by_id.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(nama: &str, npm: &str) -> StudentForm {
        StudentForm {
            nama: nama.into(),
            jurusan: "Sistem Informasi".into(),
            npm: npm.into(),
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStudentStore::new();
        let a = store.create(form("Ani", "20240001")).await.unwrap();
        let b = store.create(form("Budi", "20240002")).await.unwrap();

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStudentStore::new();
        let a = store.create(form("Ani", "20240001")).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(form("Budi", "20240002")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn update_of_missing_id_echoes_without_inserting() {
        let store = MemoryStudentStore::new();
        let echoed = store.update(42, form("Citra", "20240003")).await.unwrap();

        assert_eq!(echoed.id, 42);
        assert_eq!(echoed.nama, "Citra");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_id_succeeds() {
        let store = MemoryStudentStore::new();
        store.delete(99).await.unwrap();
    }
}
