use crate::{
    config::DbConfig,
    data::student::{Student, StudentForm},
    error::{KampusResult, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{PgPool, postgres::PgPoolOptions};

#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: PgPool,
}

impl PostgresStudentStore {
    pub async fn connect(options: PgPoolOptions, db_config: &DbConfig) -> KampusResult<Self> {
        let pool = options
            .connect(&db_config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn list(&self) -> KampusResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT id, nama, jurusan, npm FROM public.mahasiswa ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn create(&self, form: StudentForm) -> KampusResult<Student> {
        let StudentForm { nama, jurusan, npm } = form;

        sqlx::query_as::<_, Student>(
            "INSERT INTO public.mahasiswa (nama, jurusan, npm) VALUES ($1, $2, $3) RETURNING id, nama, jurusan, npm",
        )
        .bind(nama)
        .bind(jurusan)
        .bind(npm)
        .fetch_one(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn update(&self, id: i32, form: StudentForm) -> KampusResult<Student> {
        sqlx::query("UPDATE public.mahasiswa SET nama = $1, jurusan = $2, npm = $3 WHERE id = $4")
            .bind(&form.nama)
            .bind(&form.jurusan)
            .bind(&form.npm)
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;

        Ok(Student::from_form(id, form))
    }

    async fn delete(&self, id: i32) -> KampusResult<()> {
        sqlx::query("DELETE FROM public.mahasiswa WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
