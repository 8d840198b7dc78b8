use kampus::{
    app,
    client::{HttpStudentsApi, StudentsApi},
    data::student::StudentForm,
    error::{ApiError, ListError, Operation},
    list::{FormState, ListController, LoadState, SortField},
    routes::api::DELETED_MESSAGE,
    state::KampusState,
    store::MemoryStudentStore,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serves the app with an in-memory store on a free local port.
async fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(KampusState::with_store(MemoryStudentStore::new()));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn form(nama: &str, jurusan: &str, npm: &str) -> StudentForm {
    StudentForm {
        nama: nama.into(),
        jurusan: jurusan.into(),
        npm: npm.into(),
    }
}

#[tokio::test]
async fn client_speaks_the_rest_contract() {
    let api = HttpStudentsApi::new(format!("{}/", serve().await));

    let created = api
        .create(&form("Budi Santoso", "Teknik Informatika", "20240001"))
        .await
        .unwrap();
    assert_eq!(created.npm, "20240001");

    let listed = api.list().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let updated = api
        .update(created.id, &form("Budi Santoso", "Teknik Informatika", "20240002"))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);

    let confirmation = api.delete(created.id).await.unwrap();
    assert_eq!(confirmation.message, DELETED_MESSAGE);
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn controller_round_trip() {
    let base = serve().await;
    let mut controller = ListController::new(HttpStudentsApi::new(base.clone()));
    controller.load().await.unwrap();
    assert_eq!(controller.state().load_state(), &LoadState::Loaded);

    let mut add = FormState::blank();
    add.set_nama("Ani Wijaya");
    add.set_jurusan("Manajemen");
    for typed in ["2", "20", "20a", "202", "2023", "20230", "202300", "2023000", "20230001"] {
        add.set_npm(typed);
    }
    let ani = controller.submit(&mut add, None).await.unwrap();
    assert_eq!(ani.npm, "20230001");
    assert_eq!(controller.highlighted(), Some(ani.id));

    let budi = controller
        .create(form("Budi Santoso", "Teknik Informatika", "20240001"))
        .await
        .unwrap();
    assert_eq!(controller.highlighted(), Some(budi.id));

    let ids: Vec<_> = controller.state().students().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![budi.id, ani.id]);

    controller.sort_by(SortField::Nama);
    let view: Vec<_> = controller.view().iter().map(|r| r.student.id).collect();
    assert_eq!(view, vec![ani.id, budi.id]);

    controller.delete(ani.id).await.unwrap();

    // the local copy matches a fresh fetch
    let mut fresh = ListController::new(HttpStudentsApi::new(base));
    fresh.load().await.unwrap();
    assert_eq!(fresh.state().students(), controller.state().students());
}

#[tokio::test]
async fn unreachable_server_is_reported_as_failed_load() {
    // bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller = ListController::new(HttpStudentsApi::new(format!("http://{addr}")));
    let err = controller.load().await.unwrap_err();

    assert_eq!(err.operation(), Operation::Load);
    assert!(matches!(
        err,
        ListError::Request {
            source: ApiError::Transport { .. },
            ..
        }
    ));
    assert!(matches!(controller.state().load_state(), LoadState::Failed(_)));
}

#[tokio::test]
async fn non_2xx_becomes_a_server_error() {
    let api = HttpStudentsApi::new(format!("{}/nowhere", serve().await));
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 404, .. }), "{err}");
}

#[tokio::test]
async fn truncated_error_body_is_a_decode_error() {
    // answers 500 with a body shorter than its Content-Length, then hangs up
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\n{\"mess")
            .await
            .unwrap();
    });

    let api = HttpStudentsApi::new(format!("http://{addr}"));
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err}");
}
