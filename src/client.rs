use crate::{
    data::student::{Student, StudentForm},
    error::{ApiError, DecodeSnafu, ErrorBody, ServerSnafu, TransportSnafu},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use snafu::ResultExt;

/// Body of a successful delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// The student REST API as the list controller sees it.
#[async_trait]
pub trait StudentsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ApiError>;
    async fn create(&self, form: &StudentForm) -> Result<Student, ApiError>;
    async fn update(&self, id: i32, form: &StudentForm) -> Result<Student, ApiError>;
    async fn delete(&self, id: i32) -> Result<DeleteConfirmation, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpStudentsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudentsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }

    fn collection(&self) -> String {
        format!("{}/api/students", self.base_url)
    }

    fn member(&self, id: i32) -> String {
        format!("{}/api/students/{id}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.context(TransportSnafu)?;
        let response = Self::check(response).await?;
        response.json().await.context(DecodeSnafu)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.context(DecodeSnafu)?;
        // fall back to the raw text when the body is not `{message}`
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        ServerSnafu {
            status: status.as_u16(),
            message,
        }
        .fail()
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list(&self) -> Result<Vec<Student>, ApiError> {
        Self::send(self.client.get(self.collection())).await
    }

    async fn create(&self, form: &StudentForm) -> Result<Student, ApiError> {
        Self::send(self.client.post(self.collection()).json(form)).await
    }

    async fn update(&self, id: i32, form: &StudentForm) -> Result<Student, ApiError> {
        Self::send(self.client.put(self.member(id)).json(form)).await
    }

    async fn delete(&self, id: i32) -> Result<DeleteConfirmation, ApiError> {
        Self::send(self.client.delete(self.member(id))).await
    }
}
