//! HTTP client for the taskgate API.
//!
//! [`TodoClient`] mirrors the server routes one method each and attaches the
//! session token from its [`SessionStore`] as a bearer credential.

pub mod session;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{LoginRequest, LoginResponse};
use crate::models::{CreateTaskRequest, Task};

pub use session::SessionStore;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The HTTP status for `Api` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Logs in and persists the returned token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let response: LoginResponse = self
            .send(
                self.request(Method::POST, "/auth/login")
                    .json(&LoginRequest::new(username, password)),
            )
            .await?;
        self.session.set_token(response.token)
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.session.logout()
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.send(self.request(Method::GET, "/tasks/get")).await
    }

    pub async fn add_task(&self, title: &str) -> Result<Task, ClientError> {
        self.send(
            self.request(Method::POST, "/tasks/post")
                .json(&CreateTaskRequest::new(title)),
        )
        .await
    }

    pub async fn toggle_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.send(self.request(Method::POST, &format!("/tasks/{}/complete", id)))
            .await
    }

    /// Deletes a task and returns the server's confirmation message.
    pub async fn delete_task(&self, id: Uuid) -> Result<String, ClientError> {
        let body: MessageBody = self
            .send(self.request(Method::DELETE, &format!("/tasks/{}/delete", id)))
            .await?;
        Ok(body.message)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<MessageBody>(&bytes)
                .map(|body| body.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            log::debug!("API error {}: {}", status, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
