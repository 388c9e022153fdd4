use api_types::{ValidationErrors, category::Category, entry::Entry};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    ports::{CategoryGateway, EntryGateway},
};

/// Failure of a collaborator call: an HTTP-like status with an optional
/// body, or a transport problem that never produced a response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server answered {status}")]
    Status {
        status: StatusCode,
        body: Option<String>,
    },
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Endpoint(_) => None,
        }
    }

    /// `errors` list of a 422 body. `None` for any other failure or when the
    /// body does not carry the list.
    pub fn validation_messages(&self) -> Option<Vec<String>> {
        let Self::Status { status, body } = self else {
            return None;
        };
        if *status != StatusCode::UNPROCESSABLE_ENTITY {
            return None;
        }
        let body = body.as_deref()?;
        serde_json::from_str::<ValidationErrors>(body)
            .ok()
            .map(|payload| payload.errors)
    }
}

/// REST client for the entries backend.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        let prefix = api_prefix.trim_matches('/');
        let path = format!(
            "{}/{}{}",
            base_url.path().trim_end_matches('/'),
            prefix,
            if prefix.is_empty() { "" } else { "/" }
        );
        base_url.set_path(&path);
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Endpoint(format!("{path}: {err}")))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let res = Self::send(request).await?;
        Ok(res.json::<T>().await?)
    }

    async fn send(request: RequestBuilder) -> std::result::Result<reqwest::Response, ClientError> {
        let res = request.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.ok().filter(|body| !body.is_empty());
        tracing::warn!(%status, "request failed");
        Err(ClientError::Status { status, body })
    }
}

impl EntryGateway for Client {
    async fn get_by_id(&self, id: i64) -> std::result::Result<Entry, ClientError> {
        let endpoint = self.endpoint(&format!("entries/{id}"))?;
        tracing::debug!(%endpoint, "GET entry");
        self.send_json(self.http.get(endpoint)).await
    }

    async fn get_all(&self) -> std::result::Result<Vec<Entry>, ClientError> {
        let endpoint = self.endpoint("entries")?;
        tracing::debug!(%endpoint, "GET entries");
        self.send_json(self.http.get(endpoint)).await
    }

    async fn create(&self, entry: &Entry) -> std::result::Result<Entry, ClientError> {
        let endpoint = self.endpoint("entries")?;
        tracing::debug!(%endpoint, "POST entry");
        self.send_json(self.http.post(endpoint).json(entry)).await
    }

    async fn update(&self, entry: &Entry) -> std::result::Result<Entry, ClientError> {
        let id = entry
            .id
            .ok_or_else(|| ClientError::Endpoint("update without id".to_string()))?;
        let endpoint = self.endpoint(&format!("entries/{id}"))?;
        tracing::debug!(%endpoint, "PUT entry");
        let res = Self::send(self.http.put(endpoint).json(entry)).await?;

        // Some backends answer 204 to a PUT; the submitted record is then the
        // canonical one.
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(entry.clone());
        }
        Ok(res.json::<Entry>().await?)
    }

    async fn delete(&self, id: i64) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("entries/{id}"))?;
        tracing::debug!(%endpoint, "DELETE entry");
        Self::send(self.http.delete(endpoint)).await?;
        Ok(())
    }
}

impl CategoryGateway for Client {
    async fn get_all(&self) -> std::result::Result<Vec<Category>, ClientError> {
        let endpoint = self.endpoint("categories")?;
        tracing::debug!(%endpoint, "GET categories");
        self.send_json(self.http.get(endpoint)).await
    }
}
