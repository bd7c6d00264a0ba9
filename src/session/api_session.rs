use super::dto::UploadResponse;
use super::retry_session::RetrySession;
use super::urls::*;
use crate::config::HttpSettings;
use crate::gateway::{
    predicate_query, EntityGateway, FieldPredicate, FileUploader, Gateway, GatewayError, SortSpec,
};
use crate::model::{EntityKind, Record};
use async_trait::async_trait;
use log::info;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Client for the hosted entity API.
pub struct ApiSession {
    session: RetrySession,
    base_url: String,
    api_key: Option<String>,
}

impl ApiSession {
    pub fn new(settings: &HttpSettings) -> Result<Self, GatewayError> {
        let session = RetrySession::with_default_policy(
            settings.timeout,
            settings.max_tries,
            settings.retry_delay,
        )?;
        Ok(Self {
            session,
            base_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => rb.header(HEADER_API_KEY, key),
            None => rb,
        }
    }

    async fn read_json<R: DeserializeOwned>(
        method: &str,
        url: &str,
        resp: Response,
    ) -> Result<R, GatewayError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("{} {}: {}", method, url, e)))
    }

    async fn fetch<T: EntityKind>(
        &self,
        sort: &SortSpec,
        query: Option<String>,
    ) -> Result<Vec<Record<T>>, GatewayError> {
        let url = url_entities(&self.base_url, T::NAME);
        let mut params = vec![("sort", sort.to_string())];
        if let Some(q) = query {
            params.push(("q", q));
        }
        let resp = self
            .session
            .request(|client| self.authorize(client.get(&url).query(&params)))
            .await?;
        let rows: Vec<Record<T>> = Self::read_json("GET", &url, resp).await?;
        info!("{} fetch {}(...) [{} rows] [{}]", self, T::NAME, rows.len(), url);
        Ok(rows)
    }
}

#[async_trait]
impl<T: EntityKind> EntityGateway<T> for ApiSession {
    async fn list(&self, sort: &SortSpec) -> Result<Vec<Record<T>>, GatewayError> {
        self.fetch(sort, None).await
    }

    async fn filter(
        &self,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<T>>, GatewayError> {
        let q = predicate_query(predicates).to_string();
        self.fetch(sort, Some(q)).await
    }

    async fn create(&self, data: &T) -> Result<Record<T>, GatewayError> {
        let url = url_entities(&self.base_url, T::NAME);
        let resp = self
            .session
            .request(|client| self.authorize(client.post(&url).json(data)))
            .await?;
        let rec: Record<T> = Self::read_json("POST", &url, resp).await?;
        info!("{} create {}(...) [{}]", self, T::NAME, rec.id);
        Ok(rec)
    }

    async fn update(&self, id: &str, data: &T) -> Result<Record<T>, GatewayError> {
        let url = url_entities_id(&self.base_url, T::NAME, id);
        let resp = self
            .session
            .request(|client| self.authorize(client.put(&url).json(data)))
            .await?;
        let rec = Self::read_json("PUT", &url, resp).await?;
        info!("{} update {}(...) [{}]", self, T::NAME, id);
        Ok(rec)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let url = url_entities_id(&self.base_url, T::NAME, id);
        let resp = self
            .session
            .request(|client| self.authorize(client.delete(&url)))
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                method: "DELETE".to_string(),
                url,
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        info!("{} delete {}(...) [{}]", self, T::NAME, id);
        Ok(())
    }
}

#[async_trait]
impl FileUploader for ApiSession {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, GatewayError> {
        let url = url_upload(&self.base_url);
        let resp = self
            .session
            .request(|client| {
                self.authorize(
                    client
                        .post(&url)
                        .header(HEADER_FILE_NAME, file_name)
                        .body(bytes.clone()),
                )
            })
            .await?;
        let uploaded: UploadResponse = Self::read_json("POST", &url, resp).await?;
        info!("{} upload(...) [{}]", self, uploaded.file_url);
        Ok(uploaded.file_url)
    }
}

impl Gateway for ApiSession {
    fn describe(&self) -> String {
        format!("remote API {}", self.base_url)
    }
}

impl std::fmt::Display for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ApiSession [{}]>", self.base_url)
    }
}

impl std::fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ApiSession [{}]>", self.base_url)
    }
}
