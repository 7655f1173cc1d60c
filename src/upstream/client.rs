// src/upstream/client.rs

use reqwest::{header::CONTENT_TYPE, IntoUrl, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{common::error::AppError, middleware::auth::Session};

/// Cliente de um backend REST: URL base + o `reqwest::Client` compartilhado.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL com segmentos codificados (ids opacos podem ter `/`, `?`, `#`...).
    pub fn segments_url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("URL de backend inválida '{}': {e}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL de backend não aceita caminho: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        self.request_to(method, self.url(path), session)
    }

    /// Monta a requisição com JSON e, se houver sessão, o token Bearer.
    pub fn request_to(
        &self,
        method: Method,
        url: impl IntoUrl,
        session: Option<&Session>,
    ) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        match session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        }
    }

    /// Envia a requisição e converte o corpo em `T`.
    ///
    /// `what` nomeia o recurso nas mensagens de erro (ex: "Local seguro").
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();
        // Lê o corpo uma única vez: serve tanto para o erro quanto para o JSON
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, body, what));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::MalformedResponse(format!("{what}: {e}")))
    }
}

fn status_error(status: StatusCode, body: String, what: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::InvalidToken,
        StatusCode::NOT_FOUND => AppError::NotFound(what.to_string()),
        _ => AppError::Upstream {
            status: status.as_u16(),
            body,
        },
    }
}
