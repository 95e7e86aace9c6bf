//! HTTP client wrapper around `gloo-net`
//!
//! Attaches the bearer token to every request and turns non-2xx responses
//! into [`ApiError`] with the backend `detail` preserved.

use gloo_net::http::{Request, RequestBuilder, Response};
use kopintar_common::{ApiError, TokenStore};
use leptos::*;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::session::LocalStorageTokenStore;

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: AppConfig,
    tokens: LocalStorageTokenStore,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        let tokens = LocalStorageTokenStore::new(config.token_key);
        Self { config, tokens }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Token is read on every request so a fresh login applies immediately
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn finish(
        &self,
        method: &str,
        url: &str,
        sent: Result<Response, gloo_net::Error>,
    ) -> Result<Response, ApiError> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                logging::error!("{} {} failed: {}", method, url, e);
                return Err(ApiError::network(format!("Request failed: {}", e)));
            }
        };

        if !response.ok() {
            let status = response.status();
            let status_text = response.status_text();
            let body = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<Value>(&text).ok());
            logging::error!(
                "{} {} -> HTTP {} {} {:?}",
                method,
                url,
                status,
                status_text,
                body
            );
            return Err(ApiError::from_status(status, &status_text, body));
        }

        if self.config.debug_http {
            logging::log!("{} {} -> {}", method, url, response.status());
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        response.json().await.map_err(|e| ApiError {
            status: Some(status),
            message: format!("JSON parse error: {}", e),
            detail: None,
        })
    }

    fn encode_error(e: gloo_net::Error) -> ApiError {
        ApiError::network(format!("Request encode error: {}", e))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let sent = self.authorized(Request::get(&url)).send().await;
        let response = self.finish("GET", &url, sent).await?;
        Self::parse(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let request = self
            .authorized(Request::post(&url))
            .json(body)
            .map_err(Self::encode_error)?;
        let response = self.finish("POST", &url, request.send().await).await?;
        Self::parse(response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let request = self
            .authorized(Request::put(&url))
            .json(body)
            .map_err(Self::encode_error)?;
        let response = self.finish("PUT", &url, request.send().await).await?;
        Self::parse(response).await
    }

    /// DELETE; the response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.config.url(path);
        let sent = self.authorized(Request::delete(&url)).send().await;
        self.finish("DELETE", &url, sent).await?;
        Ok(())
    }

    /// POST as `application/x-www-form-urlencoded`
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let request = self
            .authorized(Request::post(&url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form_urlencode(fields))
            .map_err(Self::encode_error)?;
        let response = self.finish("POST", &url, request.send().await).await?;
        Self::parse(response).await
    }
}

pub fn form_urlencode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_urlencode() {
        assert_eq!(
            form_urlencode(&[("username", "admin"), ("password", "p@ss word&1")]),
            "username=admin&password=p%40ss%20word%261"
        );
        assert_eq!(form_urlencode(&[]), "");
    }
}
