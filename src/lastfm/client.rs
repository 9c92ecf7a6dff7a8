//! Last.fm API client

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};

use crate::config::Settings;
use crate::error::UpstreamError;

/// Raw reply from the upstream API
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Anything that can answer a Last.fm method call
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Call `method` for `user`, with method-specific `extra` parameters
    async fn call(
        &self,
        method: &str,
        user: &str,
        extra: &[(&str, String)],
    ) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest-backed client for the public API
pub struct LastFmClient {
    client: Client,
    api_base_url: String,
    api_key: String,
}

impl LastFmClient {
    pub fn new(settings: &Settings) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!("lfm-feeds/", env!("CARGO_PKG_VERSION")))
            .build()?;

        reqwest::Url::parse(&settings.api_base_url)
            .map_err(|e| UpstreamError::Url(format!("{}: {}", settings.api_base_url, e)))?;

        Ok(Self::with_client(
            client,
            settings.api_base_url.clone(),
            settings.api_key.clone(),
        ))
    }

    pub fn with_client(client: Client, api_base_url: String, api_key: String) -> Self {
        Self {
            client,
            api_base_url,
            api_key,
        }
    }
}

/// Full query for a method call, in the order it goes on the wire
pub fn build_params<'a>(
    api_key: &'a str,
    method: &'a str,
    user: &'a str,
    extra: &'a [(&'a str, String)],
) -> Vec<(&'a str, &'a str)> {
    let mut params = vec![
        ("api_key", api_key),
        ("method", method),
        ("user", user),
        ("format", "json"),
    ];
    params.extend(extra.iter().map(|(k, v)| (*k, v.as_str())));
    params
}

#[async_trait]
impl UpstreamClient for LastFmClient {
    async fn call(
        &self,
        method: &str,
        user: &str,
        extra: &[(&str, String)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        tracing::debug!("upstream {} for {} {:?}", method, user, extra);

        let params = build_params(&self.api_key, method, user, extra);
        let resp = self
            .client
            .get(&self.api_base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| UpstreamError::from(e.without_url()))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::from(e.without_url()))?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_params_order() {
        let extra = [("period", "7day".to_string())];
        let params = build_params("key", "user.gettoptracks", "rj", &extra);
        assert_eq!(
            params,
            vec![
                ("api_key", "key"),
                ("method", "user.gettoptracks"),
                ("user", "rj"),
                ("format", "json"),
                ("period", "7day"),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let settings = Settings {
            api_base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(LastFmClient::new(&settings).is_err());
    }
}
