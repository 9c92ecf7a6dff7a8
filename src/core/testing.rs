//! In-memory upstream for tests

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::error::UpstreamError;
use crate::lastfm::{UpstreamClient, UpstreamResponse};

/// A recorded upstream call
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub user: String,
    pub extra: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Answers canned bodies per method and records every call it sees
#[derive(Default)]
pub struct FakeUpstream {
    replies: HashMap<String, (u16, String)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, method: &str, status: u16, body: &str) -> Self {
        self.replies
            .insert(method.to_string(), (status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstream {
    async fn call(
        &self,
        method: &str,
        user: &str,
        extra: &[(&str, String)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().push(Call {
            method: method.to_string(),
            user: user.to_string(),
            extra: extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        let (status, body) = self
            .replies
            .get(method)
            .cloned()
            .unwrap_or((404, r#"{"error":3,"message":"Invalid Method"}"#.to_string()));

        Ok(UpstreamResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(body),
        })
    }
}
