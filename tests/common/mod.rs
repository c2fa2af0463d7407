//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use wakademy_cache::content::ApiTransport;
use wakademy_cache::{CacheError, Result};

/// Counts and records every upstream request; answers from canned bodies
/// matched by path prefix.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, Value)>>,
    failing: Mutex<Vec<String>>,
    latency: Option<Duration>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn respond(&self, prefix: &str, body: Value) {
        self.responses.lock().unwrap().push((prefix.to_string(), body));
    }

    pub fn fail(&self, prefix: &str) {
        self.failing.lock().unwrap().push(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn record(&self, path: &str) -> Result<()> {
        self.calls.lock().unwrap().push(path.to_string());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let failed = self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()));
        if failed {
            return Err(CacheError::Http(format!("connection reset: {}", path)));
        }
        Ok(())
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.record(path).await?;
        self.responses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| CacheError::Upstream {
                status: 404,
                path: path.to_string(),
            })
    }

    async fn warm(&self, url: &str) -> Result<()> {
        self.record(url).await
    }
}

pub fn feed_body(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Title {}", id),
                "type": "video",
                "category": "Onboarding",
                "views": 10
            })
        })
        .collect();
    json!({
        "data": data,
        "cached": false,
        "timestamp": "2024-05-01T12:00:00Z",
        "total": ids.len()
    })
}

pub fn detail_body(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Title {}", id),
        "type": "document",
        "fileUrl": format!("https://files.example.com/{}.pdf", id),
        "tags": []
    })
}
