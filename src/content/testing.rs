//! In-memory transport for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::content::ApiTransport;
use crate::error::{CacheError, Result};

/// Records every requested path and answers from canned bodies matched by
/// path prefix (latest registration wins).
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, Value)>>,
    failing: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, prefix: &str, body: Value) {
        self.responses.lock().unwrap().push((prefix.to_string(), body));
    }

    /// Makes every path starting with `prefix` fail with a 500.
    pub fn fail(&self, prefix: &str) {
        self.failing.lock().unwrap().push(prefix.to_string());
    }

    pub fn recover(&self, prefix: &str) {
        self.failing.lock().unwrap().retain(|p| p != prefix);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, path: &str) -> Result<()> {
        self.calls.lock().unwrap().push(path.to_string());
        let failing = self.failing.lock().unwrap();
        if failing.iter().any(|prefix| path.starts_with(prefix.as_str())) {
            return Err(CacheError::Upstream {
                status: 500,
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.record(path)?;
        let responses = self.responses.lock().unwrap();
        responses
            .iter()
            .rev()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, body)| body.clone())
            .ok_or(CacheError::Upstream {
                status: 404,
                path: path.to_string(),
            })
    }

    async fn warm(&self, url: &str) -> Result<()> {
        self.record(url)
    }
}

pub fn feed_body(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "title": format!("Title {}", id), "type": "video", "views": 3}))
        .collect();
    json!({
        "data": data,
        "cached": false,
        "timestamp": "2024-05-01T12:00:00Z"
    })
}

pub fn detail_body(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Title {}", id),
        "type": "podcast",
        "author": "Wakademy",
        "fileUrl": format!("https://files.example.com/{}.mp3", id),
        "tags": ["onboarding"]
    })
}
