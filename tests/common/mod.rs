//! Shared utilities for integration tests.

use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Write `pairs` as a JSON object into a fresh temp file.
pub fn write_config(pairs: &[(&str, &str)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sctest")
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(encode(pairs).as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Overwrite the file in place, keeping the same inode so watches survive.
#[allow(dead_code)]
pub fn rewrite_config(file: &NamedTempFile, pairs: &[(&str, &str)]) {
    std::fs::write(file.path(), encode(pairs)).unwrap();
}

/// Write raw bytes into a fresh temp file with the given suffix.
#[allow(dead_code)]
pub fn write_raw(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sctest")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn encode(pairs: &[(&str, &str)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    let mut out = serde_json::to_string(&map).unwrap();
    out.push('\n');
    out
}

/// Poll `check` until it returns true or `timeout` elapses.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
