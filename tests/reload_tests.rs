//! Hot reload tests, both through the filesystem watch and an injected event source.

use std::time::Duration;
use shared_config::config::FileEvent;
use shared_config::SharedConfig;
use tokio::sync::mpsc;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_config_change_detected() {
    let file = common::write_config(&[("height", "180"), ("weight", "77")]);
    let config = SharedConfig::new(file.path()).unwrap();

    assert_eq!(config.get("weight").await, "77");

    common::rewrite_config(&file, &[("height", "180"), ("weight", "85")]);

    let changed = common::eventually(Duration::from_secs(10), || {
        let config = config.clone();
        async move { config.get("weight").await == "85" }
    })
    .await;
    assert!(changed, "didn't detect change");
    assert_eq!(config.get("height").await, "180");

    config.close();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_removed_key_disappears() {
    let file = common::write_config(&[("height", "180"), ("weight", "77")]);
    let config = SharedConfig::new(file.path()).unwrap();

    common::rewrite_config(&file, &[("height", "175")]);

    let reloaded = common::eventually(Duration::from_secs(10), || {
        let config = config.clone();
        async move { config.get("height").await == "175" }
    })
    .await;
    assert!(reloaded, "didn't detect change");
    assert_eq!(config.get("weight").await, "");

    config.close();
}

#[tokio::test]
async fn test_bad_write_keeps_previous_values() {
    let file = common::write_config(&[("height", "180"), ("weight", "77")]);
    let (events_tx, events) = mpsc::unbounded_channel();
    let config = SharedConfig::with_events(file.path(), events).unwrap();

    std::fs::write(file.path(), "{\"weight\": ").unwrap();
    events_tx.send(FileEvent::Modified).unwrap();
    assert_eq!(config.get("weight").await, "77");

    std::fs::remove_file(file.path()).unwrap();
    events_tx.send(FileEvent::Modified).unwrap();
    assert_eq!(config.get("weight").await, "77");

    common::rewrite_config(&file, &[("weight", "85")]);
    events_tx.send(FileEvent::Modified).unwrap();
    let reloaded = common::eventually(Duration::from_secs(5), || {
        let config = config.clone();
        async move { config.get("weight").await == "85" }
    })
    .await;
    assert!(reloaded, "valid write after failures wasn't picked up");

    config.close();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_mixed_content() {
    let old = [("a", "old"), ("b", "old"), ("c", "old")];
    let new = [("a", "new"), ("b", "new"), ("c", "new")];
    let file = common::write_config(&old);
    let (events_tx, events) = mpsc::unbounded_channel();
    let config = SharedConfig::with_events(file.path(), events).unwrap();

    let mut readers = Vec::new();
    for _ in 0..4 {
        let config = config.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                let snapshot = config.snapshot().await;
                assert_eq!(snapshot.len(), 3);
                let first = &snapshot["a"];
                assert!(first == "old" || first == "new");
                assert!(snapshot.values().all(|v| v == first), "torn read: {snapshot:?}");
            }
        }));
    }

    for round in 0..50 {
        let pairs = if round % 2 == 0 { &new } else { &old };
        common::rewrite_config(&file, pairs);
        events_tx.send(FileEvent::Modified).unwrap();
        tokio::task::yield_now().await;
    }

    for reader in readers {
        reader.await.unwrap();
    }

    config.close();
}
