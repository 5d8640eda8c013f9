// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Service-level rotation behavior against a real image directory

use rotator_services::{ContentRotationService, ContentService, ServiceError};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn image_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::write(dir.path().join(name), name.as_bytes()).unwrap();
    }
    dir
}

fn quotes(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("quote {}", i)).collect()
}

#[tokio::test]
async fn test_every_quote_once_per_cycle() {
    let dir = image_dir(&["a.png"]);
    let service = ContentRotationService::load(quotes(5), dir.path()).unwrap();

    for _cycle in 0..4 {
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(service.next_quote().await.unwrap());
        }
        seen.sort();
        assert_eq!(seen, quotes(5));
    }
}

#[tokio::test]
async fn test_cycles_repeat_same_order_between_reshuffles() {
    let dir = image_dir(&["a.png", "b.png", "c.png", "d.png"]);
    let service = ContentRotationService::load(quotes(1), dir.path()).unwrap();

    let mut first = Vec::new();
    for _ in 0..4 {
        first.push(service.next_image().await.unwrap().file_name);
    }
    let mut second = Vec::new();
    for _ in 0..4 {
        second.push(service.next_image().await.unwrap().file_name);
    }
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_image_paths_resolve_to_existing_files() {
    let dir = image_dir(&["one.png", "two.gif"]);
    let service = ContentRotationService::load(quotes(2), dir.path()).unwrap();

    for _ in 0..4 {
        let image = service.next_image().await.unwrap();
        assert!(image.path.starts_with(dir.path()));
        assert_eq!(fs::read(&image.path).unwrap(), image.file_name.as_bytes());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_get_fair_counts() {
    let dir = image_dir(&["a.png"]);
    let service = Arc::new(ContentRotationService::load(quotes(3), dir.path()).unwrap());

    let mut tasks = Vec::new();
    for _ in 0..30 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let mut local = Vec::with_capacity(100);
            for _ in 0..100 {
                local.push(service.next_quote().await.unwrap());
            }
            local
        }));
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for task in tasks {
        for quote in task.await.unwrap() {
            *counts.entry(quote).or_default() += 1;
        }
    }

    // 3000 draws over 3 quotes from a cursor starting at 0
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|&c| c == 1000), "{:?}", counts);
}

#[tokio::test]
async fn test_reshuffle_bumps_stats() {
    let dir = image_dir(&["a.png", "b.png"]);
    let service = ContentRotationService::load(quotes(3), dir.path()).unwrap();

    let before = service.get_content_stats().await.unwrap();
    service.reshuffle().await.unwrap();
    let after = service.get_content_stats().await.unwrap();

    assert_eq!(after.shuffle_count, before.shuffle_count + 1);
    assert_eq!(after.quote_count, 3);
    assert_eq!(after.image_count, 2);
}

#[test]
fn test_directory_with_only_subdirectories_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let result = ContentRotationService::load(quotes(1), dir.path());
    assert!(matches!(result, Err(ServiceError::EmptyContent(_))));
}
