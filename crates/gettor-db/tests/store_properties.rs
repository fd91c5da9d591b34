//! End-to-end properties of the request and catalog stores on a real
//! database file.

use std::path::Path;

use chrono::NaiveDate;
use gettor_core::{AppCore, NewRequest, Request};
use gettor_db::{CoreFactory, DbOptions, close_database, setup_database};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn open(dir: &Path) -> (SqlitePool, AppCore) {
    let pool = setup_database(&dir.join("gettor.db"), &DbOptions::default())
        .await
        .unwrap();
    let core = CoreFactory::build_app_core(pool.clone());
    (pool, core)
}

async fn snapshot(core: &AppCore, status: &str) -> Vec<Request> {
    core.requests().list_requests(status, "links", "email").await
}

#[tokio::test]
async fn scenario_record_rekey_and_list() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;

    let req = NewRequest::new("abc", "links", "email", Some("linux"), "20240101");
    assert_eq!(core.requests().record_request(req).await, Some(()));

    core.requests()
        .update_request("abc", "hash123", "processed", "email", "20240101")
        .await
        .unwrap();

    let rows = snapshot(&core, "processed").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "hash123");
    assert_eq!(rows[0].platform.as_deref(), Some("linux"));

    close_database(&pool).await;
}

#[tokio::test]
async fn rekey_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;

    let req = NewRequest::new("abc", "links", "email", Some("linux"), "20240101");
    core.requests().record_request(req).await.unwrap();

    let first = core
        .requests()
        .update_request("abc", "hash123", "processed", "email", "20240101")
        .await;
    let after_once = snapshot(&core, "processed").await;

    let second = core
        .requests()
        .update_request("abc", "hash123", "processed", "email", "20240101")
        .await;
    let after_twice = snapshot(&core, "processed").await;

    assert_eq!(first, Some(1));
    assert_eq!(second, Some(0));
    assert_eq!(after_once, after_twice);

    close_database(&pool).await;
}

#[tokio::test]
async fn update_on_missing_target_leaves_table_unchanged() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;

    let req = NewRequest::new("abc", "links", "email", Some("linux"), "20240101");
    core.requests().record_request(req).await.unwrap();
    let before = snapshot(&core, "new").await;

    let updated = core
        .requests()
        .update_request("nobody", "hash999", "sent", "email", "20240101")
        .await;

    assert_eq!(updated, Some(0));
    assert_eq!(snapshot(&core, "new").await, before);
    assert!(snapshot(&core, "sent").await.is_empty());

    close_database(&pool).await;
}

#[tokio::test]
async fn list_requires_all_three_fields_to_match() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;
    let requests = core.requests();

    for (id, command, service, status) in [
        ("a", "links", "email", "new"),
        ("b", "help", "email", "new"),
        ("c", "links", "twitter", "new"),
        ("d", "links", "email", "sent"),
        ("e", "links", "email", "new"),
    ] {
        let req = NewRequest::new(id, command, service, None, "20240101").with_status(status);
        requests.record_request(req).await.unwrap();
    }

    let ids: Vec<String> = requests
        .list_requests("new", "links", "email")
        .await
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["a", "e"]);
    assert!(requests.list_requests("error", "links", "email").await.is_empty());

    close_database(&pool).await;
}

#[tokio::test]
async fn count_is_scoped_to_service() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;
    let requests = core.requests();

    for date in ["20240101", "20240102", "20240103"] {
        let req = NewRequest::new("R1", "links", "email", Some("linux"), date);
        requests.record_request(req).await.unwrap();
    }
    let req = NewRequest::new("R1", "links", "twitter", Some("linux"), "20240101");
    requests.record_request(req).await.unwrap();

    assert_eq!(requests.count_requests("R1", "email").await, Some(3));
    assert_eq!(requests.count_requests("R1", "twitter").await, Some(1));
    assert_eq!(requests.count_requests("R2", "email").await, Some(0));

    close_database(&pool).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stats_updates_never_lose_a_count() {
    const N: usize = 50;

    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let core = core.clone();
            tokio::spawn(async move {
                core.catalog()
                    .update_stats_on(day, "links", "email", Some("linux"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), Some(()));
    }

    let stats = core.catalog().stats_for("20240101").await;
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].num_requests, N as i64);
    assert_eq!(stats[0].platform.as_deref(), Some("linux"));

    close_database(&pool).await;
}

#[tokio::test]
async fn writes_survive_reopening_the_file() {
    let dir = TempDir::new().unwrap();

    let (pool, core) = open(dir.path()).await;
    let req = NewRequest::new("abc", "links", "email", Some("linux"), "20240101");
    core.requests().record_request(req).await.unwrap();
    close_database(&pool).await;

    let (pool, core) = open(dir.path()).await;
    assert_eq!(core.requests().count_requests("abc", "email").await, Some(1));
    close_database(&pool).await;
}

#[tokio::test]
async fn operations_after_shutdown_degrade_to_empty() {
    let dir = TempDir::new().unwrap();
    let (pool, core) = open(dir.path()).await;
    close_database(&pool).await;

    let req = NewRequest::new("abc", "links", "email", None, "20240101");
    assert_eq!(core.requests().record_request(req).await, None);
    assert_eq!(core.requests().count_requests("abc", "email").await, None);
    assert!(core.catalog().get_links("linux", "active").await.is_empty());
}
