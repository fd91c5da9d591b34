//! `SQLite` implementation of the `RequestRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use gettor_core::{NewRequest, RepositoryError, Request, RequestRekey, RequestRepository};

use super::row_mappers::{REQUEST_SELECT_COLUMNS, map_sqlx_error, row_to_request};

/// `SQLite` implementation of the `RequestRepository` trait.
///
/// Rows carry no primary key of their own; `rowid` provides insertion
/// order for listings.
pub struct SqliteRequestRepository {
    pool: SqlitePool,
}

impl SqliteRequestRepository {
    /// Create a new `SQLite` request repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for SqliteRequestRepository {
    async fn insert(&self, request: &NewRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO requests (id, command, platform, service, date, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.command)
        .bind(&request.platform)
        .bind(&request.service)
        .bind(&request.date)
        .bind(&request.status)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list(
        &self,
        status: &str,
        command: &str,
        service: &str,
    ) -> Result<Vec<Request>, RepositoryError> {
        let sql = format!(
            "SELECT {REQUEST_SELECT_COLUMNS} FROM requests \
             WHERE service = ? AND command = ? AND status = ? ORDER BY rowid"
        );

        let rows = sqlx::query(&sql)
            .bind(service)
            .bind(command)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_request).collect()
    }

    async fn count(&self, id: &str, service: &str) -> Result<u64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(rowid) FROM requests WHERE id = ? AND service = ?",
        )
        .bind(id)
        .bind(service)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count.unsigned_abs())
    }

    async fn rekey(&self, rekey: &RequestRekey) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE requests SET id = ?, status = ?
            WHERE id = ? AND service = ? AND date = ?
            "#,
        )
        .bind(&rekey.hid)
        .bind(&rekey.status)
        .bind(&rekey.id)
        .bind(&rekey.service)
        .bind(&rekey.date)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteRequestRepository {
        SqliteRequestRepository::new(setup_test_database().await.unwrap())
    }

    fn request(id: &str, command: &str, service: &str, date: &str) -> NewRequest {
        NewRequest::new(id, command, service, Some("linux"), date)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = repo().await;
        repo.insert(&request("abc", "links", "email", "20240101"))
            .await
            .unwrap();

        let rows = repo.list("new", "links", "email").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            Request {
                id: "abc".into(),
                command: "links".into(),
                platform: Some("linux".into()),
                service: "email".into(),
                date: "20240101".into(),
                status: "new".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_null_platform_round_trips() {
        let repo = repo().await;
        let help = NewRequest::new("abc", "help", "email", None, "20240101");
        repo.insert(&help).await.unwrap();

        let rows = repo.list("new", "help", "email").await.unwrap();
        assert_eq!(rows[0].platform, None);
    }

    #[tokio::test]
    async fn test_list_filters_exactly_in_insertion_order() {
        let repo = repo().await;
        repo.insert(&request("first", "links", "email", "20240101"))
            .await
            .unwrap();
        repo.insert(&request("other-cmd", "help", "email", "20240101"))
            .await
            .unwrap();
        repo.insert(&request("other-svc", "links", "twitter", "20240101"))
            .await
            .unwrap();
        repo.insert(&request("sent", "links", "email", "20240101").with_status("sent"))
            .await
            .unwrap();
        repo.insert(&request("second", "links", "email", "20240102"))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .list("new", "links", "email")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["first", "second"]);

        assert!(repo.list("error", "links", "email").await.unwrap().is_empty());
        assert!(repo.list("new", "link", "email").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_by_id_and_service() {
        let repo = repo().await;
        for date in ["20240101", "20240102", "20240103"] {
            repo.insert(&request("R1", "links", "email", date))
                .await
                .unwrap();
        }
        repo.insert(&request("R1", "links", "twitter", "20240101"))
            .await
            .unwrap();

        assert_eq!(repo.count("R1", "email").await.unwrap(), 3);
        assert_eq!(repo.count("R1", "twitter").await.unwrap(), 1);
        assert_eq!(repo.count("R2", "email").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rekey_matches_id_service_and_date() {
        let repo = repo().await;
        repo.insert(&request("abc", "links", "email", "20240101"))
            .await
            .unwrap();
        repo.insert(&request("abc", "links", "email", "20240102"))
            .await
            .unwrap();

        let rekey = RequestRekey {
            id: "abc".into(),
            hid: "hash123".into(),
            status: "processed".into(),
            service: "email".into(),
            date: "20240101".into(),
        };
        assert_eq!(repo.rekey(&rekey).await.unwrap(), 1);

        let processed = repo.list("processed", "links", "email").await.unwrap();
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].id, "hash123");
        assert_eq!(processed[0].date, "20240101");

        let untouched = repo.list("new", "links", "email").await.unwrap();
        assert_eq!(untouched.len(), 1);
        assert_eq!(untouched[0].id, "abc");
    }

    #[tokio::test]
    async fn test_rekey_missing_target_touches_nothing() {
        let repo = repo().await;
        repo.insert(&request("abc", "links", "email", "20240101"))
            .await
            .unwrap();

        let rekey = RequestRekey {
            id: "abc".into(),
            hid: "hash123".into(),
            status: "processed".into(),
            service: "twitter".into(),
            date: "20240101".into(),
        };
        assert_eq!(repo.rekey(&rekey).await.unwrap(), 0);
        assert_eq!(repo.list("new", "links", "email").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_a_storage_error() {
        let pool = setup_test_database().await.unwrap();
        let repo = SqliteRequestRepository::new(pool.clone());
        pool.close().await;

        let err = repo.count("abc", "email").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(_)));
    }
}
