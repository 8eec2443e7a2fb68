//! Periodic off-box backup of the SQLite file.
//!
//! The first upload happens one interval after startup, then once per
//! interval. A failed upload is logged and retried on the next tick.

use reqwest::{
    Client,
    multipart::{Form, Part},
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{Instant, interval_at};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Failed to read database file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload rejected with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Spawns the backup loop. Does nothing when no upload URL is configured.
pub fn start_database_backup_job(config: Arc<Config>) {
    let Some(upload_url) = config.backup_upload_url.clone() else {
        tracing::info!("BACKUP_UPLOAD_URL not set, database backup disabled");
        return;
    };

    tokio::spawn(async move {
        let client = Client::new();
        let period = config.backup_interval;
        let mut interval = interval_at(Instant::now() + period, period);

        tracing::info!(
            url = %upload_url,
            every_secs = period.as_secs(),
            "Database backup scheduled"
        );

        loop {
            interval.tick().await;
            tracing::info!("Starting scheduled database backup");

            let uploaded = upload_database(
                &client,
                &upload_url,
                &config.database_path,
                &config.access_token,
            )
            .await;

            match uploaded {
                Ok(response) => {
                    tracing::info!(response = %response, "Database file uploaded successfully")
                }
                Err(e) => tracing::error!("Error uploading database file: {}", e),
            }
        }
    });
}

/// Uploads the database file as multipart field `file`, authenticated with
/// the access token. Returns the server's response body.
pub async fn upload_database(
    client: &Client,
    upload_url: &str,
    database_path: &Path,
    access_token: &str,
) -> Result<String, BackupError> {
    let bytes = tokio::fs::read(database_path).await?;
    let file_name = database_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transactions.db".to_string());

    tracing::debug!(file = %file_name, size = bytes.len(), "Uploading database file");

    let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
    let response = client
        .post(upload_url)
        .bearer_auth(access_token)
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(BackupError::Rejected { status, body });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        routing::post,
    };
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Received {
        uploads: Arc<Mutex<Vec<(Option<String>, Vec<u8>)>>>,
    }

    async fn receive(
        State(received): State<Received>,
        headers: HeaderMap,
        body: Bytes,
    ) -> (StatusCode, &'static str) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        received.uploads.lock().unwrap().push((auth, body.to_vec()));
        (StatusCode::OK, "stored")
    }

    async fn spawn_receiver(received: Received) -> String {
        let app = Router::new()
            .route("/upload", post(receive))
            .route("/reject", post(|| async { (StatusCode::FORBIDDEN, "nope") }))
            .with_state(received);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// A database file in its own temp directory, removed on drop.
    struct TempDb {
        dir: PathBuf,
        path: PathBuf,
    }

    impl TempDb {
        fn new(name: &str, contents: &[u8]) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "parking-ledger-backup-{}-{}",
                std::process::id(),
                name
            ));
            std::fs::create_dir_all(&dir).unwrap();
            let path = dir.join(name);
            std::fs::write(&path, contents).unwrap();
            Self { dir, path }
        }
    }

    impl Drop for TempDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[tokio::test]
    async fn test_upload_sends_file_with_token() {
        let received = Received::default();
        let base = spawn_receiver(received.clone()).await;
        let db = TempDb::new("upload-ok.db", b"SQLite format 3\0fake");

        let body = upload_database(&Client::new(), &format!("{}/upload", base), &db.path, "secret")
            .await
            .unwrap();
        assert_eq!(body, "stored");

        let uploads = received.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        let (auth, payload) = &uploads[0];
        assert_eq!(auth.as_deref(), Some("Bearer secret"));
        let payload = String::from_utf8_lossy(payload);
        assert!(payload.contains("name=\"file\""));
        assert!(payload.contains("filename=\"upload-ok.db\""));
        assert!(payload.contains("SQLite format 3"));
    }

    #[tokio::test]
    async fn test_rejected_upload_is_an_error() {
        let base = spawn_receiver(Received::default()).await;
        let db = TempDb::new("upload-rejected.db", b"data");

        let err = upload_database(&Client::new(), &format!("{}/reject", base), &db.path, "secret")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackupError::Rejected { status, .. } if status == StatusCode::FORBIDDEN
        ));
    }

    #[test]
    fn test_temp_db_is_removed_on_drop() {
        let db = TempDb::new("cleanup.db", b"data");
        let (dir, path) = (db.dir.clone(), db.path.clone());
        assert!(path.exists());

        drop(db);
        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("parking-ledger-does-not-exist.db");

        let err = upload_database(&Client::new(), "http://127.0.0.1:9/upload", &missing, "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, BackupError::Io(_)));
    }
}
