use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::submission::naming;

/// Upper bound on the collision-suffix search before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// File-backed store for accepted applications: one pretty-printed JSON
/// document per submission, never rewritten once committed.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    dir: PathBuf,
}

/// List-view projection of a stored application.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub filename: String,
    pub submitted_at: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cell_phone: String,
    pub home_phone: String,
    pub desired_move_in: String,
}

impl SubmissionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Durably write an enriched record, returning the filename it was
    /// committed under.
    ///
    /// The name is claimed with an exclusive create, so two concurrent
    /// submissions that derive the same base name can never both win the
    /// same file; the loser advances the numeric suffix and tries again.
    /// The document is serialized up front and written in one call, and a
    /// claimed file is removed if that write fails, so readers never see a
    /// partial record.
    pub async fn persist(
        &self,
        record: &Map<String, Value>,
        received_at: DateTime<Utc>,
    ) -> std::io::Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let mut body = serde_json::to_vec_pretty(record)?;
        body.push(b'\n');

        let base = naming::base_name(received_at, record);
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = naming::candidate(&base, attempt);
            let path = self.dir.join(&filename);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            if let Err(e) = write_all_committed(&mut file, &body).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e);
            }

            return Ok(filename);
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free filename for '{base}' after {MAX_NAME_ATTEMPTS} attempts"),
        ))
    }

    /// Load one stored application by filename. `Ok(None)` means no such
    /// record. The caller is responsible for validating the name first.
    pub async fn load(&self, filename: &str) -> std::io::Result<Option<Map<String, Value>>> {
        let bytes = match fs::read(self.dir.join(filename)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    /// Summarize every readable stored application, newest first.
    ///
    /// A store directory that does not exist yet means no submissions;
    /// individual files that cannot be read or parsed are skipped rather
    /// than failing the whole listing.
    pub async fn list_summaries(&self) -> std::io::Result<Vec<ApplicationSummary>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !filename.ends_with(".json") {
                continue;
            }

            let Ok(bytes) = fs::read(entry.path()).await else {
                continue;
            };
            let Ok(record) = serde_json::from_slice::<Map<String, Value>>(&bytes) else {
                tracing::warn!(%filename, "skipping unparseable stored application");
                continue;
            };

            summaries.push(ApplicationSummary {
                filename,
                submitted_at: string_field(&record, "submittedAt"),
                first_name: string_field(&record, "firstName"),
                last_name: string_field(&record, "lastName"),
                email: string_field(&record, "email"),
                cell_phone: string_field(&record, "cellPhone"),
                home_phone: string_field(&record, "homePhone"),
                desired_move_in: string_field(&record, "desiredMoveIn"),
            });
        }

        // RFC 3339 UTC timestamps sort chronologically as strings.
        summaries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(summaries)
    }
}

async fn write_all_committed(file: &mut fs::File, body: &[u8]) -> std::io::Result<()> {
    file.write_all(body).await?;
    file.flush().await
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
