use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::info;

use super::ZooService;
use super::codec::JsonLinesEncoder;
use super::error::ServiceError;
use crate::model::{Animal, Catalog, RegistrationInput, ReportPayload, Role};

/// An account as written to `accounts.jsonl`. The password is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AccountRecord {
    name: String,
    email: String,
    role: Role,
    registered_at: DateTime<Utc>,
}

/// A report as written to `reports.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ReportRecord {
    #[serde(flatten)]
    payload: ReportPayload,
    submitted_at: DateTime<Utc>,
}

/// File-backed stand-in for the remote zoo service.
///
/// Accounts and reports are appended as JSON lines under the base path,
/// one file per record type, so each submission is a single append.
pub struct OutboxService {
    base_path: PathBuf,
    catalog: Catalog,
}

impl OutboxService {
    /// Creates a service rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl Into<PathBuf>, catalog: Catalog) -> Result<Self, ServiceError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path, catalog })
    }

    fn accounts_path(&self) -> PathBuf {
        self.base_path.join("accounts.jsonl")
    }

    fn reports_path(&self) -> PathBuf {
        self.base_path.join("reports.jsonl")
    }
}

impl ZooService for OutboxService {
    /// Registers an account, rejecting an email that is already taken
    /// (compared case-insensitively).
    async fn register(&self, input: &RegistrationInput) -> Result<(), ServiceError> {
        let path = self.accounts_path();
        let accounts: Vec<AccountRecord> = read_records(&path).await?;
        if accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(ServiceError::Conflict {
                email: input.email.clone(),
            });
        }

        let record = AccountRecord {
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role,
            registered_at: Utc::now(),
        };
        append_record(&path, &record).await?;
        info!(email = %record.email, role = %record.role, "account registered");
        Ok(())
    }

    /// Stores a report. The animal must exist in the catalog.
    async fn create_report(&self, payload: &ReportPayload) -> Result<(), ServiceError> {
        if !self.catalog.contains(&payload.animal_id) {
            return Err(ServiceError::Rejected(format!(
                "unknown animal: {}",
                payload.animal_id
            )));
        }

        let record = ReportRecord {
            payload: payload.clone(),
            submitted_at: Utc::now(),
        };
        append_record(&self.reports_path(), &record).await?;
        info!(
            animal_id = %payload.animal_id,
            request_doctor = payload.is_request_doctor,
            "report stored"
        );
        Ok(())
    }

    fn list_animals(&self) -> &[Animal] {
        self.catalog.animals()
    }
}

/// Reads every record of a JSONL file. A missing file has no records.
async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut lines = FramedRead::new(file, LinesCodec::new());
    let mut records = Vec::new();
    while let Some(line) = lines.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Appends one record to a JSONL file, creating it if needed.
async fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<(), ServiceError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    let mut sink = FramedWrite::new(file, JsonLinesEncoder::<T>::default());
    sink.send(record).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::service::ErrorKind;

    fn make_service(dir: &Path) -> OutboxService {
        OutboxService::new(dir, Catalog::builtin()).unwrap()
    }

    fn make_input(email: &str) -> RegistrationInput {
        RegistrationInput::new(
            "Ana".to_string(),
            email.to_string(),
            "correct-horse".to_string(),
            Role::Caretaker,
        )
        .unwrap()
    }

    fn make_payload(animal_id: &str) -> ReportPayload {
        ReportPayload {
            animal_id: animal_id.to_string(),
            description: "Limping on left leg".to_string(),
            is_request_doctor: true,
            photo_url: "https://example.com/photo.jpg".to_string(),
        }
    }

    mod register {
        use super::*;

        #[tokio::test]
        async fn stores_account_without_password() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            service
                .register(&make_input("ana@zoo.example"))
                .await
                .unwrap();

            let content = std::fs::read_to_string(dir.path().join("accounts.jsonl")).unwrap();
            assert_eq!(content.lines().count(), 1);
            assert!(content.contains("ana@zoo.example"));
            assert!(content.contains("\"role\":\"caretaker\""));
            assert!(!content.contains("correct-horse"));
        }

        #[tokio::test]
        async fn duplicate_email_is_conflict() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            service
                .register(&make_input("ana@zoo.example"))
                .await
                .unwrap();

            let err = service
                .register(&make_input("ANA@zoo.example"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict);

            let accounts: Vec<AccountRecord> = read_records(&service.accounts_path())
                .await
                .unwrap();
            assert_eq!(accounts.len(), 1);
        }

        #[tokio::test]
        async fn different_emails_both_stored() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            service
                .register(&make_input("ana@zoo.example"))
                .await
                .unwrap();
            service
                .register(&make_input("budi@zoo.example"))
                .await
                .unwrap();

            let accounts: Vec<AccountRecord> = read_records(&service.accounts_path())
                .await
                .unwrap();
            let emails: Vec<&str> = accounts.iter().map(|a| a.email.as_str()).collect();
            assert_eq!(emails, vec!["ana@zoo.example", "budi@zoo.example"]);
        }

        #[tokio::test]
        async fn corrupt_accounts_file_is_server_error() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            std::fs::write(service.accounts_path(), "{not json\n").unwrap();

            let err = service
                .register(&make_input("ana@zoo.example"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Server);
        }
    }

    mod create_report {
        use super::*;

        #[tokio::test]
        async fn appends_report_record() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            service.create_report(&make_payload("lion-1")).await.unwrap();
            service.create_report(&make_payload("lion-2")).await.unwrap();

            let reports: Vec<ReportRecord> = read_records(&service.reports_path())
                .await
                .unwrap();
            assert_eq!(reports.len(), 2);
            assert_eq!(reports[0].payload, make_payload("lion-1"));
            assert_eq!(reports[1].payload.animal_id, "lion-2");
        }

        #[tokio::test]
        async fn record_is_flat_json() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            service.create_report(&make_payload("lion-1")).await.unwrap();

            let content = std::fs::read_to_string(service.reports_path()).unwrap();
            let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
            assert_eq!(value["animal_id"], "lion-1");
            assert_eq!(value["is_request_doctor"], true);
            assert!(value["submitted_at"].is_string());
        }

        #[tokio::test]
        async fn unknown_animal_is_rejected() {
            let dir = tempdir().unwrap();
            let service = make_service(dir.path());
            let err = service
                .create_report(&make_payload("dragon-1"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(!service.reports_path().exists());
        }
    }

    mod records {
        use super::*;

        #[tokio::test]
        async fn missing_file_reads_empty() {
            let dir = tempdir().unwrap();
            let records: Vec<AccountRecord> = read_records(&dir.path().join("none.jsonl"))
                .await
                .unwrap();
            assert!(records.is_empty());
        }

        #[tokio::test]
        async fn blank_lines_are_skipped() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("accounts.jsonl");
            std::fs::write(
                &path,
                "\n{\"name\":\"Ana\",\"email\":\"ana@zoo.example\",\"role\":\"admin\",\"registered_at\":\"2026-02-16T12:00:00Z\"}\n\n",
            )
            .unwrap();
            let records: Vec<AccountRecord> = read_records(&path).await.unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].role, Role::Admin);
        }
    }

    #[test]
    fn list_animals_returns_catalog() {
        let dir = tempdir().unwrap();
        let service = make_service(dir.path());
        assert_eq!(service.list_animals(), Catalog::builtin().animals());
    }
}
