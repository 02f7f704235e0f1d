use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::model::NormalizedGradeRecord;
use crate::reconcile::{GradeRecords, UpsertSummary};
use crate::session::AccountFields;

/// Default on-disk persistence collaborator: one row per grade record,
/// the normalized document serialized into a JSON column, uniqueness
/// on the upsert key (start_date, subject).
pub struct SqliteGradeStore {
    conn: Connection,
}

impl SqliteGradeStore {
    pub fn open(workspace: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(workspace)?;
        let db_path = workspace.join("gradesync.sqlite3");
        let conn = Connection::open(db_path)?;
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> anyhow::Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS grade_records(
                id TEXT PRIMARY KEY,
                start_date TEXT NOT NULL,
                subject TEXT NOT NULL,
                source_account TEXT,
                source_login TEXT,
                document TEXT NOT NULL,
                UNIQUE(start_date, subject)
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_grade_records_subject ON grade_records(subject)",
            [],
        )?;
        Ok(SqliteGradeStore { conn })
    }
}

impl GradeRecords for SqliteGradeStore {
    fn query_existing(&self) -> anyhow::Result<Vec<NormalizedGradeRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM grade_records ORDER BY start_date, subject")?;
        let documents = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        documents
            .iter()
            .map(|doc| serde_json::from_str(doc).context("stored grade record is invalid JSON"))
            .collect()
    }

    fn upsert(
        &mut self,
        records: &[NormalizedGradeRecord],
        fields: &AccountFields,
    ) -> anyhow::Result<UpsertSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = UpsertSummary::default();

        for record in records {
            let document =
                serde_json::to_string(record).context("failed to serialize grade record")?;
            let existing_id: Option<String> = tx
                .query_row(
                    "SELECT id FROM grade_records WHERE start_date = ? AND subject = ?",
                    (&record.start_date, &record.subject),
                    |row| row.get(0),
                )
                .optional()?;

            match existing_id {
                Some(id) => {
                    tx.execute(
                        "UPDATE grade_records
                         SET document = ?, source_account = ?, source_login = ?
                         WHERE id = ?",
                        (&document, &fields.account, &fields.login, &id),
                    )?;
                    summary.replaced += 1;
                }
                None => {
                    tx.execute(
                        "INSERT INTO grade_records
                         (id, start_date, subject, source_account, source_login, document)
                         VALUES (?, ?, ?, ?, ?, ?)",
                        (
                            Uuid::new_v4().to_string(),
                            &record.start_date,
                            &record.subject,
                            &fields.account,
                            &fields.login,
                            &document,
                        ),
                    )?;
                    summary.created += 1;
                }
            }
        }

        tx.commit()?;
        Ok(summary)
    }
}
