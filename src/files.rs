use chrono::{DateTime, Datelike, Utc};

use crate::session::AccountFields;

/// Storage subpaths. `{subject}` is replaced by the pretty subject
/// name.
pub const PATH_GRADE_SUBJECT: &str = "Notes/{subject}/Sujets";
pub const PATH_GRADE_CORRECTION: &str = "Notes/{subject}/Corrections";
pub const PATH_GRADE_REPORT: &str = "Bulletins";

/// Qualification labels describing the stored document's category.
pub const QUALIFICATION_GRADEBOOK: &str = "gradebook";
pub const QUALIFICATION_WORK_DOCUMENT: &str = "other_work_document";

/// Resource type tag carried by relationship links to stored files.
pub const DOCTYPE_FILE: &str = "gradesync.files";

/// Concurrency requested from the storage collaborator for every
/// batch. The collaborator may parallelize up to this; the caller
/// always awaits the whole batch.
pub const SAVE_CONCURRENCY: usize = 3;

/// One download/store request handed to the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToSave {
    pub filename: String,
    pub fileurl: String,
    pub should_replace_file: bool,
    pub sub_path: String,
    pub file_attributes: FileAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileAttributes {
    pub fn at(date: DateTime<Utc>) -> Self {
        FileAttributes {
            created_at: date,
            updated_at: date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    pub concurrency: usize,
    pub qualification_label: String,
}

impl SaveOptions {
    pub fn labeled(qualification_label: &str) -> Self {
        SaveOptions {
            concurrency: SAVE_CONCURRENCY,
            qualification_label: qualification_label.to_string(),
        }
    }
}

/// Per-file outcome of a batch save. A file the collaborator could not
/// fetch comes back without a document; the batch itself still
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub file_document: Option<FileDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    pub id: String,
}

/// Downloads and stores files on behalf of the sync engine. Transport,
/// retries, and dedup-by-name all live behind this seam.
pub trait FileStorage {
    fn save_files(
        &self,
        files: &[FileToSave],
        fields: &AccountFields,
        options: &SaveOptions,
    ) -> anyhow::Result<Vec<SavedFile>>;
}

/// Builds the display filename for a stored attachment: the source
/// stem plus a short date suffix, original extension preserved.
/// "sujet-controle.pdf" -> "sujet-controle (jeu. 03 oct.).pdf"
pub fn display_filename(source_name: &str, date: DateTime<Utc>) -> String {
    let suffix = short_date_fr(date);
    match source_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, suffix, ext),
        _ => format!("{} ({})", source_name, suffix),
    }
}

const WEEKDAYS_FR: [&str; 7] = ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."];
const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// French short date: abbreviated weekday, two-digit day, abbreviated
/// month ("jeu. 03 oct.").
pub fn short_date_fr(date: DateTime<Utc>) -> String {
    let weekday = WEEKDAYS_FR[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_FR[date.month0() as usize];
    format!("{} {:02} {}", weekday, date.day(), month)
}

pub fn subject_sub_path(template: &str, pretty_subject: &str) -> String {
    template.replace("{subject}", pretty_subject)
}
