use chrono::Utc;

use crate::collect::fetch_report_links;
use crate::files::{
    FileAttributes, FileStorage, FileToSave, SaveOptions, SavedFile, PATH_GRADE_REPORT,
    QUALIFICATION_GRADEBOOK,
};
use crate::session::{AccountFields, Session};

/// Fetches each period's PDF report link and stores the documents in
/// one batch. A period whose link cannot be resolved was already
/// skipped (with a warning) by the walker; reports are never replaced
/// once stored.
pub fn save_reports(
    session: &impl Session,
    storage: &impl FileStorage,
    fields: &AccountFields,
) -> anyhow::Result<Vec<SavedFile>> {
    let reports = fetch_report_links(session);

    let now = Utc::now();
    let files_to_download: Vec<FileToSave> = reports
        .iter()
        .map(|report| FileToSave {
            filename: format!("Bulletin du {}.pdf", report.period),
            fileurl: report.url.clone(),
            should_replace_file: false,
            sub_path: PATH_GRADE_REPORT.to_string(),
            file_attributes: FileAttributes::at(now),
        })
        .collect();

    if files_to_download.is_empty() {
        return Ok(Vec::new());
    }

    storage.save_files(
        &files_to_download,
        fields,
        &SaveOptions::labeled(QUALIFICATION_GRADEBOOK),
    )
}
