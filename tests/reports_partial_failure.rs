use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::{TimeZone, Utc};

use gradesync::collect::fetch_report_links;
use gradesync::files::{FileDocument, FileStorage, FileToSave, SaveOptions, SavedFile};
use gradesync::model::{GradesOverview, Period};
use gradesync::report::save_reports;
use gradesync::{AccountFields, Session};

struct FakeSession {
    periods: Vec<Period>,
    failing_reports: HashSet<String>,
    report_urls: HashMap<String, String>,
}

impl Session for FakeSession {
    fn periods(&self) -> &[Period] {
        &self.periods
    }

    fn fetch_grades_overview(&self, _period: &Period) -> anyhow::Result<GradesOverview> {
        Ok(GradesOverview {
            grades: vec![],
            subjects_averages: vec![],
        })
    }

    fn fetch_report_url(&self, period: &Period) -> anyhow::Result<String> {
        if self.failing_reports.contains(&period.name) {
            anyhow::bail!("report endpoint returned 500 for {}", period.name);
        }
        Ok(self.report_urls[&period.name].clone())
    }
}

#[derive(Default)]
struct RecordingStorage {
    requests: RefCell<Vec<FileToSave>>,
}

impl FileStorage for RecordingStorage {
    fn save_files(
        &self,
        files: &[FileToSave],
        _fields: &AccountFields,
        _options: &SaveOptions,
    ) -> anyhow::Result<Vec<SavedFile>> {
        let mut requests = self.requests.borrow_mut();
        let mut out = Vec::new();
        for file in files {
            requests.push(file.clone());
            out.push(SavedFile {
                file_document: Some(FileDocument {
                    id: format!("file-{}", requests.len()),
                }),
            });
        }
        Ok(out)
    }
}

fn period(name: &str, month: u32) -> Period {
    Period {
        name: name.to_string(),
        start_date: Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, month + 3, 20, 0, 0, 0).unwrap(),
    }
}

fn session_with_broken_t2() -> FakeSession {
    FakeSession {
        periods: vec![period("Trimestre 1", 9), period("Trimestre 2", 1)],
        failing_reports: HashSet::from(["Trimestre 2".to_string()]),
        report_urls: HashMap::from([
            (
                "Trimestre 1".to_string(),
                "https://portal.example.org/reports/t1.pdf".to_string(),
            ),
            (
                "Trimestre 2".to_string(),
                "https://portal.example.org/reports/t2.pdf".to_string(),
            ),
        ]),
    }
}

#[test]
fn failed_period_is_skipped_not_fatal() {
    let links = fetch_report_links(&session_with_broken_t2());
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].period, "Trimestre 1");
    assert_eq!(links[0].url, "https://portal.example.org/reports/t1.pdf");
}

#[test]
fn only_resolved_reports_reach_storage() {
    let storage = RecordingStorage::default();
    let saved = save_reports(
        &session_with_broken_t2(),
        &storage,
        &AccountFields {
            account: "account-1".to_string(),
            login: "eleve@example.org".to_string(),
        },
    )
    .expect("save reports");

    assert_eq!(saved.len(), 1);
    let requests = storage.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].filename, "Bulletin du Trimestre 1.pdf");
    assert_eq!(requests[0].sub_path, "Bulletins");
    assert!(!requests[0].should_replace_file);
}

#[test]
fn all_reports_failing_saves_nothing() {
    let mut session = session_with_broken_t2();
    session.failing_reports.insert("Trimestre 1".to_string());

    let storage = RecordingStorage::default();
    let saved = save_reports(
        &session,
        &storage,
        &AccountFields {
            account: "account-1".to_string(),
            login: "eleve@example.org".to_string(),
        },
    )
    .expect("save reports");

    assert!(saved.is_empty());
    assert!(storage.requests.borrow().is_empty());
}
