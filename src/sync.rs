use crate::aggregate::group_evaluations;
use crate::attach::{correlate_attachments, EvaluationFiles};
use crate::collect::fetch_period_overviews;
use crate::files::FileStorage;
use crate::model::NormalizedGradeRecord;
use crate::normalize::normalize_record;
use crate::reconcile::{filter_new_records, GradeRecords, UpsertSummary};
use crate::report::save_reports;
use crate::session::{AccountFields, Session};
use crate::subjects::subject_label;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Toggles attachment persistence. Reports and grade records are
    /// always synced.
    pub save_files: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions { save_files: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Records normalized from this run's fetch.
    pub records_fetched: usize,
    /// Records submitted after dedup against the stored set.
    pub records_submitted: usize,
    /// Records dropped as already recorded.
    pub records_skipped: usize,
    pub upsert: UpsertSummary,
    /// Period reports stored this run.
    pub reports_saved: usize,
}

/// Runs one full grade sync: walk the periods, aggregate, correlate
/// attachments, normalize, reconcile against the stored set, upsert
/// the survivors, then store the period reports.
///
/// Overview fetches and persistence calls propagate their failures;
/// per-period report links and per-file attachment downloads degrade
/// to warnings.
pub fn sync_grades(
    session: &impl Session,
    storage: &impl FileStorage,
    records: &mut impl GradeRecords,
    fields: &AccountFields,
    options: &SyncOptions,
) -> anyhow::Result<SyncSummary> {
    tracing::info!(
        save_files = options.save_files,
        "grade sync started, attachment saving {}",
        if options.save_files { "enabled" } else { "disabled" }
    );

    let overviews = fetch_period_overviews(session)?;
    let aggregates = group_evaluations(overviews);

    let mut fresh: Vec<NormalizedGradeRecord> = Vec::with_capacity(aggregates.len());
    for aggregate in &aggregates {
        let label = subject_label(Some(aggregate.subject.name.as_str()));
        let attachments = if options.save_files {
            correlate_attachments(storage, aggregate, &label, fields)
        } else {
            EvaluationFiles::default()
        };
        fresh.push(normalize_record(aggregate, &label, attachments));
    }

    let existing = records.query_existing()?;
    let fetched = fresh.len();
    let filtered = filter_new_records(&existing, fresh);
    let submitted = filtered.len();

    let upsert = records.upsert(&filtered, fields)?;

    let saved_reports = save_reports(session, storage, fields)?;
    let reports_saved = saved_reports
        .iter()
        .filter(|f| f.file_document.is_some())
        .count();

    tracing::info!(
        fetched,
        submitted,
        skipped = fetched - submitted,
        reports_saved,
        "grade sync finished"
    );

    Ok(SyncSummary {
        records_fetched: fetched,
        records_submitted: submitted,
        records_skipped: fetched - submitted,
        upsert,
        reports_saved,
    })
}
