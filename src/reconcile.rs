use crate::model::NormalizedGradeRecord;
use crate::session::AccountFields;

/// Record type tag for persisted grade documents.
pub const DOCTYPE_GRADE: &str = "gradesync.grades";

/// Upsert key: one document per (startDate, subject) pair.
pub const GRADE_UPSERT_KEYS: [&str; 2] = ["startDate", "subject"];

/// Previously persisted grade records. The query is a full scan read
/// once per run; decisions are made against that snapshot and the
/// snapshot is never mutated.
pub trait GradeRecords {
    fn query_existing(&self) -> anyhow::Result<Vec<NormalizedGradeRecord>>;

    /// Creates or replaces documents matching the upsert key.
    fn upsert(
        &mut self,
        records: &[NormalizedGradeRecord],
        fields: &AccountFields,
    ) -> anyhow::Result<UpsertSummary>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub created: usize,
    pub replaced: usize,
}

/// Drops every fresh record that is already persisted.
///
/// Grades are treated as append-only: a record counts as already
/// synced when an existing record matches on series length, startDate,
/// and subject. A revised score inside an equal-length series is
/// invisible to this predicate; picking such revisions up requires a
/// human-triggered full resync.
pub fn filter_new_records(
    existing: &[NormalizedGradeRecord],
    fresh: Vec<NormalizedGradeRecord>,
) -> Vec<NormalizedGradeRecord> {
    fresh
        .into_iter()
        .filter(|record| !is_already_recorded(existing, record))
        .collect()
}

fn is_already_recorded(
    existing: &[NormalizedGradeRecord],
    candidate: &NormalizedGradeRecord,
) -> bool {
    existing.iter().any(|item| {
        item.series.len() == candidate.series.len()
            && item.start_date == candidate.start_date
            && item.subject == candidate.subject
    })
}
