use crate::attach::EvaluationFiles;
use crate::identity::evaluation_identity;
use crate::model::{
    Aggregation, EntryStatus, EntryValue, GradeEntry, NormalizedGradeRecord, Relationships,
    ResourceList, SubjectPeriodAggregate,
};
use crate::subjects::SubjectLabel;

/// Sentinel for an unavailable subject-level average. Series entries
/// use null instead; consumers rely on the asymmetry.
const AGGREGATE_UNAVAILABLE: f64 = -1.0;

/// Converts one aggregate into the persisted record shape. Dates are
/// rendered to ISO-8601 here, once; everything downstream compares
/// them as strings.
pub fn normalize_record(
    aggregate: &SubjectPeriodAggregate,
    label: &SubjectLabel,
    attachments: EvaluationFiles,
) -> NormalizedGradeRecord {
    let series = aggregate
        .evaluations
        .iter()
        .map(|e| GradeEntry {
            id: evaluation_identity(e.date, &label.label, &e.comment),
            label: match e.comment.trim() {
                "" => None,
                c => Some(c.to_string()),
            },
            date: e.date.to_rfc3339(),
            value: EntryValue {
                student: e.value.points(),
                out_of: e.out_of.points(),
                coef: e.coefficient,
                class_average: e.average.points(),
                class_max: e.max.points(),
                class_min: e.min.points(),
            },
            status: EntryStatus {
                is_bonus: e.is_bonus,
                is_optional: e.is_optional,
            },
        })
        .collect();

    let aggregation = match &aggregate.averages {
        Some(a) => Aggregation {
            avg_grades: a.student.points_or(AGGREGATE_UNAVAILABLE),
            avg_class: a.class_average.points_or(AGGREGATE_UNAVAILABLE),
            max_class: a.max.points_or(AGGREGATE_UNAVAILABLE),
            min_class: a.min.points_or(AGGREGATE_UNAVAILABLE),
        },
        None => Aggregation {
            avg_grades: AGGREGATE_UNAVAILABLE,
            avg_class: AGGREGATE_UNAVAILABLE,
            max_class: AGGREGATE_UNAVAILABLE,
            min_class: AGGREGATE_UNAVAILABLE,
        },
    };

    let relationships = if attachments.is_empty() {
        None
    } else {
        Some(Relationships {
            files: ResourceList {
                data: attachments.files,
            },
            corrections: ResourceList {
                data: attachments.corrections,
            },
        })
    };

    NormalizedGradeRecord {
        subject: label.label.clone(),
        source_subject: aggregate.subject.name.clone(),
        title: aggregate.period.name.clone(),
        start_date: aggregate.period.start_date.to_rfc3339(),
        end_date: aggregate.period.end_date.to_rfc3339(),
        aggregation,
        series,
        relationships,
    }
}
