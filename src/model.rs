use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One grading term as declared by the source institution.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
}

/// A mark slot as reported by the portal: either actual points, or a
/// placeholder such as "not graded" / "absent". The placeholder case
/// carries no number on purpose; callers decide the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkValue {
    Numeric(f64),
    Unavailable,
}

impl MarkValue {
    /// Wire discriminator: kind 0 means the points payload is valid.
    pub fn from_kind(kind: i64, points: f64) -> Self {
        if kind == 0 {
            MarkValue::Numeric(points)
        } else {
            MarkValue::Unavailable
        }
    }

    pub fn points(self) -> Option<f64> {
        match self {
            MarkValue::Numeric(p) => Some(p),
            MarkValue::Unavailable => None,
        }
    }

    pub fn points_or(self, sentinel: f64) -> f64 {
        self.points().unwrap_or(sentinel)
    }
}

/// An attachment reference carried by an evaluation (assignment sheet
/// or correction), as handed out by the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    pub url: String,
}

/// One graded item exactly as fetched, before any grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvaluation {
    pub date: DateTime<Utc>,
    pub comment: String,
    pub subject: Subject,
    pub subject_file: Option<AttachedFile>,
    pub correction_file: Option<AttachedFile>,
    pub value: MarkValue,
    pub out_of: MarkValue,
    pub coefficient: f64,
    pub average: MarkValue,
    pub max: MarkValue,
    pub min: MarkValue,
    pub is_bonus: bool,
    pub is_optional: bool,
}

/// Per-subject averages for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverages {
    pub subject: Subject,
    pub student: MarkValue,
    pub class_average: MarkValue,
    pub max: MarkValue,
    pub min: MarkValue,
}

/// Raw fetch result for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct GradesOverview {
    pub grades: Vec<RawEvaluation>,
    pub subjects_averages: Vec<SubjectAverages>,
}

/// All evaluations for one subject within one period, in encounter
/// order. There is exactly one aggregate per (subject, period) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPeriodAggregate {
    pub subject: Subject,
    pub period: Period,
    pub averages: Option<SubjectAverages>,
    pub evaluations: Vec<RawEvaluation>,
}

/// The persisted document shape. Dates are ISO-8601 strings rendered
/// once at normalization; the reconciler compares them as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedGradeRecord {
    pub subject: String,
    pub source_subject: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub aggregation: Aggregation,
    pub series: Vec<GradeEntry>,
    pub relationships: Option<Relationships>,
}

/// Subject-level period averages. -1 stands for "unavailable"; the
/// per-entry fields below use null instead. Consumers rely on the
/// asymmetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub avg_grades: f64,
    pub avg_class: f64,
    pub max_class: f64,
    pub min_class: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub id: String,
    pub label: Option<String>,
    pub date: String,
    pub value: EntryValue,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryValue {
    pub student: Option<f64>,
    pub out_of: Option<f64>,
    pub coef: f64,
    pub class_average: Option<f64>,
    pub class_max: Option<f64>,
    pub class_min: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStatus {
    pub is_bonus: bool,
    pub is_optional: bool,
}

/// Present only when the record owns at least one stored attachment.
/// Both lists are then emitted, even if one of them is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    pub files: ResourceList,
    pub corrections: ResourceList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    pub data: Vec<ResourceRef>,
}

/// Denormalized link from a grade record to a stored file. The
/// metadata back-reference carries the owning evaluation's identity in
/// place of a true foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource: ResourceData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    pub data: ResourceDoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    pub metadata: ResourceMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub grade_id: String,
}

impl ResourceRef {
    pub fn new(file_id: String, doc_type: &str, grade_id: String) -> Self {
        ResourceRef {
            resource: ResourceData {
                data: ResourceDoc {
                    id: file_id,
                    doc_type: doc_type.to_string(),
                    metadata: ResourceMetadata { grade_id },
                },
            },
        }
    }
}
