use crate::files::{
    display_filename, subject_sub_path, FileAttributes, FileStorage, FileToSave, SaveOptions,
    DOCTYPE_FILE, PATH_GRADE_CORRECTION, PATH_GRADE_SUBJECT, QUALIFICATION_WORK_DOCUMENT,
};
use crate::identity::evaluation_identity;
use crate::model::{AttachedFile, ResourceRef, SubjectPeriodAggregate};
use crate::session::AccountFields;
use crate::subjects::SubjectLabel;

/// Relationship links gathered for one aggregate, split by document
/// category. Multiple files on the same evaluation accumulate
/// independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationFiles {
    pub files: Vec<ResourceRef>,
    pub corrections: Vec<ResourceRef>,
}

impl EvaluationFiles {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.corrections.is_empty()
    }
}

/// Stores every attachment carried by the aggregate's evaluations and
/// returns the relationship links, each back-referencing its owning
/// evaluation by derived identity.
///
/// A failed download only costs that one link: the evaluation's
/// numeric data still reaches the series, and the remaining files keep
/// going.
pub fn correlate_attachments(
    storage: &impl FileStorage,
    aggregate: &SubjectPeriodAggregate,
    label: &SubjectLabel,
    fields: &AccountFields,
) -> EvaluationFiles {
    let mut out = EvaluationFiles::default();

    for evaluation in &aggregate.evaluations {
        let grade_id = evaluation_identity(evaluation.date, &label.label, &evaluation.comment);

        if let Some(file) = attachment_with_url(&evaluation.subject_file) {
            store_one(
                storage,
                file,
                evaluation.date,
                subject_sub_path(PATH_GRADE_SUBJECT, &label.pretty),
                fields,
                &grade_id,
                &mut out.files,
            );
        }

        if let Some(file) = attachment_with_url(&evaluation.correction_file) {
            store_one(
                storage,
                file,
                evaluation.date,
                subject_sub_path(PATH_GRADE_CORRECTION, &label.pretty),
                fields,
                &grade_id,
                &mut out.corrections,
            );
        }
    }

    out
}

fn attachment_with_url(file: &Option<AttachedFile>) -> Option<&AttachedFile> {
    file.as_ref().filter(|f| !f.url.is_empty() && !f.name.is_empty())
}

fn store_one(
    storage: &impl FileStorage,
    file: &AttachedFile,
    date: chrono::DateTime<chrono::Utc>,
    sub_path: String,
    fields: &AccountFields,
    grade_id: &str,
    refs: &mut Vec<ResourceRef>,
) {
    let request = FileToSave {
        filename: display_filename(&file.name, date),
        fileurl: file.url.clone(),
        should_replace_file: false,
        sub_path,
        file_attributes: FileAttributes::at(date),
    };

    let saved = match storage.save_files(
        std::slice::from_ref(&request),
        fields,
        &SaveOptions::labeled(QUALIFICATION_WORK_DOCUMENT),
    ) {
        Ok(saved) => saved,
        Err(e) => {
            tracing::warn!(file = %file.name, error = %e, "could not store attachment");
            return;
        }
    };

    for entry in saved {
        if let Some(doc) = entry.file_document {
            refs.push(ResourceRef::new(doc.id, DOCTYPE_FILE, grade_id.to_string()));
        }
    }
}
