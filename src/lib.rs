//! Incremental grade synchronization for a school-portal connector.
//!
//! The pipeline walks the session's grading periods, groups raw
//! evaluations into per-subject aggregates, correlates attachment
//! documents to individual evaluations through a derived stable id,
//! normalizes everything into the persisted record shape, and diffs the
//! result against the previously stored set so repeated runs never
//! duplicate a record. Authentication, transport, and the remote
//! document store are collaborators behind traits.

pub mod aggregate;
pub mod attach;
pub mod collect;
pub mod files;
pub mod identity;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod store;
pub mod subjects;
pub mod sync;

pub use reconcile::GradeRecords;
pub use session::{AccountFields, Session};
pub use sync::{sync_grades, SyncOptions, SyncSummary};
