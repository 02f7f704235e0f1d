use crate::model::{GradesOverview, Period};

/// Account context forwarded to the storage and persistence
/// collaborators so stored documents stay attributable to the source
/// account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    pub account: String,
    pub login: String,
}

/// An authenticated portal session. Authentication and transport live
/// behind this seam; the sync engine only walks what the session
/// exposes.
pub trait Session {
    /// Grading periods in the order the portal declares them.
    fn periods(&self) -> &[Period];

    /// Raw evaluation overview for one period. A failure here is
    /// systemic (auth, transport) and aborts the sync.
    fn fetch_grades_overview(&self, period: &Period) -> anyhow::Result<GradesOverview>;

    /// URL of the period's PDF report. Failures are per-period and are
    /// absorbed by the walker.
    fn fetch_report_url(&self, period: &Period) -> anyhow::Result<String>;
}
