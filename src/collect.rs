use anyhow::Context;

use crate::model::{GradesOverview, Period};
use crate::session::Session;

/// A successfully resolved report link, tagged with its period name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLink {
    pub period: String,
    pub url: String,
}

/// Fetches every period's grades overview, in session order. Any
/// single failure aborts the whole sync: a missing overview signals an
/// auth or transport problem, not a missing document.
pub fn fetch_period_overviews(
    session: &impl Session,
) -> anyhow::Result<Vec<(Period, GradesOverview)>> {
    let mut out = Vec::new();
    for period in session.periods() {
        let overview = session
            .fetch_grades_overview(period)
            .with_context(|| format!("failed to fetch grades overview for period {}", period.name))?;
        out.push((period.clone(), overview));
    }
    Ok(out)
}

/// Resolves the report URL for each period. Periods are independent
/// failure domains here: one failed fetch is logged and skipped, the
/// rest continue.
pub fn fetch_report_links(session: &impl Session) -> Vec<ReportLink> {
    let mut out = Vec::new();
    for period in session.periods() {
        match session.fetch_report_url(period) {
            Ok(url) => out.push(ReportLink {
                period: period.name.clone(),
                url,
            }),
            Err(e) => {
                tracing::warn!(period = %period.name, error = %e, "could not fetch report for period");
            }
        }
    }
    out
}
