use std::collections::HashMap;

use crate::model::{GradesOverview, Period, SubjectPeriodAggregate};

/// Groups raw evaluations into one aggregate per (subject, period)
/// pair, preserving period order, first-seen subject order, and source
/// order of evaluations inside each aggregate.
///
/// The key includes the period's start timestamp so a subject name
/// recurring across periods (or an identically named period in another
/// school year) never shares an aggregate.
pub fn group_evaluations(
    overviews: Vec<(Period, GradesOverview)>,
) -> Vec<SubjectPeriodAggregate> {
    let mut aggregates: Vec<SubjectPeriodAggregate> = Vec::new();
    let mut slots: HashMap<(String, String), usize> = HashMap::new();

    for (period, overview) in overviews {
        let GradesOverview {
            grades,
            subjects_averages,
        } = overview;

        for evaluation in grades {
            let key = (period_key(&period), evaluation.subject.name.clone());
            match slots.get(&key) {
                Some(&i) => aggregates[i].evaluations.push(evaluation),
                None => {
                    let averages = subjects_averages
                        .iter()
                        .find(|a| a.subject.name == evaluation.subject.name)
                        .cloned();
                    slots.insert(key, aggregates.len());
                    aggregates.push(SubjectPeriodAggregate {
                        subject: evaluation.subject.clone(),
                        period: period.clone(),
                        averages,
                        evaluations: vec![evaluation],
                    });
                }
            }
        }
    }

    aggregates
}

fn period_key(period: &Period) -> String {
    format!("{}|{}", period.name, period.start_date.timestamp_millis())
}
