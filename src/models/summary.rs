use crate::models::table::LongRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorBarKind {
    StandardError,
    StandardDeviation,
}

impl fmt::Display for ErrorBarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardError => write!(f, "SEM"),
            Self::StandardDeviation => write!(f, "SD"),
        }
    }
}

/// Aggregate view of one group: the selected statistic, the selected error
/// extent, and every raw numeric value for the point overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub label: String,
    pub statistic: f64,
    /// `None` for groups with fewer than two numeric values.
    pub error: Option<f64>,
    pub values: Vec<f64>,
}

/// Groups numeric records by label, preserving first-seen order, and
/// computes the requested statistic and error extent per group. Groups with
/// no numeric values are omitted.
pub fn summarize(
    records: &[LongRecord],
    statistic: Statistic,
    error_bar: ErrorBarKind,
) -> Vec<GroupSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: Vec<Vec<f64>> = Vec::new();

    for record in records {
        let Some(value) = record.value else { continue };
        match order.iter().position(|label| *label == record.group) {
            Some(idx) => grouped[idx].push(value),
            None => {
                order.push(record.group.clone());
                grouped.push(vec![value]);
            }
        }
    }

    order
        .into_iter()
        .zip(grouped)
        .map(|(label, values)| {
            let stat = match statistic {
                Statistic::Mean => mean(&values),
                Statistic::Median => median(&values),
            };
            let error = match error_bar {
                ErrorBarKind::StandardError => standard_error(&values),
                ErrorBarKind::StandardDeviation => sample_sd(&values),
            };
            GroupSummary {
                label,
                statistic: stat,
                error,
                values,
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1 denominator, matching the usual
/// statistics-package default). Undefined for fewer than two values.
fn sample_sd(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

fn standard_error(values: &[f64]) -> Option<f64> {
    sample_sd(values).map(|sd| sd / (values.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(pairs: &[(&str, Option<f64>)]) -> Vec<LongRecord> {
        pairs
            .iter()
            .map(|(group, value)| LongRecord {
                group: group.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn summarize_groups_in_first_seen_order() {
        let recs = records(&[
            ("B", Some(4.0)),
            ("A", Some(1.0)),
            ("B", Some(6.0)),
            ("A", Some(3.0)),
        ]);

        let summaries = summarize(&recs, Statistic::Mean, ErrorBarKind::StandardDeviation);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].label, "B");
        assert_eq!(summaries[1].label, "A");
        assert!((summaries[0].statistic - 5.0).abs() < 1e-12);
        assert!((summaries[1].statistic - 2.0).abs() < 1e-12);
    }

    #[test]
    fn summarize_skips_invalid_and_empty_groups() {
        let recs = records(&[
            ("A", Some(1.0)),
            ("A", None),
            ("A", Some(3.0)),
            ("Broken", None),
        ]);

        let summaries = summarize(&recs, Statistic::Mean, ErrorBarKind::StandardError);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].values, vec![1.0, 3.0]);
        assert!((summaries[0].statistic - 2.0).abs() < 1e-12);
    }

    #[test]
    fn median_of_even_sample_averages_middle_pair() {
        let recs = records(&[
            ("A", Some(4.0)),
            ("A", Some(1.0)),
            ("A", Some(3.0)),
            ("A", Some(2.0)),
        ]);

        let summaries = summarize(&recs, Statistic::Median, ErrorBarKind::StandardDeviation);
        assert!((summaries[0].statistic - 2.5).abs() < 1e-12);
    }

    #[test]
    fn sd_uses_sample_denominator() {
        let recs = records(&[("A", Some(2.0)), ("A", Some(4.0)), ("A", Some(6.0))]);
        let summaries = summarize(&recs, Statistic::Mean, ErrorBarKind::StandardDeviation);
        // var = ((-2)^2 + 0 + 2^2) / 2 = 4
        assert!((summaries[0].error.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn se_is_sd_over_sqrt_n() {
        let recs = records(&[("A", Some(2.0)), ("A", Some(4.0)), ("A", Some(6.0))]);
        let summaries = summarize(&recs, Statistic::Mean, ErrorBarKind::StandardError);
        let expected = 2.0 / 3f64.sqrt();
        assert!((summaries[0].error.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn singleton_group_has_no_error_bar() {
        let recs = records(&[("A", Some(5.0))]);
        let summaries = summarize(&recs, Statistic::Mean, ErrorBarKind::StandardError);
        assert_eq!(summaries[0].error, None);
    }
}
