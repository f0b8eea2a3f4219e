use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – validation failures raised while reading the summary table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },
    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: String },
    #[error("unknown round identifier {0} (expected 1, 2 or 3)")]
    UnknownRound(i64),
}

// ---------------------------------------------------------------------------
// Metric – one of the four evaluation columns
// ---------------------------------------------------------------------------

/// An evaluation metric column of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Accuracy,
    Precision,
    Recall,
    F1,
}

impl Metric {
    /// All metrics in plotting order.
    pub const ALL: [Metric; 4] = [
        Metric::Accuracy,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
    ];

    /// Column header used by the experiment driver.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Accuracy => "Accuracy",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Round – experiment round identifier
// ---------------------------------------------------------------------------

/// Experiment round: training set, held-out sample, or the third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum Round {
    One,
    Two,
    Three,
}

impl Round {
    pub fn number(self) -> u8 {
        match self {
            Round::One => 1,
            Round::Two => 2,
            Round::Three => 3,
        }
    }
}

impl TryFrom<i64> for Round {
    type Error = DataError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::One),
            2 => Ok(Round::Two),
            3 => Ok(Round::Three),
            other => Err(DataError::UnknownRound(other)),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// MetricRecord – one row of depth_summary
// ---------------------------------------------------------------------------

/// One row of the summary table. Metric values are percentages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "Depth")]
    pub depth: u32,
    #[serde(rename = "Round")]
    pub round: Round,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
}

impl MetricRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::F1 => self.f1,
        }
    }
}

// ---------------------------------------------------------------------------
// MetricPoint / RoundSeries
// ---------------------------------------------------------------------------

/// One measurement of one metric at one tree depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint {
    pub depth: f64,
    pub value: f64,
}

impl MetricPoint {
    pub fn new(depth: f64, value: f64) -> Self {
        Self { depth, value }
    }
}

/// Points of a single (metric, round) pair, in table row order.
pub type RoundSeries = Vec<MetricPoint>;

/// Rendering-ready points derived from a [`RoundSeries`].
pub type JitteredSeries = Vec<MetricPoint>;

// ---------------------------------------------------------------------------
// MetricTable – the complete loaded summary
// ---------------------------------------------------------------------------

/// The loaded summary table with its distinct depths pre-computed.
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    /// All rows, in file order.
    pub records: Vec<MetricRecord>,
    /// Sorted distinct `Depth` values.
    pub depths: BTreeSet<u32>,
}

impl MetricTable {
    pub fn from_records(records: Vec<MetricRecord>) -> Self {
        let depths = records.iter().map(|r| r.depth).collect();
        MetricTable { records, depths }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: u32, round: Round, accuracy: f64) -> MetricRecord {
        MetricRecord {
            depth,
            round,
            accuracy,
            precision: accuracy - 1.0,
            recall: accuracy - 2.0,
            f1: accuracy - 3.0,
        }
    }

    #[test]
    fn round_parses_known_identifiers_only() {
        assert_eq!(Round::try_from(1_i64), Ok(Round::One));
        assert_eq!(Round::try_from(3_i64), Ok(Round::Three));
        assert_eq!(Round::try_from(4_i64), Err(DataError::UnknownRound(4)));
        assert_eq!(Round::try_from(0_i64), Err(DataError::UnknownRound(0)));
    }

    #[test]
    fn record_value_selects_metric_column() {
        let r = record(2, Round::One, 90.0);
        assert_eq!(r.value(Metric::Accuracy), 90.0);
        assert_eq!(r.value(Metric::Precision), 89.0);
        assert_eq!(r.value(Metric::Recall), 88.0);
        assert_eq!(r.value(Metric::F1), 87.0);
    }

    #[test]
    fn table_collects_sorted_distinct_depths() {
        let table = MetricTable::from_records(vec![
            record(3, Round::One, 80.0),
            record(1, Round::Two, 80.0),
            record(3, Round::Three, 80.0),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.depths.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn labels_match_legend_text() {
        assert_eq!(Metric::F1.to_string(), "F1");
        assert_eq!(Round::Two.to_string(), "Round 2");
    }
}
