use super::model::{Metric, MetricPoint, MetricTable, Round, RoundSeries};

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Keep only rows that carry a measurement.
///
/// The experiment driver writes all-zero metrics when the tree has not been
/// trained yet, so a row is present exactly when `Accuracy > 0`.
pub fn present_rows(table: &MetricTable) -> MetricTable {
    let records = table
        .records
        .iter()
        .filter(|r| r.accuracy > 0.0)
        .cloned()
        .collect();
    MetricTable::from_records(records)
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Reduce the table to ordered `(Depth, value)` pairs for one metric and round.
pub fn round_series(table: &MetricTable, metric: Metric, round: Round) -> RoundSeries {
    table
        .records
        .iter()
        .filter(|r| r.round == round)
        .map(|r| MetricPoint::new(f64::from(r.depth), r.value(metric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MetricRecord;

    fn record(depth: u32, round: Round, accuracy: f64, f1: f64) -> MetricRecord {
        MetricRecord {
            depth,
            round,
            accuracy,
            precision: 50.0,
            recall: 40.0,
            f1,
        }
    }

    fn table() -> MetricTable {
        MetricTable::from_records(vec![
            record(1, Round::One, 0.0, 0.0),
            record(1, Round::Two, 90.0, 70.0),
            record(2, Round::One, 0.0, 0.0),
            record(2, Round::Two, 85.0, 65.0),
            record(3, Round::Two, -1.0, 60.0),
            record(1, Round::Two, 88.0, 68.0),
        ])
    }

    #[test]
    fn present_rows_drops_non_positive_accuracy() {
        let present = present_rows(&table());
        assert_eq!(present.len(), 3);
        assert!(present.records.iter().all(|r| r.accuracy > 0.0));
        assert_eq!(present.depths.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn round_series_follows_row_order_and_keeps_duplicates() {
        let series = round_series(&present_rows(&table()), Metric::F1, Round::Two);
        assert_eq!(
            series,
            vec![
                MetricPoint::new(1.0, 70.0),
                MetricPoint::new(2.0, 65.0),
                MetricPoint::new(1.0, 68.0),
            ]
        );
    }

    #[test]
    fn round_series_is_empty_for_absent_round() {
        let series = round_series(&present_rows(&table()), Metric::Accuracy, Round::One);
        assert!(series.is_empty());
    }
}
