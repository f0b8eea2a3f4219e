use crate::data::model::{JitteredSeries, MetricPoint, RoundSeries};

/// Horizontal offsets fanning out three replicas of a point within one depth unit.
pub const JITTER_OFFSETS: [f64; 3] = [0.0, 0.33, 0.66];

/// Spread coincident depths so markers of overlapping rounds stay visible.
///
/// With `apply` unset the series is returned as is. Otherwise every point is
/// replaced, in order, by one replica per [`JITTER_OFFSETS`] entry; values are
/// never touched, so the output holds `3 * series.len()` points.
pub fn jitter(series: RoundSeries, apply: bool) -> JitteredSeries {
    if !apply {
        return series;
    }
    series
        .into_iter()
        .flat_map(|p| {
            JITTER_OFFSETS
                .into_iter()
                .map(move |dx| MetricPoint::new(p.depth + dx, p.value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> RoundSeries {
        points.iter().map(|&(d, v)| MetricPoint::new(d, v)).collect()
    }

    #[test]
    fn identity_when_not_applied() {
        let input = series(&[(1.0, 90.0), (2.0, 85.0), (1.0, 80.0)]);
        assert_eq!(jitter(input.clone(), false), input);
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(jitter(Vec::new(), true).is_empty());
        assert!(jitter(Vec::new(), false).is_empty());
    }

    #[test]
    fn applied_jitter_triples_points_in_source_order() {
        let input = series(&[(3.0, 71.5), (1.0, 90.0), (3.0, 64.0), (7.0, 88.8)]);
        let out = jitter(input.clone(), true);
        assert_eq!(out.len(), 3 * input.len());

        for (i, p) in input.iter().enumerate() {
            assert_eq!(out[3 * i], MetricPoint::new(p.depth, p.value));
            assert_eq!(out[3 * i + 1], MetricPoint::new(p.depth + 0.33, p.value));
            assert_eq!(out[3 * i + 2], MetricPoint::new(p.depth + 0.66, p.value));
        }
    }

    #[test]
    fn applied_jitter_repeats_each_value_three_times() {
        let input = series(&[(1.0, 90.0), (1.0, 90.0), (2.0, 85.0)]);
        let mut expected: Vec<f64> = input
            .iter()
            .flat_map(|p| [p.value; 3])
            .collect();
        let mut got: Vec<f64> = jitter(input, true).iter().map(|p| p.value).collect();
        expected.sort_by(f64::total_cmp);
        got.sort_by(f64::total_cmp);
        assert_eq!(got, expected);
    }

    #[test]
    fn two_depth_scenario() {
        let out = jitter(series(&[(1.0, 90.0), (2.0, 85.0)]), true);
        let expected = [
            (1.0, 90.0),
            (1.33, 90.0),
            (1.66, 90.0),
            (2.0, 85.0),
            (2.33, 85.0),
            (2.66, 85.0),
        ];
        assert_eq!(out.len(), expected.len());
        for (p, (d, v)) in out.iter().zip(expected) {
            assert!((p.depth - d).abs() < 1e-9, "{} vs {d}", p.depth);
            assert_eq!(p.value, v);
        }

        let plain = series(&[(1.0, 90.0), (2.0, 85.0)]);
        assert_eq!(jitter(plain.clone(), false), plain);
    }
}
