use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Saturating learning curve: shallow trees underfit, deep ones level off.
fn curve(depth: f64, floor: f64, ceiling: f64, rate: f64) -> f64 {
    ceiling - (ceiling - floor) * (-rate * (depth - 1.0)).exp()
}

#[derive(Debug)]
struct Row {
    depth: i64,
    round: i64,
    accuracy: f64,
    precision: f64,
    recall: f64,
    f1: f64,
}

impl Row {
    fn zeros(depth: i64, round: i64) -> Self {
        Row {
            depth,
            round,
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        }
    }

    fn scored(depth: i64, round: i64, accuracy: f64, precision: f64, recall: f64) -> Self {
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Row {
            depth,
            round,
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Rows for depths 1..=15 in the experiment driver's order: round 1 before the
/// first fit (all zero), round 1 on the training set, then rounds 2 and 3.
fn summary_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let clamp = |v: f64| v.clamp(0.0, 100.0);
    let mut rows = Vec::with_capacity(60);

    for depth in 1..=15 {
        let d = depth as f64;
        rows.push(Row::zeros(depth, 1));

        // Training-set scores climb towards a perfect fit as the tree deepens.
        rows.push(Row::scored(
            depth,
            1,
            clamp(curve(d, 80.0, 99.0, 0.30) + rng.gauss(0.0, 0.3)),
            clamp(curve(d, 55.0, 97.0, 0.30) + rng.gauss(0.0, 0.8)),
            clamp(curve(d, 40.0, 95.0, 0.28) + rng.gauss(0.0, 0.8)),
        ));

        for round in 2..=3 {
            let shift = if round == 3 { 1.5 } else { 0.0 };
            rows.push(Row::scored(
                depth,
                round,
                clamp(curve(d, 78.0, 91.0 + shift, 0.35) + rng.gauss(0.0, 0.6)),
                clamp(curve(d, 45.0, 72.0 + shift, 0.30) + rng.gauss(0.0, 1.5)),
                clamp(curve(d, 30.0, 61.0 - shift, 0.25) + rng.gauss(0.0, 1.5)),
            ));
        }
    }
    rows
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = summary_rows(&mut rng);

    // Write CSV in the experiment driver's layout
    let csv_path = "depth_summary.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["Depth", "Round", "Accuracy", "Precision", "Recall", "F1"])
        .expect("Failed to write CSV header");
    for r in &rows {
        writer
            .write_record([
                r.depth.to_string(),
                r.round.to_string(),
                format!("{:.4}", r.accuracy),
                format!("{:.4}", r.precision),
                format!("{:.4}", r.recall),
                format!("{:.4}", r.f1),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Same table as Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("Depth", DataType::Int64, false),
        Field::new("Round", DataType::Int64, false),
        Field::new("Accuracy", DataType::Float64, false),
        Field::new("Precision", DataType::Float64, false),
        Field::new("Recall", DataType::Float64, false),
        Field::new("F1", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.depth))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.round))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.accuracy))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.precision))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.recall))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.f1))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "depth_summary.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} rows (15 depths x 4 evaluations) to {csv_path} and {parquet_path}",
        rows.len()
    );
}
