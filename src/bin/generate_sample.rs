use std::sync::Arc;

use anyhow::Context;
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use glucose_dashboard::data::export::to_csv_bytes;
use glucose_dashboard::data::model::{CellValue, Column, Table};
use parquet::arrow::ArrowWriter;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Baseline plus one bump per meal, plus noise.
fn simulate_subject(
    hours: &[f64],
    baseline: f64,
    meals: &[(f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    hours
        .iter()
        .map(|&t| {
            let response: f64 = meals
                .iter()
                .map(|&(meal_time, rise)| gaussian(t, meal_time + 0.75, 0.6, rise))
                .sum();
            // Round to 0.1 mg/dL like a sensor readout.
            ((baseline + response + rng.gauss(0.0, noise_level)) * 10.0).round() / 10.0
        })
        .collect()
}

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

fn write_parquet(path: &str, names: &[String], columns: &[Vec<f64>]) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(n, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|c| Arc::new(Float64Array::from(c.clone())) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // 0 → 24 h, every 15 minutes
    let hours: Vec<f64> = (0..=96).map(|i| i as f64 * 0.25).collect();

    // (baseline, [(meal hour, rise)], noise)
    let people: [(f64, &[(f64, f64)], f64); 5] = [
        (88.0, &[(7.5, 18.0), (12.5, 22.0), (19.0, 20.0)], 1.5),
        (95.0, &[(8.0, 30.0), (13.0, 35.0), (20.0, 28.0)], 2.0),
        (102.0, &[(7.0, 25.0), (12.0, 40.0), (18.5, 32.0)], 2.5),
        (84.0, &[(9.0, 15.0), (14.0, 18.0), (20.5, 16.0)], 1.2),
        (110.0, &[(6.5, 20.0), (11.5, 30.0), (19.5, 25.0)], 3.0),
    ];

    let mut names = vec!["Time".to_string()];
    let mut columns = vec![hours.clone()];
    for (i, (baseline, meals, noise)) in people.iter().enumerate() {
        names.push(format!("Person_{}", i + 1));
        columns.push(simulate_subject(&hours, *baseline, meals, *noise, &mut rng));
    }

    let table = Table::new(
        names
            .iter()
            .zip(&columns)
            .map(|(name, values)| {
                Column::new(name.as_str(), values.iter().map(|&v| CellValue::Number(v)).collect())
            })
            .collect(),
    )?;

    let csv_path = "sample_glucose.csv";
    std::fs::write(csv_path, to_csv_bytes(&table)?).context("writing CSV")?;

    let parquet_path = "sample_glucose.parquet";
    write_parquet(parquet_path, &names, &columns)?;

    println!(
        "Wrote {} subjects ({} time points each) to {csv_path} and {parquet_path}",
        people.len(),
        hours.len()
    );
    Ok(())
}
