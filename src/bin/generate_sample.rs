use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row, using the upstream column names.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// Booster generations in flight order: (category, flights, success rate, max payload kg).
const BOOSTERS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.2, 700.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.7, 9600.0),
    ("B4", 11, 0.55, 7000.0),
    ("B5", 1, 1.0, 5400.0),
];

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("VAFB SLC-4E", 0.2),
    ("KSC LC-39A", 0.25),
    ("CCAFS SLC-40", 0.1),
];

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

    /// Pick an index from cumulative weights.
    fn weighted<T>(&mut self, choices: &[(T, f64)]) -> usize {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut r = self.next_f64() * total;
        for (i, (_, w)) in choices.iter().enumerate() {
            if r < *w {
                return i;
            }
            r -= w;
        }
        choices.len() - 1
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for &(category, flights, success_rate, max_payload) in &BOOSTERS {
        for n in 0..flights {
            let site = SITES[rng.weighted(&SITES)].0;
            // The first flight of the first generation carried no payload.
            let payload = if flight_number == 1 {
                0.0
            } else {
                (rng.next_f64() * max_payload).round()
            };
            let class = i64::from(rng.next_f64() < success_rate);

            rows.push(LaunchRow {
                flight_number,
                site,
                class,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category}  B{}", 1000 + flight_number * 3 + n as i64),
                booster_version_category: category,
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[LaunchRow], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version_category),
            )),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spacex_launch_dash.csv".to_string());
    let path = Path::new(&output_path);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(&rows, path)?,
        _ => write_csv(&rows, path)?,
    }

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {output_path}",
        rows.len()
    );
    Ok(())
}
