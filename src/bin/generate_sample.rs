//! Write a deliberately messy delimited file for trying out the analyzer:
//! currency and percent decoration, thousands separators, accounting
//! negatives, quoted text fields and assorted missing-value markers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "generate_sample", about = "Write a messy sample file for column-analyzer")]
struct Args {
    /// Output file
    #[arg(default_value = "sample_data.csv")]
    output: PathBuf,

    /// Number of data rows
    #[arg(default_value_t = 120)]
    rows: usize,
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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const MISSING_MARKERS: [&str; 6] = ["", "n/a", "NA", "null", "-", "."];
const REGIONS: [&str; 4] = ["North", "South, East", "West \"Coast\"", "Central"];

fn group_thousands(value: f64) -> String {
    let whole = format!("{:.2}", value.abs());
    let (int_part, frac) = whole.split_once('.').unwrap_or((whole.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{frac}")
}

/// Quote a field the way a spreadsheet export would.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn main() -> Result<()> {
    let Args { output, rows } = Args::parse();

    let mut rng = SimpleRng::new(42);
    let file = File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "day,region,revenue,growth,balance,temperature,units")?;

    let mut trend = 1_000.0;
    for day in 1..=rows {
        if rng.chance(0.03) {
            writeln!(out)?;
        }

        trend += rng.gauss(15.0, 40.0);
        let revenue = trend * 12.5 + rng.gauss(0.0, 900.0);
        let growth = rng.gauss(2.0, 4.5);
        let balance = rng.gauss(500.0, 2_500.0);
        let temperature = rng.gauss(18.0, 6.0);
        let units = (trend / 10.0 + rng.gauss(0.0, 5.0)).round();

        let region = REGIONS[(rng.next_u64() % REGIONS.len() as u64) as usize];

        let revenue = format!("${}", group_thousands(revenue));
        let growth = format!("{growth:.1}%");
        let balance = if balance < 0.0 {
            format!("({})", group_thousands(balance))
        } else {
            group_thousands(balance)
        };
        let temperature = if rng.chance(0.08) {
            MISSING_MARKERS[(rng.next_u64() % MISSING_MARKERS.len() as u64) as usize].to_string()
        } else {
            format!("{temperature:.2}")
        };

        writeln!(
            out,
            "{day},{},{},{growth},{},{temperature},{units}",
            quoted(region),
            quoted(&revenue),
            quoted(&balance),
        )?;
    }
    out.flush()?;

    println!("Wrote {rows} rows to {}", output.display());
    Ok(())
}
