use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**, seeded through an LCG).
///
/// A given seed always produces the same file.
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

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// (region, weekly conventional volume scale)
const REGIONS: [(&str, f64); 14] = [
    ("Albany", 90_000.0),
    ("Atlanta", 450_000.0),
    ("Boise", 70_000.0),
    ("Boston", 550_000.0),
    ("Chicago", 700_000.0),
    ("Denver", 400_000.0),
    ("Detroit", 300_000.0),
    ("Houston", 750_000.0),
    ("LosAngeles", 2_500_000.0),
    ("NewYork", 1_100_000.0),
    ("Portland", 350_000.0),
    ("Seattle", 400_000.0),
    ("Spokane", 60_000.0),
    ("Tampa", 300_000.0),
];

const TYPES: [(&str, f64, f64); 2] = [
    // (type, base price, share of conventional volume)
    ("conventional", 1.10, 1.0),
    ("organic", 1.60, 0.03),
];

fn round2(v: f64) -> String {
    format!("{v:.2}")
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/avocado.csv"));

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    writer.write_record([
        "", "Date", "AveragePrice", "Total Volume", "4046", "4225", "4770", "Total Bags",
        "Small Bags", "Large Bags", "XLarge Bags", "type", "year", "region",
    ])?;

    // Weekly Sundays, 2015-01-04 .. 2018-03-25
    let first = NaiveDate::from_ymd_opt(2015, 1, 4).context("start date")?;
    let last = NaiveDate::from_ymd_opt(2018, 3, 25).context("end date")?;

    let mut rows = 0usize;
    for &(kind, base_price, share) in &TYPES {
        for &(region, scale) in &REGIONS {
            let mut date = first;
            let mut week = 0usize;
            while date <= last {
                // Prices peak in late summer / autumn.
                let season = (f64::from(date.ordinal()) / 365.0 * std::f64::consts::TAU - 2.5).sin();
                let trend = 0.04 * f64::from(date.year() - 2015);
                let price = (base_price + 0.15 * season + trend + rng.uniform(-0.08, 0.08)).max(0.44);

                let volume = scale * share * (1.25 - 0.3 * season) * rng.uniform(0.85, 1.15);
                let plu_4046 = volume * rng.uniform(0.25, 0.40);
                let plu_4225 = volume * rng.uniform(0.25, 0.40);
                let plu_4770 = volume * rng.uniform(0.0, 0.03);
                let bags = (volume - plu_4046 - plu_4225 - plu_4770).max(0.0);
                let small = bags * rng.uniform(0.7, 0.9);
                let large = (bags - small) * rng.uniform(0.8, 1.0);
                let xlarge = (bags - small - large).max(0.0);

                writer.write_record([
                    week.to_string(),
                    date.format("%Y-%m-%d").to_string(),
                    round2(price),
                    round2(volume),
                    round2(plu_4046),
                    round2(plu_4225),
                    round2(plu_4770),
                    round2(bags),
                    round2(small),
                    round2(large),
                    round2(xlarge),
                    kind.to_string(),
                    date.year().to_string(),
                    region.to_string(),
                ])?;

                rows += 1;
                week += 1;
                date = date
                    .checked_add_days(Days::new(7))
                    .context("date overflow")?;
            }
        }
    }

    writer.flush()?;

    println!(
        "Wrote {rows} weekly records ({} regions × {} types) to {}",
        REGIONS.len(),
        TYPES.len(),
        output_path.display()
    );
    Ok(())
}
