use anyhow::{Context, Result};
use knn_scatter::{Dataset, ExplorerConfig, Record, serialize};

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

/// (name, role, typical shots per season, shooting percentage)
const PLAYERS: [(&str, &str, f64, f64); 10] = [
    ("Walsh, Erin", "attack", 90.0, 0.42),
    ("Okafor, Dana", "attack", 75.0, 0.45),
    ("Brennan, \"Bree\" Kate", "attack", 60.0, 0.38),
    ("Lindqvist, Maja", "midfield", 55.0, 0.33),
    ("Moreau, Claire", "midfield", 45.0, 0.36),
    ("Hughes, Tara", "midfield", 40.0, 0.30),
    ("Santos, Ana", "midfield", 30.0, 0.28),
    ("Kowalski, Jen", "defense", 12.0, 0.20),
    ("Tran, Lily", "defense", 8.0, 0.25),
    ("Adeyemi, Ruth", "defense", 5.0, 0.15),
];

const SEASONS: [&str; 4] = ["2021", "2022", "2023", "2024"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut records = Vec::with_capacity(PLAYERS.len() * SEASONS.len());

    for season in SEASONS {
        for &(name, role, shots_mean, pct) in &PLAYERS {
            let shots = rng.gauss(shots_mean, shots_mean * 0.2).round().max(0.0);
            let goals = rng.gauss(shots * pct, 2.0).round().clamp(0.0, shots);
            records.push(Record {
                category: season.to_string(),
                label: name.to_string(),
                x: shots,
                y: goals,
                aux: Some(role.to_string()),
            });
        }
    }

    let dataset = Dataset::from_records(records);
    let output_path = ExplorerConfig::default().dataset;
    std::fs::write(&output_path, serialize(&dataset))
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} records across {} seasons to {output_path}",
        dataset.len(),
        dataset.categories().len()
    );
    Ok(())
}
