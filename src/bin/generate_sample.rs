//! Write a deterministic sample CSV of people to stdout (or the path given as
//! the first argument) for trying out filters and sorts by hand.

use std::io;

use anyhow::{Context, Result};
use csvsift::data::loader::write_table;
use csvsift::data::model::{Row, Table};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

const GIVEN: [&str; 8] = [
    "Alice", "Bob", "Chiyo", "Dmitri", "Esther", "Farid", "Grace", "Hiro",
];
const FAMILY: [&str; 6] = ["Yamada", "Smith", "Yamamoto", "Okafor", "Kiyama", "Novak"];
const CITIES: [&str; 5] = ["Tokyo", "London", "Osaka", "Lagos", "Prague"];

fn main() -> Result<()> {
    env_logger::init();

    let rows = 40;
    let mut rng = SimpleRng::new(42);

    let mut data: Vec<Row> = Vec::with_capacity(rows);
    for id in 0..rows {
        let name = format!("{} {}", rng.pick(&GIVEN), rng.pick(&FAMILY));
        let age = rng.range(18, 90);
        let city = rng.pick(&CITIES);
        // A few blank and textual scores so numeric validation has something to reject.
        let score = match rng.range(0, 20) {
            0 => String::new(),
            1 => "n/a".to_string(),
            n => format!("{:.1}", n as f64 * 4.75),
        };
        data.push(vec![
            id.to_string().into_bytes(),
            name.into_bytes(),
            age.to_string().into_bytes(),
            city.as_bytes().to_vec(),
            score.into_bytes(),
        ]);
    }

    let header: Row = ["id", "name", "age", "city", "score"]
        .iter()
        .map(|s| s.as_bytes().to_vec())
        .collect();
    let table = Table::from_parts(header, data);

    match std::env::args().nth(1) {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating {path}"))?;
            write_table(&table, file)?;
            log::info!("wrote {rows} rows to {path}");
        }
        None => write_table(&table, io::stdout().lock())?,
    }
    Ok(())
}
