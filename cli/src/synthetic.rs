// cli/src/synthetic.rs

use anyhow::{Context, Result};
use folio_core::Record;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SUBJECTS: &[&str] = &[
    "Still Life with Flowers",
    "Portrait of a Woman",
    "River Landscape",
    "Harbor at Dusk",
    "Study of Hands",
    "Temple Gate",
    "Vessel with Handles",
    "Winter Scene",
    "Seated Figure",
    "Fragment of a Textile",
];

const ORIGINS: &[&str] = &[
    "France",
    "Japan",
    "United States",
    "Netherlands",
    "Italy",
    "China",
    "Mexico",
    "Egypt",
];

const ARTISTS: &[&str] = &[
    "Unknown Maker",
    "Claude Monet\nFrench, 1840-1926",
    "Katsushika Hokusai\nJapanese, 1760-1849",
    "Mary Cassatt\nAmerican, 1844-1926",
    "Rembrandt van Rijn\nDutch, 1606-1669",
];

/// Build a reproducible fake collection. Ids increase but are not dense,
/// so they never line up with row positions.
pub fn collection(count: u64, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id: u64 = rng.gen_range(1..1_000);

    (0..count)
        .map(|_| {
            let id = next_id;
            next_id += rng.gen_range(1..40);

            let subject = SUBJECTS.choose(&mut rng).copied().unwrap_or("Untitled");
            let start = rng.gen_range(1400..2000);
            let mut record = Record::new(id, subject)
                .origin(ORIGINS.choose(&mut rng).copied().unwrap_or("Unknown"))
                .artist(ARTISTS.choose(&mut rng).copied().unwrap_or("Unknown Maker"))
                .dated(start, start + rng.gen_range(0..30));
            if rng.gen_bool(0.2) {
                record = record.inscriptions(format!("Signed lower right, inv. {}", id));
            }
            record
        })
        .collect()
}

/// Read a JSON array of records.
pub fn load(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a JSON array of records", path.display()))
}
