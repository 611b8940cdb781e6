/// Example: Print a generated galaxy as CSV
///
/// Usage: cargo run --example dump_points -- [preset-file] > galaxy.csv

use anyhow::Result;
use galaxy_core::{GalaxyGenerator, Preset};
use std::env;

fn main() -> Result<()> {
    let preset = match env::args().nth(1) {
        Some(path) => Preset::load(&path)?,
        None => {
            eprintln!("No preset provided, using defaults with 1000 points...");
            let mut preset = Preset::default();
            preset.params.count = 1_000;
            preset
        }
    };

    let buffer = GalaxyGenerator::generate_seeded(&preset.params, preset.seed.unwrap_or(0));
    let (positions, colors, _size) = buffer.into_parts();

    println!("x,y,z,r,g,b");
    for (p, c) in positions.chunks_exact(3).zip(colors.chunks_exact(3)) {
        println!(
            "{:.5},{:.5},{:.5},{:.4},{:.4},{:.4}",
            p[0], p[1], p[2], c[0], c[1], c[2]
        );
    }
    Ok(())
}
