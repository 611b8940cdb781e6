/// Galaxy Terminal - procedural spiral galaxy viewer
///
/// Controls:
///   - Tab / Shift-Tab: Select parameter
///   - [ ] / { }: Adjust parameter (fine / coarse), regenerates the galaxy
///   - WASD / Arrow Keys: Tilt and spin
///   - + / -: Zoom, O: Toggle orthographic, Space: Toggle auto-spin
///   - N: New seed, Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use galaxy_core::{GalaxyGenerator, Preset, Rgb};
use galaxy_terminal::{BufferSummary, GalaxyApp};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "galaxy-terminal")]
#[command(about = "Procedural spiral galaxy rendered in the terminal")]
struct Cli {
    /// Preset file with `key = value` lines
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Seed for reproducible galaxies (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of spiral arms
    #[arg(short, long)]
    branches: Option<u32>,

    /// Number of points
    #[arg(short, long)]
    count: Option<usize>,

    #[arg(short, long)]
    radius: Option<f32>,

    #[arg(long)]
    randomness: Option<f32>,

    #[arg(long)]
    randomness_power: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    spin: Option<f32>,

    /// Point size
    #[arg(long)]
    size: Option<f32>,

    /// Core color as #rrggbb
    #[arg(long)]
    inside_color: Option<String>,

    /// Rim color as #rrggbb
    #[arg(long)]
    outside_color: Option<String>,

    /// Write the effective parameters as a preset file and exit
    #[arg(long)]
    write_preset: Option<PathBuf>,

    /// Print buffer statistics instead of starting the viewer
    #[arg(long, default_value = "false")]
    summary: bool,
}

impl Cli {
    /// Preset file first, then command-line overrides
    fn resolve(&self) -> Result<Preset> {
        let mut preset = match &self.preset {
            Some(path) => Preset::load(path)
                .with_context(|| format!("failed to load preset {}", path.display()))?,
            None => Preset::default(),
        };

        let params = &mut preset.params;
        if let Some(v) = self.branches {
            params.branches = v;
        }
        if let Some(v) = self.count {
            params.count = v;
        }
        if let Some(v) = self.radius {
            params.radius = v;
        }
        if let Some(v) = self.randomness {
            params.randomness = v;
        }
        if let Some(v) = self.randomness_power {
            params.randomness_power = v;
        }
        if let Some(v) = self.spin {
            params.spin = v;
        }
        if let Some(v) = self.size {
            params.size = v;
        }
        if let Some(hex) = &self.inside_color {
            params.inside_color = Rgb::from_hex(hex)?;
        }
        if let Some(hex) = &self.outside_color {
            params.outside_color = Rgb::from_hex(hex)?;
        }
        if self.seed.is_some() {
            preset.seed = self.seed;
        }

        Ok(preset)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let preset = cli.resolve()?;
    let seed = preset.seed.unwrap_or_else(rand::random);
    let params = preset.params.sanitized();
    tracing::info!(?params, seed, "resolved parameters");

    if let Some(path) = &cli.write_preset {
        let saved = Preset {
            params,
            seed: Some(seed),
        };
        std::fs::write(path, saved.to_text())
            .with_context(|| format!("failed to write preset {}", path.display()))?;
        println!("Wrote preset to {}", path.display());
        return Ok(());
    }

    if cli.summary {
        let buffer = GalaxyGenerator::generate_seeded(&params, seed);
        println!("seed:          {}", seed);
        println!("{}", BufferSummary::from_buffer(&buffer));
        return Ok(());
    }

    println!("Galaxy Terminal - generating {} points...", params.count);
    let mut app = GalaxyApp::new(params, seed)?;
    app.run()?;

    println!("Seed was {}; pass --seed {} to see this galaxy again.", seed, seed);
    Ok(())
}
