/// Text presets for generation parameters
///
/// A preset is a list of `key = value` lines. Blank lines and lines starting
/// with `#` are skipped; keys that are not present keep their defaults.
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::all_consuming,
    number::complete::float,
    sequence::{delimited, separated_pair},
    IResult,
};

use crate::color::hex_color;
use crate::error::{GalaxyError, Result};
use crate::params::GenerationParameters;

/// Parameters plus an optional seed for reproducible output
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preset {
    pub params: GenerationParameters,
    pub seed: Option<u64>,
}

impl Preset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let preset = Self::parse(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded preset");
        Ok(preset)
    }

    pub fn parse(input: &str) -> Result<Self> {
        let mut preset = Preset::default();

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = match all_consuming(entry)(trimmed) {
                Ok((_, pair)) => pair,
                Err(_) => {
                    return Err(GalaxyError::Preset {
                        line,
                        message: format!("expected `key = value`, found {:?}", trimmed),
                    })
                }
            };
            preset
                .apply(key, value)
                .map_err(|message| GalaxyError::Preset { line, message })?;
        }

        Ok(preset)
    }

    fn apply(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let params = &mut self.params;
        match key {
            "branches" => params.branches = parse_value(value, nom::character::complete::u32)?,
            "count" => params.count = parse_value(value, nom::character::complete::u64)? as usize,
            "radius" => params.radius = parse_value(value, float)?,
            "randomness" => params.randomness = parse_value(value, float)?,
            "randomness_power" => params.randomness_power = parse_value(value, float)?,
            "spin" => params.spin = parse_value(value, float)?,
            "size" => params.size = parse_value(value, float)?,
            "inside_color" => params.inside_color = parse_value(value, hex_color)?,
            "outside_color" => params.outside_color = parse_value(value, hex_color)?,
            "seed" => self.seed = Some(parse_value(value, nom::character::complete::u64)?),
            other => return Err(format!("unknown key {:?}", other)),
        }
        Ok(())
    }

    /// Serialize in the same format `parse` reads
    pub fn to_text(&self) -> String {
        let p = &self.params;
        let mut text = String::from("# galaxy preset\n");
        text.push_str(&format!("branches = {}\n", p.branches));
        text.push_str(&format!("count = {}\n", p.count));
        text.push_str(&format!("radius = {}\n", p.radius));
        text.push_str(&format!("randomness = {}\n", p.randomness));
        text.push_str(&format!("randomness_power = {}\n", p.randomness_power));
        text.push_str(&format!("spin = {}\n", p.spin));
        text.push_str(&format!("size = {}\n", p.size));
        text.push_str(&format!("inside_color = {}\n", p.inside_color.to_hex()));
        text.push_str(&format!("outside_color = {}\n", p.outside_color.to_hex()));
        if let Some(seed) = self.seed {
            text.push_str(&format!("seed = {}\n", seed));
        }
        text
    }
}

fn entry(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        delimited(space0, char('='), space0),
        take_while1(|c: char| !c.is_whitespace()),
    )(input)
}

fn parse_value<'a, T, F>(value: &'a str, parser: F) -> std::result::Result<T, String>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match all_consuming(parser)(value) {
        Ok((_, parsed)) => Ok(parsed),
        Err(_) => Err(format!("invalid value {:?}", value)),
    }
}
