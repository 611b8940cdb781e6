/// Galaxy Web - WASM bindings for browser renderers
///
/// Exposes the generator to JavaScript. The page owns the GPU resources;
/// this side only hands over flat position and color arrays, three floats
/// per point each, indexed in parallel.

use galaxy_core::{GalaxyGenerator, GenerationParameters, PointCloudSlot, Rgb};
use wasm_bindgen::prelude::*;

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[wasm_bindgen]
pub struct WebGalaxy {
    params: GenerationParameters,
    seed: u32,
    slot: PointCloudSlot,
}

#[wasm_bindgen]
impl WebGalaxy {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGalaxy {
        WebGalaxy {
            params: GenerationParameters::default(),
            seed,
            slot: PointCloudSlot::new(),
        }
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    pub fn set_branches(&mut self, branches: u32) {
        self.params.branches = branches;
    }

    pub fn set_count(&mut self, count: u32) {
        self.params.count = count as usize;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.params.radius = radius;
    }

    pub fn set_randomness(&mut self, randomness: f32) {
        self.params.randomness = randomness;
    }

    pub fn set_randomness_power(&mut self, power: f32) {
        self.params.randomness_power = power;
    }

    pub fn set_spin(&mut self, spin: f32) {
        self.params.spin = spin;
    }

    pub fn set_size(&mut self, size: f32) {
        self.params.size = size;
    }

    pub fn set_inside_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.params.inside_color = parse_color(hex)?;
        Ok(())
    }

    pub fn set_outside_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.params.outside_color = parse_color(hex)?;
        Ok(())
    }

    /// Drop the current buffer. Call after disposing the matching GPU
    /// geometry on the JavaScript side.
    pub fn release(&mut self) -> bool {
        self.slot.release().is_some()
    }

    /// Release the previous galaxy and publish a new one; returns its
    /// generation number
    pub fn regenerate(&mut self) -> Result<u32, JsValue> {
        self.release();
        let buffer = GalaxyGenerator::generate_seeded(&self.params, self.seed as u64);
        let generation = self
            .slot
            .acquire(buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log(&format!(
            "galaxy generation {}: {} points",
            generation, self.params.count
        ));
        Ok(generation as u32)
    }

    /// Copy of the position array (becomes a `Float32Array`)
    pub fn positions(&self) -> Vec<f32> {
        self.slot
            .current()
            .map(|b| b.positions().to_vec())
            .unwrap_or_default()
    }

    /// Copy of the color array (becomes a `Float32Array`)
    pub fn colors(&self) -> Vec<f32> {
        self.slot
            .current()
            .map(|b| b.colors().to_vec())
            .unwrap_or_default()
    }

    pub fn point_count(&self) -> usize {
        self.slot.current().map_or(0, |b| b.len())
    }

    pub fn point_size(&self) -> f32 {
        self.slot
            .current()
            .map_or(self.params.sanitized().size, |b| b.point_size())
    }

    /// Buffers currently held; 0 or 1
    pub fn live_buffers(&self) -> u32 {
        self.slot.live_buffers() as u32
    }
}

fn parse_color(hex: &str) -> Result<Rgb, JsValue> {
    Rgb::from_hex(hex).map_err(|e| JsValue::from_str(&e.to_string()))
}
