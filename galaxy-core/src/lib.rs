/// Galaxy Core Library - procedural spiral point clouds
///
/// This library provides a stateless generator that turns a parameter set
/// into flat position/color buffers, an ownership slot for swapping those
/// buffers, text presets, and the camera math shared by the viewers.

pub mod buffer;
pub mod color;
pub mod error;
pub mod generator;
pub mod params;
pub mod preset;
pub mod projection;
pub mod slot;
pub mod transform;

// Re-export commonly used types
pub use buffer::{PointBuffer, PointRecord};
pub use color::Rgb;
pub use error::{GalaxyError, Result};
pub use generator::GalaxyGenerator;
pub use params::{GenerationParameters, MAX_COUNT};
pub use preset::Preset;
pub use projection::{Camera, ProjectionMode};
pub use slot::{PointCloudSlot, SlotStats};
pub use transform::{RotationState, Transform};
