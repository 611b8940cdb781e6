/// Ownership slot for the currently published point buffer
use rand::Rng;

use crate::buffer::PointBuffer;
use crate::error::{GalaxyError, Result};
use crate::generator::GalaxyGenerator;
use crate::params::GenerationParameters;

/// Counters for buffers that passed through a slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotStats {
    pub acquired: u64,
    pub released: u64,
}

/// Holds at most one live buffer.
///
/// Replacing a buffer is two explicit steps: [`release`](Self::release) the
/// old one, then [`acquire`](Self::acquire) the new one. Acquiring while a
/// buffer is still held is an error, so nothing is ever replaced implicitly.
#[derive(Debug, Default)]
pub struct PointCloudSlot {
    current: Option<PointBuffer>,
    stats: SlotStats,
}

impl PointCloudSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the published buffer out of the slot, if any
    pub fn release(&mut self) -> Option<PointBuffer> {
        let buffer = self.current.take()?;
        self.stats.released += 1;
        tracing::debug!(
            generation = self.stats.acquired,
            points = buffer.len(),
            "released point buffer"
        );
        Some(buffer)
    }

    /// Publish `buffer`, returning its generation number (starting at 1)
    pub fn acquire(&mut self, buffer: PointBuffer) -> Result<u64> {
        self.publish(buffer)?;
        Ok(self.stats.acquired)
    }

    /// Drop the old buffer, generate a new one and publish it
    pub fn regenerate<R: Rng>(
        &mut self,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Result<&PointBuffer> {
        drop(self.release());
        let buffer = GalaxyGenerator::generate_with_rng(params, rng);
        self.publish(buffer)
    }

    fn publish(&mut self, buffer: PointBuffer) -> Result<&PointBuffer> {
        if self.current.is_some() {
            return Err(GalaxyError::SlotOccupied {
                generation: self.stats.acquired,
            });
        }
        self.stats.acquired += 1;
        tracing::debug!(
            generation = self.stats.acquired,
            points = buffer.len(),
            "acquired point buffer"
        );
        Ok(&*self.current.insert(buffer))
    }

    pub fn current(&self) -> Option<&PointBuffer> {
        self.current.as_ref()
    }

    /// Generation of the most recently acquired buffer; 0 before the first
    pub fn generation(&self) -> u64 {
        self.stats.acquired
    }

    pub fn stats(&self) -> SlotStats {
        self.stats
    }

    /// Buffers acquired and not yet released; always 0 or 1
    pub fn live_buffers(&self) -> u64 {
        self.stats.acquired - self.stats.released
    }
}
