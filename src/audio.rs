//! Audio capture/playback oracle (§6): the core consumes buffered samples
//! and requests transmission through this trait; the driver behind it
//! (sound card, virtual cable, ...) is out of scope.

/// A source and sink for 12 kHz mono `f32` samples.
pub trait AudioOracle {
    /// Returns all samples buffered since the last [`clear_buffer`](Self::clear_buffer) call.
    fn get_buffered_samples(&self) -> Vec<f32>;

    /// Discards all buffered capture samples.
    fn clear_buffer(&mut self);

    /// Transmits `samples`, invoking `on_done` once playback completes.
    fn transmit(&mut self, samples: &[f32], on_done: Box<dyn FnOnce() + Send>);
}
