//! Moving-average angle smoothing
//!
//! Keeps the last N valid angle samples in a ring buffer and averages
//! them. The mean is withheld until a minimum number of samples has been
//! pushed so a single noisy frame never drives the stage machine.

/// Default number of samples in the smoothing window
pub const DEFAULT_WINDOW: usize = 5;

/// Default number of samples required before `mean()` reports a value
pub const DEFAULT_WARMUP: usize = 3;

/// Fixed-size moving-average filter over the raw angle stream
#[derive(Clone, Debug)]
pub struct SmoothedAngleTracker {
    /// Circular buffer of samples, `capacity` long once allocated
    samples: Vec<f32>,

    /// Next slot to overwrite once the buffer is full
    write_index: usize,

    /// Window size
    capacity: usize,

    /// Samples needed before the mean is trusted
    warmup: usize,
}

impl SmoothedAngleTracker {
    /// Create a tracker with `capacity` slots and a `warmup` minimum
    ///
    /// Both are clamped to at least 1, and `warmup` to at most `capacity`.
    pub fn new(capacity: usize, warmup: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            write_index: 0,
            capacity,
            warmup: warmup.clamp(1, capacity),
        }
    }

    /// Push a sample; `None` (degenerate geometry) does not consume a slot
    pub fn push(&mut self, sample: Option<f32>) {
        let Some(angle) = sample.filter(|a| a.is_finite()) else {
            return;
        };

        if self.samples.len() < self.capacity {
            self.samples.push(angle);
        } else {
            self.samples[self.write_index] = angle;
            self.write_index = (self.write_index + 1) % self.capacity;
        }
    }

    /// Whether enough samples have arrived to report a mean
    pub fn is_ready(&self) -> bool {
        self.samples.len() >= self.warmup
    }

    /// Arithmetic mean of held samples, `None` during warm-up
    pub fn mean(&self) -> Option<f32> {
        if !self.is_ready() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    /// Number of samples currently held (at most the window size)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in chronological order, oldest first
    pub fn samples(&self) -> Vec<f32> {
        let mut ordered = Vec::with_capacity(self.samples.len());
        ordered.extend_from_slice(&self.samples[self.write_index..]);
        ordered.extend_from_slice(&self.samples[..self.write_index]);
        ordered
    }

    /// Drop all samples and restart warm-up
    pub fn clear(&mut self) {
        self.samples.clear();
        self.write_index = 0;
    }
}

impl Default for SmoothedAngleTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_WARMUP)
    }
}
