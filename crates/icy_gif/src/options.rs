use serde::{Deserialize, Serialize};

/// Encoder configuration.
///
/// The only knob is the number of parallel workers used by the quantizer and
/// the block compressor. `None` (or `Some(0)`) uses every available core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Number of strips the work is split into. All strips run on the rayon
    /// thread pool, this does not set the number of threads.
    pub workers: Option<usize>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Resolves the configured worker count, falling back to the core count.
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => num_cpus::get().max(1),
        }
    }
}
