//! Batch driver - run many addresses through one generator with progress

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::StreamExt;

use crate::error::Result;
use crate::types::{GenerationConfig, Mode, VariationResult};
use crate::variant::{generate_plus_variations, DotVariations};

/// Cooperative cancellation flag, checked at every chunk boundary
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Batch progress info
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    pub completed_addresses: usize,
    pub total_addresses: usize,
    /// Address currently being generated, if any
    pub current_address: Option<String>,
    /// Fraction of the current address already generated
    pub current_fraction: f64,
    /// Results produced so far across all addresses
    pub generated: usize,
    /// Overall percentage, never decreasing
    pub percent: f64,
}

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<VariationResult>,
    pub processed_addresses: usize,
    pub cancelled: bool,
}

/// Runs addresses through the configured generator in input order
pub struct BatchDriver {
    config: GenerationConfig,
}

struct ProgressTracker {
    total: usize,
    last_percent: f64,
}

impl ProgressTracker {
    fn snapshot(
        &mut self,
        completed: usize,
        current: Option<&str>,
        fraction: f64,
        generated: usize,
    ) -> BatchProgress {
        let percent = if self.total == 0 {
            100.0
        } else {
            ((completed as f64 + fraction.clamp(0.0, 1.0)) / self.total as f64 * 100.0).min(100.0)
        };
        self.last_percent = self.last_percent.max(percent);

        BatchProgress {
            completed_addresses: completed,
            total_addresses: self.total,
            current_address: current.map(str::to_string),
            current_fraction: fraction,
            generated,
            percent: self.last_percent,
        }
    }
}

impl BatchDriver {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Run the batch with progress callback.
    ///
    /// Cancellation stops at the next chunk boundary and returns the results
    /// gathered so far. An address that is too large for dot generation
    /// aborts the whole batch.
    pub async fn run<F>(
        &self,
        addresses: &[String],
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<BatchOutcome>
    where
        F: FnMut(&BatchProgress),
    {
        let mut tracker = ProgressTracker {
            total: addresses.len(),
            last_percent: 0.0,
        };
        let mut outcome = BatchOutcome::default();

        tracing::debug!(
            mode = %self.config.mode,
            addresses = addresses.len(),
            chunk_size = self.config.chunk_size,
            "Starting batch"
        );

        for (index, address) in addresses.iter().enumerate() {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            on_progress(&tracker.snapshot(index, Some(address), 0.0, outcome.results.len()));

            let finished = match self.config.mode {
                Mode::Dot => {
                    self.run_dots(address, index, cancel, &mut tracker, &mut outcome, &mut on_progress)
                        .await?
                }
                Mode::Plus => {
                    let results =
                        generate_plus_variations(address, &self.config.tags, self.config.separator);
                    tracing::debug!(address = %address, count = results.len(), "Tag variations generated");
                    outcome.results.extend(results);
                    true
                }
            };

            if !finished {
                outcome.cancelled = true;
                break;
            }

            outcome.processed_addresses = index + 1;
            on_progress(&tracker.snapshot(index + 1, None, 0.0, outcome.results.len()));
            tokio::task::yield_now().await;
        }

        if outcome.cancelled {
            tracing::warn!(
                processed = outcome.processed_addresses,
                total = addresses.len(),
                generated = outcome.results.len(),
                "Batch cancelled"
            );
        } else {
            if addresses.is_empty() {
                on_progress(&tracker.snapshot(0, None, 0.0, 0));
            }
            tracing::info!(
                addresses = addresses.len(),
                generated = outcome.results.len(),
                "Batch completed"
            );
        }

        Ok(outcome)
    }

    /// Returns `false` when cancelled part-way
    async fn run_dots<F>(
        &self,
        address: &str,
        index: usize,
        cancel: &CancelToken,
        tracker: &mut ProgressTracker,
        outcome: &mut BatchOutcome,
        on_progress: &mut F,
    ) -> Result<bool>
    where
        F: FnMut(&BatchProgress),
    {
        let generator = DotVariations::new(address, self.config.chunk_size)?;
        let total = generator.total();
        let mut stream = generator.into_stream();

        while let Some(chunk) = stream.next().await {
            outcome.results.extend(chunk);
            on_progress(&tracker.snapshot(
                index,
                Some(address),
                stream.progress_fraction(),
                outcome.results.len(),
            ));

            if cancel.is_cancelled() && !stream.is_done() {
                return Ok(false);
            }
        }

        tracing::info!(address = %address, count = total, "Dot variations generated");
        Ok(true)
    }
}
