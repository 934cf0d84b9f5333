//! Dot-insertion variation generator
//!
//! Each of the `length - 1` gaps between username characters is one bit of a
//! counter: bit `j` set puts a dot after character `j`, so for "abc" counter 1
//! is "a.bc" and counter 2 is "ab.c". Counters are enumerated in ascending
//! order so output order is reproducible, and counter `i` always carries
//! `popcount(i)` dots.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use super::normalize::{normalize, NormalizedAddress};
use super::{DEFAULT_CHUNK_SIZE, MAX_DOT_USERNAME_LENGTH};
use crate::error::{AliasForgeError, Result};
use crate::types::VariationResult;

/// Chunked, non-restartable dot-variation sequence.
///
/// State is the remaining counter range plus the normalized address; once
/// `is_done()` returns true every further `next_chunk()` returns `None`.
#[derive(Debug)]
pub struct DotVariations {
    source: String,
    chars: Vec<char>,
    domain: String,
    current_index: u32,
    total: u32,
    chunk_size: u32,
}

impl DotVariations {
    /// Create a generator for `address` emitting `chunk_size` results per chunk
    pub fn new(address: &str, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(crate::validation_error!("Chunk size must be at least 1"));
        }

        let NormalizedAddress { username, domain } = normalize(address);
        let chars: Vec<char> = username.chars().collect();
        let length = chars.len();

        if length > MAX_DOT_USERNAME_LENGTH {
            return Err(AliasForgeError::input_too_large(length, MAX_DOT_USERNAME_LENGTH));
        }

        let total = if length <= 1 { 1 } else { 1u32 << (length - 1) };

        Ok(Self {
            source: address.to_string(),
            chars,
            domain,
            current_index: 0,
            total,
            chunk_size: u32::try_from(chunk_size).unwrap_or(u32::MAX),
        })
    }

    /// Total number of variations this generator produces
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Variations emitted so far
    pub fn emitted(&self) -> u32 {
        self.current_index
    }

    /// Remaining count
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.current_index)
    }

    /// Check if generator is exhausted
    pub fn is_done(&self) -> bool {
        self.current_index >= self.total
    }

    /// Fraction of the sequence already emitted, in `[0, 1]`
    pub fn progress_fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current_index as f64 / self.total as f64
        }
    }

    /// Address for dot pattern `index`
    pub fn variant_at(&self, index: u32) -> Option<String> {
        if index >= self.total {
            return None;
        }

        let gaps = self.chars.len().saturating_sub(1);
        let mut local = String::with_capacity(self.chars.len() * 2);
        for (j, ch) in self.chars.iter().enumerate() {
            local.push(*ch);
            if j < gaps && (index >> j) & 1 == 1 {
                local.push('.');
            }
        }

        Some(format!("{}@{}", local, self.domain))
    }

    /// Resume: produce the next chunk, or `None` once done.
    ///
    /// The final chunk may be shorter than the configured size.
    pub fn next_chunk(&mut self) -> Option<Vec<VariationResult>> {
        if self.is_done() {
            return None;
        }

        let start = self.current_index;
        let end = start.saturating_add(self.chunk_size).min(self.total);
        let chunk: Vec<VariationResult> = (start..end)
            .filter_map(|i| self.variant_at(i))
            .map(|email| VariationResult::new(email, &self.source))
            .collect();
        self.current_index = end;

        tracing::trace!(
            address = %self.source,
            start,
            end,
            total = self.total,
            "Dot chunk generated"
        );

        Some(chunk)
    }

    /// Async view that suspends once between consecutive chunks
    pub fn into_stream(self) -> DotVariationStream {
        DotVariationStream {
            inner: self,
            suspended: false,
        }
    }
}

impl Iterator for DotVariations {
    type Item = Vec<VariationResult>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = self.remaining().div_ceil(self.chunk_size) as usize;
        (chunks, Some(chunks))
    }
}

/// Stream of dot-variation chunks.
///
/// After each chunk (except the last) the next poll wakes its own task and
/// returns `Pending`, handing control back to the executor for one turn.
#[derive(Debug)]
pub struct DotVariationStream {
    inner: DotVariations,
    suspended: bool,
}

impl DotVariationStream {
    pub fn progress_fraction(&self) -> f64 {
        self.inner.progress_fraction()
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }
}

impl Stream for DotVariationStream {
    type Item = Vec<VariationResult>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.suspended {
            this.suspended = false;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        match this.inner.next_chunk() {
            Some(chunk) => {
                this.suspended = !this.inner.is_done();
                Poll::Ready(Some(chunk))
            }
            None => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Every dot variation of `address`, materialized at once.
///
/// Fails with `InputTooLarge` when the normalized username exceeds
/// [`MAX_DOT_USERNAME_LENGTH`]. Prefer the chunked form for anything large.
pub fn generate_dot_variations(address: &str) -> Result<Vec<VariationResult>> {
    let generator = DotVariations::new(address, DEFAULT_CHUNK_SIZE)?;
    let mut results = Vec::with_capacity(generator.total() as usize);
    for chunk in generator {
        results.extend(chunk);
    }
    Ok(results)
}

/// Chunked dot variations of `address`, `chunk_size` results at a time
pub fn generate_dot_variations_chunked(address: &str, chunk_size: usize) -> Result<DotVariations> {
    DotVariations::new(address, chunk_size)
}

/// Number of variations with `k` dots, indexed by `k`, for a username of
/// `length` characters: the binomial row `C(length - 1, k)`.
pub fn expected_distribution(length: usize) -> Vec<u64> {
    let gaps = length.saturating_sub(1) as u64;
    let mut row = Vec::with_capacity(gaps as usize + 1);
    let mut value = 1u64;
    for k in 0..=gaps {
        row.push(value);
        value = value * (gaps - k) / (k + 1);
    }
    row
}
