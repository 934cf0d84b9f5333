//! Variation engine - dot-insertion and tag-append aliases for Gmail-style addresses
//!
//! Both schemes share [`normalize`]; dot generation is exponential in the
//! username length and is therefore produced in chunks.

mod dots;
mod normalize;
mod tags;
pub mod validator;

pub use dots::{
    expected_distribution, generate_dot_variations, generate_dot_variations_chunked,
    DotVariationStream, DotVariations,
};
pub use normalize::{normalize, NormalizedAddress};
pub use tags::{generate_plus_variations, parse_tags};
pub use validator::{AddressValidator, ValidatedAddress};

/// Hard ceiling on username length for dot generation (2^19 results)
pub const MAX_DOT_USERNAME_LENGTH: usize = 20;

/// Soft ceiling: above this length callers should warn before generating
pub const RECOMMENDED_MAX_USERNAME_LENGTH: usize = 15;

/// Default number of results per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Split free text on runs of newlines/commas, trimming and dropping empties.
///
/// Order is preserved and duplicates are kept.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of dot variations for a username of `length` characters, or
/// `None` when it does not fit in a `u64` (length above 64)
pub fn dot_variation_count(length: usize) -> Option<u64> {
    if length <= 1 {
        return Some(1);
    }
    u32::try_from(length - 1).ok().and_then(|gaps| 1u64.checked_shl(gaps))
}
