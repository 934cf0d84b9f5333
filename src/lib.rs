//! Alias Forge - Gmail alias generation
//!
//! Generates equivalent addresses for Gmail-style accounts by inserting dots
//! into the username or appending `+tag` suffixes.

pub mod batch;
pub mod error;
pub mod export;
pub mod stats;
pub mod store;
pub mod types;
pub mod variant;

// Re-export commonly used types
pub use error::{AliasForgeError, Result};
pub use types::{GenerationConfig, Mode, Separator, VariationResult};

// Re-export main functionality
pub use batch::{BatchDriver, BatchOutcome, BatchProgress, CancelToken};
pub use variant::{
    generate_dot_variations, generate_dot_variations_chunked, generate_plus_variations, normalize,
    AddressValidator, DotVariations, NormalizedAddress,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
