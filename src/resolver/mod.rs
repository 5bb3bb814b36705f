//! Command payload resolution: text in, validated [`RgbColor`] out.
//!
//! Two paths exist:
//! - [`resolve_explicit`] parses an `R,G,B` triple typed by the operator.
//! - [`Resolver::resolve_by_name`] asks a [`Search`] backend about a color
//!   name and pulls the first numeric triple out of whatever text comes back.
//!
//! Both paths end in the same range validation, so a triple found in search
//! text is held to the same rules as one typed by hand.

mod extract;
mod search;

use std::num::IntErrorKind;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::color::{RgbColor, CHANNEL_NAMES};

pub use extract::{extract_rgb, extract_triple};
pub use search::{search_with_timeout, CommandSearch, NoSearch, Search, SearchError};

/// Default bound on a single name lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of resolving one command payload.
pub type ResolveResult = Result<RgbColor, ResolveError>;

/// Why a payload could not be turned into a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid RGB format '{input}': expected 'R,G,B' (e.g. '255,100,50')")]
    InvalidFormat { input: String },

    #[error("{channel} channel value {value} is out of range (0-255)")]
    OutOfRange { channel: &'static str, value: String },

    #[error("color lookup failed: {reason}")]
    LookupFailed { reason: String },

    #[error("no RGB triple found in lookup result")]
    NoTripleFound,
}

impl ResolveError {
    /// Whether repeating the same request could succeed.
    ///
    /// Only lookup failures are transient; everything else depends solely on
    /// the input text.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LookupFailed { .. })
    }
}

/// Parse an explicit `R,G,B` triple.
///
/// Whitespace around each token is ignored. Exactly three integer tokens are
/// required; anything else is [`ResolveError::InvalidFormat`]. Integers that
/// do not fit a byte (including negative ones and ones too large to parse)
/// are [`ResolveError::OutOfRange`].
pub fn resolve_explicit(text: &str) -> ResolveResult {
    let invalid = || ResolveError::InvalidFormat {
        input: text.to_string(),
    };

    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() != 3 {
        return Err(invalid());
    }

    let mut values = [0i64; 3];
    for (i, token) in tokens.iter().enumerate() {
        values[i] = match token.parse::<i64>() {
            Ok(value) => value,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    return Err(ResolveError::OutOfRange {
                        channel: CHANNEL_NAMES[i],
                        value: (*token).to_string(),
                    })
                }
                _ => return Err(invalid()),
            },
        };
    }

    RgbColor::from_channels(values[0], values[1], values[2])
}

/// Build the search query used for a color name.
pub fn lookup_query(name: &str) -> String {
    format!("RGB color code for {}", name.trim())
}

/// Resolves color names through a search backend.
#[derive(Clone)]
pub struct Resolver {
    search: Arc<dyn Search>,
    timeout: Duration,
}

impl Resolver {
    /// Create a resolver with the default lookup timeout.
    pub fn new(search: Arc<dyn Search>) -> Self {
        Self::with_timeout(search, DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Create a resolver with a custom lookup timeout.
    pub fn with_timeout(search: Arc<dyn Search>, timeout: Duration) -> Self {
        Self { search, timeout }
    }

    /// The bound applied to each lookup.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Parse an explicit triple. Same as [`resolve_explicit`].
    pub fn resolve_explicit(&self, text: &str) -> ResolveResult {
        resolve_explicit(text)
    }

    /// Look a color name up and extract the first triple from the result.
    ///
    /// One attempt only: no caching and no retry. A backend error or timeout
    /// is [`ResolveError::LookupFailed`]; text without a triple is
    /// [`ResolveError::NoTripleFound`].
    pub fn resolve_by_name(&self, name: &str) -> ResolveResult {
        let query = lookup_query(name);
        debug!(%query, backend = self.search.name(), "looking up color");

        let text = search_with_timeout(Arc::clone(&self.search), &query, self.timeout).map_err(
            |e| ResolveError::LookupFailed {
                reason: e.to_string(),
            },
        )?;

        extract_rgb(&text)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("search", &self.search.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
