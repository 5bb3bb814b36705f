//! One-shot color resolution

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::warn;

use huectl::resolver::{resolve_explicit, CommandSearch, NoSearch, Resolver, Search};
use huectl::theme::current_theme;
use huectl::Config;

/// Build the name resolver described by `config`.
///
/// An empty `search.command` is not an error: name lookups then fail as
/// not available while explicit triples still work.
pub fn build_resolver(config: &Config) -> Resolver {
    let search: Arc<dyn Search> =
        match CommandSearch::from_argv(&config.search.command, config.search_timeout()) {
            Some(search) => Arc::new(search),
            None => {
                warn!("search.command is empty; color names cannot be looked up");
                Arc::new(NoSearch)
            }
        };
    Resolver::with_timeout(search, config.search_timeout())
}

/// Resolve `payload` and print the triple.
///
/// Payloads containing a comma are parsed as `R,G,B`; anything else is
/// looked up by name.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, payload: &str) -> Result<()> {
    let theme = current_theme();

    let resolved = if payload.contains(',') {
        resolve_explicit(payload)
    } else {
        build_resolver(config).resolve_by_name(payload)
    };

    match resolved {
        Ok(color) => {
            println!(
                "{} #{:02x}{:02x}{:02x}",
                theme.accent_text(&color.to_string()),
                color.r,
                color.g,
                color.b
            );
            Ok(())
        }
        Err(e) => bail!("Could not resolve '{}': {}", payload, e),
    }
}
