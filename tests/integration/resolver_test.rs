//! Color resolution through the public API

use std::sync::Arc;
use std::time::{Duration, Instant};

use huectl::resolver::{extract_rgb, lookup_query};
use huectl::{resolve_explicit, ResolveError, Resolver, RgbColor};

use crate::helpers::{CannedSearch, HangingSearch};

#[test]
fn every_byte_triple_round_trips_through_explicit_parsing() {
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(51) {
            for b in [0u8, 1, 127, 254, 255] {
                let text = format!("{},{},{}", r, g, b);
                assert_eq!(resolve_explicit(&text), Ok(RgbColor::new(r, g, b)));
            }
        }
    }
}

#[test]
fn out_of_range_and_malformed_inputs_are_distinguished() {
    assert!(matches!(
        resolve_explicit("256,0,0"),
        Err(ResolveError::OutOfRange { .. })
    ));
    assert!(matches!(
        resolve_explicit("0,-5,0"),
        Err(ResolveError::OutOfRange { .. })
    ));
    assert!(matches!(
        resolve_explicit("0,x,0"),
        Err(ResolveError::InvalidFormat { .. })
    ));
}

#[test]
fn extractor_finds_triple_in_search_prose() {
    assert_eq!(
        extract_rgb("The color is approximately 120, 45, 200 according to sources"),
        Ok(RgbColor::new(120, 45, 200))
    );
    assert_eq!(
        extract_rgb("a color with no numbers"),
        Err(ResolveError::NoTripleFound)
    );
}

#[test]
fn name_lookup_uses_search_text() {
    let resolver = Resolver::new(Arc::new(CannedSearch(
        "Hot pink RGB code is (255, 105, 180). Hex #FF69B4.",
    )));
    assert_eq!(
        resolver.resolve_by_name("hot pink"),
        Ok(RgbColor::new(255, 105, 180))
    );
}

#[test]
fn hung_lookup_times_out_as_lookup_failed() {
    let resolver =
        Resolver::with_timeout(Arc::new(HangingSearch), Duration::from_millis(100));
    let start = Instant::now();
    let err = resolver.resolve_by_name("teal").unwrap_err();
    assert!(matches!(err, ResolveError::LookupFailed { .. }));
    assert!(err.is_retryable());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn snapshot_user_facing_strings() {
    insta::assert_snapshot!(RgbColor::new(0, 255, 0).to_string(), @"(0, 255, 0)");
    insta::assert_snapshot!(lookup_query("sea green"), @"RGB color code for sea green");
}
