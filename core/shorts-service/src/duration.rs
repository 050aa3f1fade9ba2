// core/shorts-service/src/duration.rs
// ISO-8601 video duration parsing

use lazy_static::lazy_static;
use regex::Regex;

/// Longest duration, in seconds, that still counts as a short.
pub const MAX_SHORT_SECONDS: u64 = 60;

lazy_static! {
    // Unanchored: the first `PT...` occurrence anywhere in the string wins.
    static ref ISO_DURATION: Regex =
        Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration regex");
}

/// Converts a duration such as `PT1H2M3S` into total seconds.
///
/// Anything that does not contain a `PT` component yields 0. Day components
/// (`P1DT...`) are not understood; only the time part after `PT` is counted.
pub fn parse_duration(duration: &str) -> u64 {
    let captures = match ISO_DURATION.captures(duration) {
        Some(captures) => captures,
        None => return 0,
    };

    let component = |index: usize| -> u64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// True when the video is at most [`MAX_SHORT_SECONDS`] long.
///
/// Unparseable durations count as zero seconds and therefore pass.
pub fn is_short(duration: &str) -> bool {
    parse_duration(duration) <= MAX_SHORT_SECONDS
}
