//! Fallback-versus-override selection
//!
//! Ports ship generic implementations under paths containing `fallback`.
//! When a platform also provides its own implementation, only the override
//! is documented; a platform without one keeps the fallback.

/// Marker identifying generic fallback implementations
pub const FALLBACK_MARKER: &str = "fallback";

/// Drops fallback entries unless that would leave nothing.
///
/// `is_fallback` decides per entry; see [`prefer_overrides`] for the usual
/// substring check.
pub fn prefer_overrides_by<F>(paths: Vec<String>, is_fallback: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let overrides: Vec<String> = paths.iter().filter(|p| !is_fallback(p)).cloned().collect();
    if overrides.is_empty() {
        paths
    } else {
        overrides
    }
}

/// Drops entries containing [`FALLBACK_MARKER`] unless that would leave nothing.
pub fn prefer_overrides(paths: Vec<String>) -> Vec<String> {
    prefer_overrides_by(paths, |p| p.contains(FALLBACK_MARKER))
}
