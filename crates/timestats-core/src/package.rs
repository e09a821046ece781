//! Package-name extraction from raw layer names.

use std::sync::OnceLock;

use regex::Regex;

/// Matches, for instance:
/// - `StatusBar` in `StatusBar#0`
/// - `com.appname` in `com.appname/com.appname.activity#0`
/// - `com.appname` in `SurfaceView - com.appname/com.appname.activity#0`
fn layer_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:SurfaceView[-\s]+)?([^/]+).*#[0-9]+$")
            .expect("layer name pattern is valid")
    })
}

/// Derive the owning package from a raw layer name.
///
/// Returns an empty string when the name does not look like
/// `<package>[/<activity>]#<n>`.
pub fn derive_package_name(layer_name: &str) -> String {
    layer_name_pattern()
        .captures(layer_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
