//! Help text embedded by the build script.

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

/// The embedded help markdown, or an empty string if it is not valid UTF-8.
pub fn help_text() -> &'static str {
    std::str::from_utf8(EMBEDDED_HELP).unwrap_or_default()
}
