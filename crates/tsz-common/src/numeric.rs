//! Numeric-literal text formatting.
//!
//! `Lit::Num` is stored as `f64` but rendered with 32-bit precision, matching
//! the source compiler this workspace's conventions were inherited from.
//! Keeping the narrowing in one place means every renderer (diagnostics,
//! the `Display` impl on `Type`, future emitters) agrees on the same text
//! for the same value.

/// Render a numeric literal value the way source diagnostics expect:
/// narrowed to `f32` before formatting, so `1.1` and values like
/// `16_777_217.0` that aren't exactly representable in 32 bits render with
/// the precision loss source tooling expects, not full `f64` precision.
pub fn format_num_32(value: f64) -> String {
    let narrowed = value as f32;
    if narrowed.is_nan() {
        "NaN".to_string()
    } else if narrowed.is_infinite() {
        if narrowed.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        }
    } else {
        format!("{narrowed}")
    }
}
