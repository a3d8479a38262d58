//! Text normalization for matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison.
///
/// Decomposes accented characters and drops the combining marks, folds
/// case, and trims surrounding whitespace, so `"Éau "` and `"eau"` compare
/// equal. Decomposition runs again after case folding because lowercasing
/// can itself introduce marks (`'İ'` lowercases to `i` + U+0307). The
/// result is a fixed point: normalizing it again changes nothing.
pub fn normalize(text: &str) -> String {
    let folded: String = strip_marks(text).to_lowercase();
    strip_marks(&folded).trim().to_string()
}

fn strip_marks(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
