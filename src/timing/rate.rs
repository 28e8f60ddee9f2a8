use crate::foundation::error::{ReelError, ReelResult};
use crate::text::split;

/// Estimated spoken length of `sentence` at `words_per_minute`.
///
/// Returns `0.0` for a sentence without words.
pub fn estimate_spoken_secs(sentence: &str, words_per_minute: f64) -> ReelResult<f64> {
    if !words_per_minute.is_finite() || words_per_minute <= 0.0 {
        return Err(ReelError::validation(
            "words_per_minute must be finite and > 0",
        ));
    }
    let n = split::words(sentence).len();
    Ok(n as f64 * 60.0 / words_per_minute)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/rate.rs"]
mod tests;
