//! OCR-tolerant string comparison.

/// Largest allowed relative length difference between whitespace-stripped
/// strings of unequal length.
pub const LENGTH_RATIO_TOLERANCE: f64 = 0.4;

/// Positional mismatches allowed between strings of equal length.
pub const MAX_POSITIONAL_MISMATCHES: usize = 1;

/// Decide whether an OCR token is close enough to a target element name.
///
/// Comparison is case-sensitive; callers lower-case both sides first.
///
/// - Equal length (in chars): at most one positional mismatch, which absorbs a
///   single misread character.
/// - Unequal length: one string must contain the other, and the length
///   difference of the whitespace-stripped strings must be within
///   [`LENGTH_RATIO_TOLERANCE`] of either stripped length. A zero-length side
///   never satisfies its ratio.
pub fn is_close_match(candidate: &str, target: &str) -> bool {
    let candidate_len = candidate.chars().count();
    let target_len = target.chars().count();

    if candidate_len == target_len {
        let mismatches = candidate
            .chars()
            .zip(target.chars())
            .filter(|(c, t)| c != t)
            .count();
        return mismatches <= MAX_POSITIONAL_MISMATCHES;
    }

    if !(candidate.contains(target) || target.contains(candidate)) {
        return false;
    }

    let candidate_stripped = stripped_len(candidate);
    let target_stripped = stripped_len(target);
    let diff = candidate_stripped.abs_diff(target_stripped) as f64;

    within_ratio(diff, candidate_stripped) || within_ratio(diff, target_stripped)
}

fn stripped_len(s: &str) -> usize {
    s.chars().filter(|c| !c.is_whitespace()).count()
}

fn within_ratio(diff: f64, base: usize) -> bool {
    base > 0 && diff / base as f64 <= LENGTH_RATIO_TOLERANCE
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
