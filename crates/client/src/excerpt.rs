//! Quiz prompt selection: a short contiguous run of a poem's lines.

use rand::Rng;

/// Default number of lines in a prompt.
pub const DEFAULT_WINDOW: usize = 5;

/// Pick `window` contiguous non-blank lines of `body_text`.
///
/// Blank lines are dropped first. If what remains fits in the window it is
/// returned whole; otherwise the window start is uniform over
/// `0..n - window`, so the final window position is never chosen. Line order
/// is always preserved.
/// A body with no text gives an empty excerpt.
pub fn select_excerpt<R: Rng + ?Sized>(body_text: &str, window: usize, rng: &mut R) -> String {
    let lines: Vec<&str> = body_text.lines().filter(|line| !line.trim().is_empty()).collect();

    if lines.len() <= window {
        return lines.join("\n");
    }

    let start = rng.gen_range(0..lines.len() - window);
    lines[start..start + window].join("\n")
}
