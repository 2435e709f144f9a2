//! Text normalization applied to both stored fields and queries
//!
//! Similarity weights are only comparable when both sides went through
//! [`normalize`].

/// Characters dropped entirely before comparison
const STRIPPED: [char; 3] = ['.', ',', '-'];

/// Lowercase the input, drop periods, commas and hyphens, and collapse
/// runs of spaces to a single space.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;

    for c in text.chars() {
        if STRIPPED.contains(&c) {
            continue;
        }
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }

    out.to_lowercase()
}
