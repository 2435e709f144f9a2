//! Result limit handling
//!
//! Request layers pass the raw `limit` parameter through here before
//! calling the searcher; the searcher itself trusts whatever it is given.

use serde::Deserialize;

/// Soft default and hard ceiling for result counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResultLimits {
    /// Used when the caller gives no usable limit
    #[serde(default = "default_soft")]
    pub soft: usize,
    /// Upper bound on any requested limit
    #[serde(default = "default_hard")]
    pub hard: usize,
}

fn default_soft() -> usize {
    10
}

fn default_hard() -> usize {
    100
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            soft: default_soft(),
            hard: default_hard(),
        }
    }
}

impl ResultLimits {
    /// Resolve a raw request parameter into a limit.
    ///
    /// Missing, unparsable and non-positive values fall back to `soft`;
    /// anything above `hard` is clamped.
    pub fn extract(&self, raw: Option<&str>) -> usize {
        let requested = raw
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(self.soft);

        requested.min(self.hard)
    }
}
