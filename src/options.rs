//! Parse configuration

/// Default number of entry slots allocated before scanning starts.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Default number of characters shown in error previews.
pub const DEFAULT_PREVIEW_LEN: usize = 10;

/// Default limit on how deeply tags may nest.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Options for a single parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Entry slots allocated up front, capped by the input length. The
    /// buffer doubles past this.
    pub initial_capacity: usize,
    /// Maximum characters of source text quoted in a structure error.
    pub preview_len: usize,
    /// Deepest tag nesting accepted. The root tag is depth 1.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            preview_len: DEFAULT_PREVIEW_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Size the entries buffer up front. Zero is bumped to one slot.
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    pub const fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Reject documents nesting deeper than `depth`. Zero is bumped to one
    /// so a root tag is always readable.
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = if depth == 0 { 1 } else { depth };
        self
    }

    /// Guess a capacity from the input size.
    ///
    /// Roughly one record per 8 bytes of markup, never below the default.
    pub fn sized_for(input: &str) -> Self {
        Self::new().with_initial_capacity((input.len() / 8).max(DEFAULT_INITIAL_CAPACITY))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParseOptions::default();
        assert_eq!(opts.initial_capacity, 256);
        assert_eq!(opts.preview_len, 10);
        assert_eq!(opts.max_depth, 1024);
    }

    #[test]
    fn test_max_depth_builder() {
        assert_eq!(ParseOptions::new().with_max_depth(8).max_depth, 8);
        assert_eq!(ParseOptions::new().with_max_depth(0).max_depth, 1);
    }

    #[test]
    fn test_zero_capacity_bumped() {
        assert_eq!(ParseOptions::new().with_initial_capacity(0).initial_capacity, 1);
    }

    #[test]
    fn test_sized_for() {
        assert_eq!(ParseOptions::sized_for("<a/>").initial_capacity, 256);
        let big = "x".repeat(8 * 1000);
        assert_eq!(ParseOptions::sized_for(&big).initial_capacity, 1000);
    }
}
