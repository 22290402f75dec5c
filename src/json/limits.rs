//! Parser configuration.
//!
//! The only resource bound is nesting depth: the parser is recursive, so an
//! adversarial `[[[[...` would otherwise exhaust the stack. The same bound is
//! applied by the binary decoder.

/// Default maximum nesting depth for arrays/objects.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Comment marker recognised when [`Limits::allow_comments`] is set.
pub const COMMENT_MARKER: u8 = b'#';

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects.
    pub max_nesting_depth: usize,
    /// Skip `#` to end of line outside strings.
    pub allow_comments: bool,
}

impl Limits {
    /// Standard grammar, no comments.
    pub const fn strict() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            allow_comments: false,
        }
    }

    /// Standard grammar plus `#` line comments.
    pub const fn with_comments() -> Self {
        Self {
            allow_comments: true,
            ..Self::strict()
        }
    }

    /// Same limits with a different depth bound.
    pub const fn max_depth(self, max_nesting_depth: usize) -> Self {
        Self {
            max_nesting_depth,
            ..self
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let limits = Limits::default();
        assert_eq!(limits, Limits::strict());
        assert_eq!(limits.max_nesting_depth, 512);
        assert!(!limits.allow_comments);
    }

    #[test]
    fn test_with_comments() {
        let limits = Limits::with_comments();
        assert!(limits.allow_comments);
        assert_eq!(limits.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_max_depth_override() {
        let limits = Limits::with_comments().max_depth(4);
        assert_eq!(limits.max_nesting_depth, 4);
        assert!(limits.allow_comments);
    }
}
