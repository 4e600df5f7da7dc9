//! Codec layout options.

use crate::error::{Result, TableError};

/// Default width of one fixed-width field, in characters.
pub const DEFAULT_FIELD_WIDTH: usize = 8;
/// Default number of fields per table line.
pub const DEFAULT_VALUES_PER_LINE: usize = 10;

/// Layout of fixed-width table lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Width of one field (default: 8).
    pub field_width: usize,
    /// Fields per line (default: 10).
    pub values_per_line: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            values_per_line: DEFAULT_VALUES_PER_LINE,
        }
    }
}

impl CodecOptions {
    /// Create codec options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field width.
    #[must_use]
    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width;
        self
    }

    /// Set the number of fields per line.
    #[must_use]
    pub fn with_values_per_line(mut self, count: usize) -> Self {
        self.values_per_line = count;
        self
    }

    /// Number of lines needed to hold `count` values.
    pub fn lines_for(&self, count: usize) -> usize {
        count.div_ceil(self.values_per_line.max(1))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.field_width == 0 {
            return Err(TableError::invalid_options("field width must be positive"));
        }
        if self.values_per_line == 0 {
            return Err(TableError::invalid_options(
                "values per line must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_for() {
        let options = CodecOptions::default();
        assert_eq!(options.lines_for(0), 0);
        assert_eq!(options.lines_for(10), 1);
        assert_eq!(options.lines_for(23), 3);
        assert_eq!(options.with_values_per_line(5).lines_for(23), 5);
    }

    #[test]
    fn test_validate() {
        assert!(CodecOptions::new().validate().is_ok());
        assert!(CodecOptions::new().with_field_width(0).validate().is_err());
        assert!(CodecOptions::new().with_values_per_line(0).validate().is_err());
    }
}
