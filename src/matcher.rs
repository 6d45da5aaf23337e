use crate::{RenamerError, Result};
use regex::{Regex, RegexBuilder};

/// Case-insensitive lookup of a single named field in extracted document text.
///
/// The field name is matched literally — characters that are special in regex
/// syntax carry no meaning here. A match is the field name, optional spaces or
/// tabs, an optional single `:` or `-` separator, more optional spaces or
/// tabs, then the rest of that line as the value. The value never crosses a
/// newline.
pub struct FieldMatcher {
    pattern: Regex,
}

impl FieldMatcher {
    /// Compile a matcher for `field_name`.
    ///
    /// Returns [`RenamerError::EmptyFieldName`] when the name is empty or
    /// whitespace-only.
    pub fn new(field_name: &str) -> Result<Self> {
        if field_name.trim().is_empty() {
            return Err(RenamerError::EmptyFieldName);
        }

        let pattern = RegexBuilder::new(&format!(
            r"{}[ \t]*[:\-]?[ \t]*([^\r\n]*)",
            regex::escape(field_name)
        ))
        .case_insensitive(true)
        .build()?;

        Ok(Self { pattern })
    }

    /// Return the value of the FIRST occurrence of the field in `text`,
    /// trimmed of surrounding whitespace, or `None` when the field name does
    /// not occur at all.
    ///
    /// A field with nothing after it on its line yields `Some("")` — the
    /// field was found, its value just happens to be empty.
    pub fn find_value<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str().trim())
    }
}
