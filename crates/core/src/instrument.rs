//! Instrument-name validation.
//!
//! Instrument names are used to build local cache paths and remote
//! URLs, so they must be rejected before any I/O if they carry path
//! characters. This is the sole security-relevant boundary of the
//! subsystem.

use crate::error::CoreError;

/// Characters that could escape the cache directory or rewrite the
/// remote URL path. `.` covers both `..` traversal and extension
/// injection.
const FORBIDDEN: &[char] = &['.', '/', '\\'];

/// Validate that an instrument name is non-empty and free of path
/// characters.
pub fn validate_instrument_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Instrument name must not be empty".to_string(),
        ));
    }
    if name.contains(FORBIDDEN) {
        return Err(CoreError::Validation(format!(
            "Potentially unsafe instrument name was requested: {name}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn plain_names_pass() {
        for name in ["mari", "TOSCA", "sans2d", "enginx"] {
            assert!(validate_instrument_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn path_characters_are_rejected() {
        for name in ["../mari", "mari/..", "a/b", "a\\b", "mari.py", ".."] {
            assert_matches!(
                validate_instrument_name(name),
                Err(CoreError::Validation(_)),
                "{name}"
            );
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_matches!(validate_instrument_name(""), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_instrument_name("   "),
            Err(CoreError::Validation(_))
        );
    }
}
