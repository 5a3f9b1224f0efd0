use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field `{0}` is required and must not be empty")]
    Empty(&'static str),
    #[error("Field `{field}` is {len} characters long, the maximum allowed is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Lengths are counted in characters, matching VARCHAR semantics.
fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

pub fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    check_len(field, value, max)
}

pub fn optional(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(value) => check_len(field, value, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_values() {
        assert_eq!(required("subject", "", 10), Err(ValidationError::Empty("subject")));
        assert_eq!(required("subject", "   ", 10), Err(ValidationError::Empty("subject")));
        assert!(required("subject", "call", 10).is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 9 cyrillic characters, 18 bytes
        assert!(required("subject", "Позвонить", 9).is_ok());
        assert_eq!(
            required("subject", "Позвонить", 8),
            Err(ValidationError::TooLong {
                field: "subject",
                len: 9,
                max: 8
            })
        );
    }

    #[test]
    fn optional_accepts_missing_values() {
        assert!(optional("data1", None, 3).is_ok());
        assert!(optional("data1", Some(""), 3).is_ok());
        assert!(optional("data1", Some("abcd"), 3).is_err());
    }
}
