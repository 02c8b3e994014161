use std::fmt;

use thiserror::Error;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name must be at least {} characters long", MIN_NAME_LENGTH)]
    TooShort,
    #[error("Name cannot exceed {} characters", MAX_NAME_LENGTH)]
    TooLong,
    #[error("Name can only contain letters and spaces")]
    InvalidCharacters,
}

/// A display name made of ASCII letters and whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let length = raw.chars().count();

        if length < MIN_NAME_LENGTH {
            return Err(NameError::TooShort);
        }
        if length > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
        {
            return Err(NameError::InvalidCharacters);
        }

        Ok(Self(raw.to_string()))
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
