use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"[A-Za-z](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// A syntactically valid email address.
///
/// The address is kept exactly as given and compared byte for byte.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        Self::try_from(Secret::from(raw.to_string()))
    }

    fn is_valid(raw: &str) -> bool {
        if raw.is_empty() || raw.len() > MAX_EMAIL_LENGTH {
            return false;
        }

        let Some((local_part, _domain)) = raw.rsplit_once('@') else {
            return false;
        };

        local_part.len() <= MAX_LOCAL_PART_LENGTH && EMAIL_REGEX.is_match(raw)
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        if !Self::is_valid(raw.expose_secret()) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, faker::internet::en::SafeEmail};
    use quickcheck_macros::quickcheck;

    #[test]
    fn accepts_simple_address_unchanged() {
        let email = Email::parse("a@b.com").unwrap();
        assert_eq!(email.as_ref().expose_secret(), "a@b.com");
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(Email::parse(""), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert_eq!(Email::parse("invalid-email"), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "@example.com",
            "john@",
            "john@example",
            "john.@example.com",
            ".john@example.com",
            "jo..hn@example.com",
            "john doe@example.com",
            "john@exa_mple.com",
            "john@-example.com",
            "john@example..com",
            "john@@example.com",
            "john@example.123",
            "john@example.1com",
        ] {
            assert!(Email::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_local_part() {
        let raw = format!("{}@example.com", "a".repeat(65));
        assert!(Email::parse(&raw).is_err());
    }

    #[test]
    fn rejects_overlong_address() {
        let raw = format!("john@{}.com", "a".repeat(250));
        assert!(Email::parse(&raw).is_err());
    }

    #[test]
    fn accepts_plus_and_subdomains() {
        assert!(Email::parse("john.doe+news@mail.example.co.uk").is_ok());
    }

    #[test]
    fn equality_is_by_value() {
        let a = Email::parse("john@example.com").unwrap();
        let b = Email::parse("john@example.com").unwrap();
        let c = Email::parse("jane@example.com").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn generated_addresses_are_accepted() {
        for _ in 0..50 {
            let raw: String = SafeEmail().fake();
            assert!(Email::parse(&raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[quickcheck]
    fn strings_without_at_sign_are_rejected(raw: String) -> bool {
        raw.contains('@') || Email::parse(&raw).is_err()
    }
}
