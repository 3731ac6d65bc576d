//! Email address splitting for WKD lookups.
//!
//! WKD only needs the local part and the domain. No RFC 5322 validation is
//! attempted beyond requiring exactly one `@` between non-empty components.

use thiserror::Error;

/// Input did not split into `local@domain`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid email address {input:?}: expected exactly one '@' between non-empty local part and domain")]
pub struct AddressError {
    pub input: String,
}

/// An email address split into the two components WKD cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    /// Everything before the `@`, byte-for-byte as given (never case-folded).
    pub local: String,
    /// Everything after the `@`, copied verbatim into the lookup host.
    pub domain: String,
}

impl EmailAddress {
    /// Splits `input` on `@`. Zero or more than one `@`, or an empty
    /// component on either side, is rejected.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let mut parts = input.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
                Ok(EmailAddress {
                    local: local.to_string(),
                    domain: domain.to_string(),
                })
            }
            _ => Err(AddressError {
                input: input.to_string(),
            }),
        }
    }
}
