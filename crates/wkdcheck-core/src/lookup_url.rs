//! WKD lookup URL derivation.
//!
//! Derives `https://{domain}/.well-known/openpgpkey/hu/{digest}` for an email
//! address, where `digest` is the z-base-32 encoded SHA-1 of the local part.
//! Pure and deterministic: no I/O, no state.
//!
//! The local part is hashed byte-for-byte as given; it is not lowercased or
//! percent-decoded first. draft-koch-openpgp-webkey-service specifies a
//! lowercase mapping before hashing, so directories that publish under the
//! mapped form need the address supplied already in that form. The domain
//! never feeds the digest and is copied verbatim into the host, with no
//! punycode or case normalization.

use sha1::{Digest, Sha1};

use crate::email::{AddressError, EmailAddress};
use crate::zbase32;

/// Well-known path prefix shared by all WKD lookups.
const WELL_KNOWN_PREFIX: &str = ".well-known/openpgpkey/hu";

/// A derived WKD lookup URL.
///
/// Immutable once computed; it carries no identity beyond the address that
/// produced it and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WkdUrl(String);

impl WkdUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for WkdUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the WKD lookup URL for `email`.
///
/// Fails only when the address does not split into `local@domain`; every
/// well-formed address maps to exactly one URL.
pub fn derive_lookup_url(email: &str) -> Result<WkdUrl, AddressError> {
    let addr = EmailAddress::parse(email)?;
    Ok(lookup_url_for(&addr))
}

/// Same derivation for an already-split address.
pub fn lookup_url_for(addr: &EmailAddress) -> WkdUrl {
    let digest = Sha1::digest(addr.local.as_bytes());
    let encoded = zbase32::encode(&digest);
    WkdUrl(format!(
        "https://{}/{}/{}",
        addr.domain, WELL_KNOWN_PREFIX, encoded
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_reference_vector_foo() {
        // SHA-1("foo") = 0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33, z-base-32 encoded.
        let url = derive_lookup_url("foo@example.org").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/.well-known/openpgpkey/hu/bxzcxpxk8h87z1k7bzk86xn5aj47intu"
        );
    }

    #[test]
    fn derive_published_draft_vector() {
        // draft-koch-openpgp-webkey-service hashes "joe.doe" to this digest.
        let url = derive_lookup_url("joe.doe@example.org").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/.well-known/openpgpkey/hu/iy9q119eutrkn8s1mk4r39qejnbu3n5q"
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive_lookup_url("someone@keys.example").unwrap();
        let b = derive_lookup_url("someone@keys.example").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn domain_changes_host_only() {
        let a = derive_lookup_url("foo@example.org").unwrap();
        let b = derive_lookup_url("foo@example.net").unwrap();
        assert_ne!(a, b);
        let suffix_a = a.as_str().strip_prefix("https://example.org/").unwrap();
        let suffix_b = b.as_str().strip_prefix("https://example.net/").unwrap();
        assert_eq!(suffix_a, suffix_b, "path must depend on the local part only");
    }

    #[test]
    fn local_part_is_hashed_as_given() {
        // Pins the raw-byte behavior: no lowercase mapping before hashing.
        let lower = derive_lookup_url("joe.doe@example.org").unwrap();
        let mixed = derive_lookup_url("Joe.Doe@example.org").unwrap();
        assert_ne!(lower, mixed);
        assert_eq!(
            mixed.as_str(),
            "https://example.org/.well-known/openpgpkey/hu/pcgzakauf7ubbkqhq39ifojo7wji1m59"
        );
    }

    #[test]
    fn domain_case_is_copied_verbatim() {
        let url = derive_lookup_url("foo@Example.ORG").unwrap();
        assert!(url.as_str().starts_with("https://Example.ORG/"));
    }

    #[test]
    fn derive_rejects_malformed_addresses() {
        assert!(derive_lookup_url("noatsign").is_err());
        assert!(derive_lookup_url("").is_err());
        assert!(derive_lookup_url("a@b@c").is_err());
    }
}
