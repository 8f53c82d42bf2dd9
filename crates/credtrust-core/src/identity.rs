//! # DID and DID URL Identifiers
//!
//! [`Did`] names an identity document; [`DidUrl`] names something inside
//! one (a key, a credential). Both are validated at construction, so every
//! value in circulation is well-formed.
//!
//! ## Relative form
//!
//! Inside a credential, a DID URL that points into the same document as a
//! reference DID may be written as just `#fragment`. [`DidUrl::parse_with_reference`]
//! resolves that form, and [`DidUrl::render`] produces it again when not
//! normalizing.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// W3C Decentralized Identifier.
///
/// Format: `did:<method>:<method-specific-id>` where method is lowercase
/// alphanumeric and the method-specific id is non-empty and carries no
/// fragment or query.
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not match
    /// `did:<method>:<identifier>`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidDid(s.to_string());

        let rest = s.strip_prefix("did:").ok_or_else(invalid)?;
        let (method, identifier) = rest.split_once(':').ok_or_else(invalid)?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if identifier.is_empty()
            || identifier
                .chars()
                .any(|c| c == '#' || c == '?' || c.is_whitespace())
        {
            return Err(invalid());
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method (between the first and second colons).
    pub fn method(&self) -> &str {
        self.parts().0
    }

    /// The method-specific identifier (everything after `did:<method>:`).
    pub fn method_specific_id(&self) -> &str {
        self.parts().1
    }

    fn parts(&self) -> (&str, &str) {
        // Validated at construction; the fallback is unreachable.
        self.0[4..].split_once(':').unwrap_or(("", ""))
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Did {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

/// A DID URL: a DID plus an optional fragment.
///
/// Used for credential identifiers and verification methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DidUrl {
    did: Did,
    fragment: Option<String>,
}

impl DidUrl {
    /// Build a DID URL from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDidUrl`] for an empty fragment or one
    /// containing `#` or whitespace.
    pub fn new(did: Did, fragment: Option<&str>) -> Result<Self, ValidationError> {
        if let Some(frag) = fragment {
            validate_fragment(frag).map_err(|_| {
                ValidationError::InvalidDidUrl(format!("{did}#{frag}"))
            })?;
        }
        Ok(Self {
            did,
            fragment: fragment.map(str::to_string),
        })
    }

    /// Parse an absolute DID URL (`did:<method>:<id>[#fragment]`).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::parse_with_reference(s, None)
    }

    /// Parse a DID URL, resolving the `#fragment` form against `reference`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingReference`] for a relative URL with no
    ///   reference DID.
    /// - [`ValidationError::InvalidDidUrl`] / [`ValidationError::InvalidDid`]
    ///   for malformed input, including surrounding whitespace.
    pub fn parse_with_reference(s: &str, reference: Option<&Did>) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::InvalidDidUrl(s.to_string()));
        }

        if let Some(fragment) = s.strip_prefix('#') {
            let did = reference.ok_or_else(|| ValidationError::MissingReference(s.to_string()))?;
            return Self::new(did.clone(), Some(fragment));
        }

        match s.split_once('#') {
            Some((did, fragment)) => Self::new(Did::new(did)?, Some(fragment)),
            None => Ok(Self {
                did: Did::new(s)?,
                fragment: None,
            }),
        }
    }

    /// The DID this URL points into.
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// The fragment, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Render for serialization.
    ///
    /// Emits the short `#fragment` form only when not normalized, a reference
    /// is given, the URL's DID equals the reference, and a fragment exists.
    /// Otherwise emits the absolute form.
    pub fn render(&self, reference: Option<&Did>, normalized: bool) -> String {
        match (&self.fragment, reference) {
            (Some(fragment), Some(reference)) if !normalized && *reference == self.did => {
                format!("#{fragment}")
            }
            _ => self.to_string(),
        }
    }
}

fn validate_fragment(fragment: &str) -> Result<(), ()> {
    if fragment.is_empty() || fragment.chars().any(|c| c == '#' || c.is_whitespace()) {
        return Err(());
    }
    Ok(())
}

impl std::fmt::Display for DidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.did, fragment),
            None => write!(f, "{}", self.did),
        }
    }
}

impl std::str::FromStr for DidUrl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DidUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DidUrl> for String {
    fn from(url: DidUrl) -> Self {
        url.to_string()
    }
}
