//! Opaque aggregate references.
//!
//! Every aggregate kind gets its own reference newtype via [`define_ref!`], so an
//! `OnlineOrderRef` can never be passed where a `PaymentRef` is expected. The
//! empty string is reserved as the "not yet assigned" identity value.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Generates a fresh reference string: an upper-cased random UUID.
pub fn generate_ref_string() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// Behaviour shared by every reference newtype.
pub trait Ref:
    Clone + Debug + Display + Eq + Hash + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Wraps an existing reference string.
    fn from_string(value: String) -> Self;

    /// Returns the reference as a string slice.
    fn as_str(&self) -> &str;

    /// The identity value, meaning "no reference assigned".
    fn identity() -> Self {
        Self::from_string(String::new())
    }

    /// Returns true for the identity value.
    fn is_identity(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Creates a new, never used reference.
    fn generate() -> Self {
        Self::from_string(generate_ref_string())
    }
}

/// Declares a reference newtype over `String` implementing [`Ref`].
///
/// The declaring crate must depend on `serde`.
///
/// ```
/// common::define_ref! {
///     /// Reference to a ticket.
///     pub TicketRef
/// }
///
/// let ticket = TicketRef::generate();
/// assert!(!ticket.is_identity());
/// assert!(TicketRef::IDENTITY.is_identity());
/// ```
#[macro_export]
macro_rules! define_ref {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            /// The "not yet assigned" value.
            pub const IDENTITY: Self = Self(String::new());

            /// Creates a new random reference.
            pub fn generate() -> Self {
                Self($crate::generate_ref_string())
            }

            /// Wraps an existing reference string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the reference as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true for the identity value.
            pub fn is_identity(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl $crate::Ref for $name {
            fn from_string(value: String) -> Self {
                Self(value)
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_ref! {
        /// Reference used only by these tests.
        pub(crate) SampleRef
    }

    #[test]
    fn generated_refs_are_unique_and_upper_case() {
        let first = SampleRef::generate();
        let second = SampleRef::generate();

        assert_ne!(first, second);
        assert_eq!(first.as_str(), first.as_str().to_uppercase());
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn identity_is_empty_and_default() {
        assert!(SampleRef::IDENTITY.is_identity());
        assert_eq!(SampleRef::default(), SampleRef::IDENTITY);
        assert_eq!(<SampleRef as Ref>::identity(), SampleRef::IDENTITY);
        assert!(!SampleRef::generate().is_identity());
    }

    #[test]
    fn refs_compare_by_value() {
        let a = SampleRef::new("ABC");
        let b: SampleRef = "ABC".into();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ABC");
    }

    #[test]
    fn ref_serializes_as_plain_string() {
        let reference = SampleRef::new("1234-ABCD");
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, "\"1234-ABCD\"");

        let back: SampleRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn trait_generate_matches_inherent_behaviour() {
        let reference = <SampleRef as Ref>::generate();
        assert!(!Ref::is_identity(&reference));
        assert_eq!(Ref::as_str(&reference), reference.as_str());
    }
}
