//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies documents with opaque string IDs (e.g. `64f1c2...`).
//! Use the `define_id!` macro so a `TaskId` can never be passed where a
//! `UserId` is expected.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display` and `From<String>` / `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use taskboard_core::define_id;
/// define_id!(ProjectId);
/// define_id!(CommentId);
///
/// let project = ProjectId::new("p1");
/// let comment = CommentId::new("p1");
///
/// // These are different types, so this won't compile:
/// // let _: ProjectId = comment;
/// assert_eq!(project.as_str(), comment.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(TaskId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = TaskId::new("64f1c2aa");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"64f1c2aa\"");

        let parsed: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(parsed.as_str(), "u-1");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UserId::from("abc").to_string(), "abc");
    }
}
