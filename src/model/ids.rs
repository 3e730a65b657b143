//! Opaque identifier newtypes.
//!
//! Dataset files print identifiers as decimal integers, but nothing guarantees
//! they are dense, zero-based or even numeric. They are kept as strings and only
//! ever compared for equality, never used as indices.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from its textual form.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier exactly as it appeared in the source file.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a species class (`classes.txt`).
    ClassId
);
opaque_id!(
    /// Identifier of a dataset image (`images.txt`).
    ImageId
);
opaque_id!(
    /// Identifier of a part definition (`parts.txt`).
    PartId
);
opaque_id!(
    /// Identifier of an attribute definition (`attributes.txt`).
    AttributeId
);
opaque_id!(
    /// Identifier of a certainty level (`certainties.txt`).
    CertaintyId
);

impl CertaintyId {
    /// Numeric certainty level, when the identifier is numeric.
    pub fn level(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}
