//! Identifier newtypes for the entities referenced by reservations.
//!
//! Identifiers are opaque `i64` values assigned by the collaborating
//! systems (auth, salon and menu management) or, for reservations, by the
//! store on insert. The newtypes keep the four id spaces from being mixed
//! up at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Identifier of a salon account.
    SalonId
}

id_type! {
    /// Identifier of a user account.
    UserId
}

id_type! {
    /// Identifier of a salon menu item.
    MenuId
}

id_type! {
    /// Identifier of a persisted reservation, generated on creation.
    ReservationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_value_roundtrip() {
        let id = SalonId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(SalonId::from(42), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ReservationId::new(7)), "7");
        assert_eq!(format!("{}", UserId::new(-1)), "-1");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property: SalonId and MenuId cannot be compared.
        // Exercise the serde format instead.
        let json = serde_json::to_string(&MenuId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: MenuId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MenuId::new(5));
    }

    #[test]
    fn test_id_ordering() {
        assert!(SalonId::new(1) < SalonId::new(2));
    }
}
