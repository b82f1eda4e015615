//! Typed identifier newtypes backed by store-assigned rowids.
//!
//! Identifiers are assigned by the persistent store on insertion and are
//! immutable afterwards; the domain never invents them.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw rowid returned by the store.
            #[must_use]
            pub fn from_raw(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw rowid.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Unique identifier for a [`LogEntry`](crate::change_log::LogEntry).
    LogEntryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = DeviceId::from_raw(11);
        let text = id.to_string();
        let parsed: DeviceId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_bare_number() {
        let id = DeviceId::from_raw(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = DeviceId::from_str("eleven");
        assert!(result.is_err());
    }

    #[test]
    fn should_order_ids_by_raw_value() {
        let earlier = LogEntryId::from_raw(1);
        let later = LogEntryId::from_raw(2);
        assert!(earlier < later);
    }
}
