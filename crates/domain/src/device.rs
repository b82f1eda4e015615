//! Device — a switchable thing in the home: a light, a lock, a speaker.

use serde::{Deserialize, Serialize};

use crate::error::{HearthError, ValidationError};
use crate::id::DeviceId;

/// A device record as stored and served.
///
/// The identifier is assigned by the store on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isOn")]
    pub is_on: bool,
    pub room: Option<String>,
}

impl Device {
    /// Attach a store-assigned id to a validated draft.
    #[must_use]
    pub fn from_draft(id: DeviceId, draft: DeviceDraft) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            is_on: draft.is_on,
            room: draft.room,
        }
    }
}

/// The mutable fields of a device — everything the store does not assign.
///
/// Used for both creation and full-field updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isOn", default)]
    pub is_on: bool,
    #[serde(default)]
    pub room: Option<String>,
}

impl DeviceDraft {
    /// Create a builder for constructing a [`DeviceDraft`].
    #[must_use]
    pub fn builder() -> DeviceDraftBuilder {
        DeviceDraftBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when `name` or `kind` is empty.
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.kind.is_empty() {
            return Err(ValidationError::EmptyKind.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceDraft`].
#[derive(Debug, Default)]
pub struct DeviceDraftBuilder {
    name: Option<String>,
    kind: Option<String>,
    is_on: bool,
    room: Option<String>,
}

impl DeviceDraftBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn is_on(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    #[must_use]
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Consume the builder, validate, and return a [`DeviceDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if `name` or `kind` is missing or
    /// empty.
    pub fn build(self) -> Result<DeviceDraft, HearthError> {
        let draft = DeviceDraft {
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            is_on: self.is_on,
            room: self.room,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_draft_when_name_and_kind_provided() {
        let draft = DeviceDraft::builder()
            .name("Lamp")
            .kind("light")
            .build()
            .unwrap();
        assert_eq!(draft.name, "Lamp");
        assert_eq!(draft.kind, "light");
        assert!(!draft.is_on);
        assert!(draft.room.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = DeviceDraft::builder().kind("light").build();
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_kind_is_empty() {
        let result = DeviceDraft::builder().name("Lamp").build();
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::EmptyKind))
        ));
    }

    #[test]
    fn should_attach_id_when_building_from_draft() {
        let draft = DeviceDraft::builder()
            .name("Front Door")
            .kind("lock")
            .is_on(true)
            .room("Hallway")
            .build()
            .unwrap();

        let device = Device::from_draft(DeviceId::from_raw(7), draft);
        assert_eq!(device.id, DeviceId::from_raw(7));
        assert_eq!(device.name, "Front Door");
        assert!(device.is_on);
        assert_eq!(device.room.as_deref(), Some("Hallway"));
    }

    #[test]
    fn should_use_wire_names_for_kind_and_power_state() {
        let device = Device {
            id: DeviceId::from_raw(11),
            name: "Lamp".to_string(),
            kind: "light".to_string(),
            is_on: false,
            room: None,
        };

        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["id"], 11);
        assert_eq!(json["type"], "light");
        assert_eq!(json["isOn"], false);
        assert!(json["room"].is_null());
    }

    #[test]
    fn should_deserialize_draft_with_missing_optional_fields() {
        let draft: DeviceDraft =
            serde_json::from_str(r#"{"name":"Lamp","type":"light"}"#).unwrap();
        assert!(!draft.is_on);
        assert!(draft.room.is_none());
        assert!(draft.validate().is_ok());
    }
}
