//! KeySwitch Model
//!
//! The single catalog entity and its editable fields.

use serde::{Deserialize, Serialize};

/// A mechanical keyboard switch.
///
/// `id` is assigned by the store on create and is never part of the JSON
/// body; it travels in the request path or in the store's push response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySwitch {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(rename = "switchName", default)]
    pub name: String,
    #[serde(default)]
    pub switch_type: String,
    #[serde(rename = "company", default)]
    pub manufacturer: String,
    #[serde(default)]
    pub actuation_force: String,
    #[serde(rename = "switchTravel", default)]
    pub travel: String,
}

impl KeySwitch {
    /// Blank record awaiting creation
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn field(&self, field: SwitchField) -> &str {
        match field {
            SwitchField::Name => &self.name,
            SwitchField::Type => &self.switch_type,
            SwitchField::Manufacturer => &self.manufacturer,
            SwitchField::ActuationForce => &self.actuation_force,
            SwitchField::Travel => &self.travel,
        }
    }

    pub fn field_mut(&mut self, field: SwitchField) -> &mut String {
        match field {
            SwitchField::Name => &mut self.name,
            SwitchField::Type => &mut self.switch_type,
            SwitchField::Manufacturer => &mut self.manufacturer,
            SwitchField::ActuationForce => &mut self.actuation_force,
            SwitchField::Travel => &mut self.travel,
        }
    }

    /// True if any editable field contains `needle` (already lowercased)
    pub fn matches(&self, needle: &str) -> bool {
        if let Some(id) = &self.id {
            if id.to_lowercase().contains(needle) {
                return true;
            }
        }
        SwitchField::ALL
            .iter()
            .any(|f| self.field(*f).to_lowercase().contains(needle))
    }
}

/// Editable fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchField {
    Name,
    Type,
    Manufacturer,
    ActuationForce,
    Travel,
}

impl SwitchField {
    pub const ALL: [SwitchField; 5] = [
        SwitchField::Name,
        SwitchField::Type,
        SwitchField::Manufacturer,
        SwitchField::ActuationForce,
        SwitchField::Travel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Manufacturer => "Company",
            Self::ActuationForce => "Actuation Force",
            Self::Travel => "Travel",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiet_red() -> KeySwitch {
        KeySwitch {
            id: Some("-NabcXYZ".to_string()),
            name: "Quiet Red".to_string(),
            switch_type: "Linear Switch".to_string(),
            manufacturer: "Acme".to_string(),
            actuation_force: "45g".to_string(),
            travel: "2.0mm".to_string(),
        }
    }

    #[test]
    fn test_serialize_uses_wire_names_and_skips_id() {
        let value = serde_json::to_value(quiet_red()).unwrap();
        assert_eq!(
            value,
            json!({
                "switchName": "Quiet Red",
                "switchType": "Linear Switch",
                "company": "Acme",
                "actuationForce": "45g",
                "switchTravel": "2.0mm"
            })
        );
    }

    #[test]
    fn test_deserialize_missing_fields_default_to_empty() {
        let ks: KeySwitch = serde_json::from_value(json!({"switchName": "Brown"})).unwrap();
        assert_eq!(ks.name, "Brown");
        assert!(ks.switch_type.is_empty());
        assert!(ks.id.is_none());
    }

    #[test]
    fn test_embedded_id_is_ignored() {
        let ks: KeySwitch =
            serde_json::from_value(json!({"id": "sneaky", "switchName": "Blue"})).unwrap();
        assert!(ks.is_pending());
    }

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(SwitchField::Travel.next(), SwitchField::Name);
        assert_eq!(SwitchField::Name.previous(), SwitchField::Travel);
    }

    #[test]
    fn test_matches_is_case_insensitive_over_fields() {
        let ks = quiet_red();
        assert!(ks.matches("acme"));
        assert!(ks.matches("nabc"));
        assert!(!ks.matches("tactile"));
    }
}
