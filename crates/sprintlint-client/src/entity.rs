//! A thin typed view over the backend's JSON entity representation.
//!
//! The core is agnostic to entity shape; these accessors exist for the
//! checks, which read a handful of well-known fields. Reference fields
//! (`Owner`, `User`) carry the referenced object's display name inline as
//! `_refObjectName`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    value: Value,
}

impl Entity {
    pub fn new(value: Value) -> Self {
        Entity { value }
    }

    /// Raw access to any field of the backend record.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.value.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn num_field(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(Value::as_f64)
    }

    /// Human-readable identifier, e.g. `US1234`.
    pub fn formatted_id(&self) -> Option<&str> {
        self.str_field("FormattedID")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("Name")
    }

    fn ref_object_name(&self, field: &str) -> Option<&str> {
        self.field(field)?.get("_refObjectName")?.as_str()
    }

    /// Display name of the owning user, if the artifact has an owner.
    pub fn owner_name(&self) -> Option<&str> {
        self.ref_object_name("Owner")
    }

    /// Display name of the referenced user on capacity records.
    pub fn user_name(&self) -> Option<&str> {
        self.ref_object_name("User")
    }

    pub fn plan_estimate(&self) -> Option<f64> {
        self.num_field("PlanEstimate")
    }

    pub fn capacity(&self) -> Option<f64> {
        self.num_field("Capacity")
    }

    pub fn task_estimates(&self) -> Option<f64> {
        self.num_field("TaskEstimates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_backend_shapes() {
        let e = Entity::new(json!({
            "FormattedID": "US42",
            "Name": "A story about Jack and Diane",
            "Owner": { "_ref": "/user/7", "_refObjectName": "Diane" },
            "PlanEstimate": 5.0,
        }));
        assert_eq!(e.formatted_id(), Some("US42"));
        assert_eq!(e.name(), Some("A story about Jack and Diane"));
        assert_eq!(e.owner_name(), Some("Diane"));
        assert_eq!(e.plan_estimate(), Some(5.0));
        assert_eq!(e.capacity(), None);
    }

    #[test]
    fn missing_or_null_fields_read_as_none() {
        let e = Entity::new(json!({ "Owner": null, "PlanEstimate": null }));
        assert_eq!(e.owner_name(), None);
        assert_eq!(e.plan_estimate(), None);
        assert_eq!(e.formatted_id(), None);
    }
}
