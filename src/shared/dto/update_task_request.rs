use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::field::Field;

/// Raw body of `PUT /api/tasks/:id`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Field<Value>,
    #[serde(default)]
    pub description: Field<Value>,
    #[serde(default)]
    pub status: Field<Value>,
    #[serde(default)]
    pub priority: Field<Value>,
    #[serde(default)]
    pub due_date: Field<Value>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}
