use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::field::Field;

/// Raw body of `POST /api/tasks`. Values stay untyped JSON until validation
/// checks their types and turns them into domain values.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Field<Value>,
    #[serde(default)]
    pub description: Field<Value>,
    #[serde(default)]
    pub priority: Field<Value>,
    #[serde(default)]
    pub due_date: Field<Value>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}
