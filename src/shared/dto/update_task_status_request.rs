use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::field::Field;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskStatusRequest {
    #[serde(default)]
    pub status: Field<Value>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}
