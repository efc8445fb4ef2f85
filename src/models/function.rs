//! Function call payloads carried inside a [`Part`](super::Part).

use serde::{Deserialize, Serialize};

/// A function call made by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,

    /// The arguments to pass to the function.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub args: serde_json::Value,
}

/// A response to a function call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    /// The name of the function that was called.
    pub name: String,

    /// The response from the function.
    #[serde(default)]
    pub response: serde_json::Value,
}
