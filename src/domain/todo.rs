use serde::{Deserialize, Serialize};

/// Id the backend never assigns; marks a locally-created todo whose create
/// request has not completed yet.
pub const PLACEHOLDER_ID: i64 = 0;

/// A todo record as stored by the backend. Field names go over the wire in
/// camelCase (`userId`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
}

impl Todo {
    /// Local stand-in shown while the create round trip is in flight.
    pub fn placeholder(title: impl Into<String>, user_id: i64) -> Self {
        Self { id: PLACEHOLDER_ID, title: title.into(), completed: false, user_id }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

/// Create payload; the backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
}

/// Patch payload; omitted fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
