use serde::Serialize;

/// A routine owner. The token authenticates HTTP requests and is never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: String,
}
