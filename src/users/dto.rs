use serde::Deserialize;
use uuid::Uuid;

/// Request body for create and update. Everything is optional on the wire;
/// the validator decides what is actually required.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
