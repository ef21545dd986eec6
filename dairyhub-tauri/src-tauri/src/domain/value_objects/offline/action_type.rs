use serde::{Deserialize, Serialize};
use std::fmt;

/// オフラインアクションの種類（例: `CREATE`、`UPDATE`、`DELETE`）。
///
/// 値は自由形式の文字列タグで、既知の種類以外も受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OfflineActionType(String);

impl OfflineActionType {
    pub const CREATE: &'static str = "CREATE";
    pub const UPDATE: &'static str = "UPDATE";
    pub const DELETE: &'static str = "DELETE";

    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn create() -> Self {
        Self(Self::CREATE.to_string())
    }

    pub fn update() -> Self {
        Self(Self::UPDATE.to_string())
    }

    pub fn delete() -> Self {
        Self(Self::DELETE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Offline action type cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for OfflineActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OfflineActionType> for String {
    fn from(kind: OfflineActionType) -> Self {
        kind.0
    }
}

impl TryFrom<String> for OfflineActionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
