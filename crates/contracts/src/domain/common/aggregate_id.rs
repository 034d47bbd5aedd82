use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait cho các kiểu định danh aggregate
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Chuyển ID thành chuỗi
    fn as_string(&self) -> String;

    /// Tạo ID từ chuỗi
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s).map_err(|e| format!("Invalid UUID: {}", e))
    }
}
