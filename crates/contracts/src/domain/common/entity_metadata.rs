use serde::{Deserialize, Serialize};

/// Metadata vòng đời của một bản ghi (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Ngày tạo bản ghi
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Ngày cập nhật cuối
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Xóa mềm (soft delete)
    pub is_deleted: bool,
    /// Version cho optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Metadata cho bản ghi mới
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            version: 0,
        }
    }

    /// Cập nhật timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Tăng version
    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
