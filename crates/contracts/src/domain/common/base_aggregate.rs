use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Phần gốc chung cho mọi aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Định danh bản ghi
    pub id: Id,
    /// Mã nghiệp vụ (ví dụ "ORD-2025-001", "MON-0042")
    pub code: String,
    /// Mô tả / tên hiển thị
    pub description: String,
    /// Ghi chú
    pub comment: Option<String>,
    /// Metadata vòng đời
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Tạo aggregate mới
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Tạo aggregate với metadata có sẵn (khi load từ DB)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    /// Cập nhật timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }

    /// Đặt ghi chú
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}
