use super::EntityMetadata;

/// Trait cho gốc aggregate
///
/// Mỗi aggregate của hệ thống khai báo các accessor dữ liệu
/// và metadata tĩnh (tên bảng, tên hiển thị trên UI).
pub trait AggregateRoot {
    /// Kiểu định danh của aggregate
    type Id;

    // ============================================================================
    // Accessor dữ liệu của bản ghi
    // ============================================================================

    /// ID bản ghi
    fn id(&self) -> Self::Id;

    /// Mã nghiệp vụ (ví dụ "ORD-2025-001")
    fn code(&self) -> &str;

    /// Mô tả / tên hiển thị
    fn description(&self) -> &str;

    /// Metadata vòng đời
    fn metadata(&self) -> &EntityMetadata;

    /// Metadata vòng đời (mutable)
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Metadata tĩnh của loại aggregate
    // ============================================================================

    /// Chỉ số aggregate trong hệ thống (ví dụ "a001")
    fn aggregate_index() -> &'static str;

    /// Tên collection trong DB (ví dụ "menu_item")
    fn collection_name() -> &'static str;

    /// Tên phần tử cho UI (số ít, ví dụ "Món")
    fn element_name() -> &'static str;

    /// Tên danh sách cho UI (số nhiều, ví dụ "Thực đơn")
    fn list_name() -> &'static str;
}
