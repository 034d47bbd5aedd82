//! Form chi tiết đơn hàng theo chuẩn MVVM:
//! - view_model.rs: trạng thái form, sổ dòng món / dòng thanh toán và
//!   đường ống tính tiền
//! - page.rs: khung trang, header với nút thao tác, thanh tab
//! - tabs/: nội dung từng tab

mod page;
mod tabs;
mod view_model;

pub use page::OrderDetails;
pub use view_model::OrderDetailsVm;
