//! Các tab của form đơn hàng

mod general;
mod items;
mod payments;

pub use general::GeneralTab;
pub use items::ItemsTab;
pub use payments::PaymentsTab;
