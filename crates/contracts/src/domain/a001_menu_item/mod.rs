pub mod aggregate;

pub use aggregate::{MenuItem, MenuItemDto, MenuItemId};
