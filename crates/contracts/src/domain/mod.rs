pub mod common;

pub mod a001_menu_item;
pub mod a002_order;
