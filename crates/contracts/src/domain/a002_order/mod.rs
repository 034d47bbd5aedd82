pub mod aggregate;
pub mod reconcile;

pub use aggregate::{
    Order, OrderDto, OrderId, OrderItemLine, OrderItemLineDto, OrderStatus, OrderType,
    PaymentLine, PaymentLineDto, PaymentMethod, PaymentStatus,
};
