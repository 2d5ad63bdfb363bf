pub mod loose;
pub mod order;
pub mod freight;

pub use order::{LineItem, Order, OrdersResponse, RawLineItem, RawOrder};
pub use freight::{FreightResponse, RegionsResponse};
