pub mod order_list;
pub mod freight_lookup;

pub use order_list::{OrderListController, OrderListView, RefreshOutcome, RefreshTicket};
pub use freight_lookup::{FreightLookupController, FreightView, LookupOutcome, LookupTicket};
