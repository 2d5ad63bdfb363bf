pub mod home_controller;
pub mod orders_controller;
pub mod freight_controller;
pub mod realtime_controller;
