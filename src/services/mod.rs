pub mod api_client;
pub mod poll_timer;
pub mod board;
