pub mod server;
pub mod widget;
