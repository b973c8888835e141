mod lifecycle;
mod ws_connection;
mod ws_handler;

pub use lifecycle::*;
pub use ws_connection::*;
pub use ws_handler::*;
