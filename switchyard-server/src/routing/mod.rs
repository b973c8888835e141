mod connection;
mod signal_router;

pub use connection::*;
pub use signal_router::*;
