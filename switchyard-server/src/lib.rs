mod config;
mod error;
mod hub;
mod registry;
mod routing;
mod server;
mod signaling;


pub use config::*;
pub use error::*;
pub use hub::*;
pub use registry::*;
pub use routing::*;
pub use server::*;
pub use signaling::*;
