pub mod mock_connection;
pub mod signal_helpers;
pub mod test_server;

pub use mock_connection::*;
pub use signal_helpers::*;
pub use test_client::*;
pub use test_server::*;
