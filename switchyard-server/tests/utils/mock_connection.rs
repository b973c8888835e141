use switchyard_server::{ConnectionHandle, SendError};

/// Connection that accepts and discards every frame.
pub struct NullConnection;

impl ConnectionHandle for NullConnection {
    fn send(&self, _frame: &str) -> Result<(), SendError> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }
}
