use crate::signaling::ConnectionState;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("connection is closed")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("signaling hub is not running")]
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("connection cannot be opened from state {0:?}")]
    InvalidState(ConnectionState),

    #[error(transparent)]
    Hub(#[from] HubError),
}
