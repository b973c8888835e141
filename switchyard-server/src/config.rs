use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// How peers find each other. The two modes are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayMode {
    /// Named rooms with join/leave fan-out.
    #[default]
    Rooms,
    /// Legacy room-less mode: peers that exchanged signaling messages are
    /// told about each other's disconnect.
    Contacts,
}

impl fmt::Display for RelayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayMode::Rooms => f.write_str("rooms"),
            RelayMode::Contacts => f.write_str("contacts"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown relay mode '{0}', expected 'rooms' or 'contacts'")]
pub struct ModeParseError(String);

impl FromStr for RelayMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rooms" => Ok(RelayMode::Rooms),
            "contacts" | "legacy" => Ok(RelayMode::Contacts),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: RelayMode,
    /// Directory served at `/` when set.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            mode: RelayMode::default(),
            static_dir: None,
        }
    }
}
