use core::fmt;

/// Startup failures that leave the game unplayable
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    NoWindow,
    NoDocument,
    MissingElement { id: &'static str },
    NotACanvas { id: &'static str },
    NoContext2d,
    Logger(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingElement { id } => write!(f, "missing element #{id}"),
            Self::NotACanvas { id } => write!(f, "element #{id} is not a canvas"),
            Self::NoContext2d => write!(f, "canvas has no 2d context"),
            Self::Logger(msg) => write!(f, "logger init failed: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}
