use std::{error::Error, fmt, io};

/// The result type of the rule learner.
pub type Result<T> = std::result::Result<T, RpsErr>;

/// Every failure that aborts a run.
#[derive(Debug)]
pub enum RpsErr {
    /// The topology can't describe a network for this game.
    InvalidTopology(String),
    /// The network predicted a vector of the wrong width.
    OutputMismatch { got: usize, expected: usize },
    /// The run configuration is unusable.
    Config(String),
    /// The network engine failed.
    Network(Box<dyn Error + Send + Sync>),
    /// Opening, creating or flushing the model file failed.
    Io(io::Error),
}

impl RpsErr {
    pub fn network<E>(e: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Network(Box::new(e))
    }
}

impl fmt::Display for RpsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            Self::OutputMismatch { got, expected } => {
                write!(f, "expected {expected} outputs, got {got}")
            }
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for RpsErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(e) => Some(e.as_ref()),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RpsErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
