use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use ndarray::ShapeError;
use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidTopology(String),
    InvalidLearningRate(f32),
    NonFiniteLoss,
    Shape(ShapeError),
    Init(UniformError),
    UnsupportedVersion {
        got: u32,
        expected: u32,
    },
    Io(io::Error),
    Format(serde_json::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::InvalidTopology(msg) => format!("Invalid topology: {msg}"),
            MlErr::InvalidLearningRate(lr) => {
                format!("The learning rate must be positive and finite, got {lr}")
            }
            MlErr::NonFiniteLoss => "The loss diverged to a non finite value".to_string(),
            MlErr::Shape(e) => format!("Failed to view parameters: {e}"),
            MlErr::Init(e) => format!("Failed to initialize parameters: {e}"),
            MlErr::UnsupportedVersion { got, expected } => {
                format!("Unsupported snapshot version {got}, expected {expected}")
            }
            MlErr::Io(e) => format!("io error: {e}"),
            MlErr::Format(e) => format!("Malformed snapshot: {e}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::Init(e) => Some(e),
            MlErr::Io(e) => Some(e),
            MlErr::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::Init(value)
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        if value.is_io() {
            return Self::Io(value.into());
        }

        Self::Format(value)
    }
}
