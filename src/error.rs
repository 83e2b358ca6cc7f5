/// Possible model errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A tensor has a rank other than 1 or 3
    InvalidRank(usize),
    /// The profile fields (or the altitude grid) don't have matching shapes
    ShapeMismatch,
    /// The altitude step is zero, negative, or the grid is not increasing
    InvalidStep,
    /// The integration method name is not one of the supported rules
    UnknownMethod(String),
    /// An optional profile field is required by the operation but absent
    MissingField(&'static str),
    /// The worker thread pool could not be built
    ThreadPool(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRank(rank) => {
                write!(f, "expected a rank-1 or rank-3 tensor, got rank {rank}")
            }
            Error::ShapeMismatch => {
                write!(f, "profile fields must all have the same shape")
            }
            Error::InvalidStep => {
                write!(f, "altitude step must be positive and the grid increasing")
            }
            Error::UnknownMethod(name) => {
                write!(
                    f,
                    "unknown integration method {name:?}; use \"trapezoid\", \"simpson\" or \"boole\""
                )
            }
            Error::MissingField(name) => write!(f, "the {name} field is not set"),
            Error::ThreadPool(reason) => write!(f, "failed to build thread pool: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
