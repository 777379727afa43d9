use std::fmt::{self, Display};

/// Errors surfaced at the crate boundary.
///
/// Move generation itself is total and never fails; errors arise only when
/// decoding an external position string or when a move handed to the
/// application layer does not fit the position it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A position string could not be decoded: wrong field count,
    /// unrecognized piece symbol, out-of-range square or counter.
    MalformedInput(String),
    /// A move was applied to a position it cannot have been generated
    /// from, e.g. a normal move whose start square is empty. Failing
    /// loudly here beats silently corrupting the occupancy masks.
    ContractViolation(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput(what) => write!(f, "malformed position input: {what}"),
            Self::ContractViolation(what) => write!(f, "move inconsistent with position: {what}"),
        }
    }
}

impl std::error::Error for Error {}
