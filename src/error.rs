//! Module that contains the error handling logic for this crate.

use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;

/// Convenience alias over the crate error type.
pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Debug)]
/// Enum with all possible network errors that could occur.
pub enum ErrorKind {
    /// A decode ran past the end of the supplied bytes, or a field held a value outside its domain.
    MalformedPacket(String),
    /// Wrapper around a std io error.
    IOError(IoError),
    /// The channel to the other processing stage has hung up.
    TransferDisconnected,
}

impl Display for ErrorKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedPacket(reason) => {
                write!(fmt, "Unable to decode packet: {}", reason)
            }
            ErrorKind::IOError(e) => write!(fmt, "An IO Error occurred. Reason: {:?}.", e),
            ErrorKind::TransferDisconnected => {
                write!(fmt, "The other side of the transfer channel has disconnected.")
            }
        }
    }
}

impl std::error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ErrorKind::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for ErrorKind {
    fn from(inner: IoError) -> Self {
        ErrorKind::IOError(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;

    #[test]
    fn able_to_format_error() {
        let err = ErrorKind::MalformedPacket(String::from("message index requires 3 bytes"));

        assert_eq!(
            format!("{}", err),
            "Unable to decode packet: message index requires 3 bytes"
        );
    }
}
