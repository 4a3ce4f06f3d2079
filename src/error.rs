//! Failure taxonomy and the process exit codes each failure maps to

use std::io;

use thiserror::Error;

/// Normal termination: the notification was dismissed, timed out or clicked
pub const EXIT_OK: i32 = 0;
/// Malformed invocation
pub const EXIT_USAGE_ERROR: i32 = 1;
/// A platform call or bounded string copy failed
pub const EXIT_API_ERROR: i32 = 2;
/// The argument list or the event queue itself is unusable
pub const EXIT_UNKNOWN_ERROR: i32 = 9;

/// Which piece of notification text a length error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Message,
    Title,
    Tooltip,
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TextField::Message => "message",
            TextField::Title => "title",
            TextField::Tooltip => "tooltip",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{field} is {len} characters long, the limit is {limit}")]
    ArgumentTooLong {
        field: TextField,
        limit: usize,
        len: usize,
    },

    #[error("invalid invocation: {0}")]
    Usage(String),

    #[error("the command line could not be read as text")]
    ArgumentListUnavailable,

    #[error("failed to register the notification window")]
    PlatformRegistrationFailed(#[source] io::Error),

    #[error("failed to create the status-area icon")]
    PlatformIconCreateFailed(#[source] io::Error),

    #[error("failed to publish the notification")]
    PlatformPublishFailed(#[source] io::Error),

    #[error("event retrieval failed")]
    EventQueueFailure(#[source] io::Error),
}

impl Error {
    /// Process exit status reported for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => EXIT_USAGE_ERROR,
            Error::ArgumentTooLong { .. }
            | Error::PlatformRegistrationFailed(_)
            | Error::PlatformIconCreateFailed(_)
            | Error::PlatformPublishFailed(_) => EXIT_API_ERROR,
            Error::ArgumentListUnavailable | Error::EventQueueFailure(_) => EXIT_UNKNOWN_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let too_long = Error::ArgumentTooLong {
            field: TextField::Message,
            limit: 255,
            len: 260,
        };
        assert_eq!(too_long.exit_code(), EXIT_API_ERROR);
        assert_eq!(Error::Usage("x".into()).exit_code(), EXIT_USAGE_ERROR);
        assert_eq!(Error::ArgumentListUnavailable.exit_code(), EXIT_UNKNOWN_ERROR);
        assert_eq!(
            Error::PlatformRegistrationFailed(io::Error::other("x")).exit_code(),
            EXIT_API_ERROR
        );
        assert_eq!(
            Error::PlatformIconCreateFailed(io::Error::other("x")).exit_code(),
            EXIT_API_ERROR
        );
        assert_eq!(
            Error::PlatformPublishFailed(io::Error::other("x")).exit_code(),
            EXIT_API_ERROR
        );
        assert_eq!(
            Error::EventQueueFailure(io::Error::other("x")).exit_code(),
            EXIT_UNKNOWN_ERROR
        );
    }

    #[test]
    fn test_too_long_message_text() {
        let err = Error::ArgumentTooLong {
            field: TextField::Title,
            limit: 63,
            len: 70,
        };
        assert_eq!(err.to_string(), "title is 70 characters long, the limit is 63");
    }
}
