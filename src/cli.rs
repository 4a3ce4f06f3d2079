use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::{Error, Result};
use crate::request::NotificationRequest;

#[derive(Parser, Debug)]
#[command(name = "bugme")]
#[command(about = "Show a desktop balloon notification and exit once it goes away")]
#[command(version)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Notification body text (up to 255 characters)
    #[arg(allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Notification title (up to 63 characters)
    #[arg(allow_hyphen_values = true)]
    pub title: Option<String>,

    /// Anything after the title is accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    pub fn into_request(self) -> Result<NotificationRequest> {
        if !self.rest.is_empty() {
            tracing::debug!(ignored = self.rest.len(), "Ignoring extra arguments");
        }
        NotificationRequest::new(self.message, self.title)
    }
}

/// What the command line asks for
#[derive(Debug)]
pub enum Invocation {
    Notify(Cli),
    Help(String),
    Version(String),
}

/// Parse the command line. Help and version flags count only when they are
/// the sole argument; anywhere else they are notification text or ignored.
pub fn parse_from<I, T>(args: I) -> std::result::Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if let [_, flag] = args.as_slice() {
        let mut command = Cli::command();
        match flag.to_str() {
            Some("-h" | "--help") => return Ok(Invocation::Help(command.render_help().to_string())),
            Some("-V" | "--version") => return Ok(Invocation::Version(command.render_version())),
            _ => {}
        }
    }
    Cli::try_parse_from(args).map(Invocation::Notify)
}

/// Classify a parse failure that is not a help or version request
pub fn parse_error(err: &clap::Error) -> Error {
    match err.kind() {
        ErrorKind::InvalidUtf8 => Error::ArgumentListUnavailable,
        _ => Error::Usage(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_API_ERROR, EXIT_UNKNOWN_ERROR, EXIT_USAGE_ERROR};

    fn resolve(args: &[&str]) -> Result<NotificationRequest> {
        let argv = std::iter::once("bugme").chain(args.iter().copied());
        match parse_from(argv).unwrap() {
            Invocation::Notify(cli) => cli.into_request(),
            other => panic!("expected a notification, got {other:?}"),
        }
    }

    fn invocation(args: &[&str]) -> Invocation {
        parse_from(std::iter::once("bugme").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let request = resolve(&[]).unwrap();
        assert_eq!(request.message.as_str(), "You've been bugged!");
        assert_eq!(request.title.as_str(), "Bugme!");
    }

    #[test]
    fn test_message_only() {
        let request = resolve(&["Build finished"]).unwrap();
        assert_eq!(request.message.as_str(), "Build finished");
        assert_eq!(request.title.as_str(), "Bugme!");
    }

    #[test]
    fn test_message_and_title() {
        let request = resolve(&["Build finished", "CI"]).unwrap();
        assert_eq!(request.message.as_str(), "Build finished");
        assert_eq!(request.title.as_str(), "CI");
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let request = resolve(&["Build finished", "CI", "extra", "more"]).unwrap();
        assert_eq!(request.message.as_str(), "Build finished");
        assert_eq!(request.title.as_str(), "CI");
    }

    #[test]
    fn test_long_message_is_api_error() {
        let message = "x".repeat(260);
        let err = resolve(&[&message]).unwrap_err();
        assert!(matches!(err, Error::ArgumentTooLong { .. }));
        assert_eq!(err.exit_code(), EXIT_API_ERROR);
    }

    #[test]
    fn test_long_title_is_api_error() {
        let title = "t".repeat(64);
        let err = resolve(&["Build finished", &title]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_API_ERROR);
    }

    #[test]
    fn test_parse_error_classification() {
        let invalid = clap::Error::new(ErrorKind::InvalidUtf8);
        assert!(matches!(parse_error(&invalid), Error::ArgumentListUnavailable));
        assert_eq!(parse_error(&invalid).exit_code(), EXIT_UNKNOWN_ERROR);

        let usage = clap::Error::new(ErrorKind::UnknownArgument);
        assert_eq!(parse_error(&usage).exit_code(), EXIT_USAGE_ERROR);
    }

    #[test]
    fn test_lone_help_and_version_flags() {
        for flag in ["-h", "--help"] {
            match invocation(&[flag]) {
                Invocation::Help(text) => assert!(text.contains("MESSAGE")),
                other => panic!("expected help, got {other:?}"),
            }
        }
        for flag in ["-V", "--version"] {
            match invocation(&[flag]) {
                Invocation::Version(text) => assert!(text.contains("bugme")),
                other => panic!("expected version, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_help_flag_after_title_is_ignored() {
        for flag in ["--help", "-h", "-V", "--version"] {
            let request = resolve(&["msg", "title", flag]).unwrap();
            assert_eq!(request.message.as_str(), "msg");
            assert_eq!(request.title.as_str(), "title");
        }
    }

    #[test]
    fn test_help_flag_as_title_is_text() {
        let request = resolve(&["msg", "-h"]).unwrap();
        assert_eq!(request.message.as_str(), "msg");
        assert_eq!(request.title.as_str(), "-h");

        let request = resolve(&["msg", "--version"]).unwrap();
        assert_eq!(request.title.as_str(), "--version");
    }
}
