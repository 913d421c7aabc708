use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GITHUB_TOKEN is not set")]
    MissingToken,

    #[error("invalid repository `{0}`, expected `owner/name`")]
    InvalidRepository(String),

    #[error("invalid page size {0}, expected a value between 1 and 100")]
    InvalidPageSize(u8),

    #[error("cannot assign permission `{0}`")]
    UnassignablePermission(crate::Permission),

    #[error("failed to reach the GitHub API: {0}")]
    Transport(String),

    #[error("GitHub API rejected the request{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Protocol {
        status: Option<u16>,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl Error {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Error::Protocol {
                status: None,
                message: source.message,
            },
            octocrab::Error::Serde { source, .. } => Error::Decode(source.to_string()),
            octocrab::Error::Json { source, .. } => Error::Decode(source.to_string()),
            octocrab::Error::Service { source, .. } => Error::Transport(chain(&*source)),
            octocrab::Error::Hyper { source, .. } => Error::Transport(chain(&source)),
            octocrab::Error::Http { source, .. } => Error::Transport(chain(&source)),
            other => Error::Transport(without_backtrace(&other.to_string()).to_string()),
        }
    }
}

/// `err` and its causes on one line.
fn chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// octocrab appends "Found at <backtrace>" to most of its messages.
fn without_backtrace(message: &str) -> &str {
    message
        .split_once("\nFound at")
        .or_else(|| message.split_once("\n\n"))
        .map_or(message, |(head, _)| head)
        .trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_transient() {
        assert!(Error::Transport("connection reset".into()).is_transient());
        assert!(!Error::MissingToken.is_transient());
        assert!(!Error::Decode("expected an array".into()).is_transient());
        assert!(!Error::Protocol {
            status: Some(500),
            message: "Internal Server Error".into()
        }
        .is_transient());
    }

    #[test]
    fn backtraces_are_cut_from_messages() {
        assert_eq!(
            without_backtrace("Service Error: connection refused\n\nFound at    0: octocrab::execute\n    1: tokio::runtime"),
            "Service Error: connection refused"
        );
        assert_eq!(
            without_backtrace("Serde Error: expected value\nFound at    0: octocrab::page"),
            "Serde Error: expected value"
        );
        assert_eq!(without_backtrace("Uri parse error"), "Uri parse error");
    }

    #[test]
    fn causes_are_joined() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        assert_eq!(chain(&Wrapped(inner)), "error trying to connect: connection refused");
    }

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error trying to connect")
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn protocol_error_mentions_status() {
        let err = Error::Protocol {
            status: Some(404),
            message: "Not Found".into(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rejected the request (404): Not Found"
        );

        let err = Error::Protocol {
            status: None,
            message: "Bad credentials".into(),
        };
        assert_eq!(err.to_string(), "GitHub API rejected the request: Bad credentials");
    }
}
