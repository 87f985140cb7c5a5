//! Error types shared by every stage of the tempy pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TempyError>;

#[derive(Error, Debug)]
pub enum TempyError {
    #[error("No such path: '{}'", path.display())]
    ConfigPath { path: PathBuf },

    #[error("'location' not provided in tempyrc or as command line arg")]
    MissingLocation,

    #[error("Invalid units '{0}': expected 'imperial' or 'metric'")]
    InvalidUnits(String),

    #[error(
        "Rate limit exceeded. Try again in a few minutes.\n\
         If you feel the rate limit is too strict, create an issue at github.com/noprobelm/tempy"
    )]
    RateLimited,

    #[error("{message} (location: '{location}')")]
    Upstream { message: String, location: String },

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to access config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TempyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_mentions_message_and_location() {
        let err = TempyError::Upstream {
            message: "No matching location found.".into(),
            location: "zzz".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("No matching location found."));
        assert!(msg.contains("zzz"));
    }

    #[test]
    fn rate_limited_points_at_issue_tracker() {
        let msg = TempyError::RateLimited.to_string();
        assert!(msg.contains("Try again"));
        assert!(msg.contains("github.com/noprobelm/tempy"));
    }

    #[test]
    fn config_path_names_missing_directory() {
        let err = TempyError::ConfigPath { path: PathBuf::from("/nope/deeper") };
        assert_eq!(err.to_string(), "No such path: '/nope/deeper'");
    }
}
