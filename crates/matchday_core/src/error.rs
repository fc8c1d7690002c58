use thiserror::Error;

/// Fatal errors: the match is never started when one of these is returned.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid team count: expected 2, found {found}")]
    InvalidTeamCount { found: usize },

    #[error("Invalid match duration: half length must be 1..={max} minutes, got {half_length}")]
    InvalidDuration { half_length: u8, max: u8 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for MatchError {
    fn from(err: serde_yaml::Error) -> Self {
        MatchError::Config(err.to_string())
    }
}

/// Failure inside a single minute's resolution.
///
/// Never aborts a match: the scheduler logs it, records the minute as
/// degraded and moves on to the next minute.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    #[error("probability `{name}` is not a finite number ({value})")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("duel resolver failed: {0}")]
    Resolver(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        assert!(matches!(MatchError::from(err), MatchError::Deserialization(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = MatchError::InvalidTeamCount { found: 3 };
        assert_eq!(err.to_string(), "Invalid team count: expected 2, found 3");

        let err = ResolverError::InvalidProbability { name: "foul", value: f64::NAN };
        assert!(err.to_string().contains("foul"));
    }
}
