use reqwest::Error as ReqwestError;
use tracing::{Level, event, instrument};

/// Everything that can go wrong between the user and the trivia API.
///
/// Transport problems keep the underlying `reqwest` error, upstream
/// rejections keep the status and body snippet, and the two session
/// variants cover answers that do not fit the current quiz.
#[derive(Debug)]
pub enum Error {
    Network(ReqwestError),
    Timeout(ReqwestError),
    ClientError(UpstreamApiError),
    ServerError(UpstreamApiError),
    Decode(serde_json::Error),
    QuestionNotFound,
    InvalidAnswer,
    ParseError(std::num::ParseIntError),
}

/// Status and message of a non-success answer from the trivia API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamApiError {
    pub status: u16,
    pub message: String,
}

impl std::fmt::Display for UpstreamApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Status: {}, Message: {}", self.status, self.message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &*self {
            Error::Network(err) => write!(f, "Cannot reach the trivia API: {}", err),
            Error::Timeout(err) => write!(f, "Request to the trivia API timed out: {}", err),
            Error::ClientError(err) => write!(f, "External Client error: {}", err),
            Error::ServerError(err) => write!(f, "External Server error: {}", err),
            Error::Decode(err) => write!(f, "Cannot decode the trivia API answer: {}", err),
            Error::QuestionNotFound => write!(f, "Question not part of the current quiz"),
            Error::InvalidAnswer => write!(f, "Answer not among the listed options"),
            Error::ParseError(err) => write!(f, "Cannot parse parameter: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Network(err) | Error::Timeout(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::ParseError(err) => Some(err),
            _ => None,
        }
    }
}

/// Logs the error with its full detail and returns the one line the screen
/// shows to the user instead.
#[instrument]
pub fn report(err: &Error) -> String {
    match err {
        Error::Network(e) => {
            event!(Level::ERROR, "Network error: {}", e);
            "Could not reach the trivia service. Check your connection and retry.".to_string()
        }
        Error::Timeout(e) => {
            event!(Level::ERROR, "Request timed out: {}", e);
            "The trivia service took too long to answer. Retry in a moment.".to_string()
        }
        Error::ClientError(e) => {
            event!(Level::ERROR, "{}", e);
            "The trivia service rejected the request.".to_string()
        }
        Error::ServerError(e) => {
            event!(Level::ERROR, "{}", e);
            "The trivia service is having trouble. Retry in a moment.".to_string()
        }
        Error::Decode(e) => {
            event!(Level::ERROR, "Decode error: {}", e);
            "The trivia service sent an answer this app cannot read.".to_string()
        }
        Error::QuestionNotFound => {
            event!(Level::WARN, "answer submitted for a question outside the quiz");
            "That question is not part of the current quiz.".to_string()
        }
        Error::InvalidAnswer => {
            event!(Level::WARN, "answer submitted that is not a listed option");
            "That answer is not one of the listed options.".to_string()
        }
        Error::ParseError(e) => {
            event!(Level::ERROR, "Bad configuration value: {}", e);
            format!("Configuration value could not be parsed: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_displays_status_and_message() {
        let err = UpstreamApiError {
            status: 429,
            message: "too many requests".to_string(),
        };

        assert_eq!(err.to_string(), "Status: 429, Message: too many requests");
    }

    #[test]
    fn session_errors_display_without_inner_detail() {
        assert_eq!(
            Error::QuestionNotFound.to_string(),
            "Question not part of the current quiz"
        );
        assert_eq!(
            Error::InvalidAnswer.to_string(),
            "Answer not among the listed options"
        );
    }

    #[test]
    fn server_error_wraps_the_upstream_payload() {
        let err = Error::ServerError(UpstreamApiError {
            status: 500,
            message: "boom".to_string(),
        });

        assert_eq!(err.to_string(), "External Server error: Status: 500, Message: boom");
    }

    #[test]
    fn report_keeps_the_user_line_free_of_internals() {
        let line = report(&Error::ServerError(UpstreamApiError {
            status: 502,
            message: "<html>bad gateway</html>".to_string(),
        }));

        assert!(!line.contains("502"));
        assert!(!line.contains("html"));
    }
}
