use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::{KernelError, Violation};
use serde::Serialize;
use std::process::{ExitCode, Termination};
use time::OffsetDateTime;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    title: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    status: u16,
    exception: &'static str,
    details: Vec<String>,
}

static BAD_REQUEST: &str = "Bad Request! Refer to documentation";

impl ErrorStatus {
    fn classify(&self) -> (StatusCode, &'static str, &'static str) {
        match self.0.current_context() {
            KernelError::Validation => (StatusCode::BAD_REQUEST, BAD_REQUEST, "ValidationError"),
            KernelError::Conflict => (
                StatusCode::CONFLICT,
                "Conflict detected! Refer to documentation",
                "ConflictError",
            ),
            KernelError::NotFound => (StatusCode::BAD_REQUEST, BAD_REQUEST, "NotFoundError"),
            KernelError::BusinessRule => {
                (StatusCode::BAD_REQUEST, BAD_REQUEST, "BusinessRuleError")
            }
            KernelError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden! Refer to documentation",
                "AuthorizationError",
            ),
            KernelError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out",
                "TimeoutError",
            ),
            KernelError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "InternalError",
            ),
        }
    }

    /// Violations and printable messages in the order they were attached.
    /// Falls back to the error kind so the list is never empty.
    fn details(&self) -> Vec<String> {
        let mut details = self
            .0
            .frames()
            .filter_map(|frame| {
                frame
                    .downcast_ref::<Violation>()
                    .map(ToString::to_string)
                    .or_else(|| frame.downcast_ref::<String>().cloned())
            })
            .collect::<Vec<_>>();
        details.reverse();
        if details.is_empty() {
            details.push(self.0.current_context().to_string());
        }
        details
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let (status, title, exception) = self.classify();
        let details = if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            vec![self.0.current_context().to_string()]
        } else {
            tracing::debug!("{:?}", self.0);
            self.details()
        };
        let body = ErrorResponse {
            title,
            timestamp: OffsetDateTime::now_utc(),
            status: status.as_u16(),
            exception,
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::{KernelError, Violation};

    use super::ErrorStatus;

    #[test]
    fn details_keep_attachment_order() {
        let report = Report::new(KernelError::Validation)
            .attach_printable(Violation::new(
                "firstName",
                "not_blank",
                "Invalid input. Try again",
            ))
            .attach_printable(Violation::new(
                "street",
                "not_blank",
                "Invalid street input. Try again",
            ));
        let status = ErrorStatus::from(report);
        assert_eq!(
            status.details(),
            vec![
                "firstName: Invalid input. Try again".to_string(),
                "street: Invalid street input. Try again".to_string(),
            ]
        );
    }

    #[test]
    fn details_are_never_empty() {
        let status = ErrorStatus::from(Report::new(KernelError::Conflict));
        assert_eq!(status.details(), vec!["Conflicting resource".to_string()]);
    }

    #[test]
    fn maps_kinds_to_status_codes() {
        for (error, code) in [
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::NotFound, StatusCode::BAD_REQUEST),
            (KernelError::BusinessRule, StatusCode::BAD_REQUEST),
            (KernelError::Forbidden, StatusCode::FORBIDDEN),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let response = ErrorStatus::from(Report::new(error)).into_response();
            assert_eq!(response.status(), code);
        }
    }
}
