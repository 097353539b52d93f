use std::fmt::Display;
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::Pending => "PENDING",
            CreditStatus::Approved => "APPROVED",
            CreditStatus::Rejected => "REJECTED",
        }
    }
}

impl Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditStatus {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(CreditStatus::Pending),
            "APPROVED" => Ok(CreditStatus::Approved),
            "REJECTED" => Ok(CreditStatus::Rejected),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown credit status `{other}`"))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::CreditStatus;

    #[test]
    fn parses_stored_names() {
        for status in [
            CreditStatus::Pending,
            CreditStatus::Approved,
            CreditStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<CreditStatus>().ok(), Some(status));
        }
        assert!("IN_PROGRESS".parse::<CreditStatus>().is_err());
    }
}
