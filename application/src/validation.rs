mod credit;
mod customer;

pub use self::{credit::*, customer::*};

use error_stack::Report;
use rust_decimal::Decimal;
use kernel::{KernelError, Violation};

pub(crate) static INVALID_INPUT: &str = "Invalid input. Try again";

/// Turns collected violations into a single [`KernelError::Validation`] report,
/// one attachment per violation.
pub fn ensure_valid(violations: Vec<Violation>) -> error_stack::Result<(), KernelError> {
    if violations.is_empty() {
        return Ok(());
    }
    let report = violations
        .into_iter()
        .fold(Report::new(KernelError::Validation), |report, violation| {
            report.attach_printable(violation)
        });
    Err(report)
}

pub(crate) fn not_blank(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: &str,
    message: &str,
) -> bool {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "not_blank", message));
        return false;
    }
    true
}

/// Amounts are kept with two decimal places and at most seventeen integer digits.
const MONEY_SCALE: u32 = 2;
const MONEY_INTEGER_DIGITS: u32 = 17;

pub(crate) fn money(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: &Decimal,
    message: &str,
) {
    if *value <= Decimal::ZERO {
        violations.push(Violation::new(field, "positive", message));
        return;
    }
    if value.normalize().scale() > MONEY_SCALE {
        violations.push(Violation::new(
            field,
            "scale",
            format!("At most {MONEY_SCALE} decimal places. Try again"),
        ));
    }
    if *value >= Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS)) {
        violations.push(Violation::new(
            field,
            "max",
            format!("Must be less than 10^{MONEY_INTEGER_DIGITS}. Try again"),
        ));
    }
}
