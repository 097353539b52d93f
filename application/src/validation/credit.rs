use error_stack::{Report, ResultExt};
use time::{Date, Month};

use kernel::prelude::entity::CreditInstallments;
use kernel::{KernelError, Violation};

use crate::transfer::CreateCreditDto;
use crate::validation::{money, INVALID_INPUT};

static NOT_FUTURE_DATE: &str = "It must be a future date. Try again";
static INVALID_DATE: &str = "Invalid Date selected";

/// How far ahead the first installment may be scheduled.
pub const INSTALLMENT_WINDOW_MONTHS: u8 = 3;

pub fn validate_create_credit(dto: &CreateCreditDto, today: Date) -> Vec<Violation> {
    let mut violations = Vec::new();
    money(&mut violations, "creditValue", &dto.credit_value, INVALID_INPUT);
    if !(CreditInstallments::MIN..=CreditInstallments::MAX).contains(&dto.number_of_installments) {
        violations.push(Violation::new(
            "numberOfInstallments",
            "range",
            format!(
                "must be between {} and {}",
                CreditInstallments::MIN,
                CreditInstallments::MAX
            ),
        ));
    }
    if dto.day_first_installment <= today {
        violations.push(Violation::new(
            "dayFirstInstallment",
            "future",
            NOT_FUTURE_DATE,
        ));
    }
    violations
}

/// The first installment must fall before `today` plus [`INSTALLMENT_WINDOW_MONTHS`].
pub fn ensure_installment_window(
    first_installment: Date,
    today: Date,
) -> error_stack::Result<(), KernelError> {
    let limit = add_months(today, INSTALLMENT_WINDOW_MONTHS)?;
    if first_installment < limit {
        return Ok(());
    }
    Err(Report::new(KernelError::BusinessRule)
        .attach_printable(INVALID_DATE.to_string())
        .attach_printable(format!(
            "First installment {first_installment} must be before {limit}"
        )))
}

/// Calendar month arithmetic; the day is clamped to the length of the target month.
fn add_months(date: Date, months: u8) -> error_stack::Result<Date, KernelError> {
    let zero_based = u32::from(u8::from(date.month())) - 1 + u32::from(months);
    let year = date.year() + (zero_based / 12) as i32;
    let month = Month::try_from((zero_based % 12 + 1) as u8)
        .change_context_lazy(|| KernelError::Internal)?;
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).change_context_lazy(|| KernelError::Internal)
}
