use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{Credit, CreditStatus, DestructCredit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditDto {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installments: i32,
    pub day_first_installment: Date,
    pub status: CreditStatus,
    pub customer_id: i64,
}

impl From<Credit> for CreditDto {
    fn from(credit: Credit) -> Self {
        let DestructCredit {
            code,
            value,
            installments,
            first_installment,
            status,
            customer_id,
            ..
        } = credit.into_destruct();
        Self {
            credit_code: code.into(),
            credit_value: value.into(),
            number_of_installments: installments.into(),
            day_first_installment: first_installment.into(),
            status,
            customer_id: customer_id.into(),
        }
    }
}

/// A credit together with the owner data shown on its detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditDetailDto {
    pub credit: CreditDto,
    pub customer_email: Option<String>,
    pub customer_income: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCreditDto {
    pub credit_code: Uuid,
    pub customer_email: String,
}

#[derive(Debug, Clone)]
pub struct CreateCreditDto {
    pub credit_value: Decimal,
    pub number_of_installments: i32,
    pub day_first_installment: Date,
    pub customer_id: i64,
}

pub struct GetCreditsDto {
    pub customer_id: i64,
}

pub struct GetCreditDto {
    pub customer_id: i64,
    pub credit_code: Uuid,
}
