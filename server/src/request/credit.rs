use application::transfer::{CreateCreditDto, GetCreditDto, GetCreditsDto};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    credit_value: Decimal,
    number_of_installments: i32,
    day_first_installment: Date,
    customer_id: i64,
}

pub struct CreditTransformer;

impl Intake<CreateCreditRequest> for CreditTransformer {
    type To = CreateCreditDto;
    fn emit(&self, input: CreateCreditRequest) -> Self::To {
        CreateCreditDto {
            credit_value: input.credit_value,
            number_of_installments: input.number_of_installments,
            day_first_installment: input.day_first_installment,
            customer_id: input.customer_id,
        }
    }
}

impl Intake<i64> for CreditTransformer {
    type To = GetCreditsDto;
    fn emit(&self, customer_id: i64) -> Self::To {
        GetCreditsDto { customer_id }
    }
}

impl Intake<(i64, Uuid)> for CreditTransformer {
    type To = GetCreditDto;
    fn emit(&self, (customer_id, credit_code): (i64, Uuid)) -> Self::To {
        GetCreditDto {
            customer_id,
            credit_code,
        }
    }
}
