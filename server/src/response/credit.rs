use application::transfer::{CreatedCreditDto, CreditDetailDto, CreditDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::CreditStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCreditResponse {
    credit_code: Uuid,
    customer_email: String,
    message: String,
}

impl IntoResponse for CreatedCreditResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummaryResponse {
    credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    credit_value: Decimal,
    number_of_installments: i32,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreditsResponse(Vec<CreditSummaryResponse>);

impl IntoResponse for CreditsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditResponse {
    credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    credit_value: Decimal,
    number_of_installment: i32,
    status: CreditStatus,
    email_customer: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    income_customer: Option<Decimal>,
}

impl IntoResponse for CreditResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct CreditPresenter;

impl Exhaust<CreatedCreditDto> for CreditPresenter {
    type To = CreatedCreditResponse;
    fn emit(&self, input: CreatedCreditDto) -> Self::To {
        CreatedCreditResponse {
            message: format!(
                "Credit {} - Customer {} saved!",
                input.credit_code, input.customer_email
            ),
            credit_code: input.credit_code,
            customer_email: input.customer_email,
        }
    }
}

impl Exhaust<Vec<CreditDto>> for CreditPresenter {
    type To = CreditsResponse;
    fn emit(&self, input: Vec<CreditDto>) -> Self::To {
        CreditsResponse(
            input
                .into_iter()
                .map(|credit| CreditSummaryResponse {
                    credit_code: credit.credit_code,
                    credit_value: credit.credit_value,
                    number_of_installments: credit.number_of_installments,
                })
                .collect(),
        )
    }
}

impl Exhaust<CreditDetailDto> for CreditPresenter {
    type To = CreditResponse;
    fn emit(&self, input: CreditDetailDto) -> Self::To {
        CreditResponse {
            credit_code: input.credit.credit_code,
            credit_value: input.credit.credit_value,
            number_of_installment: input.credit.number_of_installments,
            status: input.credit.status,
            email_customer: input.customer_email,
            income_customer: input.customer_income,
        }
    }
}
