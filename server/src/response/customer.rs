use application::transfer::CustomerDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    id: i64,
    first_name: String,
    last_name: String,
    national_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    income: Decimal,
    email: String,
    zip_code: String,
    street: String,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(dto: CustomerDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            national_id: dto.national_id,
            income: dto.income,
            email: dto.email,
            zip_code: dto.zip_code,
            street: dto.street,
        }
    }
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct CreatedCustomerResponse(CustomerResponse);

impl IntoResponse for CreatedCustomerResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct CustomerPresenter;

impl Exhaust<CustomerDto> for CustomerPresenter {
    type To = CustomerResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CustomerResponse::from(input)
    }
}

pub struct CreatedCustomerPresenter;

impl Exhaust<CustomerDto> for CreatedCustomerPresenter {
    type To = CreatedCustomerResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CreatedCustomerResponse(CustomerResponse::from(input))
    }
}

pub struct DeletedCustomerPresenter;

impl Exhaust<()> for DeletedCustomerPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
