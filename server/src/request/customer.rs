use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    first_name: String,
    last_name: String,
    national_id: String,
    income: Decimal,
    email: String,
    password: String,
    zip_code: String,
    street: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    income: Option<Decimal>,
    zip_code: Option<String>,
    street: Option<String>,
}

pub struct CustomerTransformer;

impl Intake<CreateCustomerRequest> for CustomerTransformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CreateCustomerRequest) -> Self::To {
        CreateCustomerDto {
            first_name: input.first_name,
            last_name: input.last_name,
            national_id: input.national_id,
            income: input.income,
            email: input.email,
            password: input.password,
            zip_code: input.zip_code,
            street: input.street,
        }
    }
}

impl Intake<(i64, UpdateCustomerRequest)> for CustomerTransformer {
    type To = UpdateCustomerDto;
    fn emit(&self, (id, input): (i64, UpdateCustomerRequest)) -> Self::To {
        UpdateCustomerDto {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            income: input.income,
            zip_code: input.zip_code,
            street: input.street,
        }
    }
}

pub struct GetCustomerTransformer;

impl Intake<i64> for GetCustomerTransformer {
    type To = GetCustomerDto;
    fn emit(&self, id: i64) -> Self::To {
        GetCustomerDto { id }
    }
}

pub struct DeleteCustomerTransformer;

impl Intake<i64> for DeleteCustomerTransformer {
    type To = DeleteCustomerDto;
    fn emit(&self, id: i64) -> Self::To {
        DeleteCustomerDto { id }
    }
}
