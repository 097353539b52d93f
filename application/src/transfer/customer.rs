use rust_decimal::Decimal;

use kernel::prelude::entity::{
    Address, Customer, CustomerEmail, CustomerFirstName, CustomerIncome, CustomerLastName,
    CustomerNationalId, CustomerPassword, DestructAddress, DestructCustomer, NewCustomer, Street,
    ZipCode,
};

use crate::validation::normalize_cpf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub income: Decimal,
    pub email: String,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            first_name,
            last_name,
            national_id,
            income,
            email,
            address,
            ..
        } = value.into_destruct();
        let DestructAddress { zip_code, street } = address.into_destruct();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            national_id: national_id.into(),
            income: income.into(),
            email: email.into(),
            zip_code: zip_code.into(),
            street: street.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCustomerDto {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub income: Decimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl From<CreateCustomerDto> for NewCustomer {
    fn from(value: CreateCustomerDto) -> Self {
        let national_id = normalize_cpf(&value.national_id).unwrap_or(value.national_id);
        NewCustomer::new(
            CustomerFirstName::new(value.first_name),
            CustomerLastName::new(value.last_name),
            CustomerNationalId::new(national_id),
            CustomerIncome::new(value.income),
            CustomerEmail::new(value.email),
            CustomerPassword::new(value.password),
            Address::new(ZipCode::new(value.zip_code), Street::new(value.street)),
        )
    }
}

/// Absent fields keep their stored value. National id, email and password are not updatable.
#[derive(Debug, Clone)]
pub struct UpdateCustomerDto {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub income: Option<Decimal>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

impl UpdateCustomerDto {
    pub(crate) fn apply(self, customer: Customer) -> Customer {
        let DestructCustomer {
            id,
            first_name,
            last_name,
            national_id,
            income,
            email,
            password,
            address,
        } = customer.into_destruct();
        let DestructAddress { zip_code, street } = address.into_destruct();
        Customer::new(
            id,
            self.first_name
                .map(CustomerFirstName::new)
                .unwrap_or(first_name),
            self.last_name.map(CustomerLastName::new).unwrap_or(last_name),
            national_id,
            self.income.map(CustomerIncome::new).unwrap_or(income),
            email,
            password,
            Address::new(
                self.zip_code.map(ZipCode::new).unwrap_or(zip_code),
                self.street.map(Street::new).unwrap_or(street),
            ),
        )
    }
}

pub struct GetCustomerDto {
    pub id: i64,
}

pub struct DeleteCustomerDto {
    pub id: i64,
}
