mod address;
mod email;
mod id;
mod income;
mod name;
mod national_id;
mod password;

pub use self::{address::*, email::*, id::*, income::*, name::*, national_id::*, password::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Customer {
    id: CustomerId,
    first_name: CustomerFirstName,
    last_name: CustomerLastName,
    national_id: CustomerNationalId,
    income: CustomerIncome,
    email: CustomerEmail,
    password: CustomerPassword,
    address: Address,
}

impl Customer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CustomerId,
        first_name: CustomerFirstName,
        last_name: CustomerLastName,
        national_id: CustomerNationalId,
        income: CustomerIncome,
        email: CustomerEmail,
        password: CustomerPassword,
        address: Address,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            national_id,
            income,
            email,
            password,
            address,
        }
    }
}

/// A customer that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewCustomer {
    first_name: CustomerFirstName,
    last_name: CustomerLastName,
    national_id: CustomerNationalId,
    income: CustomerIncome,
    email: CustomerEmail,
    password: CustomerPassword,
    address: Address,
}

impl NewCustomer {
    pub fn new(
        first_name: CustomerFirstName,
        last_name: CustomerLastName,
        national_id: CustomerNationalId,
        income: CustomerIncome,
        email: CustomerEmail,
        password: CustomerPassword,
        address: Address,
    ) -> Self {
        Self {
            first_name,
            last_name,
            national_id,
            income,
            email,
            password,
            address,
        }
    }

    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer::new(
            id,
            self.first_name,
            self.last_name,
            self.national_id,
            self.income,
            self.email,
            self.password,
            self.address,
        )
    }
}
