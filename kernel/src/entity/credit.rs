mod code;
mod first_installment;
mod id;
mod installments;
mod status;
mod value;

pub use self::{code::*, first_installment::*, id::*, installments::*, status::*, value::*};
use crate::entity::CustomerId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Credit {
    id: CreditId,
    code: CreditCode,
    value: CreditValue,
    installments: CreditInstallments,
    first_installment: FirstInstallment,
    status: CreditStatus,
    customer_id: CustomerId,
}

impl Credit {
    pub fn new(
        id: CreditId,
        code: CreditCode,
        value: CreditValue,
        installments: CreditInstallments,
        first_installment: FirstInstallment,
        status: CreditStatus,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            id,
            code,
            value,
            installments,
            first_installment,
            status,
            customer_id,
        }
    }

    pub fn is_owned_by(&self, customer_id: &CustomerId) -> bool {
        self.customer_id == *customer_id
    }
}

/// A credit that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewCredit {
    code: CreditCode,
    value: CreditValue,
    installments: CreditInstallments,
    first_installment: FirstInstallment,
    status: CreditStatus,
    customer_id: CustomerId,
}

impl NewCredit {
    pub fn new(
        code: CreditCode,
        value: CreditValue,
        installments: CreditInstallments,
        first_installment: FirstInstallment,
        status: CreditStatus,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            code,
            value,
            installments,
            first_installment,
            status,
            customer_id,
        }
    }

    pub fn into_credit(self, id: CreditId) -> Credit {
        Credit::new(
            id,
            self.code,
            self.value,
            self.installments,
            self.first_installment,
            self.status,
            self.customer_id,
        )
    }
}
