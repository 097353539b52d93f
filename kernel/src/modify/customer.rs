use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Customer, CustomerId, NewCustomer};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CustomerModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores the customer and returns it with its assigned id.
    /// A duplicated national id is reported as [`KernelError::Conflict`].
    async fn create(
        &self,
        con: &mut Self::Transaction,
        customer: &NewCustomer,
    ) -> error_stack::Result<Customer, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCustomerModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CustomerModifier: CustomerModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn customer_modifier(&self) -> &Self::CustomerModifier;
}
