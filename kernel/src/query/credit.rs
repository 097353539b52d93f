use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Credit, CreditCode, CustomerId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CreditQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_code(
        &self,
        con: &mut Self::Transaction,
        code: &CreditCode,
    ) -> error_stack::Result<Option<Credit>, KernelError>;
    /// Credits owned by `customer_id`, oldest first.
    async fn find_by_customer_id(
        &self,
        con: &mut Self::Transaction,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Vec<Credit>, KernelError>;
}

pub trait DependOnCreditQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CreditQuery: CreditQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn credit_query(&self) -> &Self::CreditQuery;
}
