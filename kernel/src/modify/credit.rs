use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Credit, NewCredit};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CreditModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        credit: &NewCredit,
    ) -> error_stack::Result<Credit, KernelError>;
}

pub trait DependOnCreditModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CreditModifier: CreditModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn credit_modifier(&self) -> &Self::CreditModifier;
}
