use std::ops::Deref;
use std::sync::Arc;

use application::service::{
    CreateCreditService, CreateCustomerService, DeleteCustomerService, GetCreditService,
    GetCreditsService, GetCustomerService, UpdateCustomerService,
};
use driver::database::PostgresDatabase;
use kernel::KernelError;

/// Every workflow the HTTP surface exposes.
pub trait Services:
    CreateCustomerService
    + GetCustomerService
    + UpdateCustomerService
    + DeleteCustomerService
    + CreateCreditService
    + GetCreditsService
    + GetCreditService
{
}

impl<T> Services for T where
    T: CreateCustomerService
        + GetCustomerService
        + UpdateCustomerService
        + DeleteCustomerService
        + CreateCreditService
        + GetCreditsService
        + GetCreditService
{
}

pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule<PostgresDatabase> {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with_database(PostgresDatabase::new().await?))
    }
}

impl<D> AppModule<D> {
    pub fn with_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}
