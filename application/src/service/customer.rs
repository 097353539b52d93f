use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CreditQuery, CustomerQuery, DependOnCreditQuery, DependOnCustomerQuery,
};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId, NewCustomer};
use kernel::KernelError;

use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};
use crate::validation::{ensure_valid, validate_create_customer, validate_update_customer};

pub(crate) async fn require_customer<Q: CustomerQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    id: &CustomerId,
) -> error_stack::Result<Customer, KernelError> {
    query.find_by_id(con, id).await?.ok_or_else(|| {
        Report::new(KernelError::NotFound).attach_printable(format!("Id {} not found", id.as_ref()))
    })
}

#[async_trait::async_trait]
pub trait CreateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        if let Err(report) = ensure_valid(validate_create_customer(&dto)) {
            tracing::debug!("Rejected customer: {report:?}");
            return Err(report);
        }
        let mut connection = self.database_connection().transact().await?;

        let customer = NewCustomer::from(dto);
        let duplicated = self
            .customer_query()
            .find_by_national_id(&mut connection, customer.national_id())
            .await?;
        if duplicated.is_some() {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Customer with national id {} already exists",
                customer.national_id().as_ref()
            )));
        }

        let customer = self
            .customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        tracing::info!("Created customer {}", customer.id().as_ref());
        Ok(CustomerDto::from(customer))
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let customer = require_customer(self.customer_query(), &mut connection, &id).await?;
        connection.commit().await?;

        Ok(CustomerDto::from(customer))
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn update_customer(
        &self,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        ensure_valid(validate_update_customer(&dto))?;
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let customer = require_customer(self.customer_query(), &mut connection, &id).await?;
        let customer = dto.apply(customer);
        self.customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        tracing::info!("Updated customer {}", id.as_ref());
        Ok(CustomerDto::from(customer))
    }
}

impl<T> UpdateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

/// Customers that still own credits are not deleted; the request fails with
/// [`KernelError::Conflict`] instead.
#[async_trait::async_trait]
pub trait DeleteCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier + DependOnCreditQuery
{
    async fn delete_customer(
        &self,
        dto: DeleteCustomerDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        require_customer(self.customer_query(), &mut connection, &id).await?;
        let credits = self
            .credit_query()
            .find_by_customer_id(&mut connection, &id)
            .await?;
        if !credits.is_empty() {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Customer {} still owns {} credit(s)",
                id.as_ref(),
                credits.len()
            )));
        }

        self.customer_modifier()
            .delete(&mut connection, &id)
            .await?;
        connection.commit().await?;

        tracing::info!("Deleted customer {}", id.as_ref());
        Ok(())
    }
}

impl<T> DeleteCustomerService for T where
    T: DependOnCustomerQuery + DependOnCustomerModifier + DependOnCreditQuery
{
}
