use rust_decimal::Decimal;
use sqlx::PgConnection;

use kernel::interface::query::CustomerQuery;
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{
    Address, Customer, CustomerEmail, CustomerFirstName, CustomerId, CustomerIncome,
    CustomerLastName, CustomerNationalId, CustomerPassword, NewCustomer, Street, ZipCode,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for PostgresCustomerRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await
    }

    async fn find_by_national_id(
        &self,
        con: &mut PostgresConnection,
        national_id: &CustomerNationalId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_national_id(con, national_id).await
    }
}

#[async_trait::async_trait]
impl CustomerModifier for PostgresCustomerRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        customer: &NewCustomer,
    ) -> error_stack::Result<Customer, KernelError> {
        PgCustomerInternal::create(con, customer).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::update(con, customer).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::delete(con, customer_id).await
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    national_id: String,
    income: Decimal,
    email: String,
    password: String,
    zip_code: String,
    street: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(row.id),
            CustomerFirstName::new(row.first_name),
            CustomerLastName::new(row.last_name),
            CustomerNationalId::new(row.national_id),
            CustomerIncome::new(row.income),
            CustomerEmail::new(row.email),
            CustomerPassword::new(row.password),
            Address::new(ZipCode::new(row.zip_code), Street::new(row.street)),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, national_id, income, email, password,
                   zip_code, street
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_national_id(
        con: &mut PgConnection,
        national_id: &CustomerNationalId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, national_id, income, email, password,
                   zip_code, street
            FROM customers
            WHERE national_id = $1
            "#,
        )
        .bind(national_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn create(
        con: &mut PgConnection,
        customer: &NewCustomer,
    ) -> error_stack::Result<Customer, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO customers
                (first_name, last_name, national_id, income, email, password, zip_code, street)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(customer.first_name().as_ref())
        .bind(customer.last_name().as_ref())
        .bind(customer.national_id().as_ref())
        .bind(customer.income().as_ref())
        .bind(customer.email().as_ref())
        .bind(customer.password().as_ref())
        .bind(customer.address().zip_code().as_ref())
        .bind(customer.address().street().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(customer.clone().into_customer(CustomerId::new(id)))
    }

    /// National id, email and password are never rewritten.
    async fn update(
        con: &mut PgConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, income = $4, zip_code = $5, street = $6
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.first_name().as_ref())
        .bind(customer.last_name().as_ref())
        .bind(customer.income().as_ref())
        .bind(customer.address().zip_code().as_ref())
        .bind(customer.address().street().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use rand::Rng;
    use rust_decimal::Decimal;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{
        Address, CustomerEmail, CustomerFirstName, CustomerIncome, CustomerLastName,
        CustomerNationalId, CustomerPassword, NewCustomer, Street, ZipCode,
    };
    use kernel::KernelError;

    use crate::database::postgres::customer::PostgresCustomerRepository;
    use crate::database::postgres::PostgresDatabase;

    pub(in crate::database) fn new_customer() -> NewCustomer {
        let national_id = rand::thread_rng().gen_range(10_000_000_000u64..100_000_000_000);
        NewCustomer::new(
            CustomerFirstName::new("João"),
            CustomerLastName::new("Silva"),
            CustomerNationalId::new(national_id.to_string()),
            CustomerIncome::new(Decimal::new(1000000, 2)),
            CustomerEmail::new("joao@email.com"),
            CustomerPassword::new("12345"),
            Address::new(ZipCode::new("12345678"), Street::new("Rua 1")),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;

        let customer = PostgresCustomerRepository
            .create(&mut connection, &new_customer())
            .await?;
        let id = *customer.id();

        let found = PostgresCustomerRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(customer.clone()));

        let found = PostgresCustomerRepository
            .find_by_national_id(&mut connection, customer.national_id())
            .await?;
        assert_eq!(found, Some(customer.clone()));

        let customer = customer.reconstruct(|c| c.first_name = CustomerFirstName::new("Maria"));
        PostgresCustomerRepository
            .update(&mut connection, &customer)
            .await?;
        let found = PostgresCustomerRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(customer));

        PostgresCustomerRepository
            .delete(&mut connection, &id)
            .await?;
        let found = PostgresCustomerRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert!(found.is_none());

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicated_national_id_conflicts() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;

        let customer = new_customer();
        PostgresCustomerRepository
            .create(&mut connection, &customer)
            .await?;
        let report = PostgresCustomerRepository
            .create(&mut connection, &customer)
            .await
            .expect_err("unique index must reject the second insert");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        Ok(())
    }
}
