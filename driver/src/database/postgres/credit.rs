use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::types::time::Date;
use sqlx::types::Uuid;
use sqlx::PgConnection;

use kernel::interface::query::CreditQuery;
use kernel::interface::update::CreditModifier;
use kernel::prelude::entity::{
    Credit, CreditCode, CreditId, CreditInstallments, CreditStatus, CreditValue, CustomerId,
    FirstInstallment, NewCredit,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresCreditRepository;

#[async_trait::async_trait]
impl CreditQuery for PostgresCreditRepository {
    type Transaction = PostgresConnection;

    async fn find_by_code(
        &self,
        con: &mut PostgresConnection,
        code: &CreditCode,
    ) -> error_stack::Result<Option<Credit>, KernelError> {
        PgCreditInternal::find_by_code(con, code).await
    }

    async fn find_by_customer_id(
        &self,
        con: &mut PostgresConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Vec<Credit>, KernelError> {
        PgCreditInternal::find_by_customer_id(con, customer_id).await
    }
}

#[async_trait::async_trait]
impl CreditModifier for PostgresCreditRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        credit: &NewCredit,
    ) -> error_stack::Result<Credit, KernelError> {
        PgCreditInternal::create(con, credit).await
    }
}

#[derive(sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: Uuid,
    credit_value: Decimal,
    number_of_installments: i32,
    day_first_installment: Date,
    status: String,
    customer_id: i64,
}

impl TryFrom<CreditRow> for Credit {
    type Error = Report<KernelError>;

    fn try_from(row: CreditRow) -> Result<Self, Self::Error> {
        Ok(Credit::new(
            CreditId::new(row.id),
            CreditCode::new(row.credit_code),
            CreditValue::new(row.credit_value),
            CreditInstallments::new(row.number_of_installments),
            FirstInstallment::new(row.day_first_installment),
            row.status.parse::<CreditStatus>()?,
            CustomerId::new(row.customer_id),
        ))
    }
}

pub(in crate::database) struct PgCreditInternal;

impl PgCreditInternal {
    async fn find_by_code(
        con: &mut PgConnection,
        code: &CreditCode,
    ) -> error_stack::Result<Option<Credit>, KernelError> {
        let row = sqlx::query_as::<_, CreditRow>(
            // language=postgresql
            r#"
            SELECT id, credit_code, credit_value, number_of_installments,
                   day_first_installment, status, customer_id
            FROM credits
            WHERE credit_code = $1
            "#,
        )
        .bind(code.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Credit::try_from).transpose()
    }

    async fn find_by_customer_id(
        con: &mut PgConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Vec<Credit>, KernelError> {
        let rows = sqlx::query_as::<_, CreditRow>(
            // language=postgresql
            r#"
            SELECT id, credit_code, credit_value, number_of_installments,
                   day_first_installment, status, customer_id
            FROM credits
            WHERE customer_id = $1
            ORDER BY id
            "#,
        )
        .bind(customer_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter()
            .map(Credit::try_from)
            .collect::<Result<Vec<Credit>, Report<KernelError>>>()
    }

    async fn create(
        con: &mut PgConnection,
        credit: &NewCredit,
    ) -> error_stack::Result<Credit, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO credits
                (credit_code, credit_value, number_of_installments, day_first_installment, status,
                 customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(credit.code().as_ref())
        .bind(credit.value().as_ref())
        .bind(credit.installments().as_ref())
        .bind(credit.first_installment().as_ref())
        .bind(credit.status().as_str())
        .bind(credit.customer_id().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(credit.clone().into_credit(CreditId::new(id)))
    }
}
