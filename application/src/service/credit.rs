use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CreditQuery, CustomerQuery, DependOnCreditQuery, DependOnCustomerQuery,
};
use kernel::interface::update::{CreditModifier, DependOnCreditModifier};
use kernel::prelude::entity::{
    CreditCode, CreditInstallments, CreditStatus, CreditValue, CustomerId, FirstInstallment,
    NewCredit,
};
use kernel::KernelError;

use crate::service::customer::require_customer;
use crate::transfer::{
    CreateCreditDto, CreatedCreditDto, CreditDetailDto, CreditDto, GetCreditDto, GetCreditsDto,
};
use crate::validation::{ensure_installment_window, ensure_valid, validate_create_credit};

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

#[async_trait::async_trait]
pub trait CreateCreditService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCreditModifier
{
    async fn create_credit(
        &self,
        dto: CreateCreditDto,
    ) -> error_stack::Result<CreatedCreditDto, KernelError> {
        let today = today();
        ensure_valid(validate_create_credit(&dto, today))?;
        let mut connection = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let customer =
            require_customer(self.customer_query(), &mut connection, &customer_id).await?;
        if let Err(report) = ensure_installment_window(dto.day_first_installment, today) {
            tracing::debug!("Rejected credit for customer {}: {report:?}", dto.customer_id);
            return Err(report);
        }

        let credit = NewCredit::new(
            CreditCode::generate(),
            CreditValue::new(dto.credit_value),
            CreditInstallments::new(dto.number_of_installments),
            FirstInstallment::new(dto.day_first_installment),
            CreditStatus::default(),
            customer_id,
        );
        let credit = self
            .credit_modifier()
            .create(&mut connection, &credit)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "Created credit {} for customer {}",
            credit.code().as_ref(),
            dto.customer_id
        );
        Ok(CreatedCreditDto {
            credit_code: *credit.code().as_ref(),
            customer_email: customer.email().as_ref().clone(),
        })
    }
}

impl<T> CreateCreditService for T where T: DependOnCustomerQuery + DependOnCreditModifier {}

#[async_trait::async_trait]
pub trait GetCreditsService: 'static + Sync + Send + DependOnCreditQuery {
    /// An unknown customer simply owns no credits.
    async fn get_credits(
        &self,
        dto: GetCreditsDto,
    ) -> error_stack::Result<Vec<CreditDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let credits = self
            .credit_query()
            .find_by_customer_id(&mut connection, &customer_id)
            .await?;
        connection.commit().await?;

        Ok(credits.into_iter().map(CreditDto::from).collect())
    }
}

impl<T> GetCreditsService for T where T: DependOnCreditQuery {}

#[async_trait::async_trait]
pub trait GetCreditService:
    'static + Sync + Send + DependOnCreditQuery + DependOnCustomerQuery
{
    /// Only the owner of a credit may read it.
    async fn get_credit(
        &self,
        dto: GetCreditDto,
    ) -> error_stack::Result<CreditDetailDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let code = CreditCode::new(dto.credit_code);
        let credit = self
            .credit_query()
            .find_by_code(&mut connection, &code)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::BusinessRule)
                    .attach_printable(format!("Creditcode {} not found", dto.credit_code))
            })?;

        let customer_id = CustomerId::new(dto.customer_id);
        if !credit.is_owned_by(&customer_id) {
            tracing::debug!(
                "Customer {} asked for credit {} owned by someone else",
                dto.customer_id,
                dto.credit_code
            );
            return Err(Report::new(KernelError::Forbidden)
                .attach_printable("Not permitted - contact admin".to_string()));
        }

        let owner = self
            .customer_query()
            .find_by_id(&mut connection, &customer_id)
            .await?;
        connection.commit().await?;

        Ok(CreditDetailDto {
            credit: CreditDto::from(credit),
            customer_email: owner.as_ref().map(|c| c.email().as_ref().clone()),
            customer_income: owner.as_ref().map(|c| *c.income().as_ref()),
        })
    }
}

impl<T> GetCreditService for T where T: DependOnCreditQuery + DependOnCustomerQuery {}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::CreditStatus;
    use kernel::KernelError;

    use crate::service::{
        CreateCreditService, CreateCustomerService, DeleteCustomerService, GetCreditService,
        GetCreditsService,
    };
    use crate::transfer::{
        CreateCreditDto, CreateCustomerDto, DeleteCustomerDto, GetCreditDto, GetCreditsDto,
    };

    async fn customer(
        db: &InMemoryDatabase,
        national_id: &str,
        email: &str,
    ) -> error_stack::Result<i64, KernelError> {
        let created = db
            .create_customer(CreateCustomerDto {
                first_name: "João".to_string(),
                last_name: "Silva".to_string(),
                national_id: national_id.to_string(),
                income: Decimal::new(1000000, 2),
                email: email.to_string(),
                password: "12345".to_string(),
                zip_code: "12345678".to_string(),
                street: "Rua 1".to_string(),
            })
            .await?;
        Ok(created.id)
    }

    fn credit_dto(customer_id: i64, days_ahead: i64) -> CreateCreditDto {
        CreateCreditDto {
            credit_value: Decimal::new(50000, 2),
            number_of_installments: 12,
            day_first_installment: OffsetDateTime::now_utc().date() + Duration::days(days_ahead),
            customer_id,
        }
    }

    #[tokio::test]
    async fn create_and_list() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;

        let first = db.create_credit(credit_dto(owner, 10)).await?;
        let second = db.create_credit(credit_dto(owner, 20)).await?;
        assert_ne!(first.credit_code, second.credit_code);
        assert_eq!(first.customer_email, "joao@email.com");

        let credits = db.get_credits(GetCreditsDto { customer_id: owner }).await?;
        let codes = credits.iter().map(|c| c.credit_code).collect::<Vec<_>>();
        assert_eq!(codes, vec![first.credit_code, second.credit_code]);
        assert!(credits.iter().all(|c| c.status == CreditStatus::Pending));
        assert!(credits.iter().all(|c| c.customer_id == owner));
        Ok(())
    }

    #[tokio::test]
    async fn listing_for_unknown_customer_is_empty() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let credits = db.get_credits(GetCreditsDto { customer_id: 7 }).await?;
        assert!(credits.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let db = InMemoryDatabase::default();
        let report = db
            .create_credit(credit_dto(99, 10))
            .await
            .expect_err("customer does not exist");
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn rejects_out_of_range_installments() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        for installments in [0, 49] {
            let dto = CreateCreditDto {
                number_of_installments: installments,
                ..credit_dto(owner, 10)
            };
            let report = db.create_credit(dto).await.expect_err("out of range");
            assert!(matches!(report.current_context(), KernelError::Validation));
        }
        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_future_first_installment() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        for days_ahead in [0, -1, -365] {
            let report = db
                .create_credit(credit_dto(owner, days_ahead))
                .await
                .expect_err("not in the future");
            assert!(matches!(report.current_context(), KernelError::Validation));
        }
        Ok(())
    }

    #[tokio::test]
    async fn rejects_first_installment_beyond_window() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        let report = db
            .create_credit(credit_dto(owner, 120))
            .await
            .expect_err("more than three months ahead");
        assert!(matches!(report.current_context(), KernelError::BusinessRule));

        let credits = db.get_credits(GetCreditsDto { customer_id: owner }).await?;
        assert!(credits.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn find_by_code_is_scoped_to_owner() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        let stranger = customer(&db, "12345678909", "maria@email.com").await?;
        let created = db.create_credit(credit_dto(owner, 10)).await?;

        let detail = db
            .get_credit(GetCreditDto {
                customer_id: owner,
                credit_code: created.credit_code,
            })
            .await?;
        assert_eq!(detail.credit.credit_code, created.credit_code);
        assert_eq!(detail.credit.number_of_installments, 12);
        assert_eq!(detail.customer_email.as_deref(), Some("joao@email.com"));
        assert_eq!(detail.customer_income, Some(Decimal::new(1000000, 2)));

        let report = db
            .get_credit(GetCreditDto {
                customer_id: stranger,
                credit_code: created.credit_code,
            })
            .await
            .expect_err("credit belongs to another customer");
        assert!(matches!(report.current_context(), KernelError::Forbidden));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_breaks_business_rule() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        let report = db
            .get_credit(GetCreditDto {
                customer_id: owner,
                credit_code: Uuid::new_v4(),
            })
            .await
            .expect_err("no such credit");
        assert!(matches!(report.current_context(), KernelError::BusinessRule));
        Ok(())
    }

    #[tokio::test]
    async fn customer_with_credits_is_not_deleted() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let owner = customer(&db, "28475934625", "joao@email.com").await?;
        db.create_credit(credit_dto(owner, 10)).await?;

        let report = db
            .delete_customer(DeleteCustomerDto { id: owner })
            .await
            .expect_err("customer still owns a credit");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let credits = db.get_credits(GetCreditsDto { customer_id: owner }).await?;
        assert_eq!(credits.len(), 1);
        Ok(())
    }
}
