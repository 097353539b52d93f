use std::collections::BTreeMap;
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::Mutex;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CreditQuery, CustomerQuery, DependOnCreditQuery, DependOnCustomerQuery,
};
use kernel::interface::update::{
    CreditModifier, CustomerModifier, DependOnCreditModifier, DependOnCustomerModifier,
};
use kernel::prelude::entity::{
    Credit, CreditCode, CreditId, Customer, CustomerId, CustomerNationalId, NewCredit, NewCustomer,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
struct Store {
    customers: BTreeMap<i64, Customer>,
    credits: BTreeMap<i64, Credit>,
    customer_sequence: i64,
    credit_sequence: i64,
    version: u64,
}

/// Process-local store with the same constraints as the postgres schema.
/// Each transaction works on a snapshot and never holds the lock while open.
/// A writing transaction commits only if no other write landed since its
/// snapshot; otherwise the commit fails with [`KernelError::Conflict`].
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryConnection {
    store: Arc<Mutex<Store>>,
    working: Store,
    dirty: bool,
}

impl InMemoryConnection {
    fn write(&mut self) -> &mut Store {
        self.dirty = true;
        &mut self.working
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self {
            store,
            mut working,
            dirty,
        } = self;
        if !dirty {
            return Ok(());
        }
        let mut stored = store.lock().await;
        if stored.version != working.version {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("Store was modified concurrently. Try again".to_string()));
        }
        working.version += 1;
        *stored = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        let working = self.store.lock().await.clone();
        Ok(InMemoryConnection {
            store: Arc::clone(&self.store),
            working,
            dirty: false,
        })
    }
}

pub struct InMemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for InMemoryCustomerRepository {
    type Transaction = InMemoryConnection;

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.working.customers.get(&i64::from(*id)).cloned())
    }

    async fn find_by_national_id(
        &self,
        con: &mut InMemoryConnection,
        national_id: &CustomerNationalId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con
            .working
            .customers
            .values()
            .find(|customer| customer.national_id() == national_id)
            .cloned())
    }
}

#[async_trait::async_trait]
impl CustomerModifier for InMemoryCustomerRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        customer: &NewCustomer,
    ) -> error_stack::Result<Customer, KernelError> {
        let store = con.write();
        if store
            .customers
            .values()
            .any(|stored| stored.national_id() == customer.national_id())
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("customers.national_id must be unique".to_string()));
        }
        store.customer_sequence += 1;
        let customer = customer
            .clone()
            .into_customer(CustomerId::new(store.customer_sequence));
        store
            .customers
            .insert(store.customer_sequence, customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.write().customers.get_mut(&i64::from(*customer.id())) {
            *stored = stored.clone().reconstruct(|fields| {
                fields.first_name = customer.first_name().clone();
                fields.last_name = customer.last_name().clone();
                fields.income = *customer.income();
                fields.address = customer.address().clone();
            });
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.write();
        if store
            .credits
            .values()
            .any(|credit| credit.is_owned_by(customer_id))
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("credits.customer_id still references customer".to_string()));
        }
        store.customers.remove(&i64::from(*customer_id));
        Ok(())
    }
}

pub struct InMemoryCreditRepository;

#[async_trait::async_trait]
impl CreditQuery for InMemoryCreditRepository {
    type Transaction = InMemoryConnection;

    async fn find_by_code(
        &self,
        con: &mut InMemoryConnection,
        code: &CreditCode,
    ) -> error_stack::Result<Option<Credit>, KernelError> {
        Ok(con
            .working
            .credits
            .values()
            .find(|credit| credit.code() == code)
            .cloned())
    }

    async fn find_by_customer_id(
        &self,
        con: &mut InMemoryConnection,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Vec<Credit>, KernelError> {
        Ok(con
            .working
            .credits
            .values()
            .filter(|credit| credit.is_owned_by(customer_id))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl CreditModifier for InMemoryCreditRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        credit: &NewCredit,
    ) -> error_stack::Result<Credit, KernelError> {
        let store = con.write();
        if !store.customers.contains_key(&i64::from(*credit.customer_id())) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("credits.customer_id must reference a customer".to_string()));
        }
        if store.credits.values().any(|stored| stored.code() == credit.code()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("credits.credit_code must be unique".to_string()));
        }
        store.credit_sequence += 1;
        let credit = credit
            .clone()
            .into_credit(CreditId::new(store.credit_sequence));
        store.credits.insert(store.credit_sequence, credit.clone());
        Ok(credit)
    }
}

impl DependOnCustomerQuery for InMemoryDatabase {
    type CustomerQuery = InMemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &InMemoryCustomerRepository
    }
}

impl DependOnCustomerModifier for InMemoryDatabase {
    type CustomerModifier = InMemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &InMemoryCustomerRepository
    }
}

impl DependOnCreditQuery for InMemoryDatabase {
    type CreditQuery = InMemoryCreditRepository;
    fn credit_query(&self) -> &Self::CreditQuery {
        &InMemoryCreditRepository
    }
}

impl DependOnCreditModifier for InMemoryDatabase {
    type CreditModifier = InMemoryCreditRepository;
    fn credit_modifier(&self) -> &Self::CreditModifier {
        &InMemoryCreditRepository
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::macros::date;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{CreditQuery, CustomerQuery};
    use kernel::interface::update::{CreditModifier, CustomerModifier};
    use kernel::prelude::entity::{
        Address, CreditCode, CreditInstallments, CreditStatus, CreditValue, CustomerEmail,
        CustomerFirstName, CustomerId, CustomerIncome, CustomerLastName, CustomerNationalId,
        CustomerPassword, FirstInstallment, NewCredit, NewCustomer, Street, ZipCode,
    };
    use kernel::KernelError;

    use super::{InMemoryCreditRepository, InMemoryCustomerRepository, InMemoryDatabase};

    fn new_customer(national_id: &str) -> NewCustomer {
        NewCustomer::new(
            CustomerFirstName::new("João"),
            CustomerLastName::new("Silva"),
            CustomerNationalId::new(national_id),
            CustomerIncome::new(Decimal::new(1000000, 2)),
            CustomerEmail::new("joao@email.com"),
            CustomerPassword::new("12345"),
            Address::new(ZipCode::new("12345678"), Street::new("Rua 1")),
        )
    }

    fn new_credit(customer_id: CustomerId) -> NewCredit {
        NewCredit::new(
            CreditCode::generate(),
            CreditValue::new(Decimal::new(50000, 2)),
            CreditInstallments::new(12),
            FirstInstallment::new(date!(2030 - 01 - 01)),
            CreditStatus::Pending,
            customer_id,
        )
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();

        let mut connection = db.transact().await?;
        let dropped = InMemoryCustomerRepository
            .create(&mut connection, &new_customer("28475934625"))
            .await?;
        drop(connection);

        let mut connection = db.transact().await?;
        let rolled_back = InMemoryCustomerRepository
            .create(&mut connection, &new_customer("28475934625"))
            .await?;
        connection.roll_back().await?;

        let mut connection = db.transact().await?;
        assert!(InMemoryCustomerRepository
            .find_by_id(&mut connection, dropped.id())
            .await?
            .is_none());
        assert!(InMemoryCustomerRepository
            .find_by_id(&mut connection, rolled_back.id())
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn open_transactions_run_side_by_side() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut seed = db.transact().await?;
        let customer = InMemoryCustomerRepository
            .create(&mut seed, &new_customer("28475934625"))
            .await?;
        seed.commit().await?;

        let mut first = db.transact().await?;
        let mut second = db.transact().await?;
        assert!(InMemoryCustomerRepository
            .find_by_id(&mut first, customer.id())
            .await?
            .is_some());
        assert!(InMemoryCustomerRepository
            .find_by_id(&mut second, customer.id())
            .await?
            .is_some());
        second.commit().await?;
        first.commit().await?;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_writes_conflict_on_commit() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();

        let mut first = db.transact().await?;
        let mut second = db.transact().await?;
        InMemoryCustomerRepository
            .create(&mut first, &new_customer("28475934625"))
            .await?;
        InMemoryCustomerRepository
            .create(&mut second, &new_customer("28475934625"))
            .await?;
        first.commit().await?;
        let report = second
            .commit()
            .await
            .expect_err("store changed after the snapshot was taken");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let mut connection = db.transact().await?;
        let found = InMemoryCustomerRepository
            .find_by_national_id(&mut connection, &CustomerNationalId::new("28475934625"))
            .await?;
        assert!(found.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn enforces_schema_constraints() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut connection = db.transact().await?;

        let customer = InMemoryCustomerRepository
            .create(&mut connection, &new_customer("28475934625"))
            .await?;
        let report = InMemoryCustomerRepository
            .create(&mut connection, &new_customer("28475934625"))
            .await
            .expect_err("national id is unique");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let report = InMemoryCreditRepository
            .create(&mut connection, &new_credit(CustomerId::new(99)))
            .await
            .expect_err("owner must exist");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        let credit = InMemoryCreditRepository
            .create(&mut connection, &new_credit(*customer.id()))
            .await?;
        let report = InMemoryCustomerRepository
            .delete(&mut connection, customer.id())
            .await
            .expect_err("customer still owns a credit");
        assert!(matches!(report.current_context(), KernelError::Conflict));

        connection.commit().await?;

        let mut connection = db.transact().await?;
        let found = InMemoryCreditRepository
            .find_by_code(&mut connection, credit.code())
            .await?;
        assert_eq!(found, Some(credit));
        Ok(())
    }
}
