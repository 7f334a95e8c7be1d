use std::collections::BTreeMap;

use tokio::sync::RwLock;

use cadastro_core::domain::customer::{Customer, CustomerId};

use super::{CustomerRepository, RepositoryError};

/// In-memory stand-in for the SQL repository, used by handler tests. It
/// mirrors the storage contract, including tax_id uniqueness.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    customers: BTreeMap<i64, Customer>,
}

impl Inner {
    fn tax_id_taken(&self, tax_id: &str, excluding: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|existing| existing.tax_id == tax_id && Some(existing.id) != excluding)
    }
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<CustomerId, RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.tax_id_taken(&customer.tax_id, None) {
            return Err(RepositoryError::UniqueViolation(format!(
                "UNIQUE constraint failed: customers.tax_id ({})",
                customer.tax_id
            )));
        }

        inner.next_id += 1;
        let id = CustomerId(inner.next_id);
        let mut stored = customer.clone();
        stored.id = id;
        inner.customers.insert(id.0, stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.values().cloned().collect())
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.tax_id_taken(&customer.tax_id, Some(customer.id)) {
            return Err(RepositoryError::UniqueViolation(format!(
                "UNIQUE constraint failed: customers.tax_id ({})",
                customer.tax_id
            )));
        }
        inner.customers.insert(customer.id.0, customer.clone());
        Ok(())
    }

    async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.customers.remove(&id.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cadastro_core::domain::customer::{Customer, CustomerId, CustomerType};

    use crate::repositories::{CustomerRepository, InMemoryCustomerRepository, RepositoryError};

    fn customer(tax_id: &str) -> Customer {
        Customer {
            id: CustomerId(0),
            customer_type: CustomerType::Corporate,
            name: "Globex Industria Ltda".to_string(),
            tax_id: tax_id.to_string(),
            state_registration: Some("111222333".to_string()),
            birth_date: None,
            phone: None,
            email: Some("fiscal@globex.com.br".to_string()),
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryCustomerRepository::default();

        let first = repo.insert(&customer("11111111000111")).await.expect("insert");
        let second = repo.insert(&customer("22222222000122")).await.expect("insert");

        assert_eq!(first, CustomerId(1));
        assert_eq!(second, CustomerId(2));
    }

    #[tokio::test]
    async fn duplicate_tax_id_is_rejected_like_the_sql_store() {
        let repo = InMemoryCustomerRepository::default();

        repo.insert(&customer("11111111000111")).await.expect("insert");
        let error = repo.insert(&customer("11111111000111")).await.expect_err("must conflict");

        assert!(matches!(error, RepositoryError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn update_keeps_own_tax_id_but_rejects_another_customers() {
        let repo = InMemoryCustomerRepository::default();

        let first = repo.insert(&customer("11111111000111")).await.expect("insert");
        repo.insert(&customer("22222222000122")).await.expect("insert");

        let mut same = customer("11111111000111");
        same.id = first;
        repo.update(&same).await.expect("same tax_id should update");

        let mut stolen = customer("22222222000122");
        stolen.id = first;
        let error = repo.update(&stolen).await.expect_err("must conflict");
        assert!(matches!(error, RepositoryError::UniqueViolation(_)));
    }
}
