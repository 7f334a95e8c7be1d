use async_trait::async_trait;
use thiserror::Error;

use cadastro_core::domain::customer::{Customer, CustomerId};

pub mod customer;
pub mod memory;

pub use customer::SqlCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref database_error) = error {
            if database_error.is_unique_violation() {
                return Self::UniqueViolation(database_error.message().to_string());
            }
        }
        Self::Database(error)
    }
}

/// Point lookups and whole-record writes over the customers table. The
/// command/query handlers are the only callers; uniqueness of `tax_id` is
/// enforced by the storage layer and surfaces as `UniqueViolation`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer, ignoring `customer.id`, and return the
    /// storage-assigned id.
    async fn insert(&self, customer: &Customer) -> Result<CustomerId, RepositoryError>;

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Replace every mutable column of the row matching `customer.id`.
    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError>;

    async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError>;
}
