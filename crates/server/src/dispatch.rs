//! Request dispatcher and the command/query handlers behind it.
//!
//! The dispatcher owns an explicit registry built at startup: one handler
//! per request kind. Routing a kind nobody registered is a programming
//! error and panics. Handlers assume validated input; the HTTP boundary
//! runs the validation engine before anything is dispatched.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use cadastro_core::domain::customer::{Customer, CustomerId};
use cadastro_core::errors::ServiceError;
use cadastro_core::mapping::CustomerResponse;
use cadastro_core::requests::{CustomerRequest, RequestKind};
use cadastro_db::repositories::{CustomerRepository, RepositoryError};

/// Result of a dispatched request, one variant per request kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Created(CustomerId),
    Updated,
    Deleted,
    Customers(Vec<CustomerResponse>),
    /// `None` means the id had no matching record; the boundary decides
    /// how absence is surfaced.
    Customer(Option<CustomerResponse>),
}

#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: CustomerRequest) -> Result<RequestOutcome, ServiceError>;
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<RequestKind, Arc<dyn RequestHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full registry over a repository: the command handler for
    /// create/update/delete, the query handler for the reads.
    pub fn with_repository(repository: Arc<dyn CustomerRepository>) -> Self {
        let command_handler = Arc::new(CustomerCommandHandler::new(repository.clone()));
        let query_handler = Arc::new(CustomerQueryHandler::new(repository));

        let mut dispatcher = Self::new();
        dispatcher.register(RequestKind::Create, command_handler.clone());
        dispatcher.register(RequestKind::Update, command_handler.clone());
        dispatcher.register(RequestKind::Delete, command_handler);
        dispatcher.register(RequestKind::List, query_handler.clone());
        dispatcher.register(RequestKind::GetById, query_handler);
        dispatcher
    }

    pub fn register(&mut self, kind: RequestKind, handler: Arc<dyn RequestHandler>) {
        let replaced = self.handlers.insert(kind, handler);
        assert!(replaced.is_none(), "handler already registered for request kind `{kind}`");
    }

    /// Route a request to its registered handler. Panics if the registry
    /// has no handler for the request's kind.
    pub async fn dispatch(&self, request: CustomerRequest) -> Result<RequestOutcome, ServiceError> {
        let kind = request.kind();
        let handler = self
            .handlers
            .get(&kind)
            .unwrap_or_else(|| panic!("no handler registered for request kind `{kind}`"));
        handler.handle(request).await
    }
}

fn repository_failure(error: RepositoryError) -> ServiceError {
    match error {
        RepositoryError::UniqueViolation(message) => ServiceError::conflict(message),
        other => ServiceError::internal(other.to_string()),
    }
}

/// Handles the three mutating requests. Input is assumed valid.
pub struct CustomerCommandHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerCommandHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for CustomerCommandHandler {
    async fn handle(&self, request: CustomerRequest) -> Result<RequestOutcome, ServiceError> {
        match request {
            CustomerRequest::Create(create) => {
                let entity = Customer::from_payload(create.payload);
                let id = self.repository.insert(&entity).await.map_err(repository_failure)?;
                Ok(RequestOutcome::Created(id))
            }
            CustomerRequest::Update(update) => {
                let existing =
                    self.repository.find_by_id(update.id).await.map_err(repository_failure)?;
                let Some(mut existing) = existing else {
                    return Err(ServiceError::NotFound(update.id));
                };

                existing.apply_payload(update.payload);
                self.repository.update(&existing).await.map_err(repository_failure)?;
                Ok(RequestOutcome::Updated)
            }
            CustomerRequest::Delete(delete) => {
                let existing =
                    self.repository.find_by_id(delete.id).await.map_err(repository_failure)?;
                if existing.is_none() {
                    return Err(ServiceError::NotFound(delete.id));
                }

                self.repository.delete(delete.id).await.map_err(repository_failure)?;
                Ok(RequestOutcome::Deleted)
            }
            other => Err(ServiceError::internal(format!(
                "command handler received misrouted `{}` request",
                other.kind()
            ))),
        }
    }
}

/// Handles the two read requests.
pub struct CustomerQueryHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerQueryHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for CustomerQueryHandler {
    async fn handle(&self, request: CustomerRequest) -> Result<RequestOutcome, ServiceError> {
        match request {
            CustomerRequest::List(_) => {
                let customers = self.repository.list_all().await.map_err(repository_failure)?;
                Ok(RequestOutcome::Customers(
                    customers.into_iter().map(CustomerResponse::from).collect(),
                ))
            }
            CustomerRequest::GetById(query) => {
                let customer =
                    self.repository.find_by_id(query.id).await.map_err(repository_failure)?;
                Ok(RequestOutcome::Customer(customer.map(CustomerResponse::from)))
            }
            other => Err(ServiceError::internal(format!(
                "query handler received misrouted `{}` request",
                other.kind()
            ))),
        }
    }
}
