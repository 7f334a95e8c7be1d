pub mod config;
pub mod domain;
pub mod errors;
pub mod mapping;
pub mod requests;
pub mod validation;

pub use domain::customer::{Customer, CustomerId, CustomerType};
pub use errors::ServiceError;
pub use mapping::CustomerResponse;
pub use requests::{
    CreateCustomer, CustomerPayload, CustomerRequest, DeleteCustomer, GetCustomerById,
    ListCustomers, RequestKind, UpdateCustomer,
};
pub use validation::{validate_payload, validate_payload_at, FieldError};
