use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::customer::{CustomerId, CustomerType};

/// Writable customer fields shared by the create and update commands.
/// Doubles as the external request body shape, hence the camelCase names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub customer_type: CustomerType,
    pub name: String,
    pub tax_id: String,
    pub state_registration: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateCustomer {
    pub payload: CustomerPayload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCustomer {
    pub id: CustomerId,
    pub payload: CustomerPayload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteCustomer {
    pub id: CustomerId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListCustomers;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetCustomerById {
    pub id: CustomerId,
}

/// Typed request envelope routed through the dispatcher. Each variant has
/// exactly one registered handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerRequest {
    Create(CreateCustomer),
    Update(UpdateCustomer),
    Delete(DeleteCustomer),
    List(ListCustomers),
    GetById(GetCustomerById),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Create,
    Update,
    Delete,
    List,
    GetById,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
            Self::GetById => "get_by_id",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CustomerRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Create(_) => RequestKind::Create,
            Self::Update(_) => RequestKind::Update,
            Self::Delete(_) => RequestKind::Delete,
            Self::List(_) => RequestKind::List,
            Self::GetById(_) => RequestKind::GetById,
        }
    }
}
