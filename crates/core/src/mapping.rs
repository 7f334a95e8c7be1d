//! Structural translation between command payloads, the persisted entity,
//! and the external response shape. Field-for-field; no business logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::customer::{Customer, CustomerId, CustomerType};
use crate::requests::CustomerPayload;

impl Customer {
    /// Build a new entity from a create payload. The id is left at its
    /// zero placeholder; storage assigns the real one on insert.
    pub fn from_payload(payload: CustomerPayload) -> Self {
        Self {
            id: CustomerId(0),
            customer_type: payload.customer_type,
            name: payload.name,
            tax_id: payload.tax_id,
            state_registration: payload.state_registration,
            birth_date: payload.birth_date,
            phone: payload.phone,
            email: payload.email,
            postal_code: payload.postal_code,
            street: payload.street,
            number: payload.number,
            complement: payload.complement,
            neighborhood: payload.neighborhood,
            city: payload.city,
            state: payload.state,
        }
    }

    /// Replace every mutable field with the payload's values, keeping the
    /// assigned id.
    pub fn apply_payload(&mut self, payload: CustomerPayload) {
        self.customer_type = payload.customer_type;
        self.name = payload.name;
        self.tax_id = payload.tax_id;
        self.state_registration = payload.state_registration;
        self.birth_date = payload.birth_date;
        self.phone = payload.phone;
        self.email = payload.email;
        self.postal_code = payload.postal_code;
        self.street = payload.street;
        self.number = payload.number;
        self.complement = payload.complement;
        self.neighborhood = payload.neighborhood;
        self.city = payload.city;
        self.state = payload.state;
    }
}

/// External JSON shape returned by the read endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
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

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.0,
            customer_type: customer.customer_type,
            name: customer.name,
            tax_id: customer.tax_id,
            state_registration: customer.state_registration,
            birth_date: customer.birth_date,
            phone: customer.phone,
            email: customer.email,
            postal_code: customer.postal_code,
            street: customer.street,
            number: customer.number,
            complement: customer.complement,
            neighborhood: customer.neighborhood,
            city: customer.city,
            state: customer.state,
        }
    }
}
