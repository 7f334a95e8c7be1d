use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use cadastro_core::domain::customer::{Customer, CustomerId, CustomerType};

use super::{CustomerRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const CUSTOMER_COLUMNS: &str = "id,
    customer_type,
    name,
    tax_id,
    state_registration,
    birth_date,
    phone,
    email,
    postal_code,
    street,
    number,
    complement,
    neighborhood,
    city,
    state";

#[async_trait::async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<CustomerId, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO customers (
                customer_type,
                name,
                tax_id,
                state_registration,
                birth_date,
                phone,
                email,
                postal_code,
                street,
                number,
                complement,
                neighborhood,
                city,
                state
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.customer_type.as_str())
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(customer.state_registration.as_deref())
        .bind(customer.birth_date.map(|date| date.to_string()))
        .bind(customer.phone.as_deref())
        .bind(customer.email.as_deref())
        .bind(customer.postal_code.as_deref())
        .bind(customer.street.as_deref())
        .bind(customer.number.as_deref())
        .bind(customer.complement.as_deref())
        .bind(customer.neighborhood.as_deref())
        .bind(customer.city.as_deref())
        .bind(customer.state.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(CustomerId(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(customer_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(customer_from_row).collect()
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE customers SET
                customer_type = ?,
                name = ?,
                tax_id = ?,
                state_registration = ?,
                birth_date = ?,
                phone = ?,
                email = ?,
                postal_code = ?,
                street = ?,
                number = ?,
                complement = ?,
                neighborhood = ?,
                city = ?,
                state = ?
             WHERE id = ?",
        )
        .bind(customer.customer_type.as_str())
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(customer.state_registration.as_deref())
        .bind(customer.birth_date.map(|date| date.to_string()))
        .bind(customer.phone.as_deref())
        .bind(customer.email.as_deref())
        .bind(customer.postal_code.as_deref())
        .bind(customer.street.as_deref())
        .bind(customer.number.as_deref())
        .bind(customer.complement.as_deref())
        .bind(customer.neighborhood.as_deref())
        .bind(customer.city.as_deref())
        .bind(customer.state.as_deref())
        .bind(customer.id.0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn customer_from_row(row: SqliteRow) -> Result<Customer, RepositoryError> {
    let type_tag: String = row.get("customer_type");
    let customer_type = CustomerType::parse(&type_tag).ok_or_else(|| {
        RepositoryError::Decode(format!("unknown customer_type tag `{type_tag}`"))
    })?;

    let birth_date = row
        .get::<Option<String>, _>("birth_date")
        .map(|raw| {
            raw.parse::<NaiveDate>().map_err(|error| {
                RepositoryError::Decode(format!("invalid birth_date `{raw}`: {error}"))
            })
        })
        .transpose()?;

    Ok(Customer {
        id: CustomerId(row.get("id")),
        customer_type,
        name: row.get("name"),
        tax_id: row.get("tax_id"),
        state_registration: row.get("state_registration"),
        birth_date,
        phone: row.get("phone"),
        email: row.get("email"),
        postal_code: row.get("postal_code"),
        street: row.get("street"),
        number: row.get("number"),
        complement: row.get("complement"),
        neighborhood: row.get("neighborhood"),
        city: row.get("city"),
        state: row.get("state"),
    })
}
