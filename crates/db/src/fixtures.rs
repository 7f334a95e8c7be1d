use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Deterministic demo customers for local development and smoke checks:
/// one individual and one corporate record with fixed tax ids.
pub struct SeedDataset;

const SEED_TAX_IDS: &[&str] = &["39053344705", "45723174000110"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub customers_inserted: u64,
}

impl SeedDataset {
    /// Load the demo dataset. Loading is idempotent: existing rows with
    /// the seed tax ids are replaced.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        for tax_id in SEED_TAX_IDS {
            sqlx::query("DELETE FROM customers WHERE tax_id = ?")
                .bind(tax_id)
                .execute(&mut *tx)
                .await?;
        }

        let mut inserted = 0;
        inserted += sqlx::query(
            "INSERT INTO customers (
                customer_type, name, tax_id, birth_date, phone, email,
                postal_code, street, number, neighborhood, city, state
             ) VALUES (
                'individual', 'Ana Beatriz Rocha', ?, '1991-03-14', '11912345678',
                'ana.rocha@example.com', '01310100', 'Avenida Paulista', '1578',
                'Bela Vista', 'Sao Paulo', 'SP'
             )",
        )
        .bind(SEED_TAX_IDS[0])
        .execute(&mut *tx)
        .await?
        .rows_affected();

        inserted += sqlx::query(
            "INSERT INTO customers (
                customer_type, name, tax_id, state_registration, phone, email,
                postal_code, street, number, neighborhood, city, state
             ) VALUES (
                'corporate', 'Initech Solucoes Ltda', ?, '110042490114', '1133334444',
                'fiscal@initech.com.br', '04538133', 'Avenida Faria Lima', '3477',
                'Itaim Bibi', 'Sao Paulo', 'SP'
             )",
        )
        .bind(SEED_TAX_IDS[1])
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(SeedResult { customers_inserted: inserted })
    }
}

#[cfg(test)]
mod tests {
    use super::SeedDataset;
    use crate::{connect_with_settings, migrations};

    #[tokio::test]
    async fn seed_loads_one_individual_and_one_corporate() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        let result = SeedDataset::load(&pool).await.expect("seed");
        assert_eq!(result.customers_inserted, 2);

        let types: Vec<String> =
            sqlx::query_scalar("SELECT customer_type FROM customers ORDER BY customer_type")
                .fetch_all(&pool)
                .await
                .expect("count seeded rows");
        assert_eq!(types, vec!["corporate".to_string(), "individual".to_string()]);
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        SeedDataset::load(&pool).await.expect("first load");
        SeedDataset::load(&pool).await.expect("second load");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 2);
    }
}
