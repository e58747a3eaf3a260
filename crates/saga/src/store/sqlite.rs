use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{ConfirmedReservation, NewReservation, ReservationStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reservations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    event_id TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price REAL NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQLite-backed reservation store.
#[derive(Clone)]
pub struct SqliteReservationStore {
    pool: SqlitePool,
}

impl SqliteReservationStore {
    /// Opens (creating if missing) the database file at `path` and ensures
    /// the schema exists.
    pub async fn connect(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn row_to_reservation(row: SqliteRow) -> Result<ConfirmedReservation, StoreError> {
        let quantity: i64 = row.try_get("quantity")?;
        Ok(ConfirmedReservation {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            event_id: row.try_get("event_id")?,
            quantity: u32::try_from(quantity)
                .map_err(|_| StoreError::Corrupt(format!("quantity out of range: {quantity}")))?,
            price: row.try_get("price")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn insert(&self, reservation: &NewReservation) -> Result<ConfirmedReservation, StoreError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (user_id, event_id, quantity, price, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reservation.user_id)
        .bind(&reservation.event_id)
        .bind(i64::from(reservation.quantity))
        .bind(reservation.price)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(ConfirmedReservation {
            id: result.last_insert_rowid(),
            user_id: reservation.user_id.clone(),
            event_id: reservation.event_id.clone(),
            quantity: reservation.quantity,
            price: reservation.price,
            created_at,
        })
    }

    async fn list(&self) -> Result<Vec<ConfirmedReservation>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, event_id, quantity, price, created_at FROM reservations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_reservation).collect()
    }
}
