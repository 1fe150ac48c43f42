//! PostgreSQL storage
//!
//! Joined-table layout: a common `vehicle` row per record and one detail row
//! in `car`, `motorcycle` or `truck` sharing its id. Reads run in read-only
//! transactions; saves and deletes run in read-write transactions.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row, Transaction};
use tracing::debug;
use vehicletype_core::VehicleKind;

use crate::entity::{VehicleDetails, VehicleEntity};
use crate::error::{StoreError, StoreResult};
use crate::traits::VehicleStore;

const SCHEMA: &str = include_str!("../migrations/0001_create_vehicle_tables.sql");

/// Detail table and column for a kind
fn detail_table(kind: VehicleKind) -> (&'static str, &'static str) {
    match kind {
        VehicleKind::Car => ("car", "number_of_doors"),
        VehicleKind::Motorcycle => ("motorcycle", "has_sidecar"),
        VehicleKind::Truck => ("truck", "payload_capacity"),
    }
}

/// `SELECT ... FROM vehicle JOIN <detail>` for a kind; callers append the filter
fn select_joined(kind: VehicleKind) -> String {
    let (table, column) = detail_table(kind);
    // NUMERIC has no f64 decoder; read it back as float8
    let detail = match kind {
        VehicleKind::Truck => format!("d.{column}::float8 AS {column}"),
        _ => format!("d.{column}"),
    };
    format!("SELECT v.id, v.make, v.model, v.year, {detail} FROM vehicle v JOIN {table} d ON d.id = v.id")
}

fn decode(kind: VehicleKind, row: &PgRow) -> StoreResult<VehicleEntity> {
    let (_, column) = detail_table(kind);
    let details = match kind {
        VehicleKind::Car => VehicleDetails::Car {
            number_of_doors: row.try_get(column)?,
        },
        VehicleKind::Motorcycle => VehicleDetails::Motorcycle {
            has_sidecar: row.try_get(column)?,
        },
        VehicleKind::Truck => VehicleDetails::Truck {
            payload_capacity: row.try_get(column)?,
        },
    };

    Ok(VehicleEntity {
        id: Some(row.try_get("id")?),
        make: row.try_get("make")?,
        model: row.try_get("model")?,
        year: row.try_get("year")?,
        details,
    })
}

fn bind_details(
    query: Query<'_, Postgres, PgArguments>,
    details: VehicleDetails,
) -> Query<'_, Postgres, PgArguments> {
    match details {
        VehicleDetails::Car { number_of_doors } => query.bind(number_of_doors),
        VehicleDetails::Motorcycle { has_sidecar } => query.bind(has_sidecar),
        VehicleDetails::Truck { payload_capacity } => query.bind(payload_capacity),
    }
}

/// Detail value placeholder; truck capacity is cast to its NUMERIC column type
fn detail_placeholder(kind: VehicleKind) -> &'static str {
    match kind {
        VehicleKind::Truck => "CAST($2 AS NUMERIC(7, 2))",
        _ => "$2",
    }
}

/// PostgreSQL-backed store
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database
    ///
    /// # Example
    /// ```no_run
    /// use vehicletype_repository::PostgresStore;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let store = PostgresStore::new("postgresql://localhost/vehicletype").await?;
    ///     store.migrate().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Create a store over an existing pool
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        debug!("Vehicle schema is up to date");
        Ok(())
    }

    async fn begin_read_only(&self) -> StoreResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn exists_in(
        tx: &mut Transaction<'static, Postgres>,
        kind: VehicleKind,
        id: i64,
    ) -> StoreResult<bool> {
        let (table, _) = detail_table(kind);
        let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl VehicleStore for PostgresStore {
    async fn find_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<Option<VehicleEntity>> {
        let sql = format!("{} WHERE v.id = $1", select_joined(kind));

        let mut tx = self.begin_read_only().await?;
        let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        row.map(|row| decode(kind, &row)).transpose()
    }

    async fn exists_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<bool> {
        let mut tx = self.begin_read_only().await?;
        let exists = Self::exists_in(&mut tx, kind, id).await?;
        tx.commit().await?;
        Ok(exists)
    }

    async fn find_all_by_make_asc(
        &self,
        kind: VehicleKind,
        page: u32,
        size: u32,
    ) -> StoreResult<Vec<VehicleEntity>> {
        let sql = format!(
            "{} ORDER BY v.make ASC, v.id ASC LIMIT $1 OFFSET $2",
            select_joined(kind)
        );
        let offset = i64::from(page) * i64::from(size);

        let mut tx = self.begin_read_only().await?;
        let rows = sqlx::query(&sql)
            .bind(i64::from(size))
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        rows.iter().map(|row| decode(kind, row)).collect()
    }

    async fn save(&self, mut entity: VehicleEntity) -> StoreResult<VehicleEntity> {
        let kind = entity.kind();
        let (table, column) = detail_table(kind);
        let placeholder = detail_placeholder(kind);

        let mut tx = self.pool.begin().await?;

        let existing = match entity.id {
            Some(id) => Self::exists_in(&mut tx, kind, id).await?.then_some(id),
            None => None,
        };

        let id = match existing {
            Some(id) => {
                sqlx::query("UPDATE vehicle SET make = $2, model = $3, year = $4 WHERE id = $1")
                    .bind(id)
                    .bind(&entity.make)
                    .bind(&entity.model)
                    .bind(entity.year)
                    .execute(&mut *tx)
                    .await?;

                let sql = format!("UPDATE {table} SET {column} = {placeholder} WHERE id = $1");
                let updated = bind_details(sqlx::query(&sql).bind(id), entity.details)
                    .execute(&mut *tx)
                    .await?;
                if updated.rows_affected() == 0 {
                    return Err(StoreError::MissingDetails { id, kind });
                }
                id
            }
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO vehicle (make, model, year) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&entity.make)
                .bind(&entity.model)
                .bind(entity.year)
                .fetch_one(&mut *tx)
                .await?;

                let sql = format!("INSERT INTO {table} (id, {column}) VALUES ($1, {placeholder})");
                bind_details(sqlx::query(&sql).bind(id), entity.details)
                    .execute(&mut *tx)
                    .await?;
                id
            }
        };

        tx.commit().await?;
        debug!(%kind, id, inserted = existing.is_none(), "Stored record");

        entity.id = Some(id);
        Ok(entity)
    }

    async fn delete_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<()> {
        let (table, _) = detail_table(kind);
        // Detail rows go with the vehicle row through ON DELETE CASCADE
        let sql = format!(
            "DELETE FROM vehicle v WHERE v.id = $1 AND EXISTS (SELECT 1 FROM {table} d WHERE d.id = v.id)"
        );

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;

        debug!(%kind, id, removed = result.rows_affected(), "Deleted record");
        Ok(())
    }
}
