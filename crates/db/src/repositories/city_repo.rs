//! Repository for the `cities` table.

use atlas_core::access::check_not_deleted;
use atlas_core::error::CoreError;
use atlas_core::patch::ResolvedField;
use atlas_core::status::{CityType, RecordStatus, StatusId};
use atlas_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::city::{City, CreateCity, UpdateCity};
use crate::repositories::partial_update::build_update;

const ENTITY: &str = "City";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, localized_name, code, city_type, status, is_deleted, \
    country_id, created_at, updated_at";

/// Provides CRUD, soft-delete and restore operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Insert a new city under an Active country, returning the created row.
    ///
    /// The parent country is locked (`FOR SHARE`) for the duration of the
    /// insert so its status cannot change underneath. Fails with
    /// [`CoreError::DomainRuleViolation`] if the country does not exist or is
    /// not Active. The country's deletion flag is not consulted.
    pub async fn create(pool: &PgPool, input: &CreateCity) -> Result<City, RepoError> {
        let mut tx = pool.begin().await?;

        let country_status: Option<(StatusId,)> =
            sqlx::query_as("SELECT status FROM countries WHERE id = $1 FOR SHARE")
                .bind(input.country_id)
                .fetch_optional(&mut *tx)
                .await?;

        match country_status {
            Some((status,)) if status == RecordStatus::Active.id() => {}
            _ => {
                return Err(CoreError::DomainRuleViolation(
                    "Cannot register a city for an inactive country".to_string(),
                )
                .into());
            }
        }

        let query = format!(
            "INSERT INTO cities (name, localized_name, code, city_type, status, country_id)
             VALUES ($1, $2, $3, COALESCE($4, $5), COALESCE($6, $7), $8)
             RETURNING {COLUMNS}"
        );
        let city = sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(&input.localized_name)
            .bind(&input.code)
            .bind(input.city_type.map(CityType::id))
            .bind(CityType::Urban.id())
            .bind(input.status.map(RecordStatus::id))
            .bind(RecordStatus::Active.id())
            .bind(input.country_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            city_id = city.id,
            country_id = city.country_id,
            code = %city.code,
            "City created"
        );
        Ok(city)
    }

    /// Find a city by ID. No visibility filter is applied.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = $1");
        let city = sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(city)
    }

    /// List cities that are not deleted and have status Active.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<City>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM cities
             WHERE is_deleted = FALSE AND status = $1
             ORDER BY id"
        );
        let cities = sqlx::query_as::<_, City>(&query)
            .bind(RecordStatus::Active.id())
            .fetch_all(pool)
            .await?;
        Ok(cities)
    }

    /// List every city, including inactive and soft-deleted rows.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<City>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM cities ORDER BY id");
        let cities = sqlx::query_as::<_, City>(&query).fetch_all(pool).await?;
        Ok(cities)
    }

    /// List the cities of the given countries, optionally only the active ones.
    pub async fn list_by_countries(
        pool: &PgPool,
        country_ids: &[DbId],
        active_only: bool,
    ) -> Result<Vec<City>, RepoError> {
        if country_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = if active_only {
            format!(
                "SELECT {COLUMNS} FROM cities
                 WHERE country_id = ANY($1) AND is_deleted = FALSE AND status = $2
                 ORDER BY id"
            )
        } else {
            format!("SELECT {COLUMNS} FROM cities WHERE country_id = ANY($1) ORDER BY id")
        };
        let mut q = sqlx::query_as::<_, City>(&query).bind(country_ids);
        if active_only {
            q = q.bind(RecordStatus::Active.id());
        }
        let cities = q.fetch_all(pool).await?;
        Ok(cities)
    }

    /// Replace every mutable field of a city.
    ///
    /// Moving a city to another country is not re-checked against the
    /// country's status; only the foreign key applies. Returns `None` if no
    /// row with the given `id` exists, or if it is soft-deleted and
    /// `include_deleted` is false.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCity,
        include_deleted: bool,
    ) -> Result<Option<City>, RepoError> {
        let query = format!(
            "UPDATE cities SET
                name = $2,
                localized_name = $3,
                code = $4,
                city_type = COALESCE($5, $6),
                status = COALESCE($7, $8),
                country_id = $9
             WHERE id = $1 AND ($10 OR is_deleted = FALSE)
             RETURNING {COLUMNS}"
        );
        let city = sqlx::query_as::<_, City>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.localized_name)
            .bind(&input.code)
            .bind(input.city_type.map(CityType::id))
            .bind(CityType::Urban.id())
            .bind(input.status.map(RecordStatus::id))
            .bind(RecordStatus::Active.id())
            .bind(input.country_id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await?;
        if city.is_some() {
            tracing::info!(city_id = id, "City replaced");
        }
        Ok(city)
    }

    /// Write only the resolved columns, inside one transaction.
    ///
    /// See [`crate::repositories::CountryRepo::patch`].
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        fields: &[ResolvedField],
        include_deleted: bool,
    ) -> Result<Option<City>, RepoError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {COLUMNS} FROM cities
             WHERE id = $1 AND ($2 OR is_deleted = FALSE)
             FOR UPDATE"
        );
        let Some(current) = sqlx::query_as::<_, City>(&lock_query)
            .bind(id)
            .bind(include_deleted)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if fields.is_empty() {
            tx.commit().await?;
            return Ok(Some(current));
        }

        let mut builder = build_update("cities", COLUMNS, id, fields);
        let updated = builder
            .build_query_as::<City>()
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            city_id = id,
            columns = ?fields.iter().map(|f| f.column).collect::<Vec<_>>(),
            "City patched"
        );
        Ok(Some(updated))
    }

    /// Delete a city by ID.
    ///
    /// With `complete = false` only `is_deleted` is set; the status is left
    /// as it was. With `complete = true` the row is removed. Returns `false`
    /// (not an error) if the row does not exist.
    ///
    /// See [`crate::repositories::CountryRepo::delete`] for `include_deleted`.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        complete: bool,
        include_deleted: bool,
    ) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        let current: Option<(bool,)> =
            sqlx::query_as("SELECT is_deleted FROM cities WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((is_deleted,)) = current else {
            return Ok(false);
        };
        check_not_deleted(include_deleted, is_deleted, ENTITY, id)?;

        if complete {
            sqlx::query("DELETE FROM cities WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query("UPDATE cities SET is_deleted = TRUE WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(city_id = id, complete, "City deleted");
        Ok(true)
    }

    /// Delete every city. Returns the number of rows affected.
    ///
    /// Unlike the single-row soft delete, the bulk soft delete also sets the
    /// status to Inactive.
    pub async fn delete_all(pool: &PgPool, complete: bool) -> Result<u64, RepoError> {
        let result = if complete {
            sqlx::query("DELETE FROM cities").execute(pool).await?
        } else {
            sqlx::query("UPDATE cities SET is_deleted = TRUE, status = $1")
                .bind(RecordStatus::Inactive.id())
                .execute(pool)
                .await?
        };
        tracing::info!(rows = result.rows_affected(), complete, "All cities deleted");
        Ok(result.rows_affected())
    }

    /// Restore a city: clear `is_deleted` and set status Active, regardless
    /// of its prior state. Returns `true` if the row exists.
    pub async fn rollback(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let result =
            sqlx::query("UPDATE cities SET is_deleted = FALSE, status = $2 WHERE id = $1")
                .bind(id)
                .bind(RecordStatus::Active.id())
                .execute(pool)
                .await?;
        let restored = result.rows_affected() > 0;
        if restored {
            tracing::info!(city_id = id, "City restored");
        }
        Ok(restored)
    }

    /// Restore every soft-deleted city. Returns the number of rows restored.
    pub async fn rollback_all(pool: &PgPool) -> Result<u64, RepoError> {
        let result = sqlx::query(
            "UPDATE cities SET is_deleted = FALSE, status = $1 WHERE is_deleted = TRUE",
        )
        .bind(RecordStatus::Active.id())
        .execute(pool)
        .await?;
        tracing::info!(rows = result.rows_affected(), "Deleted cities restored");
        Ok(result.rows_affected())
    }
}
