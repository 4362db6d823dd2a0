//! Repository for the `countries` table.

use std::collections::HashMap;

use atlas_core::access::check_not_deleted;
use atlas_core::patch::ResolvedField;
use atlas_core::status::RecordStatus;
use atlas_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::city::{City, CityResponse};
use crate::models::country::{Country, CountryWithCities, CreateCountry, UpdateCountry};
use crate::repositories::partial_update::build_update;
use crate::repositories::CityRepo;

const ENTITY: &str = "Country";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, localized_name, code, status, is_deleted, created_at, updated_at";

/// Provides CRUD, soft-delete and restore operations for countries.
pub struct CountryRepo;

impl CountryRepo {
    /// Insert a new country, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to Active.
    pub async fn create(pool: &PgPool, input: &CreateCountry) -> Result<Country, RepoError> {
        let query = format!(
            "INSERT INTO countries (name, localized_name, code, status)
             VALUES ($1, $2, $3, COALESCE($4, $5))
             RETURNING {COLUMNS}"
        );
        let country = sqlx::query_as::<_, Country>(&query)
            .bind(&input.name)
            .bind(&input.localized_name)
            .bind(&input.code)
            .bind(input.status.map(RecordStatus::id))
            .bind(RecordStatus::Active.id())
            .fetch_one(pool)
            .await?;
        tracing::info!(country_id = country.id, code = %country.code, "Country created");
        Ok(country)
    }

    /// Find a country by ID. No visibility filter is applied.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Country>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM countries WHERE id = $1");
        let country = sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(country)
    }

    /// List countries that are not deleted and have status Active.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Country>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM countries
             WHERE is_deleted = FALSE AND status = $1
             ORDER BY id"
        );
        let countries = sqlx::query_as::<_, Country>(&query)
            .bind(RecordStatus::Active.id())
            .fetch_all(pool)
            .await?;
        Ok(countries)
    }

    /// List every country, including inactive and soft-deleted rows.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Country>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM countries ORDER BY id");
        let countries = sqlx::query_as::<_, Country>(&query)
            .fetch_all(pool)
            .await?;
        Ok(countries)
    }

    /// Active countries, each with its active cities.
    pub async fn list_active_with_cities(
        pool: &PgPool,
    ) -> Result<Vec<CountryWithCities>, RepoError> {
        let countries = Self::list_active(pool).await?;
        let ids: Vec<DbId> = countries.iter().map(|c| c.id).collect();
        let cities = CityRepo::list_by_countries(pool, &ids, true).await?;
        Ok(group_cities(countries, cities))
    }

    /// Every country, each with every one of its cities.
    pub async fn list_all_with_cities(
        pool: &PgPool,
    ) -> Result<Vec<CountryWithCities>, RepoError> {
        let countries = Self::list_all(pool).await?;
        let ids: Vec<DbId> = countries.iter().map(|c| c.id).collect();
        let cities = CityRepo::list_by_countries(pool, &ids, false).await?;
        Ok(group_cities(countries, cities))
    }

    /// Replace every mutable field of a country.
    ///
    /// The deletion flag is left untouched. Returns `None` if no row with the
    /// given `id` exists, or if it is soft-deleted and `include_deleted` is
    /// false.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCountry,
        include_deleted: bool,
    ) -> Result<Option<Country>, RepoError> {
        let query = format!(
            "UPDATE countries SET
                name = $2,
                localized_name = $3,
                code = $4,
                status = COALESCE($5, $6)
             WHERE id = $1 AND ($7 OR is_deleted = FALSE)
             RETURNING {COLUMNS}"
        );
        let country = sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.localized_name)
            .bind(&input.code)
            .bind(input.status.map(RecordStatus::id))
            .bind(RecordStatus::Active.id())
            .bind(include_deleted)
            .fetch_optional(pool)
            .await?;
        if country.is_some() {
            tracing::info!(country_id = id, "Country replaced");
        }
        Ok(country)
    }

    /// Write only the resolved columns, inside one transaction.
    ///
    /// The row is locked before the update. An empty `fields` slice performs
    /// no write and returns the current row. Returns `None` if the row does
    /// not exist, or if it is soft-deleted and `include_deleted` is false.
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        fields: &[ResolvedField],
        include_deleted: bool,
    ) -> Result<Option<Country>, RepoError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {COLUMNS} FROM countries
             WHERE id = $1 AND ($2 OR is_deleted = FALSE)
             FOR UPDATE"
        );
        let Some(current) = sqlx::query_as::<_, Country>(&lock_query)
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

        let mut builder = build_update("countries", COLUMNS, id, fields);
        let updated = builder
            .build_query_as::<Country>()
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            country_id = id,
            columns = ?fields.iter().map(|f| f.column).collect::<Vec<_>>(),
            "Country patched"
        );
        Ok(Some(updated))
    }

    /// Delete a country by ID.
    ///
    /// With `complete = false` the row is soft-deleted: `is_deleted` is set
    /// and the status forced to Inactive. With `complete = true` the row is
    /// removed, which fails with a constraint violation while cities still
    /// reference it. Returns `false` (not an error) if the row does not exist.
    ///
    /// The row is locked first. An already soft-deleted row is reported as
    /// [`CoreError::NotFound`](atlas_core::error::CoreError::NotFound)
    /// unless `include_deleted` is set.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        complete: bool,
        include_deleted: bool,
    ) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        let current: Option<(bool,)> =
            sqlx::query_as("SELECT is_deleted FROM countries WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((is_deleted,)) = current else {
            return Ok(false);
        };
        check_not_deleted(include_deleted, is_deleted, ENTITY, id)?;

        if complete {
            sqlx::query("DELETE FROM countries WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query("UPDATE countries SET is_deleted = TRUE, status = $2 WHERE id = $1")
                .bind(id)
                .bind(RecordStatus::Inactive.id())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(country_id = id, complete, "Country deleted");
        Ok(true)
    }

    /// Delete every country. Returns the number of rows affected.
    ///
    /// Same two modes as [`CountryRepo::delete`]. A complete delete is a
    /// single statement, so it removes nothing if any country still has
    /// cities.
    pub async fn delete_all(pool: &PgPool, complete: bool) -> Result<u64, RepoError> {
        let result = if complete {
            sqlx::query("DELETE FROM countries").execute(pool).await?
        } else {
            sqlx::query("UPDATE countries SET is_deleted = TRUE, status = $1")
                .bind(RecordStatus::Inactive.id())
                .execute(pool)
                .await?
        };
        tracing::info!(rows = result.rows_affected(), complete, "All countries deleted");
        Ok(result.rows_affected())
    }

    /// Restore a country: clear `is_deleted` and set status Active,
    /// regardless of its prior state. Returns `true` if the row exists.
    pub async fn rollback(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let result =
            sqlx::query("UPDATE countries SET is_deleted = FALSE, status = $2 WHERE id = $1")
                .bind(id)
                .bind(RecordStatus::Active.id())
                .execute(pool)
                .await?;
        let restored = result.rows_affected() > 0;
        if restored {
            tracing::info!(country_id = id, "Country restored");
        }
        Ok(restored)
    }

    /// Restore every soft-deleted country. Inactive rows that were never
    /// deleted are left alone. Returns the number of rows restored.
    pub async fn rollback_all(pool: &PgPool) -> Result<u64, RepoError> {
        let result = sqlx::query(
            "UPDATE countries SET is_deleted = FALSE, status = $1 WHERE is_deleted = TRUE",
        )
        .bind(RecordStatus::Active.id())
        .execute(pool)
        .await?;
        tracing::info!(rows = result.rows_affected(), "Deleted countries restored");
        Ok(result.rows_affected())
    }
}

/// Attach each city to its country, preserving country order.
fn group_cities(countries: Vec<Country>, cities: Vec<City>) -> Vec<CountryWithCities> {
    let mut by_country: HashMap<DbId, Vec<CityResponse>> = HashMap::new();
    for city in cities {
        by_country
            .entry(city.country_id)
            .or_default()
            .push(CityResponse::from(city));
    }

    countries
        .into_iter()
        .map(|country| CountryWithCities {
            cities: by_country.remove(&country.id).unwrap_or_default(),
            country: country.into(),
        })
        .collect()
}
