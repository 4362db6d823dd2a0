//! Integration tests for country and city CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create with defaults
//! - Unique constraint violations surface as `ConstraintViolation`
//! - City creation requires an Active country
//! - Full-replace updates
//! - Active-only vs. unfiltered listings

use assert_matches::assert_matches;
use atlas_core::error::CoreError;
use atlas_core::status::{CityType, RecordStatus};
use atlas_db::models::city::{CreateCity, UpdateCity};
use atlas_db::models::country::{CreateCountry, UpdateCountry};
use atlas_db::repositories::{CityRepo, CountryRepo};
use atlas_db::RepoError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_country(name: &str, code: &str) -> CreateCountry {
    CreateCountry {
        name: name.to_string(),
        localized_name: None,
        code: code.to_string(),
        status: None,
    }
}

fn new_city(country_id: i64, name: &str, code: &str) -> CreateCity {
    CreateCity {
        name: name.to_string(),
        localized_name: None,
        code: code.to_string(),
        city_type: None,
        status: None,
        country_id,
    }
}

// ---------------------------------------------------------------------------
// Country
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_country_defaults_to_active(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();

    assert!(country.id > 0);
    assert!(country.is_active());
    assert!(!country.is_deleted);

    let active = CountryRepo::list_active(&pool).await.unwrap();
    assert!(active.iter().any(|c| c.id == country.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_country_duplicate_code_is_constraint_violation(pool: PgPool) {
    CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();

    let err = CountryRepo::create(&pool, &new_country("Genovia", "WK"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::ConstraintViolation(msg)) if msg.contains("uq_countries_code")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_country_duplicate_name_is_constraint_violation(pool: PgPool) {
    CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();

    let err = CountryRepo::create(&pool, &new_country("Wakanda", "WA"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::ConstraintViolation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_localized_name_allows_many_nulls_but_no_duplicates(pool: PgPool) {
    CountryRepo::create(&pool, &new_country("Genovia", "GV"))
        .await
        .unwrap();
    CountryRepo::create(&pool, &new_country("Latveria", "LV"))
        .await
        .unwrap();

    let mut first = new_country("Sokovia", "SK");
    first.localized_name = Some("Sokovija".to_string());
    CountryRepo::create(&pool, &first).await.unwrap();

    let mut second = new_country("Zamunda", "ZM");
    second.localized_name = Some("Sokovija".to_string());
    let err = CountryRepo::create(&pool, &second).await.unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::ConstraintViolation(msg))
            if msg.contains("uq_countries_localized_name")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_country_excluded_from_active_listing(pool: PgPool) {
    let mut input = new_country("Genovia", "GV");
    input.status = Some(RecordStatus::Inactive);
    let country = CountryRepo::create(&pool, &input).await.unwrap();

    let active = CountryRepo::list_active(&pool).await.unwrap();
    assert!(!active.iter().any(|c| c.id == country.id));

    let all = CountryRepo::list_all(&pool).await.unwrap();
    assert!(all.iter().any(|c| c.id == country.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_country_replaces_fields(pool: PgPool) {
    let mut input = new_country("Wakanda", "WK");
    input.localized_name = Some("Wakanda Forever".to_string());
    let country = CountryRepo::create(&pool, &input).await.unwrap();

    let update = UpdateCountry {
        name: "Wakanda Republic".to_string(),
        localized_name: None,
        code: "WKR".to_string(),
        status: Some(RecordStatus::Inactive),
    };
    let updated = CountryRepo::update(&pool, country.id, &update, true)
        .await
        .unwrap()
        .expect("country should exist");

    assert_eq!(updated.id, country.id);
    assert_eq!(updated.name, "Wakanda Republic");
    assert_eq!(updated.localized_name, None);
    assert_eq!(updated.code, "WKR");
    assert_eq!(updated.status, RecordStatus::Inactive.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_country_returns_none(pool: PgPool) {
    let update = UpdateCountry {
        name: "Nowhere".to_string(),
        localized_name: None,
        code: "NW".to_string(),
        status: None,
    };
    let result = CountryRepo::update(&pool, 999_999, &update, true).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_nonexistent_country_returns_none(pool: PgPool) {
    let found = CountryRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_city_under_active_country(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();

    let city = CityRepo::create(&pool, &new_city(country.id, "Capital", "CAP1"))
        .await
        .unwrap();

    assert_eq!(city.country_id, country.id);
    assert!(city.is_active());
    assert_eq!(city.city_type, CityType::Urban.id());
    assert!(!city.is_deleted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_city_under_inactive_country_is_domain_violation(pool: PgPool) {
    let mut input = new_country("Genovia", "GV");
    input.status = Some(RecordStatus::Inactive);
    let country = CountryRepo::create(&pool, &input).await.unwrap();

    let err = CityRepo::create(&pool, &new_city(country.id, "Pyrus", "PY"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::DomainRuleViolation(_)));

    let all = CityRepo::list_all(&pool).await.unwrap();
    assert!(all.is_empty(), "no city should have been inserted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_city_under_missing_country_is_domain_violation(pool: PgPool) {
    let err = CityRepo::create(&pool, &new_city(999_999, "Nowhere", "NW"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::DomainRuleViolation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_city_under_soft_deleted_active_country_succeeds(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();
    // Flip only the deletion flag; the status stays Active.
    sqlx::query("UPDATE countries SET is_deleted = TRUE WHERE id = $1")
        .bind(country.id)
        .execute(&pool)
        .await
        .unwrap();

    let city = CityRepo::create(&pool, &new_city(country.id, "Birnin", "BZ"))
        .await
        .unwrap();
    assert_eq!(city.country_id, country.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_city_duplicate_code_across_countries(pool: PgPool) {
    let a = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();
    let b = CountryRepo::create(&pool, &new_country("Genovia", "GV"))
        .await
        .unwrap();

    CityRepo::create(&pool, &new_city(a.id, "Capital", "CAP"))
        .await
        .unwrap();
    let err = CityRepo::create(&pool, &new_city(b.id, "Other Capital", "CAP"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::ConstraintViolation(msg)) if msg.contains("uq_cities_code")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_city_names_need_not_be_unique(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();
    CityRepo::create(&pool, &new_city(country.id, "Springfield", "SP1"))
        .await
        .unwrap();
    CityRepo::create(&pool, &new_city(country.id, "Springfield", "SP2"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_city_to_missing_country_is_constraint_violation(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();
    let city = CityRepo::create(&pool, &new_city(country.id, "Capital", "CAP"))
        .await
        .unwrap();

    let update = UpdateCity {
        name: "Capital".to_string(),
        localized_name: None,
        code: "CAP".to_string(),
        city_type: Some(CityType::Rural),
        status: None,
        country_id: 999_999,
    };
    let err = CityRepo::update(&pool, city.id, &update, true).await.unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::ConstraintViolation(msg)) if msg.contains("fk_cities_country_id")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_nested_listing_filters_inactive_and_deleted(pool: PgPool) {
    let wakanda = CountryRepo::create(&pool, &new_country("Wakanda", "WK"))
        .await
        .unwrap();
    let genovia = CountryRepo::create(&pool, &new_country("Genovia", "GV"))
        .await
        .unwrap();

    let capital = CityRepo::create(&pool, &new_city(wakanda.id, "Capital", "CAP"))
        .await
        .unwrap();
    let hidden = CityRepo::create(&pool, &new_city(wakanda.id, "Hidden", "HID"))
        .await
        .unwrap();
    CityRepo::delete(&pool, hidden.id, false, true).await.unwrap();
    CountryRepo::delete(&pool, genovia.id, false, true).await.unwrap();

    let active = CountryRepo::list_active_with_cities(&pool).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].country.id, wakanda.id);
    let city_ids: Vec<i64> = active[0].cities.iter().map(|c| c.id).collect();
    assert_eq!(city_ids, vec![capital.id]);

    let all = CountryRepo::list_all_with_cities(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    let wakanda_all = all.iter().find(|c| c.country.id == wakanda.id).unwrap();
    assert_eq!(wakanda_all.cities.len(), 2);
}
