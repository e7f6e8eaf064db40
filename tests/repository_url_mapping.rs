use shortener_service::domain::entities::{MappingField, NewUrlMapping};
use shortener_service::domain::repositories::UrlMappingRepository;
use shortener_service::error::AppError;
use shortener_service::infrastructure::persistence::PgUrlMappingRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repository(pool: PgPool) -> PgUrlMappingRepository {
    PgUrlMappingRepository::new(Arc::new(pool))
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = repository(pool);

    let created = repo
        .insert_mapping(NewUrlMapping::new("abc12", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(created.short_url_path, "abc12");
    assert_eq!(created.visits, 0);
    assert_eq!(
        repo.find_long_url_by_path("abc12").await.unwrap(),
        Some("https://example.com".to_string())
    );
    assert_eq!(
        repo.find_path_by_long_url("https://example.com").await.unwrap(),
        Some("abc12".to_string())
    );
    assert!(repo.path_exists("abc12").await.unwrap());
    assert!(!repo.path_exists("zzzzz").await.unwrap());
    assert_eq!(repo.find_long_url_by_path("zzzzz").await.unwrap(), None);
}

#[sqlx::test]
async fn test_duplicate_short_path(pool: PgPool) {
    let repo = repository(pool);

    repo.insert_mapping(NewUrlMapping::new("dup01", "https://a.example"))
        .await
        .unwrap();
    let result = repo
        .insert_mapping(NewUrlMapping::new("dup01", "https://b.example"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::DuplicateKey {
            field: MappingField::ShortUrlPath
        })
    ));
}

#[sqlx::test]
async fn test_duplicate_long_url(pool: PgPool) {
    let repo = repository(pool);

    repo.insert_mapping(NewUrlMapping::new("first", "https://a.example"))
        .await
        .unwrap();
    let result = repo
        .insert_mapping(NewUrlMapping::new("other", "https://a.example"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::DuplicateKey {
            field: MappingField::LongUrl
        })
    ));
}

#[sqlx::test]
async fn test_increment_visits(pool: PgPool) {
    let repo = repository(pool);

    repo.insert_mapping(NewUrlMapping::new("vis01", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.increment_visits("vis01").await.unwrap());
    assert!(repo.increment_visits("vis01").await.unwrap());
    assert!(!repo.increment_visits("missing").await.unwrap());

    assert_eq!(repo.find_visits_by_path("vis01").await.unwrap(), Some(2));
    assert_eq!(repo.find_visits_by_path("missing").await.unwrap(), None);

    let mapping = repo.find_by_path("vis01").await.unwrap().unwrap();
    assert_eq!(mapping.visits, 2);
}

#[sqlx::test]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let repo = repository(pool);

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();

    assert!(repo.health_check().await);
}
