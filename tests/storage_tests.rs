use favorites_catalog::password::verify_password;
use favorites_catalog::{CatalogError, CatalogStorage, Config};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use uuid::Uuid;

async fn fresh_storage(tag: &str) -> (CatalogStorage, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "catalog-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let cfg = Config {
        database_url: format!("sqlite:{}", temp_path.display()),
        ..Config::default()
    };
    let storage = CatalogStorage::connect(&cfg)
        .await
        .expect("failed to open store");
    storage.ensure_schema().await.expect("schema init failed");
    (storage, temp_path)
}

async fn cleanup(storage: CatalogStorage, path: PathBuf) {
    storage.pool().close().await;
    let _ = fs::remove_file(&path);
    for suffix in ["-wal", "-shm"] {
        let _ = fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

async fn count(storage: &CatalogStorage, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(storage.pool())
        .await
        .expect("count query failed");
    n
}

#[tokio::test]
async fn create_user_stores_hash_instead_of_plaintext() {
    let (storage, path) = fresh_storage("hash").await;

    let user = storage
        .create_user("alice", "s3cret-pass")
        .await
        .expect("create_user failed");
    assert_eq!(user.username, "alice");

    let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE id = ?")
        .bind(user.id.to_string())
        .fetch_one(storage.pool())
        .await
        .expect("user row missing");
    assert_ne!(stored, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &stored).expect("stored hash is valid"));

    cleanup(storage, path).await;
}

#[tokio::test]
async fn duplicate_username_is_rejected_without_second_row() {
    let (storage, path) = fresh_storage("dup-user").await;

    storage
        .create_user("bob", "first")
        .await
        .expect("first create_user failed");
    let err = storage
        .create_user("bob", "second")
        .await
        .expect_err("second create_user should fail");
    assert!(matches!(err, CatalogError::DuplicateKey(_)), "got {err:?}");
    assert_eq!(count(&storage, "users").await, 1);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn empty_credentials_are_validation_errors() {
    let (storage, path) = fresh_storage("empty").await;

    let err = storage.create_user("", "pw").await.expect_err("empty username");
    assert!(matches!(err, CatalogError::Validation(_)));
    let err = storage.create_user("carol", "").await.expect_err("empty password");
    assert!(matches!(err, CatalogError::Validation(_)));
    assert_eq!(count(&storage, "users").await, 0);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn products_keep_nullable_names_in_insertion_order() {
    let (storage, path) = fresh_storage("products").await;

    let first = storage.create_product(Some("kettle")).await.expect("kettle");
    let second = storage.create_product(None).await.expect("unnamed");
    assert_eq!(second.name, None);

    let products = storage.fetch_products().await.expect("fetch_products");
    assert_eq!(products, vec![first, second]);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn fetch_users_lists_in_insertion_order_without_hashes() {
    let (storage, path) = fresh_storage("users").await;

    let a = storage.create_user("zed", "pw1").await.expect("zed");
    let b = storage.create_user("amy", "pw2").await.expect("amy");

    let users = storage.fetch_users().await.expect("fetch_users");
    assert_eq!(users, vec![a, b]);

    let json = serde_json::to_value(&users).expect("serialize users");
    assert!(json[0].get("password").is_none());

    cleanup(storage, path).await;
}

#[tokio::test]
async fn duplicate_favorite_pair_is_rejected() {
    let (storage, path) = fresh_storage("dup-fav").await;

    let user = storage.create_user("dana", "pw").await.expect("user");
    let p1 = storage.create_product(Some("p1")).await.expect("p1");
    let p2 = storage.create_product(Some("p2")).await.expect("p2");

    storage
        .create_favorite(p1.id, user.id)
        .await
        .expect("first favorite");
    let err = storage
        .create_favorite(p1.id, user.id)
        .await
        .expect_err("duplicate favorite");
    assert!(matches!(err, CatalogError::DuplicateKey(_)), "got {err:?}");

    storage
        .create_favorite(p2.id, user.id)
        .await
        .expect("other product is independent");
    assert_eq!(count(&storage, "favorites").await, 2);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn favorite_with_missing_reference_is_rejected() {
    let (storage, path) = fresh_storage("fk").await;

    let user = storage.create_user("erin", "pw").await.expect("user");
    let product = storage.create_product(Some("lamp")).await.expect("product");

    let err = storage
        .create_favorite(product.id, Uuid::new_v4())
        .await
        .expect_err("missing user");
    assert!(
        matches!(err, CatalogError::ForeignKeyViolation(_)),
        "got {err:?}"
    );

    let err = storage
        .create_favorite(Uuid::new_v4(), user.id)
        .await
        .expect_err("missing product");
    assert!(
        matches!(err, CatalogError::ForeignKeyViolation(_)),
        "got {err:?}"
    );
    assert_eq!(count(&storage, "favorites").await, 0);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn fetch_favorites_is_scoped_to_user() {
    let (storage, path) = fresh_storage("scope").await;

    let u = storage.create_user("frank", "pw").await.expect("u");
    let other = storage.create_user("gina", "pw").await.expect("other");
    let p1 = storage.create_product(Some("p1")).await.expect("p1");
    let p2 = storage.create_product(Some("p2")).await.expect("p2");
    let p3 = storage.create_product(Some("p3")).await.expect("p3");

    let f1 = storage.create_favorite(p1.id, u.id).await.expect("f1");
    let f2 = storage.create_favorite(p2.id, u.id).await.expect("f2");
    let f3 = storage.create_favorite(p3.id, other.id).await.expect("f3");

    let mine = storage.fetch_favorites(u.id).await.expect("fetch u");
    assert_eq!(mine, vec![f1, f2]);

    let theirs = storage.fetch_favorites(other.id).await.expect("fetch other");
    assert_eq!(theirs, vec![f3]);

    let nobody = storage
        .fetch_favorites(Uuid::new_v4())
        .await
        .expect("unknown user");
    assert!(nobody.is_empty());

    cleanup(storage, path).await;
}

#[tokio::test]
async fn destroy_favorite_removes_only_that_record() {
    let (storage, path) = fresh_storage("destroy").await;

    let u = storage.create_user("hal", "pw").await.expect("u");
    let p1 = storage.create_product(Some("p1")).await.expect("p1");
    let p2 = storage.create_product(Some("p2")).await.expect("p2");
    let f1 = storage.create_favorite(p1.id, u.id).await.expect("f1");
    let f2 = storage.create_favorite(p2.id, u.id).await.expect("f2");

    storage
        .destroy_favorite(Uuid::new_v4())
        .await
        .expect("unknown id is a no-op");
    assert_eq!(count(&storage, "favorites").await, 2);

    storage.destroy_favorite(f1.id).await.expect("destroy f1");
    let remaining = storage.fetch_favorites(u.id).await.expect("fetch");
    assert_eq!(remaining, vec![f2]);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn ensure_schema_is_idempotent_and_keeps_data() {
    let (storage, path) = fresh_storage("schema").await;

    let product = storage.create_product(Some("mug")).await.expect("product");
    storage.ensure_schema().await.expect("second run");
    storage.ensure_schema().await.expect("third run");

    let products = storage.fetch_products().await.expect("fetch_products");
    assert_eq!(products, vec![product]);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn concurrent_duplicate_favorites_have_one_winner() {
    let (storage, path) = fresh_storage("race").await;

    let u = storage.create_user("ivy", "pw").await.expect("u");
    let p = storage.create_product(Some("p")).await.expect("p");

    let (a, b) = tokio::join!(
        storage.create_favorite(p.id, u.id),
        storage.create_favorite(p.id, u.id)
    );
    let results = [a, b];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let dup = results
        .iter()
        .filter(|r| matches!(r, Err(CatalogError::DuplicateKey(_))))
        .count();
    assert_eq!((ok, dup), (1, 1));
    assert_eq!(count(&storage, "favorites").await, 1);

    cleanup(storage, path).await;
}

#[tokio::test]
async fn closed_pool_reports_store_unavailable() {
    let (storage, path) = fresh_storage("closed").await;

    storage.pool().close().await;
    let err = storage.fetch_users().await.expect_err("pool is closed");
    assert!(
        matches!(err, CatalogError::StoreUnavailable(_)),
        "got {err:?}"
    );

    cleanup(storage, path).await;
}

#[tokio::test]
async fn failed_schema_run_reports_error_and_keeps_existing_data() {
    let (storage, path) = fresh_storage("schema-fail").await;

    let user = storage.create_user("max", "pw").await.expect("user");
    let product = storage.create_product(Some("vase")).await.expect("product");
    let favorite = storage
        .create_favorite(product.id, user.id)
        .await
        .expect("favorite");

    storage.pool().close().await;
    let err = storage
        .ensure_schema()
        .await
        .expect_err("closed pool must fail schema init");
    assert!(
        matches!(err, CatalogError::StoreUnavailable(_)),
        "got {err:?}"
    );

    let cfg = Config {
        database_url: format!("sqlite:{}", path.display()),
        ..Config::default()
    };
    let reopened = CatalogStorage::connect(&cfg)
        .await
        .expect("failed to reopen store");
    reopened.ensure_schema().await.expect("schema init after reopen");

    assert_eq!(reopened.fetch_users().await.expect("users"), vec![user.clone()]);
    assert_eq!(
        reopened.fetch_products().await.expect("products"),
        vec![product]
    );
    assert_eq!(
        reopened.fetch_favorites(user.id).await.expect("favorites"),
        vec![favorite]
    );

    cleanup(reopened, path).await;
}
