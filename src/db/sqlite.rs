use crate::config::Config;
use crate::db::models::{DbFavorite, DbProduct, DbUser, Favorite, Product, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::CatalogError;
use crate::password::hash_password_blocking;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

/// Owner of the `users`, `products` and `favorites` tables.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
    statement_timeout: Duration,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Open a pool for `cfg.database_url` with foreign key enforcement on.
    pub async fn connect(cfg: &Config) -> Result<Self, CatalogError> {
        let connect_opts = SqliteConnectOptions::from_str(cfg.database_url.as_str())?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.acquire_timeout())
            .connect_with(connect_opts)
            .await
            .inspect_err(|e| error!(error = %e, "failed to open store pool"))?;
        info!(
            max_connections = cfg.max_connections,
            statement_timeout_secs = cfg.statement_timeout_secs,
            "store pool ready"
        );
        Ok(Self::new(pool, cfg.statement_timeout()))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run one store round-trip under the statement timeout and map its
    /// failure onto the error taxonomy, logging it once here.
    ///
    /// On timeout the future is dropped, but a statement already handed to the
    /// SQLite worker may still commit. `StoreUnavailable` from a timed-out write
    /// does not mean the write was rolled back.
    async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let res = match tokio::time::timeout(self.statement_timeout, fut).await {
            Ok(inner) => inner.map_err(CatalogError::from),
            Err(_) => Err(CatalogError::StoreUnavailable(format!(
                "{op} timed out after {:?}",
                self.statement_timeout
            ))),
        };
        res.inspect_err(|e| {
            if e.is_constraint() {
                warn!(op, error = %e, "store operation rejected");
            } else {
                error!(op, error = %e, "store operation failed");
            }
        })
    }

    /// Create the tables if they do not exist yet. Safe to call on every start.
    pub async fn ensure_schema(&self) -> Result<(), CatalogError> {
        // sqlx::query executes one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            self.run("ensure_schema", sqlx::query(s).execute(&self.pool))
                .await?;
        }
        info!("schema ready");
        Ok(())
    }

    /// Register a user. The password is hashed before it reaches the store.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, CatalogError> {
        if username.trim().is_empty() {
            return Err(CatalogError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        let password_hash = hash_password_blocking(password.to_string()).await?;
        let id = Uuid::new_v4();
        let row = self
            .run(
                "create_user",
                sqlx::query_as::<_, DbUser>(
                    "INSERT INTO users (id, username, password) VALUES (?, ?, ?) \
                     RETURNING id, username",
                )
                .bind(id.to_string())
                .bind(username)
                .bind(password_hash)
                .fetch_one(&self.pool),
            )
            .await?;
        debug!(user_id = %id, "user created");
        User::try_from(row)
    }

    pub async fn create_product(&self, name: Option<&str>) -> Result<Product, CatalogError> {
        let id = Uuid::new_v4();
        let row = self
            .run(
                "create_product",
                sqlx::query_as::<_, DbProduct>(
                    "INSERT INTO products (id, name) VALUES (?, ?) RETURNING id, name",
                )
                .bind(id.to_string())
                .bind(name)
                .fetch_one(&self.pool),
            )
            .await?;
        debug!(product_id = %id, "product created");
        Product::try_from(row)
    }

    /// All users in insertion order, without password hashes.
    pub async fn fetch_users(&self) -> Result<Vec<User>, CatalogError> {
        let rows = self
            .run(
                "fetch_users",
                sqlx::query_as::<_, DbUser>("SELECT id, username FROM users ORDER BY rowid")
                    .fetch_all(&self.pool),
            )
            .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let rows = self
            .run(
                "fetch_products",
                sqlx::query_as::<_, DbProduct>("SELECT id, name FROM products ORDER BY rowid")
                    .fetch_all(&self.pool),
            )
            .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Favorites owned by `user_id`, oldest first. Unknown users yield an empty list.
    pub async fn fetch_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>, CatalogError> {
        let rows = self
            .run(
                "fetch_favorites",
                sqlx::query_as::<_, DbFavorite>(
                    "SELECT id, product_id, user_id FROM favorites \
                     WHERE user_id = ? ORDER BY rowid",
                )
                .bind(user_id.to_string())
                .fetch_all(&self.pool),
            )
            .await?;
        rows.into_iter().map(Favorite::try_from).collect()
    }

    /// Fails with `ForeignKeyViolation` if either side is missing and with
    /// `DuplicateKey` if the pair is already a favorite.
    pub async fn create_favorite(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> Result<Favorite, CatalogError> {
        let id = Uuid::new_v4();
        let row = self
            .run(
                "create_favorite",
                sqlx::query_as::<_, DbFavorite>(
                    "INSERT INTO favorites (id, product_id, user_id) VALUES (?, ?, ?) \
                     RETURNING id, product_id, user_id",
                )
                .bind(id.to_string())
                .bind(product_id.to_string())
                .bind(user_id.to_string())
                .fetch_one(&self.pool),
            )
            .await?;
        debug!(favorite_id = %id, %product_id, %user_id, "favorite created");
        Favorite::try_from(row)
    }

    /// Delete by favorite id. Deleting an unknown id is not an error.
    pub async fn destroy_favorite(&self, favorite_id: Uuid) -> Result<(), CatalogError> {
        let res = self
            .run(
                "destroy_favorite",
                sqlx::query("DELETE FROM favorites WHERE id = ?")
                    .bind(favorite_id.to_string())
                    .execute(&self.pool),
            )
            .await?;
        debug!(%favorite_id, rows = res.rows_affected(), "favorite deleted");
        Ok(())
    }
}
