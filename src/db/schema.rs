//! SQL DDL for the catalog tables.
//! Column layout matches the existing `users`/`products`/`favorites` tables.

/// Schema with:
/// - `id` UUID text primary keys, generated by the application
/// - `users.username` UNIQUE NOT NULL
/// - `products.name` nullable
/// - `favorites` references both tables, one row per (product_id, user_id)
///
/// Every statement is `IF NOT EXISTS`, so running it again is a no-op.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username VARCHAR(255) UNIQUE NOT NULL,
    password VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY,
    name VARCHAR(255)
);

CREATE TABLE IF NOT EXISTS favorites (
    id UUID PRIMARY KEY,
    product_id UUID REFERENCES products(id) NOT NULL,
    user_id UUID REFERENCES users(id) NOT NULL,
    CONSTRAINT unique_favorites UNIQUE (product_id, user_id)
);
"#;
