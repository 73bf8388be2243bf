pub mod favorites;
pub mod products;
pub mod users;
