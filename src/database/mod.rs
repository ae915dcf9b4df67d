mod connection;
mod mock;
mod product_store;

pub use connection::connect;
pub use mock::MemoryProductStore;
pub use product_store::{MongoProductStore, ProductStore};
