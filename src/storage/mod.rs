pub mod connection;
pub mod entity;
pub mod local_store;
pub mod repository;

pub use connection::establish_connection;
pub use local_store::LocalStore;
