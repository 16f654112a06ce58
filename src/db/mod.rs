pub mod connection;
pub mod leads;
pub mod schema;

pub use connection::Database;
