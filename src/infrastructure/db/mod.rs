pub mod connection;
pub mod contacts;
pub mod expenses;
