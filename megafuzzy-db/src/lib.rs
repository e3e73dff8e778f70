pub mod appearance;
pub mod dataset;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;

pub use rusqlite;
