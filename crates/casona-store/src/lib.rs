// casona-store: PostgREST persistence gateway for the casona state engine

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod rows;

pub use client::{AccessRole, PostgrestClient};
pub use config::StoreConfig;
pub use error::StoreError;
pub use gateway::{ConnectionReport, Gateway, StoreMode, TableStats};
