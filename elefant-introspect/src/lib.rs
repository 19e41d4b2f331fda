#[cfg(test)]
mod test_helpers;

mod config;
mod data_assembler;
mod docker;
mod error;
mod metadata_loader;
mod migrations;
mod models;
mod postgres_client_wrapper;
mod postgres_loader;
mod quoting;
mod render;

pub use config::*;
pub use data_assembler::*;
pub use docker::*;
pub use error::*;
pub use metadata_loader::*;
pub use migrations::*;
pub use models::*;
pub use postgres_client_wrapper::*;
pub use postgres_loader::*;
pub use render::*;
