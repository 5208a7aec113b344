//! Storage layer - on-disk records and persistence port adapters

pub mod entity;
pub mod mapper;
pub mod repositories;

pub use repositories::{InMemoryPersistence, JsonFilePersistence};
