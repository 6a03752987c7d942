pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use veil_core::repository::{InsertOutcome, Mapping, ReadRepository, Repository};
pub use veil_core::StorageError;
