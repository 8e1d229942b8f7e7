//! Repository layer: one static-method struct per table.

mod item_repo;
mod source_repo;
mod worker_status_repo;

pub use item_repo::ItemRepo;
pub use source_repo::SourceRepo;
pub use worker_status_repo::WorkerStatusRepo;
