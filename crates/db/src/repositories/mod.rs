//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod production_repo;
pub mod reference_repo;
pub mod stoppage_repo;

pub use production_repo::ProductionRepo;
pub use reference_repo::ReferenceRepo;
pub use stoppage_repo::StoppageRepo;
