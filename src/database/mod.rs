pub mod cost_repo;
pub mod group_repo;
pub mod mapping_repo;
pub mod models;
pub mod notes_repo;
pub mod price_repo;
