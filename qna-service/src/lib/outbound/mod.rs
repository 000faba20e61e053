pub mod cache;
pub mod events;
pub mod repositories;
