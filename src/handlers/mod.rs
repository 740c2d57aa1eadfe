// handlers/mod.rs - page handlers
//
// catalog: list/detail/create/update/delete pages, generic over the entity kind
// home: site index and health probe

pub mod catalog;
pub mod home;

pub use home::{health, index};
