//! HTTP handlers for the synthesized entity CRUD endpoints.

pub mod entity;

pub use entity::*;
