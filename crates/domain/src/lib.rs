//! tweet-scheduler domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Form state, images, hook categories and other value objects
//! - `ports`: Trait definitions for external services (adapters)
//! - `usecases`: Content normalization, form controller, submission gateway,
//!   hook library, paste decoding and schedule sheet layout
//! - `text`: Tweet buffer helpers

pub mod model;
pub mod ports;
pub mod text;
pub mod usecases;

pub use model::*;
pub use ports::*;
