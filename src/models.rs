//! Public models.
//!
//! # Organization
//!
//! Models are grouped by domain (`thermal`, `turbomachinery`, `systems`).
//!
//! # Model structure
//!
//! A model whose computation is more than a closed-form expression lives in
//! its own module with an internal `core` submodule holding the domain logic.
//! The public type and its [`twine_core::Model`] implementation are thin
//! adapters that delegate to `core`.

pub mod systems;
pub mod thermal;
pub mod turbomachinery;
