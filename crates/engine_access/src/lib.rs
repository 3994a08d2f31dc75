//! # engine_access
//!
//! An adapter component that exposes the transform and internal value of
//! its owning entity to callers that only hold the adapter.
//!
//! This crate provides:
//!
//! - [`AccessAdapter`] — the forwarding component, plus [`attach_adapter`]
//!   to store one on an entity.
//! - [`TransformAccess`] / [`ValueAccess`] — the capabilities it forwards to.
//! - [`InternalComponent`] — the default internal value component.
//! - [`AccessConfig`] / [`DuplicatePolicy`] — what happens when the internal
//!   component is created twice.
//! - [`AccessError`] — detached, missing and duplicate component failures.
//! - [`PropertyRegistry`] / [`Reflect`] — read and write component
//!   properties by name, with values as JSON text.

pub mod adapter;
pub mod capability;
pub mod config;
pub mod error;
pub mod internal;
pub mod property;

pub use adapter::{AccessAdapter, attach_adapter};
pub use capability::{TransformAccess, ValueAccess};
pub use config::{AccessConfig, DuplicatePolicy};
pub use error::AccessError;
pub use internal::InternalComponent;
pub use property::{PropertyError, PropertyList, PropertyRegistry, Reflect};
