//! # engine_component
//!
//! The "C" in ECS — defines what a component is and where components live.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all entity data must satisfy.
//! - [`Entity`] — lightweight `u64` entity handles.
//! - [`EntityAllocator`] — monotonically increasing handle allocator.
//! - [`World`] — per-entity component storage, one component per type.

pub mod component;
pub mod entity;
pub mod world;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use world::{World, WorldError};
