//! Single-process component world.
//!
//! The [`World`] owns every entity's components. Each entity holds at most
//! one component per [`ComponentTypeId`]; inserting a second one replaces the
//! first. Components are stored type-erased and downcast on access.

use std::any::Any;
use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("{0} not found")]
    EntityNotFound(Entity),
    #[error("component '{component}' not found on {entity}")]
    ComponentNotFound {
        component: &'static str,
        entity: Entity,
    },
    /// The slot for this type id holds a value of a different Rust type
    /// (two component types reporting the same name).
    #[error("component slot {type_id} on {entity} does not hold a '{component}'")]
    TypeMismatch {
        component: &'static str,
        type_id: ComponentTypeId,
        entity: Entity,
    },
}

/// A component as stored in the world.
struct Slot {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// A single entity's component set.
#[derive(Default)]
struct EntityData {
    components: HashMap<ComponentTypeId, Slot>,
}

/// Entity allocation plus per-entity component storage.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    entities: HashMap<Entity, EntityData>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Spawn a new entity without components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity, EntityData::default());
        trace!(%entity, "spawned entity");
        entity
    }

    /// Despawn an entity, dropping all its components.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), WorldError> {
        let data = self
            .entities
            .remove(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        trace!(%entity, components = data.components.len(), "despawned entity");
        Ok(())
    }

    /// Check if an entity is alive.
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -- Component operations --

    /// Attach `component` to `entity`, taking ownership of it.
    ///
    /// Returns the component previously stored in that slot, if any.
    pub fn insert<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, WorldError> {
        let type_id = T::component_type_id();
        let data = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let previous = data.components.insert(
            type_id,
            Slot {
                name: T::type_name(),
                value: Box::new(component),
            },
        );
        trace!(%entity, component = T::type_name(), "inserted component");
        // A previous occupant of a different type is dropped rather than returned.
        Ok(previous.and_then(|slot| slot.value.downcast::<T>().ok().map(|boxed| *boxed)))
    }

    /// Get a component by type.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, WorldError> {
        self.get_by_id(entity, T::component_type_id())
    }

    /// Get a component mutably by type.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, WorldError> {
        self.get_by_id_mut(entity, T::component_type_id())
    }

    /// Get a component through a type id that was resolved ahead of time.
    pub fn get_by_id<T: Component>(
        &self,
        entity: Entity,
        type_id: ComponentTypeId,
    ) -> Result<&T, WorldError> {
        let slot = self
            .entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?
            .components
            .get(&type_id)
            .ok_or(WorldError::ComponentNotFound {
                component: T::type_name(),
                entity,
            })?;
        slot.value
            .downcast_ref::<T>()
            .ok_or(WorldError::TypeMismatch {
                component: T::type_name(),
                type_id,
                entity,
            })
    }

    /// Mutable counterpart of [`World::get_by_id`].
    pub fn get_by_id_mut<T: Component>(
        &mut self,
        entity: Entity,
        type_id: ComponentTypeId,
    ) -> Result<&mut T, WorldError> {
        let slot = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?
            .components
            .get_mut(&type_id)
            .ok_or(WorldError::ComponentNotFound {
                component: T::type_name(),
                entity,
            })?;
        slot.value
            .downcast_mut::<T>()
            .ok_or(WorldError::TypeMismatch {
                component: T::type_name(),
                type_id,
                entity,
            })
    }

    /// Detach a component from an entity and hand it back to the caller.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T, WorldError> {
        let type_id = T::component_type_id();
        let data = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let slot = data
            .components
            .remove(&type_id)
            .ok_or(WorldError::ComponentNotFound {
                component: T::type_name(),
                entity,
            })?;
        match slot.value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => {
                // Put the foreign occupant back untouched.
                data.components.insert(
                    type_id,
                    Slot {
                        name: slot.name,
                        value,
                    },
                );
                Err(WorldError::TypeMismatch {
                    component: T::type_name(),
                    type_id,
                    entity,
                })
            }
        }
    }

    /// Check if an entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.has_id(entity, T::component_type_id())
    }

    /// Check if an entity has a component in the slot for `type_id`.
    #[must_use]
    pub fn has_id(&self, entity: Entity, type_id: ComponentTypeId) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|d| d.components.contains_key(&type_id))
    }

    /// Names of all components attached to an entity, sorted.
    pub fn component_names(&self, entity: Entity) -> Result<Vec<&'static str>, WorldError> {
        let data = self
            .entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let mut names: Vec<_> = data.components.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        Ok(names)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("issued", &self.allocator.issued())
            .finish()
    }
}
