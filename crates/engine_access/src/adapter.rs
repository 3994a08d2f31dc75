//! The [`AccessAdapter`] component.
//!
//! An adapter is attached to one entity and forwards angle, position and
//! internal-value reads/writes to that entity's sibling components. It keeps
//! only a copyable [`Entity`] handle to its owner, so the world stays the sole
//! owner of every component and the adapter borrows the world per call.

use std::marker::PhantomData;

use engine_component::{Component, ComponentTypeId, Entity, World};
use engine_math::{Transform2D, Vec2};
use tracing::{debug, trace};

use crate::capability::{TransformAccess, ValueAccess};
use crate::config::{AccessConfig, DuplicatePolicy};
use crate::error::AccessError;
use crate::internal::InternalComponent;

/// Owner handle plus the sibling type ids resolved at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    entity: Entity,
    transform: ComponentTypeId,
    internal: ComponentTypeId,
}

/// Forwards transform and internal-value access to sibling components.
///
/// `T` is the transform capability, `I` the internal value capability.
///
/// # Examples
///
/// ```rust
/// use engine_access::{AccessAdapter, AccessConfig};
/// use engine_component::World;
/// use engine_math::{Transform2D, Vec2};
///
/// let mut world = World::new();
/// let entity = world.spawn();
/// world.insert(entity, Transform2D::default()).unwrap();
///
/// let adapter: AccessAdapter = AccessAdapter::attached(entity, AccessConfig::new());
/// adapter.set_position(&mut world, Vec2::new(3.0, 4.0)).unwrap();
/// assert_eq!(adapter.position(&world).unwrap(), Vec2::new(3.0, 4.0));
///
/// adapter.create_internal(&mut world).unwrap();
/// adapter.set_internal_value(&mut world, 7).unwrap();
/// assert_eq!(adapter.internal_value(&world).unwrap(), 7);
/// ```
pub struct AccessAdapter<T = Transform2D, I = InternalComponent> {
    binding: Option<Binding>,
    config: AccessConfig,
    _capabilities: PhantomData<fn() -> (T, I)>,
}

impl<T: TransformAccess, I: ValueAccess> AccessAdapter<T, I> {
    /// Create a detached adapter.
    #[must_use]
    pub fn new(config: AccessConfig) -> Self {
        Self {
            binding: None,
            config,
            _capabilities: PhantomData,
        }
    }

    /// Create an adapter already attached to `entity`.
    #[must_use]
    pub fn attached(entity: Entity, config: AccessConfig) -> Self {
        let mut adapter = Self::new(config);
        adapter.attach(entity);
        adapter
    }

    /// Point the adapter at `entity`, replacing any previous owner.
    pub fn attach(&mut self, entity: Entity) {
        let binding = Binding {
            entity,
            transform: T::component_type_id(),
            internal: I::component_type_id(),
        };
        debug!(
            %entity,
            transform = T::type_name(),
            internal = I::type_name(),
            "access adapter attached"
        );
        self.binding = Some(binding);
    }

    /// Drop the back-reference. Returns the previous owner, if any.
    pub fn detach(&mut self) -> Option<Entity> {
        let previous = self.binding.take().map(|b| b.entity);
        if let Some(entity) = previous {
            debug!(%entity, "access adapter detached");
        }
        previous
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// The owning entity.
    pub fn entity(&self) -> Result<Entity, AccessError> {
        self.binding().map(|b| b.entity)
    }

    fn binding(&self) -> Result<Binding, AccessError> {
        self.binding.ok_or(AccessError::Detached)
    }

    // -- Transform --

    fn transform<'w>(&self, world: &'w World) -> Result<&'w T, AccessError> {
        let b = self.binding()?;
        Ok(world.get_by_id::<T>(b.entity, b.transform)?)
    }

    fn transform_mut<'w>(&self, world: &'w mut World) -> Result<&'w mut T, AccessError> {
        let b = self.binding()?;
        Ok(world.get_by_id_mut::<T>(b.entity, b.transform)?)
    }

    /// Write the owner's rotation, in radians.
    pub fn set_angle(&self, world: &mut World, angle: f32) -> Result<(), AccessError> {
        self.transform_mut(world)?.set_angle(angle);
        trace!(angle, "angle written");
        Ok(())
    }

    /// Read the owner's rotation, in radians.
    pub fn angle(&self, world: &World) -> Result<f32, AccessError> {
        Ok(self.transform(world)?.angle())
    }

    pub fn set_position(&self, world: &mut World, position: Vec2) -> Result<(), AccessError> {
        self.transform_mut(world)?.set_position(position);
        trace!(x = position.x, y = position.y, "position written");
        Ok(())
    }

    pub fn position(&self, world: &World) -> Result<Vec2, AccessError> {
        Ok(self.transform(world)?.position())
    }

    // -- Internal value --

    fn internal<'w>(&self, world: &'w World) -> Result<&'w I, AccessError> {
        let b = self.binding()?;
        Ok(world.get_by_id::<I>(b.entity, b.internal)?)
    }

    fn internal_mut<'w>(&self, world: &'w mut World) -> Result<&'w mut I, AccessError> {
        let b = self.binding()?;
        Ok(world.get_by_id_mut::<I>(b.entity, b.internal)?)
    }

    /// Attach a default internal component to the owner.
    ///
    /// If the owner already has one, the configured [`DuplicatePolicy`]
    /// decides: `Reject` fails with [`AccessError::DuplicateComponent`],
    /// `Keep` succeeds without touching it, `Replace` overwrites it.
    pub fn create_internal(&self, world: &mut World) -> Result<(), AccessError> {
        let b = self.binding()?;
        if !world.exists(b.entity) {
            return Err(AccessError::Detached);
        }

        if world.has_id(b.entity, b.internal) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    debug!(entity = %b.entity, component = I::type_name(), "duplicate create rejected");
                    return Err(AccessError::DuplicateComponent {
                        component: I::type_name(),
                        entity: b.entity,
                    });
                }
                DuplicatePolicy::Keep => {
                    debug!(entity = %b.entity, component = I::type_name(), "internal component kept");
                    return Ok(());
                }
                DuplicatePolicy::Replace => {}
            }
        }

        let replaced = world.insert(b.entity, I::default())?.is_some();
        debug!(
            entity = %b.entity,
            component = I::type_name(),
            replaced,
            "internal component created"
        );
        Ok(())
    }

    pub fn set_internal_value(&self, world: &mut World, value: I::Value) -> Result<(), AccessError> {
        self.internal_mut(world)?.set_value(value);
        trace!(?value, "internal value written");
        Ok(())
    }

    pub fn internal_value(&self, world: &World) -> Result<I::Value, AccessError> {
        Ok(self.internal(world)?.value())
    }

    /// The internal value scaled by `multiplier`; the stored value is unchanged.
    pub fn multiply_internal_value(
        &self,
        world: &World,
        multiplier: I::Value,
    ) -> Result<I::Value, AccessError> {
        Ok(self.internal(world)?.multiply_value(multiplier))
    }
}

impl<T: TransformAccess, I: ValueAccess> Default for AccessAdapter<T, I> {
    fn default() -> Self {
        Self::new(AccessConfig::default())
    }
}

// Manual impls: deriving would put needless `T: Clone`/`I: Debug` bounds on them.
impl<T, I> Clone for AccessAdapter<T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for AccessAdapter<T, I> {}

impl<T, I> std::fmt::Debug for AccessAdapter<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessAdapter")
            .field("entity", &self.binding.map(|b| b.entity))
            .field("config", &self.config)
            .finish()
    }
}

impl<T: TransformAccess, I: ValueAccess> Component for AccessAdapter<T, I> {
    fn type_name() -> &'static str {
        "AccessAdapter"
    }
}

/// Build an adapter for `entity` and store it on the entity as a component.
///
/// Returns a copy of the stored adapter for the caller to drive.
pub fn attach_adapter<T: TransformAccess, I: ValueAccess>(
    world: &mut World,
    entity: Entity,
    config: AccessConfig,
) -> Result<AccessAdapter<T, I>, AccessError> {
    let adapter = AccessAdapter::attached(entity, config);
    world.insert(entity, adapter).map_err(AccessError::World)?;
    Ok(adapter)
}
