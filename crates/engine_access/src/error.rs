//! Access-layer error types.

use engine_component::{Entity, WorldError};

/// Errors returned by [`AccessAdapter`](crate::AccessAdapter) operations.
///
/// All of them are precondition violations in the owning scene; none are
/// transient, so callers should not retry.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The adapter has no owning entity, or its entity has been despawned.
    #[error("access adapter is not attached to a live entity")]
    Detached,

    /// A sibling component the operation forwards to is absent.
    #[error("component '{component}' is missing on {entity}")]
    MissingComponent {
        component: &'static str,
        entity: Entity,
    },

    /// `create_internal` found an existing component under
    /// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("component '{component}' already exists on {entity}")]
    DuplicateComponent {
        component: &'static str,
        entity: Entity,
    },

    /// Any other failure reported by the world.
    #[error(transparent)]
    World(WorldError),
}

impl From<WorldError> for AccessError {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::EntityNotFound(_) => Self::Detached,
            WorldError::ComponentNotFound { component, entity } => {
                Self::MissingComponent { component, entity }
            }
            other => Self::World(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_component::ComponentTypeId;

    use super::*;

    #[test]
    fn test_world_errors_map_to_access_taxonomy() {
        let e = Entity::from_raw(3);
        assert!(matches!(
            AccessError::from(WorldError::EntityNotFound(e)),
            AccessError::Detached
        ));
        assert!(matches!(
            AccessError::from(WorldError::ComponentNotFound {
                component: "Transform2D",
                entity: e,
            }),
            AccessError::MissingComponent {
                component: "Transform2D",
                ..
            }
        ));
        assert!(matches!(
            AccessError::from(WorldError::TypeMismatch {
                component: "Transform2D",
                type_id: ComponentTypeId(1),
                entity: e,
            }),
            AccessError::World(_)
        ));
    }

    #[test]
    fn test_messages_name_component_and_entity() {
        let err = AccessError::MissingComponent {
            component: "InternalComponent",
            entity: Entity::from_raw(9),
        };
        assert_eq!(
            err.to_string(),
            "component 'InternalComponent' is missing on Entity(9)"
        );
    }
}
