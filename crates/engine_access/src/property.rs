//! Named, string-valued property access.
//!
//! Components opt in by implementing [`Reflect`], which lists each property
//! as a getter/setter pair named after the getter. A [`PropertyRegistry`]
//! finds components by their type name (through [`ComponentTypeId`]) and
//! reads or writes properties as JSON text, so editor-style callers can work
//! on an entity without knowing its concrete component types.

use std::collections::{BTreeMap, HashMap};

use engine_component::{Component, ComponentTypeId, Entity, World, WorldError};
use engine_math::Transform2D;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::capability::ValueAccess;
use crate::internal::InternalComponent;

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("component '{0}' has no registered properties")]
    UnknownComponent(String),

    #[error("component '{component}' has no property '{property}'")]
    UnknownProperty {
        component: &'static str,
        property: String,
    },

    /// The text was not JSON, or did not fit the property's type.
    #[error("invalid value for '{component}.{property}': {source}")]
    InvalidValue {
        component: &'static str,
        property: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

type Getter<C> = Box<dyn Fn(&C) -> Result<Value, serde_json::Error> + Send + Sync>;
type Setter<C> = Box<dyn Fn(&mut C, Value) -> Result<(), serde_json::Error> + Send + Sync>;

struct Property<C> {
    get: Getter<C>,
    set: Setter<C>,
}

/// The properties of one component type.
pub struct PropertyList<C> {
    properties: BTreeMap<&'static str, Property<C>>,
}

impl<C: Component> PropertyList<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    /// Add a property backed by `getter`/`setter`. A later entry with the
    /// same name replaces an earlier one.
    #[must_use]
    pub fn with<V>(mut self, name: &'static str, getter: fn(&C) -> V, setter: fn(&mut C, V)) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
    {
        self.properties.insert(
            name,
            Property {
                get: Box::new(move |component| serde_json::to_value(getter(component))),
                set: Box::new(move |component, value| {
                    setter(component, serde_json::from_value(value)?);
                    Ok(())
                }),
            },
        );
        self
    }

    fn lookup(&self, property: &str) -> Result<(&'static str, &Property<C>), PropertyError> {
        self.properties
            .get_key_value(property)
            .map(|(name, p)| (*name, p))
            .ok_or_else(|| PropertyError::UnknownProperty {
                component: C::type_name(),
                property: property.to_string(),
            })
    }
}

impl<C: Component> Default for PropertyList<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A component type that exposes named properties.
pub trait Reflect: Component + Sized {
    fn properties() -> PropertyList<Self>;
}

impl Reflect for Transform2D {
    fn properties() -> PropertyList<Self> {
        PropertyList::<Self>::new()
            .with("angle", Transform2D::angle, Transform2D::set_angle)
            .with("position", Transform2D::position, Transform2D::set_position)
    }
}

impl Reflect for InternalComponent {
    fn properties() -> PropertyList<Self> {
        PropertyList::<Self>::new().with(
            "value",
            <InternalComponent as ValueAccess>::value,
            <InternalComponent as ValueAccess>::set_value,
        )
    }
}

/// [`PropertyList`] with the component type erased.
trait ErasedProperties: Send + Sync {
    fn names(&self) -> Vec<&'static str>;
    fn get(&self, world: &World, entity: Entity, property: &str) -> Result<Value, PropertyError>;
    fn set(
        &self,
        world: &mut World,
        entity: Entity,
        property: &str,
        value: &str,
    ) -> Result<(), PropertyError>;
}

impl<C: Component> ErasedProperties for PropertyList<C> {
    fn names(&self) -> Vec<&'static str> {
        self.properties.keys().copied().collect()
    }

    fn get(&self, world: &World, entity: Entity, property: &str) -> Result<Value, PropertyError> {
        let (name, prop) = self.lookup(property)?;
        let component = world.get::<C>(entity)?;
        (prop.get)(component).map_err(|source| PropertyError::InvalidValue {
            component: C::type_name(),
            property: name,
            source,
        })
    }

    fn set(
        &self,
        world: &mut World,
        entity: Entity,
        property: &str,
        value: &str,
    ) -> Result<(), PropertyError> {
        let (name, prop) = self.lookup(property)?;
        let invalid = |source| PropertyError::InvalidValue {
            component: C::type_name(),
            property: name,
            source,
        };
        let parsed: Value = serde_json::from_str(value).map_err(invalid)?;
        let component = world.get_mut::<C>(entity)?;
        (prop.set)(component, parsed).map_err(invalid)
    }
}

/// Property lists keyed by component type id.
#[derive(Default)]
pub struct PropertyRegistry {
    components: HashMap<ComponentTypeId, (&'static str, Box<dyn ErasedProperties>)>,
}

impl PropertyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry knowing [`Transform2D`] and [`InternalComponent`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<Transform2D>().register::<InternalComponent>();
        registry
    }

    pub fn register<C: Reflect>(&mut self) -> &mut Self {
        debug!(component = C::type_name(), "registered properties");
        let props: Box<dyn ErasedProperties> = Box::new(C::properties());
        self.components
            .insert(C::component_type_id(), (C::type_name(), props));
        self
    }

    fn lookup(&self, component: &str) -> Result<&dyn ErasedProperties, PropertyError> {
        self.components
            .get(&ComponentTypeId::from_name(component))
            .map(|(_, props)| props.as_ref())
            .ok_or_else(|| PropertyError::UnknownComponent(component.to_string()))
    }

    /// Property names of a component type, sorted.
    pub fn property_names(&self, component: &str) -> Result<Vec<&'static str>, PropertyError> {
        Ok(self.lookup(component)?.names())
    }

    /// Read a property as JSON text, e.g. `"0.5"` or `"[1.0,2.0]"`.
    pub fn get_property(
        &self,
        world: &World,
        entity: Entity,
        component: &str,
        property: &str,
    ) -> Result<String, PropertyError> {
        Ok(self.lookup(component)?.get(world, entity, property)?.to_string())
    }

    /// Write a property from JSON text. The component is left unchanged if
    /// the text does not parse into the property's type.
    pub fn set_property(
        &self,
        world: &mut World,
        entity: Entity,
        component: &str,
        property: &str,
        value: &str,
    ) -> Result<(), PropertyError> {
        self.lookup(component)?.set(world, entity, property, value)?;
        trace!(%entity, component, property, value, "property written");
        Ok(())
    }

    /// Every registered property of every component on `entity`, as JSON
    /// text. Components without registered properties are skipped.
    pub fn inspect(
        &self,
        world: &World,
        entity: Entity,
    ) -> Result<BTreeMap<&'static str, BTreeMap<&'static str, String>>, PropertyError> {
        let mut snapshot = BTreeMap::new();
        for component in world.component_names(entity)? {
            let Ok(props) = self.lookup(component) else {
                trace!(%entity, component, "no properties registered, skipped");
                continue;
            };
            let mut values = BTreeMap::new();
            for name in props.names() {
                values.insert(name, props.get(world, entity, name)?.to_string());
            }
            snapshot.insert(component, values);
        }
        Ok(snapshot)
    }
}

impl std::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.components.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("PropertyRegistry")
            .field("components", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec2;

    use super::*;
    use crate::{AccessAdapter, AccessConfig};

    fn setup() -> (World, Entity, PropertyRegistry) {
        let mut world = World::new();
        let e = world.spawn();
        world
            .insert(e, Transform2D::from_position_angle(Vec2::new(1.0, 2.0), 0.5))
            .unwrap();
        world.insert(e, InternalComponent::new(7)).unwrap();
        (world, e, PropertyRegistry::with_defaults())
    }

    #[test]
    fn test_property_names() {
        let registry = PropertyRegistry::with_defaults();
        assert_eq!(
            registry.property_names("Transform2D").unwrap(),
            vec!["angle", "position"]
        );
        assert_eq!(registry.property_names("InternalComponent").unwrap(), vec!["value"]);
        assert!(matches!(
            registry.property_names("Sprite"),
            Err(PropertyError::UnknownComponent(name)) if name == "Sprite"
        ));
    }

    #[test]
    fn test_get_property_as_json_text() {
        let (world, e, registry) = setup();
        assert_eq!(registry.get_property(&world, e, "Transform2D", "angle").unwrap(), "0.5");
        assert_eq!(
            registry.get_property(&world, e, "Transform2D", "position").unwrap(),
            "[1.0,2.0]"
        );
        assert_eq!(registry.get_property(&world, e, "InternalComponent", "value").unwrap(), "7");
    }

    #[test]
    fn test_set_property_from_json_text() {
        let (mut world, e, registry) = setup();
        registry
            .set_property(&mut world, e, "Transform2D", "position", "[3.5, -4.0]")
            .unwrap();
        registry
            .set_property(&mut world, e, "InternalComponent", "value", "-12")
            .unwrap();
        assert_eq!(
            world.get::<Transform2D>(e).unwrap().position,
            Vec2::new(3.5, -4.0)
        );
        assert_eq!(world.get::<InternalComponent>(e).unwrap().value(), -12);
    }

    #[test]
    fn test_writes_are_visible_through_the_adapter() {
        let (mut world, e, registry) = setup();
        let adapter: AccessAdapter = AccessAdapter::attached(e, AccessConfig::new());
        registry
            .set_property(&mut world, e, "Transform2D", "angle", "1.25")
            .unwrap();
        assert_eq!(adapter.angle(&world).unwrap(), 1.25);
        adapter.set_internal_value(&mut world, 99).unwrap();
        assert_eq!(registry.get_property(&world, e, "InternalComponent", "value").unwrap(), "99");
    }

    #[test]
    fn test_invalid_values_leave_component_untouched() {
        let (mut world, e, registry) = setup();
        for text in ["not json", "\"fast\"", "1.5", "[1, 2]"] {
            assert!(matches!(
                registry.set_property(&mut world, e, "InternalComponent", "value", text),
                Err(PropertyError::InvalidValue { component: "InternalComponent", property: "value", .. })
            ));
        }
        assert_eq!(world.get::<InternalComponent>(e).unwrap().value(), 7);
    }

    #[test]
    fn test_unknown_property_and_missing_component() {
        let (mut world, e, registry) = setup();
        assert!(matches!(
            registry.get_property(&world, e, "Transform2D", "scale"),
            Err(PropertyError::UnknownProperty { property, .. }) if property == "scale"
        ));
        let bare = world.spawn();
        assert!(matches!(
            registry.set_property(&mut world, bare, "Transform2D", "angle", "0.0"),
            Err(PropertyError::World(WorldError::ComponentNotFound { .. }))
        ));
    }

    #[test]
    fn test_inspect_skips_unregistered_components() {
        let (mut world, e, registry) = setup();
        crate::attach_adapter::<Transform2D, InternalComponent>(&mut world, e, AccessConfig::new())
            .unwrap();
        let snapshot = registry.inspect(&world, e).unwrap();
        assert_eq!(
            snapshot.keys().copied().collect::<Vec<_>>(),
            vec!["InternalComponent", "Transform2D"]
        );
        assert_eq!(snapshot["Transform2D"]["angle"], "0.5");
        assert_eq!(snapshot["InternalComponent"]["value"], "7");
    }
}
