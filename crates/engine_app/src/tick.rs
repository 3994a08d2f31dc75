//! Fixed-timestep tick loop.
//!
//! The loop owns a [`World`] with a single demo entity carrying a
//! [`Transform2D`], an [`InternalComponent`](engine_access::InternalComponent)
//! and an [`AccessAdapter`]. Each tick runs the systems in
//! [`crate::systems`] through the adapter.

use std::time::{Duration, Instant};

use engine_access::{
    AccessAdapter, AccessConfig, AccessError, PropertyError, PropertyRegistry, attach_adapter,
};
use engine_component::{Entity, World, WorldError};
use engine_math::{Transform2D, Vec2};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::systems;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("tick rate must be a finite number above zero, got {0}")]
    InvalidTickRate(f64),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second. Must be finite and above zero.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Rotation applied to the demo entity, in radians per second.
    pub angular_speed: f32,
    /// Adapter configuration for the demo entity.
    pub access: AccessConfig,
}

impl TickConfig {
    /// Check that the tick rate yields a representable tick duration.
    pub fn validate(&self) -> Result<(), TickError> {
        if self.tick_rate.is_finite() && self.tick_rate > 0.0 {
            Ok(())
        } else {
            Err(TickError::InvalidTickRate(self.tick_rate))
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            angular_speed: std::f32::consts::PI,
            access: AccessConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
    world: World,
    subject: Entity,
    adapter: AccessAdapter,
    properties: PropertyRegistry,
}

impl TickLoop {
    /// Validate `config`, then spawn the demo entity and wire its adapter.
    pub fn new(config: TickConfig) -> Result<Self, TickError> {
        config.validate()?;

        let mut world = World::new();
        let subject = world.spawn();
        world.insert(subject, Transform2D::from_position(Vec2::ZERO))?;
        let adapter: AccessAdapter = attach_adapter(&mut world, subject, config.access)?;
        adapter.create_internal(&mut world)?;
        info!(entity = %subject, "demo entity initialized");

        Ok(Self {
            tick_id: 0,
            config,
            world,
            subject,
            adapter,
            properties: PropertyRegistry::with_defaults(),
        })
    }

    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn adapter(&self) -> &AccessAdapter {
        &self.adapter
    }

    /// Write a property of the demo entity by component and property name,
    /// with the value given as JSON text.
    pub fn set_property(
        &mut self,
        component: &str,
        property: &str,
        value: &str,
    ) -> Result<(), TickError> {
        self.properties
            .set_property(&mut self.world, self.subject, component, property, value)?;
        info!(component, property, value, "property set");
        Ok(())
    }

    /// Run one tick with the given timestep in seconds.
    pub fn tick(&mut self, dt: f64) -> Result<(), TickError> {
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, dt, "tick start");

        systems::count_up(&self.adapter, &mut self.world)?;
        let angle = systems::spin(
            &self.adapter,
            &mut self.world,
            self.config.angular_speed,
            dt as f32,
        )?;

        debug!(tick_id = self.tick_id, angle, "tick done");
        Ok(())
    }

    /// Run the loop for the configured number of ticks, or indefinitely.
    pub fn run(&mut self) -> Result<(), TickError> {
        self.config.validate()?;
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(tick_duration.as_secs_f64())?;

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
        Ok(())
    }

    /// Log the demo entity's properties and despawn it, consuming the loop.
    pub fn shutdown(mut self) -> Result<World, TickError> {
        let snapshot = self.properties.inspect(&self.world, self.subject)?;
        self.world.despawn(self.subject)?;
        info!(entity = %self.subject, ?snapshot, "demo entity deinitialized");
        Ok(self.world)
    }
}

#[cfg(test)]
mod tests {
    use engine_access::InternalComponent;

    use super::*;

    #[test]
    fn test_new_wires_demo_entity() {
        let tick_loop = TickLoop::new(TickConfig::default()).unwrap();
        let world = tick_loop.world();
        let entity = tick_loop.adapter().entity().unwrap();
        assert_eq!(world.entity_count(), 1);
        assert_eq!(
            world.component_names(entity).unwrap(),
            vec!["AccessAdapter", "InternalComponent", "Transform2D"]
        );
    }

    #[test]
    fn test_rejects_unusable_tick_rates() {
        for tick_rate in [0.0, -60.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = TickConfig {
                tick_rate,
                max_ticks: 1,
                ..TickConfig::default()
            };
            assert!(matches!(
                TickLoop::new(config),
                Err(TickError::InvalidTickRate(_))
            ));
        }
    }

    #[test]
    fn test_run_rechecks_tick_rate() {
        let mut tick_loop = TickLoop::new(TickConfig {
            max_ticks: 1,
            ..TickConfig::default()
        })
        .unwrap();
        tick_loop.config.tick_rate = 0.0;
        assert!(matches!(tick_loop.run(), Err(TickError::InvalidTickRate(r)) if r == 0.0));
        assert_eq!(tick_loop.tick_id(), 0);
    }

    #[test]
    fn test_tick_advances_counter_and_value() {
        let mut tick_loop = TickLoop::new(TickConfig::default()).unwrap();
        tick_loop.tick(1.0 / 60.0).unwrap();
        tick_loop.tick(1.0 / 60.0).unwrap();
        assert_eq!(tick_loop.tick_id(), 2);
        assert_eq!(
            tick_loop.adapter().internal_value(tick_loop.world()).unwrap(),
            InternalComponent::DEFAULT_VALUE + 2
        );
    }

    #[test]
    fn test_tick_spins_transform() {
        let config = TickConfig {
            angular_speed: 2.0,
            ..TickConfig::default()
        };
        let mut tick_loop = TickLoop::new(config).unwrap();
        tick_loop.tick(0.5).unwrap();
        assert_eq!(tick_loop.adapter().angle(tick_loop.world()).unwrap(), 1.0);
    }

    #[test]
    fn test_set_property_feeds_the_systems() {
        let mut tick_loop = TickLoop::new(TickConfig::default()).unwrap();
        tick_loop.set_property("InternalComponent", "value", "10").unwrap();
        tick_loop.tick(1.0 / 60.0).unwrap();
        assert_eq!(tick_loop.adapter().internal_value(tick_loop.world()).unwrap(), 11);
        assert!(matches!(
            tick_loop.set_property("Transform2D", "scale", "2.0"),
            Err(TickError::Property(PropertyError::UnknownProperty { .. }))
        ));
    }

    #[test]
    fn test_run_limited_ticks() {
        let config = TickConfig {
            tick_rate: 1000.0,
            max_ticks: 5,
            ..TickConfig::default()
        };
        let mut tick_loop = TickLoop::new(config).unwrap();
        tick_loop.run().unwrap();
        assert_eq!(tick_loop.tick_id(), 5);
    }

    #[test]
    fn test_shutdown_despawns_entity() {
        let tick_loop = TickLoop::new(TickConfig::default()).unwrap();
        let world = tick_loop.shutdown().unwrap();
        assert_eq!(world.entity_count(), 0);
    }
}
