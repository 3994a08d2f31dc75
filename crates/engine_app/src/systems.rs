//! Per-tick systems driven through the access adapter.

use engine_access::{AccessAdapter, AccessError};
use engine_component::World;
use tracing::info;

/// Read the internal value, log it, and write it back incremented.
///
/// Returns the new value.
pub fn count_up(adapter: &AccessAdapter, world: &mut World) -> Result<i32, AccessError> {
    let value = adapter.internal_value(world)?;
    info!(value, "value() => {value}");
    let next = value.wrapping_add(1);
    adapter.set_internal_value(world, next)?;
    Ok(next)
}

/// Rotate the transform by `angular_speed * dt` radians.
///
/// Returns the new angle.
pub fn spin(
    adapter: &AccessAdapter,
    world: &mut World,
    angular_speed: f32,
    dt: f32,
) -> Result<f32, AccessError> {
    let angle = adapter.angle(world)? + angular_speed * dt;
    adapter.set_angle(world, angle)?;
    Ok(angle)
}
