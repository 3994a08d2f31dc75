//! # engine_app — adapter demo
//!
//! Spawns one entity, attaches an access adapter to it, and drives it from a
//! fixed-timestep loop: every tick the internal value is logged and
//! incremented and the transform is rotated.

mod systems;
mod tick;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_access::AccessConfig;
use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "engine_app", about = "Drive an entity through its access adapter")]
struct Args {
    /// Number of ticks to run (0 = run until interrupted)
    #[arg(short, long, default_value_t = 10)]
    ticks: u64,

    /// Target ticks per second
    #[arg(long, default_value_t = 60.0, value_parser = parse_tick_rate)]
    tick_rate: f64,

    /// Rotation applied each second, in radians
    #[arg(long, default_value_t = std::f32::consts::PI)]
    angular_speed: f32,

    /// Adapter config as JSON, e.g. '{"duplicate_policy":"keep"}'
    #[arg(long)]
    access: Option<String>,

    /// Initial property value, e.g. 'Transform2D.position=[3,4]' (repeatable)
    #[arg(long = "set", value_parser = parse_assignment)]
    assignments: Vec<Assignment>,
}

/// A `Component.property=json` pair from the command line.
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    component: String,
    property: String,
    value: String,
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("must be a finite number above zero, got {rate}"))
    }
}

fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (path, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Component.property=value, got '{s}'"))?;
    let (component, property) = path
        .split_once('.')
        .ok_or_else(|| format!("expected Component.property before '=', got '{path}'"))?;
    if component.is_empty() || property.is_empty() {
        return Err(format!("empty component or property name in '{path}'"));
    }
    Ok(Assignment {
        component: component.to_string(),
        property: property.to_string(),
        value: value.to_string(),
    })
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let args = Args::parse();
    let access = match args.access.as_deref() {
        Some(json) => AccessConfig::from_json(json)?,
        None => AccessConfig::default(),
    };

    info!(ticks = args.ticks, tick_rate = args.tick_rate, "engine_app starting");

    let config = TickConfig {
        tick_rate: args.tick_rate,
        max_ticks: args.ticks,
        angular_speed: args.angular_speed,
        access,
    };

    let mut tick_loop = TickLoop::new(config)?;
    for assignment in &args.assignments {
        tick_loop.set_property(&assignment.component, &assignment.property, &assignment.value)?;
    }
    tick_loop.run()?;
    info!(
        ticks = tick_loop.tick_id(),
        entities = tick_loop.world().entity_count(),
        entity = ?tick_loop.adapter().entity().ok(),
        "tick loop finished"
    );
    tick_loop.shutdown()?;

    info!("engine_app shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tick_rate() {
        assert_eq!(parse_tick_rate("30").unwrap(), 30.0);
        for bad in ["0", "-1", "NaN", "inf", "fast"] {
            assert!(parse_tick_rate(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_cli_rejects_zero_tick_rate() {
        assert!(Args::try_parse_from(["engine_app", "--tick-rate", "0"]).is_err());
        let args = Args::try_parse_from(["engine_app", "--tick-rate", "120"]).unwrap();
        assert_eq!(args.tick_rate, 120.0);
    }

    #[test]
    fn test_parse_assignment() {
        let a = parse_assignment("Transform2D.position=[3, 4]").unwrap();
        assert_eq!(
            a,
            Assignment {
                component: "Transform2D".into(),
                property: "position".into(),
                value: "[3, 4]".into(),
            }
        );
        // Only the first '=' splits; JSON strings may contain more.
        assert_eq!(parse_assignment("A.b=\"x=y\"").unwrap().value, "\"x=y\"");
        assert!(parse_assignment("Transform2D=1").is_err());
        assert!(parse_assignment("Transform2D.angle").is_err());
        assert!(parse_assignment(".angle=1").is_err());
    }

    #[test]
    fn test_cli_collects_repeated_assignments() {
        let args = Args::try_parse_from([
            "engine_app",
            "--set",
            "InternalComponent.value=5",
            "--set",
            "Transform2D.angle=0.5",
        ])
        .unwrap();
        assert_eq!(args.assignments.len(), 2);
        assert_eq!(args.assignments[1].property, "angle");
    }
}
