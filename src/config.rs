//! Tuning for the two canvas layers.
//!
//! Pages pass these as JSON; every field has a default, so `{}` or a partial
//! object is valid.

use crate::color::{Color, HueCycle};
use crate::error::FieldError;
use serde::Deserialize;

/// How connection lines are drawn between points.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    /// Points farther apart than this are not connected.
    pub radius: f64,
    /// Alpha of a connection between coincident points.
    pub base_alpha: f64,
    pub line_width: f64,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        ConnectionStyle {
            radius: 100.0,
            base_alpha: 0.3,
            line_width: 1.0,
        }
    }
}

/// Per-particle motion constants and the ranges particles are spawned in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwarmPhysics {
    pub influence_radius: f64,
    pub attraction: f64,
    pub spring: f64,
    /// Fraction of velocity kept each frame.
    pub damping: f64,
    /// Initial velocity per axis is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub size_range: [f64; 2],
    pub opacity_range: [f64; 2],
}

impl Default for SwarmPhysics {
    fn default() -> Self {
        SwarmPhysics {
            influence_radius: 150.0,
            attraction: 0.01,
            spring: 0.002,
            damping: 0.99,
            max_speed: 0.5,
            size_range: [1.0, 3.0],
            opacity_range: [0.3, 0.8],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub particle_count: usize,
    pub color: Color,
    pub hues: HueCycle,
    pub physics: SwarmPhysics,
    pub connections: ConnectionStyle,
    /// Wraps every frame in a `console.time` span.
    pub profile: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            particle_count: 50,
            color: Color::TEAL,
            hues: HueCycle::default(),
            physics: SwarmPhysics::default(),
            connections: ConnectionStyle::default(),
            profile: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub color: Color,
    pub hues: HueCycle,
    pub connections: ConnectionStyle,
    pub profile: bool,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        ConstellationConfig {
            color: Color::TEAL,
            hues: HueCycle {
                index_step: 60.0,
                rate: 0.1,
            },
            connections: ConnectionStyle {
                radius: 300.0,
                base_alpha: 0.3,
                line_width: 2.0,
            },
            profile: false,
        }
    }
}

/// Parses a config from optional JSON; `None` or blank input gives the
/// defaults.
pub fn from_json<T>(json: Option<&str>) -> Result<T, FieldError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match json.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(text) => serde_json::from_str(text).map_err(FieldError::from),
    }
}
