//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use fog_grid::CellShape;
use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub overlay: OverlayCfg,
    #[serde(default)]
    pub tracking: TrackingCfg,
    #[serde(default)]
    pub redraw: RedrawCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OverlayCfg {
    /// Cell shape (hexagon, square)
    #[serde(default = "default_cell_shape")]
    pub cell_shape: String,
    /// Real-world cell diameter in meters
    #[serde(default = "default_cell_diameter")]
    pub cell_diameter_m: f64,
    /// Reveal strategy (radius, point)
    #[serde(default = "default_reveal")]
    pub reveal: String,
    /// Reveal radius in pixels (radius strategy only)
    #[serde(default = "default_reveal_radius")]
    pub reveal_radius_px: f64,
}

fn default_cell_shape() -> String {
    "hexagon".to_string()
}

fn default_cell_diameter() -> f64 {
    100.0
}

fn default_reveal() -> String {
    "radius".to_string()
}

fn default_reveal_radius() -> f64 {
    150.0
}

#[derive(Deserialize, Clone, Debug)]
pub struct TrackingCfg {
    /// Minimal per-axis movement in degrees for a position update to count
    #[serde(default = "default_movement_threshold")]
    pub movement_threshold_deg: f64,
    /// Re-center the map on accepted position updates
    #[serde(default = "default_recenter")]
    pub recenter: bool,
}

fn default_movement_threshold() -> f64 {
    0.001
}

fn default_recenter() -> bool {
    true
}

impl Default for TrackingCfg {
    fn default() -> TrackingCfg {
        TrackingCfg {
            movement_threshold_deg: default_movement_threshold(),
            recenter: default_recenter(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RedrawCfg {
    /// Quiescence window for coalescing viewport changes
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for RedrawCfg {
    fn default() -> RedrawCfg {
        RedrawCfg {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// How position updates uncover cells
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum RevealStrategy {
    /// Reveal every cell intersecting a pixel circle around the position
    Radius,
    /// Reveal the single cell containing the position
    Point,
}

impl RevealStrategy {
    pub fn from_str(val: &str) -> Result<RevealStrategy, String> {
        match val {
            "radius" => Ok(RevealStrategy::Radius),
            "point" => Ok(RevealStrategy::Point),
            _ => Err(format!("Unexpected enum value '{}'", val)),
        }
    }
    pub fn as_str(&self) -> &'static str {
        match *self {
            RevealStrategy::Radius => "radius",
            RevealStrategy::Point => "point",
        }
    }
}

/// Validated overlay settings
#[derive(Clone, Debug)]
pub struct OverlaySettings {
    pub cell_shape: CellShape,
    pub cell_diameter_m: f64,
    pub reveal: RevealStrategy,
    pub reveal_radius_px: f64,
}

impl<'a> Config<'a, OverlayCfg> for OverlaySettings {
    fn from_config(cfg: &OverlayCfg) -> Result<Self, String> {
        if !cfg.cell_diameter_m.is_finite() || cfg.cell_diameter_m <= 0.0 {
            return Err(format!(
                "Invalid cell_diameter_m {}",
                cfg.cell_diameter_m
            ));
        }
        if !cfg.reveal_radius_px.is_finite() || cfg.reveal_radius_px <= 0.0 {
            return Err(format!(
                "Invalid reveal_radius_px {}",
                cfg.reveal_radius_px
            ));
        }
        Ok(OverlaySettings {
            cell_shape: CellShape::from_str(&cfg.cell_shape)?,
            cell_diameter_m: cfg.cell_diameter_m,
            reveal: RevealStrategy::from_str(&cfg.reveal)?,
            reveal_radius_px: cfg.reveal_radius_px,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[overlay]
# Cell shapes: hexagon, square
cell_shape = "hexagon"
cell_diameter_m = 100.0
# Reveal strategies: radius, point
reveal = "radius"
reveal_radius_px = 150.0

[tracking]
# Minimal per-axis movement in degrees for a position update to count
movement_threshold_deg = 0.001
recenter = true

[redraw]
# Quiescence window for coalescing viewport changes
debounce_ms = 200
"#;
        toml.to_string()
    }
}

pub const DEFAULT_CONFIG: &str = r#"
[overlay]
cell_shape = "hexagon"
cell_diameter_m = 100.0
reveal = "radius"
reveal_radius_px = 150.0

[tracking]
movement_threshold_deg = 0.001
recenter = true

[redraw]
debounce_ms = 200
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").unwrap();
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera
        .render(path, &context)
        .map_err(|e| format!("Template error: {}", e.source().unwrap()))?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
