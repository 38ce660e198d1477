//! Grass rendering configuration (user-facing global settings).
//!
//! Ranges mirror the sliders authors are given in the editor. Anything loaded
//! from disk goes through [`GrassConfig::sanitize`] before use.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Shortest allowed gap between the LOD and clip distances.
pub const LOD_CLIP_GAP: f32 = 0.1;

/// User-facing grass configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    // -- Blade shape -------------------------------------------------------

    /// Segments per blade at full detail (1-40).
    pub max_segments: u32,
    /// Maximum bend angle as a fraction of a right angle (0.1-1).
    pub max_bend_angle: f32,
    /// Curvature exponent along the blade (0.1-100).
    pub blade_curvature: f32,
    /// Blade height in meters.
    pub blade_height: f32,
    /// Random height variation as a fraction of `blade_height` (0-1).
    pub blade_height_variance: f32,
    /// Blade width in meters.
    pub blade_width: f32,
    /// Random width variation as a fraction of `blade_width` (0-1).
    pub blade_width_variance: f32,

    // -- Wind --------------------------------------------------------------

    /// World-space scale of the wind noise lookup.
    pub wind_scale: f32,
    /// Scroll speed of the wind noise.
    pub wind_speed: f32,
    /// Strength of the wind displacement.
    pub wind_amount: f32,

    // -- LOD ---------------------------------------------------------------

    /// Distance beyond which blades drop to reduced detail.
    /// Always at least `LOD_CLIP_GAP` short of `clip_distance`.
    pub lod_distance: f32,
    /// Distance beyond which blades are not drawn.
    pub clip_distance: f32,
    /// Fade band before the clip distance (0-10).
    pub clip_offset: f32,

    // -- Flatten -----------------------------------------------------------

    /// Flatten interactions processed per frame (at least 1).
    pub max_flatten_calculations: u32,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            max_segments: 5,
            max_bend_angle: 0.3,
            blade_curvature: 2.0,
            blade_height: 0.6,
            blade_height_variance: 0.3,
            blade_width: 0.05,
            blade_width_variance: 0.3,
            wind_scale: 0.05,
            wind_speed: 1.0,
            wind_amount: 0.4,
            lod_distance: 30.0,
            clip_distance: 60.0,
            clip_offset: 2.0,
            max_flatten_calculations: 16,
        }
    }
}

impl GrassConfig {
    /// Clamp every field into its allowed range.
    ///
    /// Returns the names of the fields that had to change. Non-finite values
    /// fall to the bottom of their range.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let mut check = |name: &'static str, hit: bool| {
            if hit {
                changed.push(name);
            }
        };

        let segments = self.max_segments.clamp(1, 40);
        check("max_segments", segments != self.max_segments);
        self.max_segments = segments;

        check("max_bend_angle", clamp_into(&mut self.max_bend_angle, 0.1, 1.0));
        check("blade_curvature", clamp_into(&mut self.blade_curvature, 0.1, 100.0));
        check("blade_height", clamp_into(&mut self.blade_height, 0.0, f32::MAX));
        check("blade_height_variance", clamp_into(&mut self.blade_height_variance, 0.0, 1.0));
        check("blade_width", clamp_into(&mut self.blade_width, 0.0, f32::MAX));
        check("blade_width_variance", clamp_into(&mut self.blade_width_variance, 0.0, 1.0));

        check("wind_scale", clamp_into(&mut self.wind_scale, 0.0, f32::MAX));
        check("wind_speed", clamp_into(&mut self.wind_speed, f32::MIN, f32::MAX));
        check("wind_amount", clamp_into(&mut self.wind_amount, 0.0, f32::MAX));

        check("clip_distance", clamp_into(&mut self.clip_distance, 0.0, f32::MAX));
        let lod_max = (self.clip_distance - LOD_CLIP_GAP).max(0.0);
        check("lod_distance", clamp_into(&mut self.lod_distance, 0.0, lod_max));
        check("clip_offset", clamp_into(&mut self.clip_offset, 0.0, 10.0));

        let flatten = self.max_flatten_calculations.max(1);
        check("max_flatten_calculations", flatten != self.max_flatten_calculations);
        self.max_flatten_calculations = flatten;

        changed
    }

    /// Load from a JSON file. Missing fields take their defaults; out-of-range
    /// values are clamped with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&json)?;
        let changed = config.sanitize();
        if !changed.is_empty() {
            log::warn!(
                "Clamped out-of-range grass settings in {}: {}",
                path.display(),
                changed.join(", ")
            );
        }
        Ok(config)
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn clamp_into(value: &mut f32, min: f32, max: f32) -> bool {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    let changed = clamped.to_bits() != value.to_bits();
    *value = clamped;
    changed
}
