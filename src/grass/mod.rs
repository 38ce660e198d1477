//! Procedural grass data.
//!
//! Placed blades are stored as `SourceVertex` points (surface position and
//! normal) in a `PointStore`. Blade appearance is driven by `GrassConfig`
//! and handed to the GPU as a `GrassParams` uniform.

pub mod config;
pub mod params;
pub mod store;

pub use config::GrassConfig;
pub use params::GrassParams;
pub use store::{GrassStore, PointSnapshot, PointStore, RemovalSet, SourceVertex};

/// Owns grass configuration and placed points, and builds per-frame GPU params.
pub struct GrassSystem {
    config: GrassConfig,
    store: GrassStore,
}

impl GrassSystem {
    /// The config is sanitized on the way in.
    pub fn new(mut config: GrassConfig) -> Self {
        let changed = config.sanitize();
        if !changed.is_empty() {
            log::warn!("Clamped out-of-range grass settings: {}", changed.join(", "));
        }
        Self {
            config,
            store: GrassStore::new(),
        }
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    /// Callers that edit the config should call `GrassConfig::sanitize` afterward.
    pub fn config_mut(&mut self) -> &mut GrassConfig {
        &mut self.config
    }

    pub fn store(&self) -> &GrassStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GrassStore {
        &mut self.store
    }

    /// Build GPU-ready params from current config and elapsed time.
    pub fn build_params(&self, time: f32) -> GrassParams {
        let c = &self.config;
        GrassParams {
            max_segments: c.max_segments,
            max_bend_angle: c.max_bend_angle,
            blade_curvature: c.blade_curvature,
            blade_height: c.blade_height,
            blade_height_variance: c.blade_height_variance,
            blade_width: c.blade_width,
            blade_width_variance: c.blade_width_variance,
            wind_scale: c.wind_scale,
            wind_speed: c.wind_speed,
            wind_amount: c.wind_amount,
            lod_distance: c.lod_distance,
            clip_distance: c.clip_distance,
            clip_offset: c.clip_offset,
            time,
            blade_count: self.store.len() as u32,
            _pad: 0.0,
        }
    }
}
