//! GPU-ready grass uniform (64 bytes, 16-byte aligned).
//!
//! Flattened from `GrassConfig` plus per-frame values. Placed blades live in
//! a separate storage buffer of `SourceVertex`.

use bytemuck::{Pod, Zeroable};

/// GPU uniform for the grass compute pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassParams {
    pub max_segments: u32,
    pub max_bend_angle: f32,
    pub blade_curvature: f32,
    pub blade_height: f32,
    // -- 16 bytes --
    pub blade_height_variance: f32,
    pub blade_width: f32,
    pub blade_width_variance: f32,
    pub wind_scale: f32,
    // -- 16 bytes --
    pub wind_speed: f32,
    pub wind_amount: f32,
    pub lod_distance: f32,
    pub clip_distance: f32,
    // -- 16 bytes --
    pub clip_offset: f32,
    pub time: f32,
    pub blade_count: u32,
    pub _pad: f32,
    // -- 16 bytes --
    // Total: 64 bytes
}
