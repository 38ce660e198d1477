//! Interactive brush tool.
//!
//! Turns pointer events from a host viewport into paint and erase strokes.
//! The host supplies the cursor ray and scene surface for each event; the
//! tool owns the brush settings and the active mode.

use rand::Rng;

use crate::core::types::{Vec3, Vec4};
use crate::core::Result;
use crate::grass::{PointStore, RemovalSet};
use crate::math::Ray;
use crate::surface::{SurfaceHit, SurfaceQuery};
use super::state::BrushState;
use super::{eraser, sampler};

/// Preview color for painting (RGB, alpha follows density).
const PAINT_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);
/// Preview color for erasing (RGB, alpha follows density).
const ERASE_COLOR: Vec3 = Vec3::new(0.7, 0.0, 0.0);
/// Preview alpha at full density.
const PREVIEW_MAX_ALPHA: f32 = 0.8;

/// Which tool tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Editing render settings; the brush is inactive
    #[default]
    Settings,
    Paint,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

/// Pointer event delivered by the host viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushEvent {
    /// Cursor moved with no button held
    Hover,
    Press(MouseButton),
    Drag(MouseButton),
    Scroll { delta: f32, modifiers: Modifiers },
}

/// Disc to draw under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushPreview {
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
    /// Linear RGBA
    pub color: Vec4,
}

/// What a stroke did to the store. Hosts can use this to record undo steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    Painted { added: usize },
    Erased { removed: usize },
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolResponse {
    /// Present whenever the cursor is over a surface in paint or erase mode
    pub preview: Option<BrushPreview>,
    pub stroke: Option<StrokeOutcome>,
    /// The host should not forward the event to its own camera controls
    pub consumed: bool,
}

/// Brush tool state: mode, brush settings, and an enable switch.
#[derive(Debug, Clone, Default)]
pub struct BrushTool {
    mode: ToolMode,
    brush: BrushState,
    disabled: bool,
}

impl BrushTool {
    pub fn new(mode: ToolMode, brush: BrushState) -> Self {
        Self {
            mode,
            brush: brush.clamped(),
            disabled: false,
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    /// Replace the brush; values are clamped into range.
    pub fn set_brush(&mut self, brush: BrushState) {
        self.brush = brush.clamped();
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Hosts disable the tool while the scene is running or misconfigured.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Handle a viewport event.
    ///
    /// Nothing happens unless the tool is enabled, in paint or erase mode, and
    /// `cursor_ray` hits `surface`. A primary press or drag applies a stroke;
    /// shift+scroll resizes the brush and alt+scroll changes its density.
    pub fn handle<S, P, R>(
        &mut self,
        event: BrushEvent,
        cursor_ray: &Ray,
        surface: &S,
        store: &mut P,
        rng: &mut R,
    ) -> Result<ToolResponse>
    where
        S: SurfaceQuery + ?Sized,
        P: PointStore + ?Sized,
        R: Rng,
    {
        if self.disabled || self.mode == ToolMode::Settings {
            return Ok(ToolResponse::default());
        }
        let Some(hit) = surface.raycast(cursor_ray, f32::INFINITY) else {
            return Ok(ToolResponse::default());
        };

        let mut response = ToolResponse::default();
        match event {
            BrushEvent::Press(MouseButton::Primary) | BrushEvent::Drag(MouseButton::Primary) => {
                response.stroke = self.stroke(&hit, surface, store, rng)?;
                response.consumed = true;
            }
            BrushEvent::Scroll { delta, modifiers } if modifiers.shift => {
                self.brush.adjust_radius(delta);
                response.consumed = true;
            }
            BrushEvent::Scroll { delta, modifiers } if modifiers.alt => {
                self.brush.adjust_density(delta);
                response.consumed = true;
            }
            _ => {}
        }
        response.preview = self.preview(&hit);

        Ok(response)
    }

    /// Apply one stroke of the current mode at `hit`.
    ///
    /// Erasing selects against a fresh snapshot and removes in the same step,
    /// so the selection is never stale. Returns `None` in settings mode.
    pub fn stroke<S, P, R>(
        &self,
        hit: &SurfaceHit,
        surface: &S,
        store: &mut P,
        rng: &mut R,
    ) -> Result<Option<StrokeOutcome>>
    where
        S: SurfaceQuery + ?Sized,
        P: PointStore + ?Sized,
        R: Rng,
    {
        match self.mode {
            ToolMode::Paint => {
                let placed = sampler::sample(hit, &self.brush, surface, rng);
                let added = placed.len();
                store.add(placed);
                log::debug!("Painted {} blades at {:?} (radius {})", added, hit.position, self.brush.radius);
                Ok(Some(StrokeOutcome::Painted { added }))
            }
            ToolMode::Erase => {
                let snapshot = store.snapshot();
                let picked = eraser::select(&snapshot.positions, hit, &self.brush, rng);
                let removed = store.remove(&RemovalSet::new(picked, snapshot.revision))?;
                log::debug!("Erased {} of {} blades at {:?}", removed, snapshot.positions.len(), hit.position);
                Ok(Some(StrokeOutcome::Erased { removed }))
            }
            ToolMode::Settings => Ok(None),
        }
    }

    /// Preview disc for a hit, or `None` in settings mode.
    pub fn preview(&self, hit: &SurfaceHit) -> Option<BrushPreview> {
        let rgb = match self.mode {
            ToolMode::Paint => PAINT_COLOR,
            ToolMode::Erase => ERASE_COLOR,
            ToolMode::Settings => return None,
        };
        Some(BrushPreview {
            center: hit.position,
            normal: hit.normal,
            radius: self.brush.radius,
            color: rgb.extend(self.brush.density * PREVIEW_MAX_ALPHA),
        })
    }
}
