//! Grass brush: stochastic placement and removal of grass points.
//!
//! A stroke starts from a surface hit under the cursor. Painting scatters
//! candidates over a disc around the hit and keeps those that land on the
//! surface; erasing picks stored points inside the disc. Both passes draw from
//! a caller-supplied random source so strokes are reproducible under a seed.

pub mod state;
pub mod sampler;
pub mod eraser;
pub mod tool;

// Re-exports
pub use state::BrushState;
pub use sampler::sample;
pub use eraser::select;
pub use tool::{BrushEvent, BrushPreview, BrushTool, Modifiers, MouseButton, StrokeOutcome, ToolMode, ToolResponse};
