/// Shapes Core Library - Scene data and the fixed-function drawing model
///
/// This library holds everything the viewer draws and how it draws it:
/// the static solids, the keyboard-driven orientation, the modelview stack
/// and a software pipeline that turns triangle fans into projected triangles.

pub mod geometry;
pub mod input;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Color, SceneError, Solid, PALETTE};
pub use input::{parse_key_script, Key, KeyScriptError};
pub use pipeline::{DrawCommand, DrawTarget, FanSink, FixedFunction, Recorder};
pub use projection::Projection;
pub use render::draw_frame;
pub use transform::{MatrixStack, Orientation, Transform, TransformError};
