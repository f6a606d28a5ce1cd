/// Immediate-mode drawing API. `Recorder` captures the calls verbatim;
/// `FixedFunction` runs them through a modelview stack and a projection and
/// hands finished triangles to a `FanSink`.
use nalgebra::{Matrix4, Point3};

use crate::geometry::Color;
use crate::projection::Projection;
use crate::transform::MatrixStack;

pub trait DrawTarget {
    /// Clear colour and depth buffers
    fn clear(&mut self);
    fn load_identity(&mut self);
    fn scale(&mut self, sx: f64, sy: f64, sz: f64);
    /// Rotate `angle` degrees about the axis `(x, y, z)`
    fn rotate(&mut self, angle: f64, x: f64, y: f64, z: f64);
    fn translate(&mut self, x: f64, y: f64, z: f64);
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn color(&mut self, color: Color);
    fn begin_fan(&mut self);
    fn vertex(&mut self, x: f64, y: f64, z: f64);
    fn end_fan(&mut self);
}

/// One recorded [`DrawTarget`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    LoadIdentity,
    Scale(f64, f64, f64),
    Rotate(f64, f64, f64, f64),
    Translate(f64, f64, f64),
    PushMatrix,
    PopMatrix,
    Color(Color),
    BeginFan,
    Vertex(f64, f64, f64),
    EndFan,
}

/// A face as it was drawn: its colour and vertices
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFan {
    pub color: Color,
    pub vertices: Vec<[f64; 3]>,
}

/// Draw target that keeps every call in order
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, command: DrawCommand) -> usize {
        self.commands.iter().filter(|&&c| c == command).count()
    }

    /// Reassemble the fans, pairing each with the colour current at `begin`
    pub fn fans(&self) -> Vec<RecordedFan> {
        let mut fans = Vec::new();
        let mut color = Color::BLACK;
        let mut open: Option<RecordedFan> = None;

        for command in &self.commands {
            match *command {
                DrawCommand::Color(c) => color = c,
                DrawCommand::BeginFan => {
                    open = Some(RecordedFan {
                        color,
                        vertices: Vec::new(),
                    })
                }
                DrawCommand::Vertex(x, y, z) => {
                    if let Some(fan) = open.as_mut() {
                        fan.vertices.push([x, y, z]);
                    }
                }
                DrawCommand::EndFan => fans.extend(open.take()),
                _ => {}
            }
        }
        fans
    }
}

impl DrawTarget for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn load_identity(&mut self) {
        self.commands.push(DrawCommand::LoadIdentity);
    }

    fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        self.commands.push(DrawCommand::Scale(sx, sy, sz));
    }

    fn rotate(&mut self, angle: f64, x: f64, y: f64, z: f64) {
        self.commands.push(DrawCommand::Rotate(angle, x, y, z));
    }

    fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.commands.push(DrawCommand::Translate(x, y, z));
    }

    fn push_matrix(&mut self) {
        self.commands.push(DrawCommand::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.commands.push(DrawCommand::PopMatrix);
    }

    fn color(&mut self, color: Color) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn begin_fan(&mut self) {
        self.commands.push(DrawCommand::BeginFan);
    }

    fn vertex(&mut self, x: f64, y: f64, z: f64) {
        self.commands.push(DrawCommand::Vertex(x, y, z));
    }

    fn end_fan(&mut self) {
        self.commands.push(DrawCommand::EndFan);
    }
}

/// Receiver of projected geometry. Points are in normalised device
/// coordinates.
pub trait FanSink {
    fn clear(&mut self, color: Color);
    fn fill_triangle(&mut self, triangle: [Point3<f64>; 3], color: Color);
}

/// Software stand-in for the fixed-function pipeline
pub struct FixedFunction<S> {
    sink: S,
    modelview: MatrixStack,
    projection: Matrix4<f64>,
    clear_color: Color,
    current_color: Color,
    fan: Option<Vec<(Point3<f64>, Color)>>,
}

impl<S: FanSink> FixedFunction<S> {
    pub fn new(sink: S, projection: Projection) -> Self {
        Self {
            sink,
            modelview: MatrixStack::new(),
            projection: projection.matrix(),
            clear_color: Color::BLACK,
            current_color: Color::new(1.0, 1.0, 1.0),
            fan: None,
        }
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection.matrix();
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn modelview(&self) -> &MatrixStack {
        &self.modelview
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: FanSink> DrawTarget for FixedFunction<S> {
    fn clear(&mut self) {
        self.sink.clear(self.clear_color);
    }

    fn load_identity(&mut self) {
        self.modelview.load_identity();
    }

    fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        self.modelview.scale(sx, sy, sz);
    }

    fn rotate(&mut self, angle: f64, x: f64, y: f64, z: f64) {
        self.modelview.rotate(angle, x, y, z);
    }

    fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.modelview.translate(x, y, z);
    }

    fn push_matrix(&mut self) {
        if let Err(e) = self.modelview.push() {
            log::error!("push_matrix ignored: {}", e);
        }
    }

    fn pop_matrix(&mut self) {
        if let Err(e) = self.modelview.pop() {
            log::error!("pop_matrix ignored: {}", e);
        }
    }

    fn color(&mut self, color: Color) {
        self.current_color = color;
    }

    fn begin_fan(&mut self) {
        if self.fan.is_some() {
            log::warn!("begin_fan inside an open fan; discarding the open one");
        }
        self.fan = Some(Vec::new());
    }

    fn vertex(&mut self, x: f64, y: f64, z: f64) {
        let mvp = self.projection * self.modelview.top();
        let color = self.current_color;
        match self.fan.as_mut() {
            Some(fan) => fan.push((mvp.transform_point(&Point3::new(x, y, z)), color)),
            None => log::warn!("vertex ({}, {}, {}) outside begin_fan/end_fan", x, y, z),
        }
    }

    fn end_fan(&mut self) {
        let Some(fan) = self.fan.take() else {
            log::warn!("end_fan without begin_fan");
            return;
        };

        // (v0, vi, vi+1); flat shaded with the colour of the last vertex
        for pair in fan.windows(2).skip(1) {
            let (p1, _) = pair[0];
            let (p2, color) = pair[1];
            self.sink.fill_triangle([fan[0].0, p1, p2], color);
        }
    }
}
