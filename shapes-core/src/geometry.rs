/// Geometry primitives for indexed-face solids
use nalgebra::Point3;
use thiserror::Error;

/// An RGB colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 8-bit channels
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Face colours for indexed solids, cycled by face position
pub const PALETTE: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
    Color::CYAN,
];

/// Colour of face number `face_index` of any indexed solid
pub fn face_color(face_index: usize) -> Color {
    PALETTE[face_index % PALETTE.len()]
}

/// A vertex table entry
pub type Vertex = [f64; 3];

/// A face: vertex indices drawn in order as a triangle fan
pub type Face = &'static [usize];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("solid `{solid}`: face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        solid: &'static str,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// A named polyhedron given by a vertex table and a face table
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    pub name: &'static str,
    pub vertices: &'static [Vertex],
    pub faces: &'static [Face],
}

impl Solid {
    pub const fn new(name: &'static str, vertices: &'static [Vertex], faces: &'static [Face]) -> Self {
        Self { name, vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check that every face index points into the vertex table
    pub fn validate(&self) -> Result<(), SceneError> {
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(SceneError::IndexOutOfRange {
                    solid: self.name,
                    face,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        Ok(())
    }

    /// Vertex positions of one face, in drawing order
    pub fn face_points(&self, face: usize) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.faces[face].iter().map(move |&i| {
            let [x, y, z] = self.vertices[i];
            Point3::new(x, y, z)
        })
    }
}
