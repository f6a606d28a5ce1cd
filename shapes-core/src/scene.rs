/// The fixed scene: a six-coloured cube plus five indexed-face solids
///
/// The tables were worked out on graph paper and are kept exactly as drawn,
/// repeated vertices included.
use crate::geometry::{Color, Face, SceneError, Solid, Vertex};

/// Corners of the unit square every cube face is drawn from
pub const CUBE_SQUARE: [Vertex; 4] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Offset applied to the scaled cube before its faces are drawn
pub const CUBE_OFFSET: [f64; 3] = [3.0, 3.0, 0.0];

/// One face of the cube: the square rotated into place and filled with a colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeFace {
    pub name: &'static str,
    pub color: Color,
    /// `(angle in degrees, axis)`; `None` for the front face
    pub rotation: Option<(f64, [f64; 3])>,
}

pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace { name: "front", color: Color::RED, rotation: None },
    CubeFace { name: "right", color: Color::GREEN, rotation: Some((90.0, [0.0, 1.0, 0.0])) },
    CubeFace { name: "top", color: Color::BLUE, rotation: Some((-90.0, [1.0, 0.0, 0.0])) },
    CubeFace { name: "back", color: Color::CYAN, rotation: Some((180.0, [0.0, 1.0, 0.0])) },
    CubeFace { name: "left", color: Color::MAGENTA, rotation: Some((-90.0, [0.0, 1.0, 0.0])) },
    CubeFace { name: "bottom", color: Color::YELLOW, rotation: Some((90.0, [1.0, 0.0, 0.0])) },
];

static PYRAMID_VERTICES: [Vertex; 5] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.5, 0.5, 0.5],
];

static PYRAMID_FACES: [Face; 5] = [&[0, 1, 2, 3], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[1, 3, 4]];

pub static PYRAMID: Solid = Solid::new("pyramid", &PYRAMID_VERTICES, &PYRAMID_FACES);

static CYLINDER_VERTICES: [Vertex; 48] = [
    // top ring, y = 1
    [0.0, 1.0, 1.0],
    [0.259, 1.0, 0.967],
    [0.5, 1.0, 0.867],
    [0.708, 1.0, 0.708],
    [0.867, 1.0, 0.5],
    [0.967, 1.0, 0.258],
    [1.0, 1.0, 0.0],
    [0.967, 1.0, -0.259],
    [0.867, 1.0, -0.5],
    [0.708, 1.0, -0.708],
    [0.5, 1.0, -0.867],
    [0.259, 1.0, -0.967],
    [0.0, 1.0, -1.0],
    [-0.259, 1.0, -0.967],
    [-0.5, 1.0, -0.867],
    [-0.708, 1.0, -0.708],
    [-0.867, 1.0, -0.5],
    [-0.967, 1.0, -0.259],
    [-1.0, 1.0, 0.0],
    [-0.967, 1.0, -0.259],
    [-0.867, 1.0, 0.5],
    [-0.708, 1.0, 0.708],
    [-0.5, 1.0, 0.867],
    [-0.259, 1.0, 0.967],
    // bottom ring, y = -1
    [0.0, -1.0, 1.0],
    [0.259, -1.0, 0.967],
    [0.5, -1.0, 0.867],
    [0.708, -1.0, 0.708],
    [0.867, -1.0, 0.5],
    [0.967, -1.0, 0.259],
    [1.0, -1.0, 0.0],
    [0.967, -1.0, -0.259],
    [0.867, -1.0, -0.5],
    [0.708, -1.0, -0.708],
    [0.5, -1.0, -0.867],
    [0.259, -1.0, -0.967],
    [0.0, -1.0, -1.0],
    [-0.259, -1.0, -0.967],
    [-0.5, -1.0, -0.867],
    [-0.708, -1.0, -0.708],
    [-0.867, -1.0, -0.5],
    [-0.967, -1.0, -0.259],
    [-1.0, -1.0, 0.0],
    [-0.967, -1.0, -0.259],
    [-0.867, -1.0, 0.5],
    [-0.708, -1.0, 0.708],
    [-0.5, -1.0, 0.867],
    [-0.259, -1.0, 0.967],
];

static CYLINDER_FACES: [Face; 26] = [
    &[0, 1, 24, 25],
    &[1, 2, 25, 26],
    &[2, 3, 26, 27],
    &[3, 4, 27, 28],
    &[4, 5, 28, 29],
    &[5, 6, 29, 30],
    &[6, 7, 30, 31],
    &[7, 8, 31, 32],
    &[8, 9, 32, 33],
    &[9, 10, 33, 34],
    &[10, 11, 34, 35],
    &[11, 12, 35, 36],
    &[12, 13, 36, 37],
    &[13, 14, 37, 38],
    &[14, 15, 38, 39],
    &[15, 16, 39, 40],
    &[16, 17, 40, 41],
    &[17, 18, 41, 42],
    &[18, 19, 42, 43],
    &[19, 20, 43, 44],
    &[20, 21, 44, 45],
    &[21, 22, 45, 46],
    &[22, 23, 46, 47],
    &[23, 1, 47, 24],
    &[
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 0,
    ],
    &[
        25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        24,
    ],
];

pub static CYLINDER: Solid = Solid::new("cylinder", &CYLINDER_VERTICES, &CYLINDER_FACES);

static CONE_VERTICES: [Vertex; 25] = [
    [0.0, 0.0, 1.0],
    [0.259, 0.0, 0.967],
    [0.5, 0.0, 0.867],
    [0.708, 0.0, 0.708],
    [0.867, 0.0, 0.5],
    [0.967, 0.0, 0.258],
    [1.0, 0.0, 0.0],
    [0.967, 0.0, -0.259],
    [0.867, 0.0, -0.5],
    [0.708, 0.0, -0.708],
    [0.5, 0.0, -0.867],
    [0.259, 0.0, -0.967],
    [0.0, 0.0, -1.0],
    [-0.259, 0.0, -0.967],
    [-0.5, 0.0, -0.867],
    [-0.708, 0.0, -0.708],
    [-0.867, 0.0, -0.5],
    [-0.967, 0.0, -0.259],
    [-1.0, 0.0, 0.0],
    [-0.967, 0.0, -0.259],
    [-0.867, 0.0, 0.5],
    [-0.708, 0.0, 0.708],
    [-0.5, 0.0, 0.867],
    [-0.259, 0.0, 0.967],
    // apex
    [0.0, 1.0, 0.0],
];

static CONE_FACES: [Face; 25] = [
    &[
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 0,
    ],
    &[0, 1, 24],
    &[1, 2, 24],
    &[2, 3, 24],
    &[3, 4, 24],
    &[4, 5, 24],
    &[5, 6, 24],
    &[6, 7, 24],
    &[7, 8, 24],
    &[8, 9, 24],
    &[9, 10, 24],
    &[10, 11, 24],
    &[11, 12, 24],
    &[12, 13, 24],
    &[13, 14, 24],
    &[14, 15, 24],
    &[15, 16, 24],
    &[16, 17, 24],
    &[17, 18, 24],
    &[18, 19, 24],
    &[19, 20, 24],
    &[20, 21, 24],
    &[21, 22, 24],
    &[22, 23, 24],
    &[23, 0, 24],
];

pub static CONE: Solid = Solid::new("cone", &CONE_VERTICES, &CONE_FACES);

static PRISM_VERTICES: [Vertex; 6] = [
    [0.5, 1.0, -0.5],
    [-0.5, 1.0, -0.5],
    [0.0, 1.0, 0.5],
    [0.5, -1.0, -0.5],
    [-0.5, -1.0, -0.5],
    [0.0, -1.0, 0.5],
];

static PRISM_FACES: [Face; 5] = [&[0, 1, 3, 4], &[1, 2, 4, 5], &[2, 0, 5, 3], &[0, 1, 2], &[3, 4, 5]];

pub static PRISM: Solid = Solid::new("prism", &PRISM_VERTICES, &PRISM_FACES);

static HOUSE_VERTICES: [Vertex; 10] = [
    [1.0, -0.5, 1.0],
    [1.0, -0.5, -1.0],
    [1.0, 0.5, -1.0],
    [1.0, 0.5, 1.0],
    [0.75, 0.75, 0.0],
    [-0.75, 0.75, 0.0],
    [-1.0, -0.5, 1.0],
    [-1.0, 0.5, 1.0],
    [-1.0, 0.5, -1.0],
    [-1.0, -0.5, -1.0],
];

static HOUSE_FACES: [Face; 9] = [
    &[0, 1, 2, 3],
    &[3, 2, 4],
    &[7, 3, 4, 5],
    &[2, 8, 5, 4],
    &[5, 8, 7],
    &[0, 3, 7, 6],
    &[0, 6, 9, 1],
    &[2, 1, 9, 8],
    &[6, 7, 8, 9],
];

pub static HOUSE: Solid = Solid::new("house", &HOUSE_VERTICES, &HOUSE_FACES);

/// Local transform applied on top of everything drawn before, then the solid
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Uniform scale factor, if the step scales
    pub scale: Option<f64>,
    /// `(angle in degrees, axis)`
    pub rotation: (f64, [f64; 3]),
    pub translation: [f64; 3],
    pub solid: &'static Solid,
}

/// Auxiliary solids in drawing order. Each placement accumulates on the
/// previous ones; nothing resets the transform between them.
pub static PLACEMENTS: [Placement; 5] = [
    Placement {
        scale: Some(2.0),
        rotation: (90.0, [0.0, 0.0, 1.0]),
        translation: [1.5, 0.5, 1.5],
        solid: &PYRAMID,
    },
    Placement {
        scale: Some(0.5),
        rotation: (90.0, [0.0, 1.0, 0.0]),
        translation: [1.5, -2.5, 1.5],
        solid: &CYLINDER,
    },
    Placement {
        scale: None,
        rotation: (90.0, [1.0, 0.0, 0.0]),
        translation: [-1.5, -2.5, 1.5],
        solid: &CONE,
    },
    Placement {
        scale: None,
        rotation: (45.0, [1.0, 0.0, 1.0]),
        translation: [1.5, -1.0, 0.0],
        solid: &PRISM,
    },
    Placement {
        scale: None,
        rotation: (45.0, [1.0, 1.0, 1.0]),
        translation: [0.0, -2.5, 1.0],
        solid: &HOUSE,
    },
];

/// Every indexed-face solid in the scene
pub fn solids() -> impl Iterator<Item = &'static Solid> {
    PLACEMENTS.iter().map(|p| p.solid)
}

/// Check all face tables once; a failure here is an authoring bug
pub fn validate() -> Result<(), SceneError> {
    solids().try_for_each(Solid::validate)
}
