/// 3D transformation matrices, the modelview stack and the orientation state
use nalgebra::{Matrix4, Unit, Vector3};
use thiserror::Error;

/// Depth guaranteed for the classic fixed-function modelview stack
pub const MAX_STACK_DEPTH: usize = 32;

/// Degrees added or removed by one rotation key press
pub const ROTATION_STEP: f64 = 15.0;

/// Distance added by one translation key press
pub const TRANSLATION_STEP: f64 = 15.0;

/// Rotation angles (degrees) and translation offsets controlled by the keyboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Orientation {
    pub fn new(rotate_x: f64, rotate_y: f64, rotate_z: f64) -> Self {
        Self {
            rotate_x,
            rotate_y,
            rotate_z,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotate_x += dx;
        self.rotate_y += dy;
        self.rotate_z += dz;
    }

    /// Zero all three angles, keeping the translation offsets
    pub fn reset_rotation(&mut self) {
        self.rotate_x = 0.0;
        self.rotate_y = 0.0;
        self.rotate_z = 0.0;
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(15.0, -15.0, 0.0)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation of `angle` degrees about `axis`; the axis need not be unit
    /// length. A zero axis yields the identity.
    pub fn axis_rotation(angle: f64, x: f64, y: f64, z: f64) -> Matrix4<f64> {
        match Unit::try_new(Vector3::new(x, y, z), f64::EPSILON) {
            Some(axis) => Matrix4::from_axis_angle(&axis, angle.to_radians()),
            None => Matrix4::identity(),
        }
    }

    /// Create a rotation matrix from an orientation
    pub fn rotation_matrix(orientation: &Orientation) -> Matrix4<f64> {
        let rz = Self::axis_rotation(orientation.rotate_z, 0.0, 0.0, 1.0);
        let ry = Self::axis_rotation(orientation.rotate_y, 0.0, 1.0, 0.0);
        let rx = Self::axis_rotation(orientation.rotate_x, 1.0, 0.0, 0.0);

        // Z is applied outermost, X innermost
        rz * ry * rx
    }

    /// The full per-frame base transform, including the fixed +1 offsets on
    /// Y and Z that come with the two translation steps
    pub fn orientation_matrix(orientation: &Orientation) -> Matrix4<f64> {
        Self::rotation_matrix(orientation)
            * Self::translation_matrix(orientation.translate_x, 1.0, 0.0)
            * Self::translation_matrix(orientation.translate_y, 0.0, 1.0)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("matrix stack overflow")]
    StackOverflow,
    #[error("matrix stack underflow")]
    StackUnderflow,
}

/// Save/restore stack of modelview matrices. Never empty; every operation
/// post-multiplies the top entry.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f64>>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    pub fn top(&self) -> &Matrix4<f64> {
        // the bottom entry is never popped
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f64> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = Matrix4::identity();
    }

    pub fn mult(&mut self, m: &Matrix4<f64>) {
        let top = self.top_mut();
        *top *= m;
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        self.mult(&Transform::scale_matrix(sx, sy, sz));
    }

    pub fn rotate(&mut self, angle: f64, x: f64, y: f64, z: f64) {
        self.mult(&Transform::axis_rotation(angle, x, y, z));
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.mult(&Transform::translation_matrix(x, y, z));
    }

    /// Duplicate the top entry
    pub fn push(&mut self) -> Result<(), TransformError> {
        if self.stack.len() >= MAX_STACK_DEPTH {
            return Err(TransformError::StackOverflow);
        }
        let top = *self.top();
        self.stack.push(top);
        Ok(())
    }

    /// Discard the top entry, restoring the one saved below it
    pub fn pop(&mut self) -> Result<Matrix4<f64>, TransformError> {
        if self.stack.len() <= 1 {
            return Err(TransformError::StackUnderflow);
        }
        self.stack.pop().ok_or(TransformError::StackUnderflow)
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn close(a: &Matrix4<f64>, b: &Matrix4<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_default_orientation() {
        let state = Orientation::default();
        assert_eq!(state.rotate_x, 15.0);
        assert_eq!(state.rotate_y, -15.0);
        assert_eq!(state.rotate_z, 0.0);
        assert_eq!(state.translate_x, 0.0);
        assert_eq!(state.translate_y, 0.0);
    }

    #[test]
    fn test_rotate_and_reset() {
        let mut state = Orientation::default();
        state.translate_x = 30.0;
        state.rotate(15.0, 30.0, 45.0);
        assert_eq!((state.rotate_x, state.rotate_y, state.rotate_z), (30.0, 15.0, 45.0));

        state.reset_rotation();
        assert_eq!((state.rotate_x, state.rotate_y, state.rotate_z), (0.0, 0.0, 0.0));
        assert_eq!(state.translate_x, 30.0);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Orientation::new(0.0, 0.0, 0.0));
        assert!(close(&matrix, &Matrix4::identity()));
    }

    #[test]
    fn test_axis_rotation_matches_right_hand_rule() {
        let m = Transform::axis_rotation(90.0, 0.0, 0.0, 1.0);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_axis_rotation_normalises_axis() {
        let long = Transform::axis_rotation(45.0, 2.0, 0.0, 2.0);
        let unit = Transform::axis_rotation(45.0, 1.0, 0.0, 1.0);
        assert!(close(&long, &unit));
        assert!(close(&Transform::axis_rotation(30.0, 0.0, 0.0, 0.0), &Matrix4::identity()));
    }

    #[test]
    fn test_orientation_matrix_translation_offsets() {
        let mut state = Orientation::new(0.0, 0.0, 0.0);
        state.translate_x = 4.0;
        state.translate_y = 2.0;
        let p = Transform::orientation_matrix(&state).transform_point(&Point3::origin());
        assert!((p - Point3::new(6.0, 1.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_stack_post_multiplies() {
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 0.0, 0.0);
        stack.scale(2.0, 2.0, 2.0);
        // translate(scale(p))
        let p = stack.top().transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((p - Point3::new(3.0, 2.0, 2.0)).norm() < 1e-9);
    }

    #[test]
    fn test_push_pop_restores_top() {
        let mut stack = MatrixStack::new();
        stack.rotate(30.0, 0.0, 1.0, 0.0);
        let saved = *stack.top();

        stack.push().unwrap();
        assert_eq!(stack.depth(), 2);
        stack.translate(5.0, 5.0, 5.0);
        assert!(!close(stack.top(), &saved));

        stack.pop().unwrap();
        assert_eq!(stack.depth(), 1);
        assert!(close(stack.top(), &saved));
    }

    #[test]
    fn test_pop_on_bottom_entry_fails() {
        let mut stack = MatrixStack::new();
        stack.scale(3.0, 3.0, 3.0);
        assert_eq!(stack.pop(), Err(TransformError::StackUnderflow));
        assert_eq!(stack.depth(), 1);
        assert!(close(stack.top(), &Transform::scale_matrix(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_push_beyond_limit_fails() {
        let mut stack = MatrixStack::new();
        for _ in 1..MAX_STACK_DEPTH {
            stack.push().unwrap();
        }
        assert_eq!(stack.push(), Err(TransformError::StackOverflow));
        assert_eq!(stack.depth(), MAX_STACK_DEPTH);
    }

    #[test]
    fn test_load_identity_only_touches_top() {
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 2.0, 3.0);
        stack.push().unwrap();
        stack.load_identity();
        assert!(close(stack.top(), &Matrix4::identity()));
        stack.pop().unwrap();
        assert!(close(stack.top(), &Transform::translation_matrix(1.0, 2.0, 3.0)));
    }
}
