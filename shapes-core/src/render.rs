/// Per-frame drawing of the scene onto any [`DrawTarget`]
use crate::geometry::{face_color, Color, Solid};
use crate::pipeline::DrawTarget;
use crate::scene::{CUBE_FACES, CUBE_OFFSET, CUBE_SQUARE, PLACEMENTS};
use crate::transform::Orientation;

/// Draw one frame for the given orientation.
///
/// The auxiliary solids are drawn without restoring the transform between
/// them, so each one is placed relative to the one before it.
pub fn draw_frame<T: DrawTarget + ?Sized>(target: &mut T, orientation: &Orientation) {
    target.clear();

    target.load_identity();
    target.rotate(orientation.rotate_z, 0.0, 0.0, 1.0);
    target.rotate(orientation.rotate_y, 0.0, 1.0, 0.0);
    target.rotate(orientation.rotate_x, 1.0, 0.0, 0.0);
    target.translate(orientation.translate_x, 1.0, 0.0);
    target.translate(orientation.translate_y, 0.0, 1.0);

    draw_cube(target, 1.0);

    for placement in PLACEMENTS.iter() {
        if let Some(s) = placement.scale {
            target.scale(s, s, s);
        }
        let (angle, [x, y, z]) = placement.rotation;
        target.rotate(angle, x, y, z);
        let [tx, ty, tz] = placement.translation;
        target.translate(tx, ty, tz);
        draw_solid(target, placement.solid);
    }
}

/// Draw the six-coloured cube; leaves the transform as it found it
pub fn draw_cube<T: DrawTarget + ?Sized>(target: &mut T, size: f64) {
    target.push_matrix();
    target.scale(size, size, size);
    let [ox, oy, oz] = CUBE_OFFSET;
    target.translate(ox, oy, oz);

    for face in CUBE_FACES.iter() {
        match face.rotation {
            None => draw_square(target, face.color),
            Some((angle, [x, y, z])) => {
                target.push_matrix();
                target.rotate(angle, x, y, z);
                draw_square(target, face.color);
                target.pop_matrix();
            }
        }
    }

    target.pop_matrix();
}

/// The unit square at z = 0.5, as one fan
pub fn draw_square<T: DrawTarget + ?Sized>(target: &mut T, color: Color) {
    target.color(color);
    target.begin_fan();
    for [x, y, z] in CUBE_SQUARE {
        target.vertex(x, y, z);
    }
    target.end_fan();
}

/// Draw every face of an indexed solid, coloured by face position
pub fn draw_solid<T: DrawTarget + ?Sized>(target: &mut T, solid: &Solid) {
    for (i, face) in solid.faces.iter().enumerate() {
        target.color(face_color(i));
        target.begin_fan();
        for &index in face.iter() {
            let [x, y, z] = solid.vertices[index];
            target.vertex(x, y, z);
        }
        target.end_fan();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PALETTE;
    use crate::pipeline::{DrawCommand, FanSink, FixedFunction, Recorder};
    use crate::projection::Projection;
    use crate::scene::{CONE, CYLINDER, HOUSE, PRISM, PYRAMID};
    use crate::transform::{MatrixStack, Transform};
    use nalgebra::Point3;

    #[test]
    fn test_cube_emits_six_colored_quads() {
        let mut rec = Recorder::new();
        draw_cube(&mut rec, 1.0);

        let fans = rec.fans();
        assert_eq!(fans.len(), 6);
        assert!(fans.iter().all(|f| f.vertices.len() == 4));
        let colors: Vec<_> = fans.iter().map(|f| f.color).collect();
        assert_eq!(
            colors,
            vec![
                Color::RED,
                Color::GREEN,
                Color::BLUE,
                Color::CYAN,
                Color::MAGENTA,
                Color::YELLOW
            ]
        );
    }

    #[test]
    fn test_cube_balances_push_and_pop() {
        let mut rec = Recorder::new();
        draw_cube(&mut rec, 2.0);
        assert_eq!(rec.count(DrawCommand::PushMatrix), 6);
        assert_eq!(rec.count(DrawCommand::PopMatrix), 6);

        // running the same calls on a real stack leaves it untouched
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 2.0, 3.0);
        let before = *stack.top();
        let mut depth_seen = 0;
        for command in &rec.commands {
            match *command {
                DrawCommand::PushMatrix => stack.push().unwrap(),
                DrawCommand::PopMatrix => {
                    stack.pop().unwrap();
                }
                DrawCommand::Scale(x, y, z) => stack.scale(x, y, z),
                DrawCommand::Rotate(a, x, y, z) => stack.rotate(a, x, y, z),
                DrawCommand::Translate(x, y, z) => stack.translate(x, y, z),
                _ => {}
            }
            depth_seen = depth_seen.max(stack.depth());
        }
        assert_eq!(depth_seen, 3);
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), before);
    }

    #[test]
    fn test_cube_front_face() {
        let mut rec = Recorder::new();
        draw_frame(&mut rec, &Orientation::default());

        let front = &rec.fans()[0];
        assert_eq!(front.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(
            front.vertices,
            vec![
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5]
            ]
        );
    }

    #[test]
    fn test_solid_faces_cycle_palette() {
        for solid in [&PYRAMID, &CYLINDER, &CONE, &PRISM, &HOUSE] {
            let mut rec = Recorder::new();
            draw_solid(&mut rec, solid);
            let fans = rec.fans();
            assert_eq!(fans.len(), solid.face_count());
            for (i, fan) in fans.iter().enumerate() {
                assert_eq!(fan.color, PALETTE[i % 6], "{} face {}", solid.name, i);
                assert_eq!(fan.vertices.len(), solid.faces[i].len());
                assert_eq!(fan.vertices[0], solid.vertices[solid.faces[i][0]]);
            }
        }
    }

    #[test]
    fn test_frame_prologue_order() {
        let mut state = Orientation::default();
        state.rotate_z = 45.0;
        state.translate_x = 30.0;
        state.translate_y = -2.0;

        let mut rec = Recorder::new();
        draw_frame(&mut rec, &state);

        assert_eq!(
            &rec.commands[..7],
            &[
                DrawCommand::Clear,
                DrawCommand::LoadIdentity,
                DrawCommand::Rotate(45.0, 0.0, 0.0, 1.0),
                DrawCommand::Rotate(-15.0, 0.0, 1.0, 0.0),
                DrawCommand::Rotate(15.0, 1.0, 0.0, 0.0),
                DrawCommand::Translate(30.0, 1.0, 0.0),
                DrawCommand::Translate(-2.0, 0.0, 1.0),
            ]
        );
        assert_eq!(rec.count(DrawCommand::Clear), 1);
        assert_eq!(rec.count(DrawCommand::LoadIdentity), 1);
    }

    #[test]
    fn test_frame_draws_every_face_once() {
        let mut rec = Recorder::new();
        draw_frame(&mut rec, &Orientation::default());

        let expected = 6 + PLACEMENTS.iter().map(|p| p.solid.face_count()).sum::<usize>();
        assert_eq!(rec.fans().len(), expected);
        assert_eq!(rec.count(DrawCommand::BeginFan), expected);
        assert_eq!(rec.count(DrawCommand::EndFan), expected);
        assert_eq!(rec.count(DrawCommand::PushMatrix), rec.count(DrawCommand::PopMatrix));
    }

    #[test]
    fn test_placements_are_not_reset() {
        let mut rec = Recorder::new();
        draw_frame(&mut rec, &Orientation::default());

        // only the cube pushes; everything after it accumulates
        let after_cube = rec
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::PopMatrix)
            .unwrap();
        let steps: Vec<_> = rec.commands[after_cube + 1..]
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Scale(..) | DrawCommand::Rotate(..) | DrawCommand::Translate(..)
                )
            })
            .copied()
            .collect();
        assert_eq!(
            steps,
            vec![
                DrawCommand::Scale(2.0, 2.0, 2.0),
                DrawCommand::Rotate(90.0, 0.0, 0.0, 1.0),
                DrawCommand::Translate(1.5, 0.5, 1.5),
                DrawCommand::Scale(0.5, 0.5, 0.5),
                DrawCommand::Rotate(90.0, 0.0, 1.0, 0.0),
                DrawCommand::Translate(1.5, -2.5, 1.5),
                DrawCommand::Rotate(90.0, 1.0, 0.0, 0.0),
                DrawCommand::Translate(-1.5, -2.5, 1.5),
                DrawCommand::Rotate(45.0, 1.0, 0.0, 1.0),
                DrawCommand::Translate(1.5, -1.0, 0.0),
                DrawCommand::Rotate(45.0, 1.0, 1.0, 1.0),
                DrawCommand::Translate(0.0, -2.5, 1.0),
            ]
        );
        assert!(!rec.commands[after_cube + 1..].contains(&DrawCommand::LoadIdentity));
    }

    #[derive(Default)]
    struct FirstVertex {
        points: Vec<Point3<f64>>,
    }

    impl FanSink for FirstVertex {
        fn clear(&mut self, _color: Color) {
            self.points.clear();
        }

        fn fill_triangle(&mut self, triangle: [Point3<f64>; 3], _color: Color) {
            self.points.push(triangle[0]);
        }
    }

    #[test]
    fn test_front_face_lands_where_the_transforms_put_it() {
        let state = Orientation::default();
        let mut gl = FixedFunction::new(FirstVertex::default(), Projection::default());
        draw_frame(&mut gl, &state);

        let model = Transform::orientation_matrix(&state)
            * Transform::translation_matrix(3.0, 3.0, 0.0);
        let expected = Projection::default()
            .matrix()
            .transform_point(&model.transform_point(&Point3::new(-0.5, -0.5, 0.5)));

        let first = gl.sink().points[0];
        assert!((first - expected).norm() < 1e-9);
        assert_eq!(gl.modelview().depth(), 1);
    }
}
