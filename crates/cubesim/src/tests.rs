use cubemath::{Float, Quaternion, Vector3, assert_approx_eq};
use itertools::Itertools;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

const TOLERANCE: Float = 1e-9;

fn assert_same_state(expected: &Cube, actual: &Cube) {
    assert_eq!(expected.size(), actual.size());
    for (i, (a, b)) in std::iter::zip(expected.pieces(), actual.pieces()).enumerate() {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.colors(), b.colors());
        assert_approx_eq!(a.position(), b.position(), epsilon = TOLERANCE);
        assert!(
            a.orientation().is_same_rotation(b.orientation(), TOLERANCE),
            "piece {i}: expected {a}, got {b}",
        );
    }
}

fn positions(cube: &Cube) -> Vec<Vector3> {
    cube.pieces().iter().map(|p| p.position()).collect()
}

fn assert_positions_eq(expected: &[Vector3], actual: &[Vector3]) {
    assert_eq!(expected.len(), actual.len());
    for (a, b) in std::iter::zip(expected, actual) {
        assert_approx_eq!(*a, *b, epsilon = TOLERANCE);
    }
}

fn count_kind(cube: &Cube, kind: PieceKind) -> usize {
    cube.pieces().iter().filter(|p| p.kind() == kind).count()
}

#[test]
fn test_piece_counts() {
    let cube = Cube::new(1);
    assert_eq!(1, cube.pieces().len());
    assert_eq!(PieceKind::SingleCubie, cube.pieces()[0].kind());
    assert_eq!(Vector3::ZERO, cube.pieces()[0].position());

    for size in 2..=7 {
        let cube = Cube::new(size);
        let n = size - 2;
        assert_eq!(8, count_kind(&cube, PieceKind::Corner), "size {size}");
        assert_eq!(12 * n, count_kind(&cube, PieceKind::Edge), "size {size}");
        assert_eq!(6 * n * n, count_kind(&cube, PieceKind::Center), "size {size}");
        assert_eq!(8 + 12 * n + 6 * n * n, cube.pieces().len());

        // No two pieces share a position.
        assert!(
            positions(&cube)
                .into_iter()
                .map(|v| v.to_array().map(Float::to_bits))
                .all_unique()
        );
    }
}

#[test]
#[should_panic]
fn test_empty_cube_panics() {
    Cube::new(0);
}

#[test]
fn test_piece_order() {
    let v = Vector3::new;

    // Centers, then corners, then edges.
    let cube = Cube::new(3);
    let kinds = cube.pieces().iter().map(|p| p.kind()).dedup().collect_vec();
    assert_eq!(
        vec![PieceKind::Center, PieceKind::Corner, PieceKind::Edge],
        kinds,
    );
    assert_eq!(
        vec![
            v(-1.0, 0.0, 0.0),
            v(0.0, -1.0, 0.0),
            v(0.0, 0.0, -1.0),
            v(1.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(0.0, 0.0, 1.0),
            v(-1.0, -1.0, -1.0),
            v(-1.0, -1.0, 1.0),
        ],
        positions(&cube)[..8].to_vec(),
    );
    assert_eq!(v(0.0, -1.0, -1.0), cube.pieces()[14].position());
    assert_eq!(v(-1.0, 0.0, -1.0), cube.pieces()[15].position());
    assert_eq!(v(-1.0, -1.0, 0.0), cube.pieces()[16].position());

    // The first offset varies fastest within each group of centers.
    let cube = Cube::new(4);
    assert_eq!(
        vec![
            v(-1.5, -0.5, -0.5),
            v(-1.5, 0.5, -0.5),
            v(-1.5, -0.5, 0.5),
            v(-1.5, 0.5, 0.5),
            v(-0.5, -1.5, -0.5),
        ],
        positions(&cube)[..5].to_vec(),
    );
}

#[test]
fn test_color_cardinality() {
    let cube = Cube::new(1);
    assert_eq!(6, cube.pieces()[0].sticker_count());

    for size in 2..=7 {
        for piece in Cube::new(size).pieces() {
            let expected = match piece.kind() {
                PieceKind::Center => 1,
                PieceKind::Edge => 2,
                PieceKind::Corner => 3,
                PieceKind::SingleCubie => panic!("unexpected cubie in size {size}"),
            };
            assert_eq!(expected, piece.sticker_count(), "{piece}");
        }
    }
}

#[test]
fn test_color_regression() {
    for size in 2..=5 {
        let cube = Cube::new(size);
        let dist = (size as Float - 1.0) / 2.0;

        for face in Face::iter() {
            let colored = cube.pieces().iter().filter(|p| p.has_color(face)).collect_vec();
            assert_eq!(size * size, colored.len(), "size {size} face {face}");
            for piece in colored {
                let coordinate = piece.position()[face.axis() as usize];
                assert_eq!(face.sign().float() * dist, coordinate, "{piece}");
                assert_eq!(Some(face), piece.sticker_direction(face));
            }
        }
    }

    let colors_of = |size: usize, i: usize| Cube::new(size).pieces()[i].colors();
    // L center, LDB corner, and DB edge of a 3x3x3
    assert_eq!([false, true, false, false, false, false], colors_of(3, 0));
    assert_eq!([false, true, false, true, false, true], colors_of(3, 6));
    assert_eq!([false, false, false, true, false, true], colors_of(3, 14));
    // LDB corner and DB edge of a 4x4x4, where every coordinate is negative
    assert_eq!([false, true, false, true, false, true], colors_of(4, 24));
    assert_eq!([false, false, false, true, false, true], colors_of(4, 32));
    // RUF corner of a 2x2x2
    assert_eq!([true, false, true, false, true, false], colors_of(2, 7));
}

#[test]
fn test_r_moves_u_to_b() {
    let mut cube = Cube::new(3);
    cube.rotate_quarter("R").unwrap();

    // Centers are never mixed up with other pieces.
    let u_center = &cube.pieces()[4];
    assert_approx_eq!(Vector3::new(0.0, 1.0, 0.0), u_center.position());
    let ruf_colors = [true, false, true, false, true, false];
    let ruf = cube
        .pieces()
        .iter()
        .find(|p| p.colors() == ruf_colors)
        .unwrap();
    assert_approx_eq!(Vector3::new(1.0, 1.0, -1.0), ruf.position());
    assert_eq!(Some(Face::B), ruf.sticker_direction(Face::U));
    assert_eq!(Some(Face::U), ruf.sticker_direction(Face::F));
    assert_eq!(Some(Face::R), ruf.sticker_direction(Face::R));
}

#[test]
fn test_four_quarter_turns() {
    for size in 1..=5 {
        for face in Face::iter() {
            let original = Cube::new(size);
            let mut cube = original.clone();
            for _ in 0..4 {
                cube.rotate_quarter(&face.to_string()).unwrap();
            }
            assert_same_state(&original, &cube);
        }
    }
}

#[test]
fn test_r_twice_and_r2() {
    let original = Cube::new(3);

    let mut cube = original.clone();
    for _ in 0..4 {
        cube.rotate_quarter("R").unwrap();
    }
    assert_positions_eq(&positions(&original), &positions(&cube));

    let mut cube = original.clone();
    cube.rotate_quarter("R2").unwrap();
    assert!(!cube.is_solved());
    cube.rotate_quarter("R2").unwrap();
    assert_same_state(&original, &cube);

    let mut r_twice = original.clone();
    r_twice.rotate_sequence("R R", DEFAULT_ANGLE).unwrap();
    let mut r2 = original;
    r2.rotate_quarter("R2").unwrap();
    assert_same_state(&r_twice, &r2);
}

#[test]
fn test_inverse_round_trip() {
    for face in Face::iter() {
        for prefix in ["", "C", "T", "N"] {
            let original = Cube::new(4);
            let mut cube = original.clone();
            cube.rotate_quarter(&format!("{prefix}{face}")).unwrap();
            assert_ne!(original, cube);
            cube.rotate_quarter(&format!("{prefix}{face}'")).unwrap();
            assert_same_state(&original, &cube);
        }
    }
}

#[test]
fn test_whole_cube_isometry() {
    let distances = |cube: &Cube| {
        positions(cube)
            .into_iter()
            .tuple_combinations()
            .map(|(a, b)| (a - b).norm())
            .collect_vec()
    };

    for face in Face::iter() {
        let mut cube = Cube::new(4);
        cube.rotate_quarter("R").unwrap();
        let before = distances(&cube);
        cube.rotate(&format!("C{face}"), 0.3).unwrap();
        let after = distances(&cube);
        for (a, b) in std::iter::zip(before, after) {
            assert_approx_eq!(a, b, epsilon = TOLERANCE);
        }
    }
}

#[test]
fn test_layer_disjointness() {
    let cube = Cube::new(3);
    for face in Face::iter() {
        let axis = face.vector();
        let layers = (1..=3)
            .map(|layer| cube.layer_pieces(axis, layer).unwrap())
            .collect_vec();

        for (layer, pieces) in layers.iter().enumerate() {
            let expected_dot = 1.0 - layer as Float;
            for &i in pieces {
                assert_approx_eq!(expected_dot, cube.pieces()[i].position().dot(axis));
            }
        }
        assert_eq!(9, layers[0].len());
        assert_eq!(8, layers[1].len());
        assert_eq!(9, layers[2].len());

        let all = layers.concat();
        assert_eq!(cube.pieces().len(), all.len());
        assert!(all.iter().all_unique());
    }
}

#[test]
fn test_layer_selection_scales_axis() {
    let mut a = Cube::new(3);
    let mut b = Cube::new(3);
    a.rotate_layer(Vector3::new(0.0, 0.0, 5.0), 2, 1.0).unwrap();
    b.rotate_layer(Vector3::Z, 2, 1.0).unwrap();
    assert_same_state(&a, &b);
}

#[test]
fn test_rotate_layer_errors() {
    let mut cube = Cube::new(3);
    let original = cube.clone();

    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 0, size: 3 }),
        cube.rotate_layer(Vector3::X, 0, 1.0),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        cube.rotate_layer(Vector3::X, 4, 1.0),
    );
    assert!(matches!(
        cube.rotate_layer(Vector3::ZERO, 1, 1.0),
        Err(CubeError::DegenerateVector(_)),
    ));
    assert_eq!(original, cube);
}

#[test]
fn test_slice_dialect_equivalence() {
    let mut m = Cube::new(3);
    m.rotate_3x3("M", DEFAULT_ANGLE).unwrap();
    let mut nl = Cube::new(3);
    nl.rotate("NL", DEFAULT_ANGLE).unwrap();
    assert_same_state(&m, &nl);

    let mut r = Cube::new(3);
    r.rotate_3x3("r'", DEFAULT_ANGLE).unwrap();
    let mut tr = Cube::new(3);
    tr.rotate_quarter("TR'").unwrap();
    assert_same_state(&r, &tr);

    let mut x = Cube::new(2);
    x.rotate_2x2("X2", DEFAULT_ANGLE).unwrap();
    let mut cr = Cube::new(2);
    cr.rotate_nxn("CR2", DEFAULT_ANGLE).unwrap();
    assert_same_state(&x, &cr);
    assert!(x.is_solved());
}

#[test]
fn test_invalid_notation_changes_nothing() {
    let mut cube = Cube::new(3);
    cube.rotate_quarter("R").unwrap();
    let original = cube.clone();

    assert_eq!(
        Err(CubeError::InvalidNotation("Q".to_owned())),
        cube.rotate_3x3("Q", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidNotation("Q".to_owned())),
        cube.rotate_quarter("Q"),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        cube.rotate_quarter("T4U"),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 2, size: 1 }),
        Cube::new(1).rotate_quarter("NU"),
    );
    assert_eq!(
        Err(CubeError::InvalidNotation("XR".to_owned())),
        cube.rotate_sequence("R U XR", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 5, size: 3 }),
        cube.rotate_sequence("R N5U", DEFAULT_ANGLE),
    );
    assert_eq!(original, cube);
}

#[test]
fn test_huge_layer_numbers_are_rejected() {
    let mut cube = Cube::new(3);
    let original = cube.clone();

    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        cube.rotate_quarter("T18446744073709551615R"),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        cube.rotate_quarter("N1-4000000000R"),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        cube.rotate_sequence("R N1-18446744073709551615U", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4000000000, size: 3 }),
        cube.rotate_quarter("N4000000000-4000000001F"),
    );
    assert_eq!(original, cube);

    // Empty ranges are still no-ops, however large.
    cube.rotate_quarter("N18446744073709551615-1R").unwrap();
    assert_eq!(original, cube);
}

#[test]
fn test_dialect_errors_name_typed_move() {
    let mut cube = Cube::new(3);
    let original = cube.clone();

    assert_eq!(
        Err(CubeError::InvalidNotation("Mx".to_owned())),
        cube.rotate_3x3("Mx", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidNotation("uQ".to_owned())),
        cube.rotate_3x3("uQ", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidNotation("Xq".to_owned())),
        cube.rotate_nxn("Xq", DEFAULT_ANGLE),
    );
    assert_eq!(
        Err(CubeError::InvalidNotation("Y22".to_owned())),
        Dialect::Size1.parse_move("Y22"),
    );
    assert_eq!(original, cube);

    let mut animator = Animator::new(Cube::new(3), Dialect::Size3, AnimationSettings::default());
    assert_eq!(
        Err(CubeError::InvalidNotation("uQ".to_owned())),
        animator.push("uQ"),
    );
    assert_eq!(0, animator.queue_len());
}

#[test]
fn test_move_notation() {
    use LayerSpec::*;
    use TurnDirection::*;

    let cases = [
        ("R", Face::R, Outer, Clockwise, "R"),
        ("U'", Face::U, Outer, CounterClockwise, "U'"),
        ("F2", Face::F, Outer, Double, "F2"),
        ("CL'", Face::L, WholeCube, CounterClockwise, "CL'"),
        ("CxD", Face::D, WholeCube, Clockwise, "CD"),
        ("TB", Face::B, Tier { depth: 2 }, Clockwise, "TB"),
        ("T2B", Face::B, Tier { depth: 2 }, Clockwise, "TB"),
        ("T3R2", Face::R, Tier { depth: 3 }, Double, "T3R2"),
        ("NF", Face::F, Slice { first: 2, last: 2 }, Clockwise, "NF"),
        ("N3U'", Face::U, Slice { first: 3, last: 3 }, CounterClockwise, "N3U'"),
        ("N2-4L", Face::L, Slice { first: 2, last: 4 }, Clockwise, "N2-4L"),
    ];
    for (input, face, layers, direction, output) in cases {
        let expected = Move {
            face,
            layers,
            direction,
        };
        assert_eq!(Ok(expected), Move::parse(input), "{input}");
        assert_eq!(output, expected.to_string());
    }

    for invalid in ["", "'", "2", "Q", "r", "R22", "XR", "TxR", "N-2R", "N2-R", "N2-3-4R"] {
        assert_eq!(
            Err(CubeError::InvalidNotation(invalid.to_owned())),
            invalid.parse::<Move>(),
        );
    }
}

#[test]
fn test_move_layers() {
    let layers = |s: &str, size: usize| Move::parse(s).unwrap().layers(size).map(|l| l.to_vec());

    assert_eq!(Ok(vec![1]), layers("R", 1));
    assert_eq!(Ok(vec![1, 2, 3, 4]), layers("CR", 4));
    assert_eq!(Ok(vec![1, 2]), layers("TR", 4));
    assert_eq!(Ok(vec![1]), layers("T1R", 4));
    assert_eq!(Ok(vec![1, 2, 3]), layers("T3R", 4));
    assert_eq!(Ok(vec![2]), layers("NR", 4));
    assert_eq!(Ok(vec![3]), layers("N3R", 4));
    assert_eq!(Ok(vec![2, 3, 4]), layers("N2-4R", 4));
    assert_eq!(Ok(vec![]), layers("N3-2R", 4));
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 0, size: 4 }),
        layers("N0R", 4),
    );
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 5, size: 4 }),
        layers("T5R", 4),
    );
}

#[test]
fn test_move_inverse() {
    for (mv, inv) in [("R", "R'"), ("NU'", "NU"), ("T3F2", "T3F2")] {
        let mv = Move::parse(mv).unwrap();
        assert_eq!(inv, mv.inverse().to_string());
        assert_eq!(mv, mv.inverse().inverse());
    }
}

#[test]
fn test_is_solved() {
    let mut cube = Cube::new(3);
    assert!(cube.is_solved());
    cube.rotate_quarter("CU").unwrap();
    assert!(cube.is_solved());
    cube.rotate_quarter("R").unwrap();
    assert!(!cube.is_solved());
    cube.rotate_quarter("R'").unwrap();
    assert!(cube.is_solved());
    cube.rotate("F", 0.1).unwrap();
    assert!(!cube.is_solved());
    cube.reset();
    assert!(cube.is_solved());
    assert_eq!(Cube::new(3), cube);
}

#[test]
fn test_animator_lands_on_quarter_turn() {
    let mut animator = Animator::new(Cube::new(3), Dialect::Size3, AnimationSettings::default());
    assert_eq!(Step::Idle, animator.step());

    animator.push("R").unwrap();
    animator.push("u2").unwrap();
    assert_eq!(2, animator.queue_len());

    for i in 1..10 {
        let Step::Advanced { progress } = animator.step() else {
            panic!("expected move to advance on frame {i}");
        };
        assert_approx_eq!(i as Float / 10.0, progress);
    }
    assert_eq!(Step::Finished("R".to_owned()), animator.step());

    let mut expected = Cube::new(3);
    expected.rotate_3x3("R", DEFAULT_ANGLE).unwrap();
    assert_same_state(&expected, animator.cube());

    assert_eq!(Some(("u2", 0.0)), animator.current());
    let mut frames = 0;
    while animator.step() != Step::Idle {
        frames += 1;
    }
    assert_eq!(10, frames);
    assert!(animator.is_idle());

    expected.rotate_3x3("u2", DEFAULT_ANGLE).unwrap();
    assert_same_state(&expected, animator.cube());
}

#[test]
fn test_animator_pause_and_catch_up() {
    let settings = AnimationSettings {
        angle_step: 0.2,
        paused: true,
    };
    let mut animator = Animator::new(Cube::new(3), Dialect::Size3, settings);
    for mv in ["R", "M'", "Y", "F2"] {
        animator.push(mv).unwrap();
    }

    assert_eq!(Step::Paused, animator.step());
    assert!(animator.cube().is_solved());
    assert_eq!(Some(("R", 0.0)), animator.current());

    animator.toggle_pause();
    assert!(!animator.is_paused());
    assert!(matches!(animator.step(), Step::Advanced { .. }));
    assert!(!animator.cube().is_solved());

    animator.toggle_pause();
    assert_eq!(vec!["R", "M'", "Y", "F2"], animator.catch_up());
    assert!(animator.is_idle());

    let mut expected = Cube::new(3);
    for mv in ["R", "M'", "Y", "F2"] {
        expected.rotate_3x3(mv, DEFAULT_ANGLE).unwrap();
    }
    assert_same_state(&expected, &animator.into_cube());
}

#[test]
fn test_animator_rejects_invalid_moves() {
    let mut animator = Animator::new(Cube::new(3), Dialect::SizeN, AnimationSettings::default());
    assert_eq!(
        Err(CubeError::InvalidLayerIndex { layer: 4, size: 3 }),
        animator.push("N4R"),
    );
    assert!(animator.push("Q").is_err());
    assert_eq!(0, animator.queue_len());

    let settings = AnimationSettings {
        angle_step: -1.0,
        paused: false,
    };
    let mut animator = Animator::new(Cube::new(2), Dialect::Size2, settings);
    for mv in input::moves_for_typed_text("rUx") {
        animator.push(&mv).unwrap();
    }
    assert!(animator.push("M").is_err());
    assert_eq!(3, animator.queue_len());
    assert!(matches!(animator.step(), Step::Advanced { .. }));
}

fn arb_move(size: usize) -> impl Strategy<Value = Move> {
    let faces = prop::sample::select(Face::iter().collect_vec());
    let directions = prop::sample::select(vec![
        TurnDirection::Clockwise,
        TurnDirection::CounterClockwise,
        TurnDirection::Double,
    ]);
    let layers = prop_oneof![
        Just(LayerSpec::Outer),
        Just(LayerSpec::WholeCube),
        (1..=size).prop_map(|depth| LayerSpec::Tier { depth }),
        (1..=size, 1..=size).prop_map(|(a, b)| LayerSpec::Slice {
            first: a.min(b),
            last: a.max(b),
        }),
    ];
    (faces, layers, directions).prop_map(|(face, layers, direction)| Move {
        face,
        layers,
        direction,
    })
}

fn arb_scramble() -> impl Strategy<Value = (usize, Vec<Move>)> {
    (1..=5_usize).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec(arb_move(size), 0..12),
        )
    })
}

proptest! {
    #[test]
    fn proptest_shell_invariant((size, moves) in arb_scramble()) {
        let mut cube = Cube::new(size);
        let dist = (size as Float - 1.0) / 2.0;
        for mv in &moves {
            cube.apply_move(*mv, DEFAULT_ANGLE).unwrap();
        }
        for piece in cube.pieces() {
            let radius = piece.position().max_abs_component();
            prop_assert!((radius - dist).abs() < TOLERANCE, "{piece} left the shell");
            prop_assert!((piece.orientation().norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn proptest_scramble_then_undo((size, moves) in arb_scramble()) {
        let original = Cube::new(size);
        let mut cube = original.clone();
        let scramble = moves.iter().join(" ");
        cube.rotate_sequence(&scramble, DEFAULT_ANGLE).unwrap();
        for mv in moves.iter().rev() {
            cube.apply_move(mv.inverse(), DEFAULT_ANGLE).unwrap();
        }
        assert_same_state(&original, &cube);
        prop_assert!(cube.is_solved());
    }

    #[test]
    fn proptest_notation_round_trip(mv in (1..=6_usize).prop_flat_map(arb_move)) {
        prop_assert_eq!(Ok(mv), Move::parse(&mv.to_string()));
    }

    #[test]
    fn proptest_four_quarter_turns(
        (size, mv) in (1..=5_usize).prop_flat_map(|size| (Just(size), arb_move(size))),
    ) {
        let original = Cube::new(size);
        let mut cube = original.clone();
        let quarter = Move { direction: TurnDirection::Clockwise, ..mv };
        for _ in 0..4 {
            cube.apply_move(quarter, DEFAULT_ANGLE).unwrap();
        }
        assert_same_state(&original, &cube);
    }
}

#[test]
fn test_orientation_is_world_frame() {
    // R then U moves the RUF corner to the same place as composing the
    // rotations with U on the left.
    let mut cube = Cube::new(2);
    cube.rotate_quarter("R").unwrap();
    cube.rotate_quarter("CU").unwrap();

    let r = Quaternion::from_normalized_axis_angle(Vector3::X, -DEFAULT_ANGLE);
    let u = Quaternion::from_normalized_axis_angle(Vector3::Y, -DEFAULT_ANGLE);
    let solved = Cube::new(2);
    for (before, after) in std::iter::zip(solved.pieces(), cube.pieces()) {
        let rotation = if before.position().x > 0.0 { u * r } else { u };
        assert_approx_eq!(rotation * before.position(), after.position());
        assert!(after.orientation().is_same_rotation(rotation, TOLERANCE));
    }
}
