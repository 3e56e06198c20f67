//! Property-based invariant tests for the camera and fog model.
//!
//! 1. Scale stays in [0.4, 1.8] under any wheel sequence
//! 2. Tilt stays in [10, 55] and spin in [-20, 20] after every single move
//! 3. Focus suppresses every camera-mutating input
//! 4. Focus toggled twice restores the free camera
//! 5. Reset is idempotent
//! 6. Relief applied k times yields max(0, L - k*a)
//! 7. Fog levels stay in [0, 100] under any operation sequence

use lifemap_logic::config::{CameraConfig, FogConfig};
use lifemap_logic::fog::{is_foggy, FogModel};
use lifemap_logic::layout::sectors;
use lifemap_logic::viewport::{PointerButton, ViewportController};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum CameraOp {
    Down(PointerButton, f32, f32),
    Move(f32, f32),
    Up,
    Wheel(f32),
}

fn button_strategy() -> impl Strategy<Value = PointerButton> {
    prop_oneof![
        Just(PointerButton::Primary),
        Just(PointerButton::Auxiliary),
        Just(PointerButton::Secondary),
    ]
}

fn camera_op_strategy() -> impl Strategy<Value = CameraOp> {
    prop_oneof![
        (button_strategy(), -2000.0f32..2000.0, -2000.0f32..2000.0)
            .prop_map(|(b, x, y)| CameraOp::Down(b, x, y)),
        (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| CameraOp::Move(x, y)),
        Just(CameraOp::Up),
        (-5000.0f32..5000.0).prop_map(CameraOp::Wheel),
    ]
}

#[derive(Debug, Clone)]
enum FogOp {
    Set(usize, i32),
    Relieve(usize, u8),
    Adjust(i32),
    Randomize(u64),
}

fn fog_op_strategy() -> impl Strategy<Value = FogOp> {
    prop_oneof![
        (0usize..8, -500i32..500).prop_map(|(n, v)| FogOp::Set(n, v)),
        (0usize..8, any::<u8>()).prop_map(|(n, a)| FogOp::Relieve(n, a)),
        (-300i32..300).prop_map(FogOp::Adjust),
        any::<u64>().prop_map(FogOp::Randomize),
    ]
}

fn controller() -> ViewportController {
    ViewportController::new(CameraConfig::default(), 1280.0, 720.0)
}

fn apply(vp: &mut ViewportController, op: &CameraOp) {
    match *op {
        CameraOp::Down(button, x, y) => {
            vp.begin_interaction(button, (x, y));
        }
        CameraOp::Move(x, y) => vp.update_interaction((x, y)),
        CameraOp::Up => vp.end_interaction(),
        CameraOp::Wheel(delta) => vp.zoom(delta),
    }
}

fn assert_in_limits(vp: &ViewportController) -> Result<(), TestCaseError> {
    let cam = vp.camera();
    prop_assert!((0.4..=1.8).contains(&cam.scale), "scale {}", cam.scale);
    prop_assert!((10.0..=55.0).contains(&cam.tilt_x), "tilt {}", cam.tilt_x);
    prop_assert!((-20.0..=20.0).contains(&cam.spin_z), "spin {}", cam.spin_z);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Camera
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scale_stays_in_range(deltas in prop::collection::vec(-10_000.0f32..10_000.0, 1..64)) {
        let mut vp = controller();
        for delta in deltas {
            vp.zoom(delta);
            let scale = vp.camera().scale;
            prop_assert!((0.4..=1.8).contains(&scale), "scale {}", scale);
        }
    }

    #[test]
    fn rotation_stays_in_range_after_every_move(
        moves in prop::collection::vec((-3000.0f32..3000.0, -3000.0f32..3000.0), 1..64)
    ) {
        let mut vp = controller();
        vp.begin_interaction(PointerButton::Auxiliary, (0.0, 0.0));
        for (x, y) in moves {
            vp.update_interaction((x, y));
            assert_in_limits(&vp)?;
        }
    }

    #[test]
    fn non_finite_wheel_leaves_scale_in_range(delta in prop_oneof![
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        -10_000.0f32..10_000.0,
    ]) {
        let mut vp = controller();
        vp.zoom(delta);
        assert_in_limits(&vp)?;
    }

    #[test]
    fn arbitrary_input_keeps_camera_in_limits(ops in prop::collection::vec(camera_op_strategy(), 0..128)) {
        let mut vp = controller();
        for op in &ops {
            apply(&mut vp, op);
            assert_in_limits(&vp)?;
        }
    }

    #[test]
    fn focus_suppresses_camera_input(
        sector_idx in 0usize..10,
        ops in prop::collection::vec(camera_op_strategy(), 0..64)
    ) {
        let sector = &sectors()[sector_idx];
        let mut vp = controller();
        vp.focus_sector(sector);
        let locked = vp.camera();
        for op in &ops {
            apply(&mut vp, op);
        }
        prop_assert_eq!(vp.camera(), locked);
        prop_assert_eq!(vp.focus(), Some(sector.id.as_str()));
    }

    #[test]
    fn focus_pair_restores_free_camera(
        sector_idx in 0usize..10,
        ops in prop::collection::vec(camera_op_strategy(), 0..32)
    ) {
        let sector = &sectors()[sector_idx];
        let mut vp = controller();
        for op in &ops {
            apply(&mut vp, op);
        }
        vp.end_interaction();
        let free = vp.camera();
        vp.focus_sector(sector);
        vp.focus_sector(sector);
        prop_assert_eq!(vp.focus(), None);
        prop_assert_eq!(vp.camera(), free);
    }

    #[test]
    fn reset_is_idempotent(ops in prop::collection::vec(camera_op_strategy(), 0..32)) {
        let mut vp = controller();
        for op in &ops {
            apply(&mut vp, op);
        }
        vp.reset_view();
        let once = vp.camera();
        vp.reset_view();
        prop_assert_eq!(vp.camera(), once);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Fog
// ═══════════════════════════════════════════════════════════════════════

fn eight_nodes(level: i32) -> FogModel {
    FogModel::from_levels((0..8).map(|i| (format!("n{i}"), level)))
}

proptest! {
    #[test]
    fn repeated_relief_matches_closed_form(start in 0i32..=100, amount in 0u8..=100, k in 0usize..12) {
        let mut fog = FogModel::from_levels([("n", start)]);
        for _ in 0..k {
            fog.relieve("n", amount).unwrap();
        }
        let expected = (start - k as i32 * amount as i32).max(0) as u8;
        prop_assert_eq!(fog.level("n"), Some(expected));
    }

    #[test]
    fn levels_stay_in_range(start in 0i32..=100, ops in prop::collection::vec(fog_op_strategy(), 0..64)) {
        let mut fog = eight_nodes(start);
        for op in ops {
            match op {
                FogOp::Set(n, v) => {
                    fog.set_level(&format!("n{n}"), v).unwrap();
                }
                FogOp::Relieve(n, a) => {
                    fog.relieve(&format!("n{n}"), a).unwrap();
                }
                FogOp::Adjust(d) => fog.adjust_all(d),
                FogOp::Randomize(seed) => fog.randomize_all(&mut StdRng::seed_from_u64(seed)),
            }
            prop_assert_eq!(fog.len(), 8);
            prop_assert!(fog.iter().all(|(_, l)| l <= 100));
        }
    }

    #[test]
    fn big_adjustments_saturate(start in 0i32..=100, delta in 100i32..=i32::MAX) {
        let mut fog = eight_nodes(start);
        fog.adjust_all(delta);
        prop_assert!(fog.iter().all(|(_, l)| l == 100));
        fog.adjust_all(-delta);
        prop_assert!(fog.iter().all(|(_, l)| l == 0));
    }

    #[test]
    fn foggy_iff_above_sixty(level in 0u8..=100) {
        prop_assert_eq!(is_foggy(level, &FogConfig::default()), level > 60);
    }
}
