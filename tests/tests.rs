use moonfield::simulation::forces::{direction, Attraction, FrameInput, Influence, InfluenceSet, LocalAvoidance, PointerRepulsion};
use moonfield::simulation::hover::{HoverState, SmoothedScalar};
use moonfield::simulation::integrator::{step_body, step_frame, surface_constraint};
use moonfield::simulation::layout::{layer_share, ring_layout, LayoutParams};
use moonfield::simulation::params::{Attractor, Parameters};
use moonfield::simulation::registry::BodyRegistry;
use moonfield::simulation::scenario::Scene;
use moonfield::simulation::states::{BodyKind, NVec3, System};
use moonfield::SceneConfig;

const EPS: f64 = 1e-12;

/// Influence point no body can feel
fn far_pointer() -> FrameInput {
    FrameInput::new(NVec3::new(1.0e3, 1.0e3, 1.0e3))
}

/// Moon of radius 3 at the origin
fn moon() -> Attractor {
    Attractor::at_origin(3.0)
}

/// Standard influences for `moon()` with reference tuning
fn standard_set() -> InfluenceSet {
    InfluenceSet::standard(&moon(), &Parameters::default())
}

fn assert_close(a: NVec3, b: NVec3, tol: f64) {
    assert!((a - b).norm() < tol, "expected {:?}, got {:?}", b, a);
}

// ==================================================================================
// Registry tests
// ==================================================================================

#[test]
fn registry_set_overwrites_in_place() {
    let mut reg = BodyRegistry::new(vec![NVec3::zeros(); 3]);
    reg.set(1, NVec3::new(1.0, 2.0, 3.0));

    assert_eq!(reg.get(1), NVec3::new(1.0, 2.0, 3.0));
    assert_eq!(reg.get(0), NVec3::zeros());
    assert_eq!(reg.all().len(), 3);
    assert_eq!(reg.all()[1], NVec3::new(1.0, 2.0, 3.0));
}

#[test]
#[should_panic(expected = "out of range")]
fn registry_get_out_of_range_panics() {
    let reg = BodyRegistry::new(vec![NVec3::zeros(); 2]);
    reg.get(2);
}

#[test]
#[should_panic(expected = "out of range")]
fn registry_set_out_of_range_panics() {
    let mut reg = BodyRegistry::new(vec![NVec3::zeros(); 2]);
    reg.set(5, NVec3::zeros());
}

// ==================================================================================
// Influence tests
// ==================================================================================

#[test]
fn direction_of_zero_vector_is_zero() {
    assert_eq!(direction(NVec3::zeros()), NVec3::zeros());
    assert_close(direction(NVec3::new(0.0, 3.0, 4.0)), NVec3::new(0.0, 0.6, 0.8), EPS);
}

#[test]
fn attraction_only_outside_radius() {
    let reg = BodyRegistry::default();
    let term = Attraction {
        center: NVec3::zeros(),
        radius: 3.0,
        strength: 0.02,
    };

    let outside = term.velocity_delta(0, &NVec3::new(5.0, 0.0, 0.0), &far_pointer(), &reg);
    assert_close(outside, NVec3::new(-0.02, 0.0, 0.0), EPS);

    let inside = term.velocity_delta(0, &NVec3::new(2.0, 0.0, 0.0), &far_pointer(), &reg);
    assert_eq!(inside, NVec3::zeros());

    let at_center = term.velocity_delta(0, &NVec3::zeros(), &far_pointer(), &reg);
    assert_eq!(at_center, NVec3::zeros());
}

#[test]
fn repulsion_falls_off_linearly() {
    let reg = BodyRegistry::default();
    let term = PointerRepulsion {
        strength: 0.3,
        radius: 4.0,
    };
    let input = FrameInput::new(NVec3::zeros());

    for d in [0.5, 1.0, 2.0, 3.0, 3.9] {
        let dv = term.velocity_delta(0, &NVec3::new(0.0, d, 0.0), &input, &reg);
        let expected = 0.3 * (1.0 - d / 4.0);
        assert!((dv.norm() - expected).abs() < EPS, "d = {d}: {} vs {expected}", dv.norm());
        assert!(dv.y > 0.0, "repulsion must point away from the influence point");
    }
}

#[test]
fn repulsion_is_zero_at_boundary_and_at_influence_point() {
    let reg = BodyRegistry::default();
    let term = PointerRepulsion {
        strength: 0.3,
        radius: 4.0,
    };
    let input = FrameInput::new(NVec3::new(1.0, 1.0, 1.0));

    let at_boundary = term.velocity_delta(0, &NVec3::new(5.0, 1.0, 1.0), &input, &reg);
    assert_eq!(at_boundary, NVec3::zeros());

    let on_point = term.velocity_delta(0, &NVec3::new(1.0, 1.0, 1.0), &input, &reg);
    assert_eq!(on_point, NVec3::zeros());
    assert!(on_point.iter().all(|c| c.is_finite()));
}

#[test]
fn avoidance_ignores_self_and_distant_bodies() {
    let reg = BodyRegistry::new(vec![
        NVec3::new(0.0, 0.0, 0.0),
        NVec3::new(0.3, 0.0, 0.0),
        NVec3::new(5.0, 0.0, 0.0),
    ]);
    let term = LocalAvoidance {
        min_spacing: 0.6,
        strength: 0.02,
    };

    let dv = term.velocity_delta(0, &reg.get(0), &far_pointer(), &reg);
    assert_close(dv, NVec3::new(-0.02, 0.0, 0.0), EPS);
}

#[test]
fn standard_set_has_three_terms() {
    assert_eq!(standard_set().len(), 3);
    assert!(InfluenceSet::new().is_empty());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn damping_alone_decays_geometrically() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::new(100.0, 0.0, 0.0)]);
    sys.bodies[0].v = NVec3::new(0.1, 0.0, 0.0);
    let forces = InfluenceSet::new();

    for k in 1..=50 {
        step_frame(&mut sys, &forces, &p, &moon(), &far_pointer());
        let expected = 0.1 * 0.95_f64.powi(k);
        assert!((sys.bodies[0].v.norm() - expected).abs() < 1e-12, "frame {k}");
    }
    assert!(sys.bodies[0].v.norm() < 0.1 * 0.08);
}

#[test]
fn attraction_step_from_rest_moves_toward_center() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::new(10.0, 0.0, 0.0)]);

    step_frame(&mut sys, &standard_set(), &p, &moon(), &far_pointer());

    assert_close(sys.bodies[0].v, NVec3::new(-0.02, 0.0, 0.0), EPS);
    assert!(sys.registry.get(0).x < 10.0);
}

#[test]
fn no_attraction_inside_radius() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::new(1.0, 0.0, 0.0)]);
    sys.bodies[0].v = NVec3::new(0.0, 0.1, 0.0);

    step_frame(&mut sys, &standard_set(), &p, &moon(), &far_pointer());

    // Only damping and the surface shell touch velocity
    assert_close(sys.bodies[0].v, NVec3::new(0.0, 0.1 * 0.95 * 0.8, 0.0), EPS);
}

#[test]
fn surface_constraint_closes_a_fifth_of_the_gap() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::new(2.0, 0.0, 0.0)]);
    sys.bodies[0].v = NVec3::new(0.0, 0.1, 0.0);

    step_frame(&mut sys, &standard_set(), &p, &moon(), &far_pointer());

    let moved = NVec3::new(2.0, 0.095, 0.0);
    let shell = moved.normalize() * 3.5;
    let expected = moved + (shell - moved) * 0.2;

    assert_close(sys.registry.get(0), expected, EPS);
    assert!((sys.bodies[0].v.norm() - 0.1 * 0.95 * 0.8).abs() < EPS);
}

#[test]
fn surface_constraint_leaves_bodies_outside_shell_alone() {
    let p = Parameters::default();
    let mut x = NVec3::new(3.6, 0.0, 0.0);
    let mut v = NVec3::new(0.0, 0.05, 0.0);

    surface_constraint(&mut x, &mut v, &moon(), &p);

    assert_eq!(x, NVec3::new(3.6, 0.0, 0.0));
    assert_eq!(v, NVec3::new(0.0, 0.05, 0.0));
}

#[test]
fn body_at_center_stays_finite() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::zeros()]);
    let input = FrameInput::new(NVec3::zeros());

    for _ in 0..10 {
        step_frame(&mut sys, &standard_set(), &p, &moon(), &input);
    }

    let x = sys.registry.get(0);
    assert!(x.iter().all(|c| c.is_finite()));
    assert!(sys.bodies[0].v.iter().all(|c| c.is_finite()));
}

#[test]
fn frame_pass_is_ordered_and_asymmetric() {
    let p = Parameters::default();
    let avoid = InfluenceSet::new().with(LocalAvoidance {
        min_spacing: 0.6,
        strength: 0.02,
    });
    let mut sys = System::from_positions(vec![NVec3::new(50.0, 0.0, 0.0), NVec3::new(50.59, 0.0, 0.0)]);

    step_frame(&mut sys, &avoid, &p, &moon(), &far_pointer());

    // Body 0 reacts to body 1's pre-update position
    assert_close(sys.bodies[0].v, NVec3::new(-0.02, 0.0, 0.0), EPS);
    assert_close(sys.registry.get(0), NVec3::new(49.98, 0.0, 0.0), EPS);

    // Body 1 sees body 0 already moved 0.61 away: no push
    assert_eq!(sys.bodies[1].v, NVec3::zeros());
    assert_close(sys.registry.get(1), NVec3::new(50.59, 0.0, 0.0), EPS);
    assert_eq!(sys.frame, 1);
}

#[test]
fn step_body_commits_to_registry_immediately() {
    let p = Parameters::default();
    let mut sys = System::from_positions(vec![NVec3::new(10.0, 0.0, 0.0), NVec3::new(0.0, 10.0, 0.0)]);

    step_body(0, &mut sys, &standard_set(), &p, &moon(), &far_pointer());

    assert_close(sys.registry.get(0), NVec3::new(9.98, 0.0, 0.0), EPS);
    assert_eq!(sys.registry.get(1), NVec3::new(0.0, 10.0, 0.0));
}

#[test]
fn three_distant_bodies_only_feel_attraction() {
    let starts = vec![
        NVec3::new(10.0, 0.0, 0.0),
        NVec3::new(0.0, 10.0, 0.0),
        NVec3::new(0.0, 0.0, 10.0),
    ];
    let mut scene = Scene::from_positions(starts.clone(), moon(), Parameters::default());

    scene.step(NVec3::new(100.0, 100.0, 100.0));

    for (i, x0) in starts.iter().enumerate() {
        let expected = x0 + (-x0).normalize() * 0.02;
        assert_close(scene.system.registry.get(i), expected, EPS);
    }
}

#[test]
fn bodies_settle_near_the_shell() {
    let starts = vec![
        NVec3::new(8.0, 0.0, 0.0),
        NVec3::new(-8.0, 1.0, 0.0),
        NVec3::new(0.0, -1.0, 8.0),
    ];
    let mut scene = Scene::from_positions(starts, moon(), Parameters::default());

    for _ in 0..2000 {
        scene.step(NVec3::new(100.0, 100.0, 100.0));
    }

    for x in scene.system.registry.all() {
        let r = x.norm();
        assert!(r > 2.5 && r < 4.5, "body drifted to radius {r}");
    }
    assert!(scene.system.max_speed() < 0.1);
}

// ==================================================================================
// Layout tests
// ==================================================================================

#[test]
fn layout_produces_requested_count() {
    let params = LayoutParams::default();

    for seed in [Some(1), Some(2), Some(99), None] {
        let positions = ring_layout(48, 3, &params, seed);
        assert_eq!(positions.len(), 48);
        assert!(positions.iter().all(|x| x.iter().all(|c| c.is_finite())));

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                assert_ne!(positions[i], positions[j], "bodies {i} and {j} coincide");
            }
        }
    }
}

#[test]
fn layout_is_reproducible_with_seed() {
    let params = LayoutParams::default();
    assert_eq!(ring_layout(48, 3, &params, Some(7)), ring_layout(48, 3, &params, Some(7)));
}

#[test]
fn layout_rings_stay_in_bounds() {
    let params = LayoutParams::default();
    let positions = ring_layout(48, 3, &params, Some(3));

    let mut start = 0;
    for layer in 0..3 {
        let count = layer_share(48, 3, layer);
        for x in &positions[start..start + count] {
            let ring = (x.x * x.x + x.z * x.z).sqrt();
            assert!((5.0..=7.0).contains(&ring), "ring radius {ring}");
            let base = layer as f64 * 1.5;
            assert!((x.y - base).abs() <= 2.0, "height {} on layer {layer}", x.y);
        }
        start += count;
    }
}

#[test]
fn layer_shares_cover_uneven_totals() {
    let total: usize = (0..3).map(|l| layer_share(50, 3, l)).sum();
    assert_eq!(total, 50);
    assert_eq!(ring_layout(50, 3, &LayoutParams::default(), Some(5)).len(), 50);
    assert!(ring_layout(0, 3, &LayoutParams::default(), Some(5)).is_empty());
}

#[test]
fn kinds_are_round_robin() {
    let sys = System::from_positions(vec![NVec3::zeros(); 6]);
    let kinds: Vec<BodyKind> = sys.bodies.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BodyKind::Cube,
            BodyKind::Sphere,
            BodyKind::Torus,
            BodyKind::Cube,
            BodyKind::Sphere,
            BodyKind::Torus
        ]
    );
}

// ==================================================================================
// Hover tests
// ==================================================================================

#[test]
fn smoothed_scalar_converges_without_overshoot() {
    let mut s = SmoothedScalar::new(1.0, 12.0);
    let mut prev = s.value;

    for _ in 0..120 {
        let v = s.advance(1.1, 1.0 / 60.0);
        assert!(v >= prev - 1e-12, "scale went backwards");
        assert!(v <= 1.1 + 1e-12, "scale overshot: {v}");
        prev = v;
    }
    assert!((s.value - 1.1).abs() < 1e-4);
}

#[test]
fn smoothed_scalar_zero_dt_is_noop() {
    let mut s = SmoothedScalar::new(1.05, 12.0);
    s.velocity = 0.3;
    let before = s;

    s.advance(1.0, 0.0);

    assert_eq!(s, before);
}

#[test]
fn smoothed_scalar_is_stable_for_long_steps() {
    let mut s = SmoothedScalar::new(1.0, 12.0);
    s.advance(1.1, 10.0);
    assert!((s.value - 1.1).abs() < 1e-6);
    assert!(s.velocity.abs() < 1e-6);
}

#[test]
fn hover_flag_switches_target() {
    let mut h = HoverState::default();
    assert_eq!(h.target(), 1.0);

    h.hovered = true;
    assert_eq!(h.target(), 1.1);
    for _ in 0..120 {
        h.animate(1.0 / 60.0);
    }
    assert!((h.display_scale() - 1.1).abs() < 1e-3);

    h.hovered = false;
    for _ in 0..120 {
        h.animate(1.0 / 60.0);
    }
    assert!((h.display_scale() - 1.0).abs() < 1e-3);
}

#[test]
fn hover_does_not_affect_motion() {
    let starts = vec![NVec3::new(6.0, 0.0, 0.0), NVec3::new(0.0, 6.0, 0.0)];
    let mut plain = Scene::from_positions(starts.clone(), moon(), Parameters::default());
    let mut hovered = Scene::from_positions(starts, moon(), Parameters::default());
    hovered.system.bodies[0].hover.hovered = true;

    for _ in 0..30 {
        plain.step(NVec3::new(4.0, 1.0, 0.0));
        hovered.step(NVec3::new(4.0, 1.0, 0.0));
        hovered.system.bodies[0].hover.animate(1.0 / 60.0);
    }

    assert_eq!(plain.system.registry.all(), hovered.system.registry.all());
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn config_defaults_match_reference_tuning() {
    let cfg = SceneConfig::from_yaml_str("{}").unwrap();

    assert_eq!(cfg.engine.body_count, 48);
    assert_eq!(cfg.engine.layers, 3);
    assert_eq!(cfg.engine.seed, None);
    assert_eq!(cfg.attractor.radius, 3.0);
    assert_eq!(cfg.parameters(), Parameters::default());
    assert_eq!(cfg.layout(), LayoutParams::default());
}

#[test]
fn config_reads_partial_yaml() {
    let yaml = "
engine:
  body_count: 12
  seed: 4
tuning:
  damping: 0.9
";
    let cfg = SceneConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.engine.body_count, 12);
    assert_eq!(cfg.engine.layers, 3);
    assert_eq!(cfg.engine.seed, Some(4));
    assert_eq!(cfg.parameters().damping, 0.9);
    assert_eq!(cfg.parameters().repulsion_strength, 0.3);
}

#[test]
fn config_rejects_bad_values() {
    assert!(SceneConfig::from_yaml_str("engine: { body_count: 0 }").is_err());
    assert!(SceneConfig::from_yaml_str("engine: { layers: 0 }").is_err());
    assert!(SceneConfig::from_yaml_str("attractor: { radius: -1.0 }").is_err());
    assert!(SceneConfig::from_yaml_str("tuning: { damping: 1.5 }").is_err());
    assert!(SceneConfig::from_yaml_str("tuning: { influence_radius: 0.0 }").is_err());
    assert!(SceneConfig::from_yaml_str("layout: { radius_jitter: -2.0 }").is_err());
    assert!(SceneConfig::from_yaml_str("hover: { stiffness: 0.0 }").is_err());
    assert!(SceneConfig::from_yaml_str("engine: { body_count: many }").is_err());
}

#[test]
fn scene_builds_from_config() {
    let mut cfg = SceneConfig::default();
    cfg.engine.seed = Some(11);
    cfg.hover.scale = 1.3;

    let mut scene = Scene::build_scene(&cfg);

    assert_eq!(scene.system.len(), 48);
    assert_eq!(scene.system.registry.len(), 48);
    assert_eq!(scene.forces.len(), 3);
    assert!(scene.system.bodies.iter().all(|b| b.v == NVec3::zeros()));
    assert!(scene.system.bodies.iter().all(|b| b.hover.hover_scale == 1.3));

    for _ in 0..120 {
        scene.step(NVec3::new(5.0, 0.0, 0.0));
    }
    assert_eq!(scene.system.frame, 120);
    assert!(scene.system.registry.all().iter().all(|x| x.iter().all(|c| c.is_finite())));
}
