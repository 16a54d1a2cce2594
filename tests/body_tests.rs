use jello::{BodyConfig, Environment, JelloBody, NoOpStepObserver, SimulationConfig, StepObserver, TriangleMesh, Vec3};

fn floor() -> Environment<f64> {
    Environment::new(TriangleMesh::grid(Vec3::new(-2.0, 0.0, -2.0), 4, 4, 1.0))
}

fn cube() -> TriangleMesh<f64> {
    TriangleMesh::cuboid(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.25))
}

fn earth() -> SimulationConfig<f64> {
    SimulationConfig::new().with_gravity(Vec3::new(0.0, -9.81, 0.0))
}

#[derive(Default)]
struct FrameCounter {
    force_evaluations: usize,
    sub_steps: usize,
    frames: usize,
}

impl StepObserver for FrameCounter {
    fn on_force_evaluation(&mut self, _stage: usize) {
        self.force_evaluations += 1;
    }

    fn on_sub_step(&mut self, _index: usize) {
        self.sub_steps += 1;
    }

    fn on_step_complete(&mut self) {
        self.frames += 1;
    }
}

#[test]
fn jello_cube_bounces_on_floor() {
    let floor = floor();
    let config = earth();
    let mut body = JelloBody::from_mesh(&cube(), &BodyConfig::new()).unwrap();

    let mut lowest = f64::MAX;
    let mut touched = false;
    let mut rebounded = false;
    for _ in 0..400 {
        body.step(&floor, &config, &mut NoOpStepObserver);
        for v in body.vertices() {
            assert!(v.position.is_finite());
            lowest = lowest.min(v.position.y);
        }
        if body.contact_count() > 0 {
            touched = true;
        }
        if touched && body.velocity().y > 0.1 {
            rebounded = true;
        }
    }

    assert!(touched, "cube never reached the floor");
    assert!(rebounded, "cube never bounced");
    assert!(lowest > 0.0, "cube sank through the floor: lowest y {}", lowest);
}

#[test]
fn falling_body_crosses_goal() {
    let goal = Environment::new(TriangleMesh::grid(Vec3::new(-2.0, 0.5, -2.0), 4, 4, 1.0));
    let open = Environment::empty();
    let config = earth();
    let mut body = JelloBody::from_mesh(&cube(), &BodyConfig::new()).unwrap();

    let mut crossing = None;
    for frame in 0..100 {
        body.step(&open, &config, &mut NoOpStepObserver);
        if let Some(vertex) = body.crossed(&goal, config.cushion) {
            crossing = Some((frame, vertex));
            break;
        }
    }

    let (frame, vertex) = crossing.expect("body never reached the goal");
    assert!(frame > 0);
    // Corners with bit 1 clear form the bottom face.
    assert_eq!(vertex & 2, 0);
}

#[test]
fn observer_sees_every_stage() {
    let mut body = JelloBody::from_mesh(&cube(), &BodyConfig::new()).unwrap();
    let config = earth().with_sub_steps(3);
    let mut counter = FrameCounter::default();
    for _ in 0..4 {
        body.step(&floor(), &config, &mut counter);
    }
    assert_eq!(counter.frames, 4);
    assert_eq!(counter.sub_steps, 12);
    assert_eq!(counter.force_evaluations, 48);
}

#[test]
fn frame_starts_collision_segment() {
    let mut body = JelloBody::from_mesh(&cube(), &BodyConfig::new()).unwrap();
    let config = earth();
    body.step(&Environment::empty(), &config, &mut NoOpStepObserver);
    let before: Vec<_> = body.positions();
    body.step(&Environment::empty(), &config, &mut NoOpStepObserver);
    for (v, p) in body.vertices().iter().zip(before) {
        assert_eq!(v.prev_position, p);
        assert!(v.displacement().y < 0.0);
    }
}

#[test]
fn support_springs_stiffen_body() {
    let config = BodyConfig::new().with_support_springs(1);
    let body = JelloBody::from_mesh(&cube(), &config).unwrap();
    assert_eq!(body.edges().len(), 28);
    assert_eq!(body.edges().support_count(), 10);
    assert_eq!(body.face_normals().len(), 36);
}
