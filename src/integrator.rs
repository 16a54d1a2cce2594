//! Fourth-order Runge-Kutta integration of a mass-spring mesh with penalty
//! collisions against a static [`Environment`].

use crate::config::SimulationConfig;
use crate::edge::Edge;
use crate::environment::Environment;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::plane::Plane;
use crate::vec::Vec3;
use crate::vertex::Vertex;
use alloc::vec::Vec as AllocVec;

/// Advance `vertices` by one sub-step of `config.dt`.
///
/// Allocates scratch space on every call; keep an [`Integrator`] around to
/// reuse it.
pub fn step<F: Float>(
    vertices: &mut [Vertex<F>],
    edges: &[Edge<F>],
    environment: &Environment<F>,
    config: &SimulationConfig<F>,
) {
    Integrator::new().step(vertices, edges, environment, config, &mut NoOpStepObserver);
}

/// Penalty force pushing a point at `position` out along the plane normal:
/// `normal * k * (cushion - distance)` while that overlap is positive.
pub fn penalty_force<F: Float>(plane: &Plane<F>, position: Vec3<F>, cushion: F, stiffness: F) -> Vec3<F> {
    let overlap = cushion - plane.distance_to(position);
    if overlap > F::zero() {
        plane.normal().scale(stiffness * overlap)
    } else {
        Vec3::zero()
    }
}

/// RK4 integrator with scratch buffers reused across steps.
#[derive(Clone, Debug, Default)]
pub struct Integrator<F: Float> {
    origin: AllocVec<Vec3<F>>,
    velocity: AllocVec<Vec3<F>>,
    previous: AllocVec<Vec3<F>>,
    masses: AllocVec<F>,
    staged: AllocVec<Vec3<F>>,
    dx: [AllocVec<Vec3<F>>; 4],
    dv: [AllocVec<Vec3<F>>; 4],
    contacts: AllocVec<usize>,
}

impl<F: Float> Integrator<F> {
    /// Create an integrator with empty scratch buffers.
    pub fn new() -> Self {
        Integrator {
            origin: AllocVec::new(),
            velocity: AllocVec::new(),
            previous: AllocVec::new(),
            masses: AllocVec::new(),
            staged: AllocVec::new(),
            dx: Default::default(),
            dv: Default::default(),
            contacts: AllocVec::new(),
        }
    }

    /// Advance every vertex by one sub-step of `config.dt`.
    ///
    /// The derivative of the whole mesh is evaluated four times (at `t`,
    /// twice at `t + dt/2`, at `t + dt`) from staged copies of the state and
    /// nothing is written back until all four are known, so spring forces
    /// never see a half-updated neighbour.
    ///
    /// Contacts found in the first evaluation are stored on the vertices.
    /// `prev_position` is read, never written: the caller moves it once per
    /// frame.
    pub fn step<O: StepObserver>(
        &mut self,
        vertices: &mut [Vertex<F>],
        edges: &[Edge<F>],
        environment: &Environment<F>,
        config: &SimulationConfig<F>,
        observer: &mut O,
    ) {
        if vertices.is_empty() {
            return;
        }
        self.load(vertices);

        let dt = config.dt;
        let half_dt = dt * F::half();

        for stage in 0..4 {
            if stage == 0 {
                self.staged.clone_from(&self.origin);
                self.dx[0].clone_from(&self.velocity);
            } else {
                let h = if stage == 3 { dt } else { half_dt };
                let (dx_done, dx_rest) = self.dx.split_at_mut(stage);
                let (prev_dx, prev_dv) = (&dx_done[stage - 1], &self.dv[stage - 1]);
                let dx_next = &mut dx_rest[0];
                for i in 0..self.origin.len() {
                    self.staged[i] = self.origin[i] + prev_dx[i].scale(h);
                    dx_next[i] = self.velocity[i] + prev_dv[i].scale(h);
                }
            }

            let record = if stage == 0 { Some(&mut *vertices) } else { None };
            accelerations(
                &self.staged,
                &self.previous,
                &self.masses,
                edges,
                environment,
                config,
                &mut self.dv[stage],
                &mut self.contacts,
                record,
                observer,
            );
            observer.on_force_evaluation(stage);
        }

        let sixth = dt / F::from_f32(6.0);
        let two = F::two();
        for (i, v) in vertices.iter_mut().enumerate() {
            let dx = self.dx[0][i] + self.dx[1][i].scale(two) + self.dx[2][i].scale(two) + self.dx[3][i];
            let dv = self.dv[0][i] + self.dv[1][i].scale(two) + self.dv[2][i].scale(two) + self.dv[3][i];
            v.position = self.origin[i] + dx.scale(sixth);
            v.velocity = self.velocity[i] + dv.scale(sixth);
        }
    }

    fn load(&mut self, vertices: &[Vertex<F>]) {
        let n = vertices.len();
        self.origin.clear();
        self.velocity.clear();
        self.previous.clear();
        self.masses.clear();
        for v in vertices {
            self.origin.push(v.position);
            self.velocity.push(v.velocity);
            self.previous.push(v.prev_position);
            self.masses.push(v.mass);
        }
        self.staged.resize(n, Vec3::zero());
        for buf in self.dx.iter_mut().chain(self.dv.iter_mut()) {
            buf.resize(n, Vec3::zero());
        }
    }
}

/// Acceleration of every vertex at the staged `positions`: gravity, springs
/// and penalty contacts, divided by mass.
///
/// Contacts are queried on the segment `previous[i] -> positions[i]`, with
/// repeated faces counted once. When `record` is given, each vertex's contact
/// state is overwritten with the result.
#[allow(clippy::too_many_arguments)]
fn accelerations<F: Float, O: StepObserver>(
    positions: &[Vec3<F>],
    previous: &[Vec3<F>],
    masses: &[F],
    edges: &[Edge<F>],
    environment: &Environment<F>,
    config: &SimulationConfig<F>,
    out: &mut [Vec3<F>],
    contacts: &mut AllocVec<usize>,
    mut record: Option<&mut [Vertex<F>]>,
    observer: &mut O,
) {
    for (a, &m) in out.iter_mut().zip(masses) {
        *a = config.gravity.scale(m);
    }

    for edge in edges {
        debug_assert!(
            edge.v0 < positions.len() && edge.v1 < positions.len(),
            "edge ({}, {}) references a vertex out of bounds (count: {})",
            edge.v0,
            edge.v1,
            positions.len()
        );
        let f = edge.force(positions[edge.v0], positions[edge.v1]);
        out[edge.v0] = out[edge.v0] + f;
        out[edge.v1] = out[edge.v1] - f;
    }

    for i in 0..positions.len() {
        contacts.clear();
        environment.query_into(previous[i], positions[i], config.cushion, contacts);
        contacts.sort_unstable();
        contacts.dedup();

        for &face in contacts.iter() {
            let plane = environment.plane(face);
            out[i] = out[i] + penalty_force(&plane, positions[i], config.cushion, config.collision_stiffness);
        }

        if let Some(vertices) = record.as_deref_mut() {
            vertices[i].record_contacts(contacts);
            if !contacts.is_empty() {
                observer.on_contact(i, contacts);
            }
        }
    }

    for (a, &m) in out.iter_mut().zip(masses) {
        *a = a.scale(F::one() / m);
    }
}
