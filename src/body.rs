//! Deformable "jello" bodies: a triangle mesh whose vertices are point masses
//! and whose edges are springs.

use crate::config::{BodyConfig, SimulationConfig};
use crate::edge::EdgeSet;
use crate::environment::Environment;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::mesh::{self, TriangleMesh};
use crate::observer::StepObserver;
use crate::vec::Vec3;
use crate::vertex::Vertex;
use alloc::vec::Vec as AllocVec;

/// A deformable body simulated with springs, gravity and penalty contacts.
#[derive(Clone, Debug)]
pub struct JelloBody<F: Float> {
    vertices: AllocVec<Vertex<F>>,
    faces: AllocVec<usize>,
    edges: EdgeSet<F>,
    integrator: Integrator<F>,
}

impl<F: Float> JelloBody<F> {
    /// Spawn a fresh body from a template mesh.
    ///
    /// The body owns copies of the template's positions, so the same template
    /// can spawn any number of independent bodies. Springs take their rest
    /// lengths from the template.
    pub fn from_mesh(template: &TriangleMesh<F>, config: &BodyConfig<F>) -> Result<Self, PhysicsError> {
        config.validate()?;
        let vertices = template
            .positions()
            .iter()
            .map(|&p| Vertex::try_new(p, config.vertex_mass))
            .collect::<Result<AllocVec<_>, _>>()?;
        let edges = EdgeSet::from_faces(
            template.positions(),
            template.faces(),
            config.spring_stiffness,
            config.support_spring_modulus,
        )?;
        Ok(JelloBody {
            vertices,
            faces: template.faces().to_vec(),
            edges,
            integrator: Integrator::new(),
        })
    }

    /// Simulate one displayed frame.
    ///
    /// Every vertex's `prev_position` is moved to its current position, then
    /// `config.sub_steps` RK4 sub-steps of `config.dt` run. Collision
    /// segments therefore span everything the body has moved during this
    /// frame so far.
    pub fn step<O: StepObserver>(
        &mut self,
        environment: &Environment<F>,
        config: &SimulationConfig<F>,
        observer: &mut O,
    ) {
        debug_assert!(config.validate().is_ok(), "invalid simulation config");
        for v in self.vertices.iter_mut() {
            v.capture_previous();
        }

        for sub in 0..config.sub_steps {
            self.integrator.step(&mut self.vertices, self.edges.edges(), environment, config, observer);
            observer.on_sub_step(sub);
        }

        tracing::trace!(
            vertices = self.vertices.len(),
            in_contact = self.contact_count(),
            "jello frame complete"
        );
        observer.on_step_complete();
    }

    /// Give every vertex the same velocity (e.g. when the body is tossed).
    pub fn set_velocity(&mut self, velocity: Vec3<F>) {
        for v in self.vertices.iter_mut() {
            v.velocity = velocity;
        }
    }

    /// Move the whole body rigidly, resetting the collision segment so the
    /// jump itself is not treated as motion.
    pub fn translate(&mut self, offset: Vec3<F>) {
        for v in self.vertices.iter_mut() {
            v.position = v.position + offset;
            v.prev_position = v.position;
            v.clear_contacts();
        }
    }

    /// Index of the first vertex whose segment over the last frame collides
    /// with `target` (for example a goal plane), if any.
    pub fn crossed(&self, target: &Environment<F>, cushion: F) -> Option<usize> {
        self.vertices
            .iter()
            .position(|v| !target.query(v.prev_position, v.position, cushion).is_empty())
    }

    /// Simulated vertices, in template order.
    pub fn vertices(&self) -> &[Vertex<F>] { &self.vertices }

    /// Mutable access to the vertices.
    pub fn vertices_mut(&mut self) -> &mut [Vertex<F>] { &mut self.vertices }

    /// Flat triangle index list copied from the template.
    pub fn faces(&self) -> &[usize] { &self.faces }

    /// Spring topology.
    pub fn edges(&self) -> &EdgeSet<F> { &self.edges }

    /// Current vertex positions.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Average vertex position.
    pub fn centroid(&self) -> Vec3<F> {
        if self.vertices.is_empty() {
            return Vec3::zero();
        }
        let n = F::from_f32(self.vertices.len() as f32);
        let mut sum = Vec3::zero();
        for v in &self.vertices {
            sum = sum + v.position;
        }
        sum.scale(F::one() / n)
    }

    /// Mass-weighted average velocity.
    pub fn velocity(&self) -> Vec3<F> {
        let mut momentum = Vec3::zero();
        let mut mass = F::zero();
        for v in &self.vertices {
            momentum = momentum + v.momentum();
            mass = mass + v.mass;
        }
        if mass == F::zero() {
            return Vec3::zero();
        }
        momentum.scale(F::one() / mass)
    }

    /// Vertices flagged as colliding by the last sub-step.
    pub fn contact_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.colliding).count()
    }

    /// Flat per-corner normals of the deformed surface, for rendering.
    pub fn face_normals(&self) -> AllocVec<Vec3<F>> {
        let positions = self.positions();
        mesh::face_normals(&positions, &self.faces)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
