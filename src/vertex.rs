//! Point masses of a deformable body.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A point mass with explicit velocity, advanced by the RK4 integrator.
///
/// `Clone` is a deep copy: the clone shares no storage with the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex<F: Float> {
    pub position: Vec3<F>,
    /// Position at the start of the current frame; the collision segment runs
    /// from here to `position`.
    pub prev_position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub mass: F,
    /// Set when the last query found at least one colliding face.
    pub colliding: bool,
    /// Distinct face-start indices from the last query.
    pub collision_faces: AllocVec<usize>,
}

impl<F: Float> Vertex<F> {
    /// A vertex at rest. `mass` must be positive; see [`try_new`](Self::try_new).
    pub fn new(position: Vec3<F>, mass: F) -> Self {
        debug_assert!(mass > F::zero() && mass.is_finite(), "vertex mass must be positive");
        Vertex {
            position,
            prev_position: position,
            velocity: Vec3::zero(),
            mass,
            colliding: false,
            collision_faces: AllocVec::new(),
        }
    }

    /// Like [`new`](Self::new), rejecting a non-positive or non-finite mass.
    pub fn try_new(position: Vec3<F>, mass: F) -> Result<Self, PhysicsError> {
        if !(mass > F::zero() && mass.is_finite()) {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(Self::new(position, mass))
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec3<F>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Start a new frame: the collision segment restarts at the current position.
    pub fn capture_previous(&mut self) {
        self.prev_position = self.position;
    }

    /// Replace the contact state with `faces`.
    pub fn record_contacts(&mut self, faces: &[usize]) {
        self.collision_faces.clear();
        self.collision_faces.extend_from_slice(faces);
        self.colliding = !faces.is_empty();
    }

    /// Forget all contacts.
    pub fn clear_contacts(&mut self) {
        self.collision_faces.clear();
        self.colliding = false;
    }

    /// Mass times velocity.
    pub fn momentum(&self) -> Vec3<F> {
        self.velocity.scale(self.mass)
    }

    /// Displacement since the start of the frame.
    pub fn displacement(&self) -> Vec3<F> {
        self.position - self.prev_position
    }
}
