//! Configuration types for the integrator and for spawning bodies.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec3;

/// Per-step physical constants.
///
/// # Builder Pattern
/// ```
/// use jello::config::SimulationConfig;
/// use jello::vec::Vec3;
///
/// let config: SimulationConfig<f32> = SimulationConfig::new()
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_dt(0.001)
///     .with_sub_steps(5)
///     .with_cushion(0.2)
///     .with_collision_stiffness(500.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationConfig<F: Float> {
    /// Gravity acceleration. Default: (0, -1, 0).
    pub gravity: Vec3<F>,
    /// Length of one RK4 sub-step. Default: 0.001.
    pub dt: F,
    /// RK4 sub-steps per displayed frame. Default: 5.
    pub sub_steps: usize,
    /// Distance from a surface that already counts as contact. Default: 0.2.
    pub cushion: F,
    /// Penalty spring constant along the contact normal. Default: 500.
    pub collision_stiffness: F,
}

impl<F: Float> SimulationConfig<F> {
    /// Create config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            gravity: Vec3::new(F::zero(), -F::one(), F::zero()),
            dt: F::from_f32(0.001),
            sub_steps: 5,
            cushion: F::from_f32(0.2),
            collision_stiffness: F::from_f32(500.0),
        }
    }

    /// Set gravity acceleration.
    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the sub-step length.
    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    /// Set the number of sub-steps (at least 1).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Set the contact cushion distance.
    pub fn with_cushion(mut self, cushion: F) -> Self {
        self.cushion = cushion;
        self
    }

    /// Set the penalty spring constant.
    pub fn with_collision_stiffness(mut self, stiffness: F) -> Self {
        self.collision_stiffness = stiffness;
        self
    }

    /// Simulated time covered by one frame.
    pub fn frame_time(&self) -> F {
        self.dt * F::from_f32(self.sub_steps as f32)
    }

    /// Check that `dt` is positive and cushion and stiffness are non-negative, all finite.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.dt > F::zero() && self.dt.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !(self.cushion >= F::zero() && self.cushion.is_finite()) {
            return Err(PhysicsError::InvalidCushion);
        }
        if !(self.collision_stiffness >= F::zero() && self.collision_stiffness.is_finite()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        Ok(())
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// How a [`JelloBody`](crate::body::JelloBody) is spawned from a mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyConfig<F: Float> {
    /// Mass of every vertex. Default: 0.005.
    pub vertex_mass: F,
    /// Stiffness of every spring. Default: 150.
    pub spring_stiffness: F,
    /// Every m-th vertex pair gets an interior support spring; `None`
    /// disables them. Default: `None`.
    pub support_spring_modulus: Option<usize>,
}

impl<F: Float> BodyConfig<F> {
    /// Create config with default values.
    pub fn new() -> Self {
        BodyConfig {
            vertex_mass: F::from_f32(0.005),
            spring_stiffness: F::from_f32(150.0),
            support_spring_modulus: None,
        }
    }

    /// Set the mass of every vertex.
    pub fn with_vertex_mass(mut self, mass: F) -> Self {
        self.vertex_mass = mass;
        self
    }

    /// Set the stiffness of every spring.
    pub fn with_spring_stiffness(mut self, stiffness: F) -> Self {
        self.spring_stiffness = stiffness;
        self
    }

    /// Add interior support springs to every `modulus`-th vertex.
    pub fn with_support_springs(mut self, modulus: usize) -> Self {
        self.support_spring_modulus = Some(modulus);
        self
    }

    /// Check mass, stiffness and support modulus.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.vertex_mass > F::zero() && self.vertex_mass.is_finite()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(self.spring_stiffness >= F::zero() && self.spring_stiffness.is_finite()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        if self.support_spring_modulus == Some(0) {
            return Err(PhysicsError::InvalidSupportModulus);
        }
        Ok(())
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
