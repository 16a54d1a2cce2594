//! Error types for mesh, topology and configuration validation.

use thiserror::Error;

/// Errors raised when building or validating simulation inputs.
///
/// Geometry queries and the integrator never return these; they only guard
/// construction boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Stiffness must be non-negative and finite.
    #[error("stiffness must be non-negative and finite")]
    InvalidStiffness,
    /// Time step must be positive and finite.
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    /// Cushion must be non-negative and finite.
    #[error("cushion must be non-negative and finite")]
    InvalidCushion,
    /// Support spring modulus must be at least 1.
    #[error("support spring modulus must be at least 1")]
    InvalidSupportModulus,
    /// Face index list length is not a multiple of 3.
    #[error("face list of length {len} is not a whole number of triangles")]
    MalformedFaceList { len: usize },
    /// A face references a vertex that does not exist.
    #[error("vertex index {index} out of bounds (count: {count})")]
    VertexOutOfBounds { index: usize, count: usize },
}
