//! Mass-spring soft bodies colliding against static triangle meshes.
//!
//! `jello` simulates deformable bodies made of point masses joined by Hooke
//! springs. Static scenery is indexed once in an octree that answers "does
//! this point's motion over the frame touch the surface, and through which
//! triangle"; contacts push back with a penalty spring along the surface
//! normal. State is advanced with fourth-order Runge-Kutta.
//!
//! # Features
//!
//! - **Octree index**: `CollisionTree` over any triangle mesh, segment queries
//!   with a distance cushion
//! - **Ray/triangle test**: Cramer's-rule `hit` with endpoint forgiveness
//! - **RK4 integrator**: gravity, springs and contacts re-evaluated at every stage
//! - **Spring topology**: deduplicated surface springs plus optional interior
//!   support springs
//! - **Observable**: Monitor integration via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use jello::{BodyConfig, Environment, JelloBody, NoOpStepObserver, SimulationConfig, TriangleMesh, Vec3};
//!
//! let floor = Environment::new(TriangleMesh::grid(Vec3::new(-2.0, 0.0, -2.0), 4, 4, 1.0));
//! let cube = TriangleMesh::cuboid(Vec3::new(0.0f32, 1.0, 0.0), Vec3::splat(0.25));
//! let mut body = JelloBody::from_mesh(&cube, &BodyConfig::new()).unwrap();
//!
//! let config = SimulationConfig::new();
//! for _ in 0..10 {
//!     body.step(&floor, &config, &mut NoOpStepObserver);
//! }
//! assert!(body.centroid().y < 1.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod bounds;
pub mod plane;
pub mod intersect;
pub mod mesh;
pub mod tree;
pub mod environment;
pub mod vertex;
pub mod edge;
pub mod integrator;
pub mod body;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use bounds::Aabb;
pub use plane::Plane;
pub use intersect::hit;
pub use mesh::TriangleMesh;
pub use tree::{CollisionTree, Node};
pub use environment::Environment;
pub use vertex::Vertex;
pub use edge::{Edge, EdgeSet};
pub use integrator::{step, Integrator};
pub use body::JelloBody;
pub use config::{BodyConfig, SimulationConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
