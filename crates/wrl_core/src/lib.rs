//! WRL Core - Scene model and WRL parsing for N64 VRML dumps.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Material`, `Mesh`
//! - **WRL support**: `.wrl` parsing, material deduplication and loading
//!
//! # Example
//!
//! ```ignore
//! use wrl_core::vrml::{load_wrl, ParseOptions};
//!
//! // Load a dump
//! let scene = load_wrl("output.wrl", &ParseOptions::default())?;
//! println!("Loaded {} meshes, {} materials",
//!     scene.mesh_count(),
//!     scene.material_count());
//! ```

pub mod mesh;
pub mod scene;
pub mod vrml;

// Re-export commonly used types
pub use mesh::{Mesh, Triangle};
pub use scene::{Material, MaterialEquality, Scene};
pub use vrml::{load_wrl, load_wrl_batch, load_wrl_from_string, parse_wrl, ParseError, ParseOptions};
