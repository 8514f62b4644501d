//! WRL (VRML 2.0 text dump) support.
//!
//! This module provides parsing and loading of the `.wrl` scene dumps written
//! by N64 emulator VRML exporters, converting them to the scene model in
//! [`crate::scene`].
//!
//! ## Supported Features
//!
//! - `Shape` blocks with `appearance` (material + image texture) and
//!   `geometry` (triangle soup with texture coordinates and vertex colors)
//! - Material deduplication across shapes
//! - Y-up to Z-up remap of all points
//!
//! ## Not Supported
//!
//! - `coordIndex`/`texCoordIndex` (dumps are flat triangle lists)
//! - `Transform`/`Group` nesting, `PROTO`
//! - `USE` references (reported as a malformed field)
//! - Texture loading (texture urls are resolved to paths only)
//!
//! # Example
//!
//! ```ignore
//! use wrl_core::vrml::{load_wrl, ParseOptions};
//!
//! let scene = load_wrl("dumps/output.wrl", &ParseOptions::default())?;
//! println!("Loaded {} meshes, {} materials",
//!     scene.mesh_count(),
//!     scene.material_count());
//! ```

mod loader;
mod options;
mod parser;
mod tokens;

pub use loader::*;
pub use options::*;
pub use parser::*;
pub use tokens::{tokenize, LineCursor};
