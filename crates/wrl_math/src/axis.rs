//! Fixed axis remap between the Y-up dump convention and the Z-up
//! convention used by the scene model.
//!
//! The remap is a 90 degree rotation about +X: `(x, y, z) -> (x, -z, y)`.
//! Points are remapped once at parse time; the original axis order is not
//! kept anywhere else.

use glam::Vec3;

/// Convert a Y-up point to Z-up: `(x, y, z) -> (x, -z, y)`.
#[inline]
pub fn yup_to_zup(p: Vec3) -> Vec3 {
    Vec3::new(p.x, -p.z, p.y)
}

/// Inverse of [`yup_to_zup`]: `(x, y, z) -> (x, z, -y)`.
#[inline]
pub fn zup_to_yup(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.z, -p.y)
}
