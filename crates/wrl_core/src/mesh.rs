//! Triangle mesh geometry parsed from a WRL `geometry` block.
//!
//! Meshes are stored as flat triangle soups: every three consecutive points
//! form one triangle, and the optional per-corner texture coordinates and
//! colors line up with the points index for index.

use serde::Serialize;
use wrl_math::{Bounds, Vec2, Vec3};

/// Default name for meshes whose `geometry` header carries none.
pub const UNNAMED_MESH: &str = "NoNameAssigned";

/// A triangle-soup mesh.
#[derive(Clone, Debug, Serialize)]
pub struct Mesh {
    /// Mesh name (from the `geometry` header)
    pub name: String,

    /// Corner positions, already remapped to Z-up
    pub points: Vec<Vec3>,

    /// Texture coordinates (empty, or one per point)
    pub texcoords: Vec<Vec2>,

    /// Vertex colors (empty, or one per point)
    pub colors: Vec<Vec3>,

    /// Index of this mesh's material in `Scene::materials`
    pub material: usize,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            name: UNNAMED_MESH.to_string(),
            points: Vec::new(),
            texcoords: Vec::new(),
            colors: Vec::new(),
            material: 0,
        }
    }
}

/// One assembled triangle with its per-corner attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub texcoords: Option<[Vec2; 3]>,
    pub colors: Option<[Vec3; 3]>,
}

impl Triangle {
    /// Unit face normal following the corner order, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.positions;
        (b - a).cross(c - a).normalize_or_zero()
    }
}

impl Mesh {
    /// Get the number of points (triangle corners).
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }

    /// A mesh with no triangles; consumers treat it as a no-op.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Axis-aligned bounds of all points.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.points.iter().copied())
    }

    /// Assemble the triangle list.
    ///
    /// Corners are emitted in reverse order (`i + 2, i + 1, i`) so faces point
    /// the right way after the axis remap. Texture coordinates and colors are
    /// attached only when their arrays have one entry per point; a trailing
    /// partial triangle is dropped.
    pub fn triangles(&self) -> Vec<Triangle> {
        let n = self.points.len();
        if n % 3 != 0 {
            log::warn!(
                "Mesh {} has {} points, ignoring trailing {} corner(s)",
                self.name,
                n,
                n % 3
            );
        }

        let use_texcoords = self.attribute_fits("texcoords", self.texcoords.len());
        let use_colors = self.attribute_fits("colors", self.colors.len());

        let mut triangles = Vec::with_capacity(self.triangle_count());
        for i in (0..n - n % 3).step_by(3) {
            let corners = [i + 2, i + 1, i];
            triangles.push(Triangle {
                positions: corners.map(|c| self.points[c]),
                texcoords: use_texcoords.then(|| corners.map(|c| self.texcoords[c])),
                colors: use_colors.then(|| corners.map(|c| self.colors[c])),
            });
        }

        triangles
    }

    fn attribute_fits(&self, attribute: &str, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if len != self.points.len() {
            log::warn!(
                "Mesh {} has {} {} for {} points, ignoring them",
                self.name,
                len,
                attribute,
                self.points.len()
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> Mesh {
        Mesh {
            name: "quad".to_string(),
            points: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = quad_mesh();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
        assert!(!mesh.has_texcoords());
        assert!(!mesh.has_colors());
    }

    #[test]
    fn test_default_mesh_is_empty() {
        let mesh = Mesh::default();
        assert_eq!(mesh.name, UNNAMED_MESH);
        assert!(mesh.is_empty());
        assert!(mesh.triangles().is_empty());
        assert!(mesh.bounds().is_empty());
    }

    #[test]
    fn test_triangles_reverse_winding() {
        let mesh = quad_mesh();
        let triangles = mesh.triangles();

        assert_eq!(triangles.len(), 2);
        assert_eq!(
            triangles[0].positions,
            [mesh.points[2], mesh.points[1], mesh.points[0]]
        );
        assert_eq!(
            triangles[1].positions,
            [mesh.points[5], mesh.points[4], mesh.points[3]]
        );

        // Source order (0,1,2) faces -Y; reversed it faces +Y
        assert!((triangles[0].normal() - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_triangle_attributes() {
        let mut mesh = quad_mesh();
        mesh.texcoords = (0..6).map(|i| Vec2::new(i as f32, 0.0)).collect();
        mesh.colors = (0..6).map(|i| Vec3::splat(i as f32 / 10.0)).collect();

        let triangles = mesh.triangles();
        let uvs = triangles[1].texcoords.unwrap();
        assert_eq!(uvs, [Vec2::new(5.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(3.0, 0.0)]);

        let colors = triangles[0].colors.unwrap();
        assert!((colors[0].x - 0.2).abs() < 0.001);
        assert!((colors[2].x - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_mismatched_attributes_are_ignored() {
        let mut mesh = quad_mesh();
        mesh.texcoords = vec![Vec2::ZERO; 2];

        let triangles = mesh.triangles();
        assert!(triangles.iter().all(|t| t.texcoords.is_none()));
    }

    #[test]
    fn test_partial_triangle_dropped() {
        let mut mesh = quad_mesh();
        mesh.points.push(Vec3::ONE);

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().len(), 2);
    }

    #[test]
    fn test_bounds() {
        let bounds = quad_mesh().bounds();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 0.0, 1.0));
    }
}
