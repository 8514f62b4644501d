//! Scene model produced by the WRL parser.
//!
//! A [`Scene`] owns every [`Material`] and [`Mesh`]. Meshes refer to their
//! material by index, and each material remembers (by index) the first mesh
//! that used it, so there are no ownership cycles between the two.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wrl_math::{Bounds, Vec3};

use crate::mesh::Mesh;

/// Default name for materials whose `appearance` header carries none.
pub const UNNAMED_MATERIAL: &str = "NoNameAssigned";

/// Which fields take part in material deduplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialEquality {
    /// Texture url, texture repeat, diffuse, emissive, alpha and ambient
    /// intensity. Name and specular color are ignored.
    #[default]
    Legacy,

    /// [`MaterialEquality::Legacy`] plus the specular color.
    IncludeSpecular,
}

/// A material parsed from an `appearance` block.
#[derive(Clone, Debug, Serialize)]
pub struct Material {
    /// Material name (from the `appearance` header)
    pub name: String,

    /// Position in `Scene::materials`, assigned on first insertion
    pub index: usize,

    /// Ambient intensity (1.0 = unmodified)
    pub ambient_intensity: f32,

    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Vec3,

    /// Specular color (RGB, 0-1). Parsed but not used downstream.
    pub specular_color: Vec3,

    /// Emissive color (RGB, 0-1)
    pub emissive_color: Vec3,

    /// Opacity (0=transparent, 1=opaque), `1 - transparency`
    pub alpha: f32,

    /// Texture file, relative to the scene directory
    pub texture_url: Option<String>,

    /// Whether the texture repeats (`repeatS TRUE`) or clamps
    pub texture_repeat: bool,

    /// Index of the first mesh that used this material
    pub first_mesh_linked: Option<usize>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: UNNAMED_MATERIAL.to_string(),
            index: 0,
            ambient_intensity: 1.0,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ONE,
            emissive_color: Vec3::ZERO,
            alpha: 1.0,
            texture_url: None,
            texture_repeat: true,
            first_mesh_linked: None,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse_color: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            ..Default::default()
        }
    }

    /// Structural equality used for deduplication.
    pub fn matches(&self, other: &Material, equality: MaterialEquality) -> bool {
        let shared = self.texture_url == other.texture_url
            && self.texture_repeat == other.texture_repeat
            && self.diffuse_color == other.diffuse_color
            && self.emissive_color == other.emissive_color
            && self.alpha == other.alpha
            && self.ambient_intensity == other.ambient_intensity;

        match equality {
            MaterialEquality::Legacy => shared,
            MaterialEquality::IncludeSpecular => {
                shared && self.specular_color == other.specular_color
            }
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture_url.is_some()
    }

    /// True when the ambient intensity scales the base color.
    pub fn uses_ambient_intensity(&self) -> bool {
        self.ambient_intensity != 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }

    pub fn is_emissive(&self) -> bool {
        self.emissive_color.length_squared() > 0.0
    }
}

/// A parsed WRL scene.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Scene {
    /// Directory the scene was loaded from; texture urls resolve against it
    pub directory: PathBuf,

    /// File name the scene was loaded from
    pub filename: String,

    /// Deduplicated materials in first-seen order
    pub materials: Vec<Material>,

    /// One mesh per `Shape` block, in file order
    pub meshes: Vec<Mesh>,
}

impl Scene {
    /// Create an empty scene with provenance.
    pub fn new(directory: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Add a finished `Shape`: deduplicate its material, link it and append the mesh.
    ///
    /// Returns the index of the new mesh.
    pub fn add_shape(
        &mut self,
        material: Material,
        mut mesh: Mesh,
        equality: MaterialEquality,
    ) -> usize {
        let mesh_id = self.meshes.len();

        let material_id = match self.find_material(&material, equality) {
            Some(existing) => {
                log::debug!(
                    "Material {} matches existing material {} ({}), reusing it",
                    material.name,
                    existing,
                    self.materials[existing].name
                );
                existing
            }
            None => self.add_material(material),
        };

        let resolved = &mut self.materials[material_id];
        if resolved.first_mesh_linked.is_none() {
            resolved.first_mesh_linked = Some(mesh_id);
        }

        mesh.material = material_id;
        self.meshes.push(mesh);
        mesh_id
    }

    /// Find the earliest material that matches `material`.
    pub fn find_material(&self, material: &Material, equality: MaterialEquality) -> Option<usize> {
        self.materials
            .iter()
            .position(|existing| existing.matches(material, equality))
    }

    /// Append a material without deduplication and return its index.
    pub fn add_material(&mut self, mut material: Material) -> usize {
        let id = self.materials.len();
        material.index = id;
        self.materials.push(material);
        id
    }

    /// Get a material by index.
    pub fn get_material(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    /// The material a mesh refers to.
    pub fn material_of(&self, mesh: &Mesh) -> Option<&Material> {
        self.get_material(mesh.material)
    }

    /// Meshes that use the material at `id`, in file order.
    pub fn meshes_using(&self, id: usize) -> impl Iterator<Item = &Mesh> + '_ {
        self.meshes.iter().filter(move |mesh| mesh.material == id)
    }

    /// True when the first mesh linked to the material carries vertex colors.
    pub fn material_uses_vertex_colors(&self, id: usize) -> bool {
        self.materials
            .get(id)
            .and_then(|material| material.first_mesh_linked)
            .and_then(|mesh_id| self.meshes.get(mesh_id))
            .is_some_and(|mesh| mesh.has_colors())
    }

    /// Texture path joined with the scene directory. Existence is not checked.
    pub fn texture_path(&self, material: &Material) -> Option<PathBuf> {
        material
            .texture_url
            .as_deref()
            .map(|url| self.directory.join(Path::new(url)))
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get mesh count.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Get total triangle count across all meshes.
    pub fn total_triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Compute the bounding box of every mesh.
    pub fn world_bounds(&self) -> Bounds {
        self.meshes
            .iter()
            .fold(Bounds::EMPTY, |acc, mesh| Bounds::surrounding(&acc, &mesh.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh(name: &str) -> Mesh {
        Mesh {
            name: name.to_string(),
            points: vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            ..Default::default()
        }
    }

    #[test]
    fn test_material_defaults() {
        let material = Material::default();
        assert_eq!(material.name, UNNAMED_MATERIAL);
        assert_eq!(material.diffuse_color, Vec3::ONE);
        assert_eq!(material.specular_color, Vec3::ONE);
        assert_eq!(material.emissive_color, Vec3::ZERO);
        assert_eq!(material.alpha, 1.0);
        assert_eq!(material.ambient_intensity, 1.0);
        assert!(material.texture_repeat);
        assert!(!material.has_texture());
        assert!(!material.uses_ambient_intensity());
        assert!(material.first_mesh_linked.is_none());
    }

    #[test]
    fn test_equality_ignores_name_and_specular() {
        let a = Material::new("a", Vec3::new(0.5, 0.5, 0.5));
        let mut b = Material::new("b", Vec3::new(0.5, 0.5, 0.5));
        b.specular_color = Vec3::ZERO;

        assert!(a.matches(&b, MaterialEquality::Legacy));
        assert!(!a.matches(&b, MaterialEquality::IncludeSpecular));
    }

    #[test]
    fn test_equality_fields() {
        let base = Material::default();

        let mut other = base.clone();
        other.texture_url = Some("tex.bmp".to_string());
        assert!(!base.matches(&other, MaterialEquality::Legacy));

        let mut other = base.clone();
        other.texture_repeat = false;
        assert!(!base.matches(&other, MaterialEquality::Legacy));

        let mut other = base.clone();
        other.emissive_color = Vec3::X;
        assert!(!base.matches(&other, MaterialEquality::Legacy));

        let mut other = base.clone();
        other.alpha = 0.5;
        assert!(!base.matches(&other, MaterialEquality::Legacy));

        let mut other = base.clone();
        other.ambient_intensity = 0.2;
        assert!(!base.matches(&other, MaterialEquality::Legacy));
    }

    #[test]
    fn test_add_shape_deduplicates() {
        let mut scene = Scene::new("/tmp", "test.wrl");

        let first = scene.add_shape(Material::new("a", Vec3::X), triangle_mesh("m0"), MaterialEquality::Legacy);
        let second = scene.add_shape(Material::new("b", Vec3::X), triangle_mesh("m1"), MaterialEquality::Legacy);
        let third = scene.add_shape(Material::new("c", Vec3::Y), triangle_mesh("m2"), MaterialEquality::Legacy);

        assert_eq!((first, second, third), (0, 1, 2));
        assert_eq!(scene.material_count(), 2);
        assert_eq!(scene.mesh_count(), 3);

        // The first material keeps its own name
        assert_eq!(scene.materials[0].name, "a");
        assert_eq!(scene.meshes[0].material, 0);
        assert_eq!(scene.meshes[1].material, 0);
        assert_eq!(scene.meshes[2].material, 1);

        assert_eq!(scene.materials[0].first_mesh_linked, Some(0));
        assert_eq!(scene.materials[1].first_mesh_linked, Some(2));

        let indices: Vec<usize> = scene.materials.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(scene.meshes_using(0).count(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let mut scene = Scene::default();
        scene.add_material(Material::new("first", Vec3::X));
        scene.add_material(Material::new("second", Vec3::X));

        assert_eq!(scene.find_material(&Material::new("probe", Vec3::X), MaterialEquality::Legacy), Some(0));
    }

    #[test]
    fn test_vertex_color_hint() {
        let mut scene = Scene::default();

        let mut colored = triangle_mesh("colored");
        colored.colors = vec![Vec3::ONE; 3];
        scene.add_shape(Material::new("vc", Vec3::ONE), colored, MaterialEquality::Legacy);
        scene.add_shape(Material::new("plain", Vec3::X), triangle_mesh("plain"), MaterialEquality::Legacy);

        assert!(scene.material_uses_vertex_colors(0));
        assert!(!scene.material_uses_vertex_colors(1));
        assert!(!scene.material_uses_vertex_colors(7));
    }

    #[test]
    fn test_texture_path() {
        let scene = Scene::new("dumps", "level.wrl");
        let mut material = Material::default();
        assert!(scene.texture_path(&material).is_none());

        material.texture_url = Some("tex_c.bmp".to_string());
        assert_eq!(
            scene.texture_path(&material),
            Some(PathBuf::from("dumps").join("tex_c.bmp"))
        );
    }

    #[test]
    fn test_material_flags() {
        let mut material = Material::default();
        assert!(!material.is_transparent());
        assert!(!material.is_emissive());

        material.alpha = 0.5;
        material.emissive_color = Vec3::new(0.2, 0.0, 0.0);
        assert!(material.is_transparent());
        assert!(material.is_emissive());
    }

    #[test]
    fn test_material_lookup() {
        let mut scene = Scene::default();
        scene.add_shape(Material::new("red", Vec3::X), triangle_mesh("a"), MaterialEquality::Legacy);
        scene.add_shape(Material::new("blue", Vec3::Z), triangle_mesh("b"), MaterialEquality::Legacy);

        assert_eq!(scene.get_material(1).map(|m| m.name.as_str()), Some("blue"));
        assert!(scene.get_material(2).is_none());
        assert_eq!(scene.material_of(&scene.meshes[0]).map(|m| m.name.as_str()), Some("red"));

        let orphan = Mesh {
            material: 7,
            ..triangle_mesh("orphan")
        };
        assert!(scene.material_of(&orphan).is_none());
    }

    #[test]
    fn test_scene_totals() {
        let mut scene = Scene::default();
        scene.add_shape(Material::default(), triangle_mesh("a"), MaterialEquality::Legacy);
        scene.add_shape(Material::default(), Mesh::default(), MaterialEquality::Legacy);

        assert_eq!(scene.total_triangle_count(), 1);
        let bounds = scene.world_bounds();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 0.0, 1.0));
    }
}
