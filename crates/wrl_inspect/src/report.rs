//! Plain-text reports for parsed scenes.

use std::fmt::Write;

use wrl_core::Scene;

/// Summary of a scene: totals, materials and meshes.
pub fn summary(scene: &Scene) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", scene.filename);
    let _ = writeln!(
        out,
        "Materials: {}  Meshes: {}  Triangles: {}",
        scene.material_count(),
        scene.mesh_count(),
        scene.total_triangle_count()
    );

    let bounds = scene.world_bounds();
    if !bounds.is_empty() {
        let _ = writeln!(
            out,
            "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
        let (size, center) = (bounds.size(), bounds.centroid());
        let _ = writeln!(
            out,
            "Size: ({:.2}, {:.2}, {:.2})  Center: ({:.2}, {:.2}, {:.2})",
            size.x, size.y, size.z, center.x, center.y, center.z
        );
    }

    let _ = writeln!(out, "\n--- Materials ---");
    for material in &scene.materials {
        let d = material.diffuse_color;
        let _ = writeln!(
            out,
            "  [{}] {} - diffuse ({:.2}, {:.2}, {:.2}), alpha {:.2}, used by {} mesh(es)",
            material.index,
            material.name,
            d.x,
            d.y,
            d.z,
            material.alpha,
            scene.meshes_using(material.index).count()
        );
        if let Some(path) = scene.texture_path(material) {
            let wrap = if material.texture_repeat { "repeat" } else { "clip" };
            let _ = writeln!(out, "       Texture: {} ({})", path.display(), wrap);
        }
        if scene.material_uses_vertex_colors(material.index) {
            let _ = writeln!(out, "       Vertex colors");
        }
        if material.is_transparent() {
            let _ = writeln!(out, "       Transparent");
        }
        if material.is_emissive() {
            let e = material.emissive_color;
            let _ = writeln!(out, "       Emissive ({:.2}, {:.2}, {:.2})", e.x, e.y, e.z);
        }
    }

    let _ = writeln!(out, "\n--- Meshes ---");
    for mesh in &scene.meshes {
        let material = scene.material_of(mesh).map_or("?", |m| m.name.as_str());
        let _ = writeln!(
            out,
            "  {} - {} triangles, uv: {}, colors: {}, material {} ({})",
            mesh.name,
            mesh.triangle_count(),
            mesh.has_texcoords(),
            mesh.has_colors(),
            mesh.material,
            material
        );
    }

    out
}

/// Every assembled triangle, one per line.
pub fn triangles(scene: &Scene) -> String {
    let mut out = String::new();

    for mesh in &scene.meshes {
        let _ = writeln!(out, "\n--- {} ---", mesh.name);
        for (i, tri) in mesh.triangles().iter().enumerate() {
            let [a, b, c] = tri.positions;
            let _ = writeln!(
                out,
                "  {:4}: ({:.3}, {:.3}, {:.3}) ({:.3}, {:.3}, {:.3}) ({:.3}, {:.3}, {:.3})",
                i, a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z
            );
        }
    }

    out
}
