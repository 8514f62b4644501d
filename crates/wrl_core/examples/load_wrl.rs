//! Example: Load and inspect a WRL file.
//!
//! Run with: cargo run --example load_wrl -- assets/textured_quad.wrl

use std::env;

use wrl_core::vrml::{load_wrl, ParseOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_wrl <path-to-wrl-file>");
        println!("\nExamples:");
        println!("  cargo run --example load_wrl -- assets/textured_quad.wrl");
        println!("  cargo run --example load_wrl -- assets/unbalanced.wrl");
        return;
    }

    let path = &args[1];
    println!("Loading WRL file: {}", path);

    match load_wrl(path, &ParseOptions::default()) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", scene.filename);
            println!("Materials: {}", scene.material_count());
            println!("Meshes: {}", scene.mesh_count());
            println!("Total triangles: {}", scene.total_triangle_count());

            println!("\n--- Materials ---");
            for material in &scene.materials {
                println!(
                    "  [{}] {} - diffuse ({:.2}, {:.2}, {:.2}), alpha {:.2}",
                    material.index,
                    material.name,
                    material.diffuse_color.x,
                    material.diffuse_color.y,
                    material.diffuse_color.z,
                    material.alpha
                );
                if let Some(path) = scene.texture_path(material) {
                    println!("       Texture: {}", path.display());
                }
            }

            println!("\n--- Meshes ---");
            for mesh in &scene.meshes {
                println!(
                    "  {} - {} triangles, material {}",
                    mesh.name,
                    mesh.triangle_count(),
                    mesh.material
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading WRL file: {}", e);
        }
    }
}
