//! Example: Parse a KV3 file and list its collision shapes.
//!
//! Run with: cargo run --example inspect_kv3 -- path/to/model.vphys

use std::env;

use vphys_core::kv3::{parse_kv3, Value};
use vphys_core::{convert_document, ConvertOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_kv3 <path-to-kv3-file> [path.to.field]");
        println!("\nExamples:");
        println!("  cargo run --example inspect_kv3 -- model.vphys");
        println!("  cargo run --example inspect_kv3 -- model.vphys m_parts[0].m_rnShape.m_hulls[0].m_nCollisionAttributeIndex");
        return;
    }

    let path = &args[1];
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return;
        }
    };

    let doc = match parse_kv3(&content) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path, e);
            return;
        }
    };

    if let Some(query) = args.get(2) {
        match doc.get(query) {
            Some(value) => println!("{} ({}): {}", query, value.kind(), doc.resolve(query)),
            None => println!("{}: <absent>", query),
        }
        return;
    }

    println!("\n=== {} ===", path);
    if let Some(root) = doc.root().as_object() {
        println!("Top-level keys:");
        for (key, value) in root.iter() {
            let detail = match value {
                Value::Array(items) => format!("{} items", items.len()),
                Value::Object(obj) => format!("{} keys", obj.len()),
                Value::Scalar(text) => text.clone(),
                Value::ByteBlob(hex) => format!("{} bytes", hex.split(' ').filter(|s| !s.is_empty()).count()),
            };
            println!("  {} ({}): {}", key, value.kind(), detail);
        }
    }

    let conversion = convert_document(&doc, &ConvertOptions::default());
    let report = &conversion.report;

    println!("\n--- Collision Shapes ---");
    println!("Attributes: {} ({:?} selected)", report.collision_attributes, report.retained_attributes);
    println!("Hulls: {}/{} converted", report.hulls_converted, report.hulls_total);
    println!("Meshes: {}/{} converted", report.meshes_converted, report.meshes_total);
    println!("Triangles: {}", report.triangles);

    for skipped in &report.skipped {
        println!("  skipped {:?} {}: {}", skipped.kind, skipped.index, skipped.reason);
    }

    if let Some(bounds) = report.bounds {
        println!(
            "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
    }
}
