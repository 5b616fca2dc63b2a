use kerrtrace::core::scene_loader::{load_scene_description, SceneDescription};
use std::env;

fn pixel_coordinate(value: &str, axis: &str) -> usize {
    match value.parse::<usize>() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid pixel {} coordinate: {}", axis, value);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <scene.xml|default> <x> <y> [--every N]", args[0]);
        std::process::exit(1);
    }

    let scene_path = &args[1];
    let x = pixel_coordinate(&args[2], "x");
    let y = pixel_coordinate(&args[3], "y");

    let mut every: usize = 1;
    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--every" => {
                i += 1;
                every = match args.get(i).map(|v| v.parse::<usize>()) {
                    Some(Ok(n)) => n.max(1),
                    _ => {
                        eprintln!("--every expects a positive integer");
                        std::process::exit(1);
                    }
                };
            }
            _ => {}
        }
        i += 1;
    }

    let description = if scene_path == "default" {
        SceneDescription::default()
    } else {
        load_scene_description(scene_path).unwrap_or_else(|e| {
            eprintln!("failed to load scene: {}", e);
            std::process::exit(1);
        })
    };
    let loaded = description.build().unwrap_or_else(|e| {
        eprintln!("failed to build scene: {}", e);
        std::process::exit(1);
    });

    let (width, height) = loaded.integrator.resolution();
    if x >= width || y >= height {
        eprintln!("Pixel out of bounds: ({}, {}) for size {}x{}", x, y, width, height);
        std::process::exit(2);
    }

    println!("trace_pixel_path: scene={} pixel=({}, {}) {}", scene_path, x, y, loaded.integrator.describe());

    let mut path = Vec::new();
    let color = loaded.integrator.trace_ray_forward(&loaded.scene, x, y, Some(&mut path));

    let last = path.len().saturating_sub(1);
    for (step, point) in path.iter().enumerate() {
        if step % every != 0 && step != last {
            continue;
        }
        println!(
            "step {}: r={:.6} theta={:.6} phi={:.6} p=({:.5}, {:.5}, {:.5})",
            step, point.r, point.theta, point.phi,
            point.position.x, point.position.y, point.position.z
        );
    }

    let [r, g, b] = color.to_bytes();
    println!("steps: {}", path.len());
    println!("color: ({:.6}, {:.6}, {:.6}) = #{:02x}{:02x}{:02x}", color.r(), color.g(), color.b(), r, g, b);
}
