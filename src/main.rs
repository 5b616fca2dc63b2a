// Copyright 2020 TwoCookingMice

use kerrtrace::core::scene_loader::{load_scene_description, parse_stepper, ModelKind, SceneDescription};
use kerrtrace::io::image_utils;
use kerrtrace::renderers::simple::{Renderer, SimpleRenderer};

use std::env;
use std::process;
use std::str::FromStr;

fn usage(program: &str) -> String {
    format!("Usage: {} [scene.xml] [-r R] [-theta DEG] [-phi DEG] [-a SPIN] [-o FILE] \
             [--width N] [--height N] [--threads N] [--sky TEXTURE] \
             [--schwarzschild] [--curvature C] [--stepper fixed|adaptive]", program)
}

fn value_of<T: FromStr>(args: &[String], i: usize) -> T {
    let flag = &args[i - 1];
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(value)) => value,
        _ => {
            log::error!("{} expects a value.\n{}", flag, usage(&args[0]));
            process::exit(1);
        }
    }
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut i = 1;
    let mut description = match args.get(1) {
        Some(path) if !path.starts_with('-') => {
            i = 2;
            match load_scene_description(path) {
                Ok(description) => description,
                Err(e) => {
                    log::error!("Failed to load scene {}: {}", path, e);
                    process::exit(1);
                }
            }
        }
        _ => SceneDescription::default(),
    };

    let mut output_path = String::from("image.png");
    let mut threads: usize = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-r" => { i += 1; description.kerr.distance = value_of(&args, i); }
            "-theta" => { i += 1; description.kerr.theta = value_of(&args, i); }
            "-phi" => { i += 1; description.kerr.phi = value_of(&args, i); }
            "-a" => { i += 1; description.kerr.spin = value_of(&args, i); }
            "-o" => { i += 1; output_path = value_of(&args, i); }
            "--width" => { i += 1; description.width = value_of(&args, i); }
            "--height" => { i += 1; description.height = value_of(&args, i); }
            "--threads" => { i += 1; threads = value_of(&args, i); }
            "--sky" => { i += 1; description.sky_texture = Some(value_of(&args, i)); }
            "--schwarzschild" => description.model = ModelKind::Schwarzschild,
            "--curvature" => {
                i += 1;
                description.model = ModelKind::Schwarzschild;
                description.schwarzschild.coefficient = value_of(&args, i);
            }
            "--stepper" => {
                i += 1;
                let name: String = value_of(&args, i);
                match parse_stepper(&name) {
                    Ok(stepper) => description.integrator.stepper = Some(stepper),
                    Err(e) => {
                        log::error!("{}", e);
                        process::exit(1);
                    }
                }
            }
            "-h" | "--help" => {
                println!("{}", usage(&args[0]));
                return;
            }
            other => log::warn!("Ignoring unknown argument {}.", other),
        }
        i += 1;
    }

    let loaded = match description.build() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            process::exit(1);
        }
    };

    let renderer = SimpleRenderer::new(loaded.integrator, threads);
    let image = renderer.render(&loaded.scene);
    if let Err(e) = image_utils::write_image(&output_path, &image) {
        log::error!("{}", e);
        process::exit(1);
    }
    log::info!("Image written to: {}.", output_path);
}
