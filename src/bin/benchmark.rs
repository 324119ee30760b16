//! Raymarch kernel benchmark: field evaluation throughput and
//! full-frame trace times over representative creatures, headless.

use std::time::Instant;

use macroquad::math::vec3;
use rayon::prelude::*;

use biograph::domain::{ROOT_SYMBOL, expand, flatten, map};
use biograph::rendering::shade_pixel;
use biograph::{MockProducer, OrbitCamera, Primitive, RuleProducer};

fn creature(genes: &[&str]) -> Vec<Primitive> {
    let genes: Vec<String> = genes.iter().map(|s| s.to_string()).collect();
    let table = MockProducer.generate(&genes).expect("mock producer is infallible");
    flatten(&expand(&table, ROOT_SYMBOL))
}

/// Time `map` over a grid of sample points, returning ns per evaluation.
fn benchmark_map(primitives: &[Primitive], samples: u32) -> f64 {
    let start = Instant::now();
    let mut sink = 0.0f32;
    for i in 0..samples {
        // Deterministic scatter of sample points around the creature
        let f = i as f32;
        let p = vec3((f * 0.37).sin() * 4.0, (f * 0.11).cos() * 4.0 + 2.0, (f * 0.73).sin() * 4.0);
        sink += map(p, primitives);
    }
    std::hint::black_box(sink);
    start.elapsed().as_nanos() as f64 / samples as f64
}

/// Time a full parallel frame at the given resolution, returning ms.
fn benchmark_frame(primitives: &[Primitive], width: usize, height: usize) -> f64 {
    let camera = OrbitCamera::new();
    let light = vec3(0.5, 0.8, 0.5).normalize();
    let mut pixels = vec![[0u8; 4]; width * height];

    let start = Instant::now();
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shade_pixel(x, y, width, height, primitives, &camera, light);
            }
        });
    std::hint::black_box(&pixels);
    start.elapsed().as_secs_f64() * 1000.0
}

fn main() {
    println!("=== BioGraph Raymarch Benchmark ===\n");

    let scenes = [
        ("biped", creature(&[])),
        ("winged", creature(&["wings"])),
        ("chimera", creature(&["wings", "elongated_neck", "spiny_ridge", "glowing_eyes", "long_legs"])),
    ];

    println!("{:>10} {:>12} {:>14}", "Scene", "Primitives", "map() ns/eval");
    println!("{:-<40}", "");
    for (name, primitives) in &scenes {
        let ns = benchmark_map(primitives, 100_000);
        println!("{:>10} {:>12} {:>14.1}", name, primitives.len(), ns);
    }

    println!("\n{:>10} {:>12} {:>12} {:>12}", "Scene", "320x240", "640x480", "960x720");
    println!("{:-<50}", "");
    for (name, primitives) in &scenes {
        let small = benchmark_frame(primitives, 320, 240);
        let medium = benchmark_frame(primitives, 640, 480);
        let large = benchmark_frame(primitives, 960, 720);
        println!(
            "{:>10} {:>10.1}ms {:>10.1}ms {:>10.1}ms",
            name, small, medium, large
        );
    }

    let (_, chimera) = &scenes[2];
    let frame_ms = benchmark_frame(chimera, 320, 240);
    let rays_per_sec = (320.0 * 240.0) / (frame_ms / 1000.0);
    println!("\nChimera at render resolution: {:.1}ms/frame, {:.1}K rays/sec", frame_ms, rays_per_sec / 1000.0);
}
