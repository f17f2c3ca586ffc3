mod fov;
mod grid;
mod interactive;
mod render;

#[cfg(test)]
mod tests;

// Re-export public API
pub use fov::{FovError, Shadowcast, VisibilityAlgorithm, flatten_rows, visibility_to_string};
pub use grid::Grid;
pub use interactive::{InteractiveViewer, ViewerConfig};
pub use render::{pack_rgb, render_glyphs, save_ppm, save_ppm_with_walls, to_byte};

/// Per-tile game state for the terminal demo.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terrain {
    pub transparent: bool,
    pub visible: bool,
    pub glyph: char,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--interactive" {
        run_interactive();
    } else if args.len() > 1 && args[1] == "--benchmark" {
        run_benchmark();
    } else {
        run_demo();
    }
}

/// The demo scene: open floor with a few free-standing walls.
fn demo_map() -> Grid<Terrain> {
    let floor = Terrain {
        transparent: true,
        visible: false,
        glyph: '.',
    };
    let wall = Terrain {
        transparent: false,
        visible: false,
        glyph: '#',
    };

    let mut tiles = Grid::filled(20, 20, floor);
    for (x, y) in [(5, 5), (10, 5), (5, 10), (5, 11), (15, 15), (16, 15)] {
        tiles.set(x, y, wall);
    }
    tiles
}

fn run_demo() {
    use std::time::Instant;

    let mut tiles = demo_map();
    let origin = (10, 10);

    let transparency = tiles.extract_attributes(|t| t.transparent);

    let start = Instant::now();
    let visibility = match Shadowcast::new().field_of_view(&transparency, origin) {
        Ok(visibility) => visibility,
        Err(e) => {
            eprintln!("FOV error: {}", e);
            return;
        }
    };
    log::info!(
        "{}x{} FOV computed in {:?}",
        tiles.width(),
        tiles.height(),
        start.elapsed()
    );

    tiles.fill_attributes(&visibility, |tile, &visible| Terrain { visible, ..*tile });
    tiles.get_mut(origin.0, origin.1).glyph = '@';

    println!("FOV Test");
    println!(
        "Observer at ({}, {}); unseen tiles are blank.",
        origin.0, origin.1
    );
    println!();
    print!(
        "{}",
        render_glyphs(&tiles, |t| if t.visible { t.glyph } else { ' ' })
    );
    println!();
    println!("Run with --interactive for minifb viewer");
    println!("Run with --benchmark to test performance");
}

fn run_benchmark() {
    use rayon::prelude::*;
    use std::time::Instant;

    println!("=== Shadowcast Benchmark ===\n");

    // Test parameters
    let sizes = [(50, 50), (100, 100), (200, 200)];
    let iterations = 20;

    for (width, height) in sizes {
        println!("Grid size: {}x{}", width, height);
        println!("-----------------------");

        // An open map is the worst case: every tile gets visited
        let transparency_nested: Vec<Vec<bool>> = vec![vec![true; width]; height];
        let transparency_flat: Vec<bool> = vec![true; width * height];

        let origin = (width / 2, height / 2);
        let algorithm = Shadowcast::new();

        // Benchmark nested Vec API (for compatibility)
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = algorithm.field_of_view(&transparency_nested, origin);
        }
        let avg_nested_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

        // Benchmark flat memory API
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = algorithm.compute_flat(&transparency_flat, width, height, origin.0, origin.1);
        }
        let avg_flat_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

        println!("  Nested Vec API:  {:.3} ms/iter", avg_nested_ms);
        println!("  Flat memory API: {:.3} ms/iter", avg_flat_ms);
        println!("  Speedup: {:.2}x", avg_nested_ms / avg_flat_ms);
        println!();
    }

    // Benchmark the multi-observer scenario (fog of war for several units)
    println!("=== Multi-Origin Scenario ===");
    println!("(Simulates several observers on one map)\n");

    let (width, height) = (100, 100);
    let transparency_flat: Vec<bool> = vec![true; width * height];
    let origins: Vec<(usize, usize)> = (0..8).map(|i| (10 + i * 10, 10 + i * 10)).collect();

    // Sequential
    let algorithm = Shadowcast::new();
    let start = Instant::now();
    for _ in 0..iterations {
        let _maps: Vec<_> = origins
            .iter()
            .map(|&(x, y)| algorithm.compute_flat(&transparency_flat, width, height, x, y))
            .collect();
    }
    let avg_sequential_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

    // Parallel with rayon
    let start = Instant::now();
    for _ in 0..iterations {
        let _maps: Vec<_> = origins
            .par_iter()
            .map(|&(x, y)| {
                let algorithm = Shadowcast::new();
                algorithm.compute_flat(&transparency_flat, width, height, x, y)
            })
            .collect();
    }
    let avg_parallel_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

    println!("Grid size: {}x{}, {} origins", width, height, origins.len());
    println!("-----------------------");
    println!("  Sequential: {:.3} ms/iter", avg_sequential_ms);
    println!("  Parallel:   {:.3} ms/iter", avg_parallel_ms);
    println!("  Speedup: {:.2}x", avg_sequential_ms / avg_parallel_ms);
}

fn run_interactive() {
    let config = ViewerConfig::default();

    match InteractiveViewer::new(config) {
        Ok(mut viewer) => {
            if let Err(e) = viewer.run() {
                eprintln!("Error: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Failed to create viewer: {}", e);
        }
    }
}
