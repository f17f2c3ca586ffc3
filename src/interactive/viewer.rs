//! Interactive FOV viewer - mouse controls the observer position in real-time

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::fov::Shadowcast;
use crate::render::{pack_rgb, save_ppm_with_walls};

/// Configuration for the interactive viewer
#[derive(Clone)]
pub struct ViewerConfig {
    /// Grid size (width x height in cells)
    pub grid_size: (usize, usize),
    /// Pixel scale factor (each cell = scale x scale pixels)
    pub scale: usize,
    /// Color of visible floor tiles (r, g, b)
    pub lit_color: (f32, f32, f32),
    /// Color of visible wall tiles
    pub wall_color: (f32, f32, f32),
    /// Color of tiles outside the field of view
    pub hidden_color: (f32, f32, f32),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            grid_size: (60, 60),
            scale: 12,
            lit_color: (1.0, 0.8, 0.4), // Warm torch color
            wall_color: (0.5, 0.5, 0.5),
            hidden_color: (0.05, 0.05, 0.08),
        }
    }
}

/// Interactive viewer for exploring field-of-view behavior
pub struct InteractiveViewer {
    config: ViewerConfig,
    transparency: Vec<bool>, // flat, row-major
    window: Window,
    buffer: Vec<u32>,
    algorithm: Shadowcast,
    last_wall_pos: (usize, usize), // left-click debounce, one toggle per cell
    snapshot_count: usize,
}

impl InteractiveViewer {
    /// Create a new interactive viewer with the given configuration
    pub fn new(config: ViewerConfig) -> Result<Self, String> {
        let (grid_w, grid_h) = config.grid_size;
        let window_w = grid_w * config.scale;
        let window_h = grid_h * config.scale;

        let window = Window::new(
            "FOV Test - Interactive Viewer (ESC to exit)",
            window_w,
            window_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        Ok(Self {
            config,
            transparency: vec![true; grid_w * grid_h],
            window,
            buffer: vec![0u32; window_w * window_h],
            algorithm: Shadowcast::new(),
            last_wall_pos: (usize::MAX, usize::MAX),
            snapshot_count: 0,
        })
    }

    /// Run the interactive viewer loop
    pub fn run(&mut self) -> Result<(), String> {
        let (grid_w, grid_h) = self.config.grid_size;
        let scale = self.config.scale;

        self.window.set_target_fps(60);

        log::info!("viewer started: {}x{} grid", grid_w, grid_h);
        println!("=== Interactive FOV Viewer ===");
        println!("Controls:");
        println!("  Mouse      - Move observer");
        println!("  Left Click - Toggle wall");
        println!("  Right Click- Clear all walls");
        println!("  C          - Clear walls");
        println!("  S          - Save PPM snapshot");
        println!("  ESC        - Exit");
        println!();

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            if self.window.is_key_pressed(Key::C, minifb::KeyRepeat::No) {
                self.clear_walls();
                println!("Walls cleared");
            }

            if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) {
                let grid_x = (mx as usize / scale).min(grid_w - 1);
                let grid_y = (my as usize / scale).min(grid_h - 1);

                if self.window.get_mouse_down(MouseButton::Left) {
                    // Toggle once per cell while the button stays down
                    if self.last_wall_pos != (grid_x, grid_y) {
                        self.toggle_wall(grid_x, grid_y);
                        self.last_wall_pos = (grid_x, grid_y);
                    }
                } else {
                    self.last_wall_pos = (usize::MAX, usize::MAX);
                }

                if self.window.get_mouse_down(MouseButton::Right) {
                    self.clear_walls();
                }

                if self.window.is_key_pressed(Key::S, minifb::KeyRepeat::No) {
                    self.save_snapshot(grid_x, grid_y)?;
                }

                self.render_fov(grid_x, grid_y)?;
            }

            self.window
                .update_with_buffer(&self.buffer, grid_w * scale, grid_h * scale)
                .map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Toggle wall at grid position
    fn toggle_wall(&mut self, x: usize, y: usize) {
        let (grid_w, _) = self.config.grid_size;
        let index = y * grid_w + x;
        self.transparency[index] = !self.transparency[index];
        log::debug!("toggled wall at ({}, {})", x, y);
    }

    /// Clear all walls
    fn clear_walls(&mut self) {
        self.transparency.fill(true);
    }

    /// Write the current visibility map to a numbered PPM file
    fn save_snapshot(&mut self, observer_x: usize, observer_y: usize) -> Result<(), String> {
        let (grid_w, grid_h) = self.config.grid_size;

        let visibility = self
            .algorithm
            .compute_flat(&self.transparency, grid_w, grid_h, observer_x, observer_y)
            .map_err(|e| e.to_string())?;

        let nested_vis: Vec<Vec<bool>> = visibility.chunks(grid_w).map(|r| r.to_vec()).collect();
        let nested_tp: Vec<Vec<bool>> = self
            .transparency
            .chunks(grid_w)
            .map(|r| r.to_vec())
            .collect();

        let filename = format!("fov_snapshot_{:03}.ppm", self.snapshot_count);
        save_ppm_with_walls(&nested_vis, Some(&nested_tp), &filename, self.config.scale)
            .map_err(|e| e.to_string())?;
        self.snapshot_count += 1;
        println!("Saved {}", filename);
        Ok(())
    }

    /// Recompute FOV from the observer position and repaint the buffer
    fn render_fov(&mut self, observer_x: usize, observer_y: usize) -> Result<(), String> {
        let (grid_w, grid_h) = self.config.grid_size;

        let visibility = self
            .algorithm
            .compute_flat(&self.transparency, grid_w, grid_h, observer_x, observer_y)
            .map_err(|e| e.to_string())?;

        self.render_to_buffer(&visibility, observer_x, observer_y);
        Ok(())
    }

    /// Paint a visibility map into the scaled pixel buffer
    fn render_to_buffer(&mut self, visibility: &[bool], observer_x: usize, observer_y: usize) {
        let (grid_w, grid_h) = self.config.grid_size;
        let scale = self.config.scale;

        for gy in 0..grid_h {
            for gx in 0..grid_w {
                let index = gy * grid_w + gx;
                let visible = visibility[index];
                let wall = !self.transparency[index];

                let (r, g, b) = if (gx, gy) == (observer_x, observer_y) {
                    (1.0, 1.0, 1.0)
                } else if visible && wall {
                    self.config.wall_color
                } else if visible {
                    self.config.lit_color
                } else {
                    self.config.hidden_color
                };
                let color = pack_rgb(r, g, b);

                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = gx * scale + sx;
                        let py = gy * scale + sy;
                        self.buffer[py * (grid_w * scale) + px] = color;
                    }
                }
            }
        }
    }
}
