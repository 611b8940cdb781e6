/// Terminal viewer for procedurally generated galaxies
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use galaxy_core::{
    Camera, GalaxyGenerator, GenerationParameters, PointBuffer, PointCloudSlot, ProjectionMode,
    RotationState, Transform,
};
use std::fmt;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod panel;
pub mod renderer;

pub use panel::{ParameterPanel, Tweak};
pub use renderer::PointRenderer;

/// Yaw added every frame while auto-spin is on
const AUTO_SPIN: f32 = 0.01;

/// Width over height of a character grid. Terminal cells are roughly twice
/// as tall as they are wide.
fn cell_aspect(width: usize, height: usize) -> f32 {
    width as f32 / (height.max(1) * 2) as f32
}

/// Main application struct for terminal galaxy rendering
pub struct GalaxyApp {
    params: GenerationParameters,
    seed: u64,
    slot: PointCloudSlot,
    panel: ParameterPanel,
    rotation: RotationState,
    camera: Camera,
    renderer: PointRenderer,
    auto_spin: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl GalaxyApp {
    pub fn new(params: GenerationParameters, seed: u64) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(params, seed, width as usize, height as usize)
    }

    /// Build an app for a fixed grid size without touching the terminal
    pub fn with_size(
        params: GenerationParameters,
        seed: u64,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let camera = Camera {
            aspect: cell_aspect(width, height),
            ..Camera::default()
        };

        let mut app = Self {
            params,
            seed,
            slot: PointCloudSlot::new(),
            panel: ParameterPanel::new(),
            rotation: RotationState::zero(),
            camera,
            renderer: PointRenderer::new(width, height),
            auto_spin: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.regenerate()?;
        app.frame_camera();
        Ok(app)
    }

    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn slot(&self) -> &PointCloudSlot {
        &self.slot
    }

    /// Replace the published galaxy: release the old buffer, then acquire
    /// one generated from the current parameters
    pub fn regenerate(&mut self) -> Result<()> {
        if let Some(old) = self.slot.release() {
            tracing::debug!(points = old.len(), "disposing previous galaxy");
        }

        let started = Instant::now();
        let buffer = GalaxyGenerator::generate_seeded(&self.params, self.seed);
        let generation = self.slot.acquire(buffer)?;

        tracing::info!(
            generation,
            seed = self.seed,
            count = self.params.count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "galaxy regenerated"
        );
        Ok(())
    }

    /// Rebuild the character grid for a new terminal size and reframe the
    /// camera for the new aspect ratio
    pub fn resize(&mut self, width: usize, height: usize) {
        self.renderer = PointRenderer::new(width, height);
        self.camera.aspect = cell_aspect(width, height);
        self.frame_camera();
        tracing::debug!(width, height, "terminal resized");
    }

    fn frame_camera(&mut self) {
        if let Some(buffer) = self.slot.current() {
            self.camera.frame_extent(buffer.planar_extent());
        }
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(width, height) => self.resize(width as usize, height as usize),
                    _ => {}
                }
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one key press. Parameter edits regenerate at most once per key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut dirty = false;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(0.1, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-0.1, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -0.1),
            KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, 0.1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.camera.zoom(0.9),
            KeyCode::Char('-') => self.camera.zoom(1.1),
            KeyCode::Char(' ') => self.auto_spin = !self.auto_spin,
            KeyCode::Char('o') => {
                self.camera.mode = match self.camera.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
            }
            KeyCode::Tab => self.panel.select_next(),
            KeyCode::BackTab => self.panel.select_prev(),
            KeyCode::Char(']') => dirty = self.panel.adjust(&mut self.params, 1),
            KeyCode::Char('[') => dirty = self.panel.adjust(&mut self.params, -1),
            KeyCode::Char('}') => dirty = self.panel.adjust(&mut self.params, 10),
            KeyCode::Char('{') => dirty = self.panel.adjust(&mut self.params, -10),
            KeyCode::Char('n') => {
                self.seed = rand::random();
                dirty = true;
            }
            _ => {}
        }

        if dirty {
            let reframe = self.panel.selected() == Tweak::Radius;
            self.regenerate()?;
            if reframe {
                self.frame_camera();
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        if self.auto_spin {
            self.rotation.rotate(0.0, AUTO_SPIN);
        }
    }

    /// Splat the current galaxy into the renderer's grid
    pub fn draw_frame(&mut self) -> usize {
        let model = Transform::rotation_matrix(&self.rotation);
        self.renderer.clear();
        match self.slot.current() {
            Some(buffer) => self.renderer.render_points(buffer, &model, &self.camera),
            None => 0,
        }
    }

    fn render(&mut self) -> Result<()> {
        self.draw_frame();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Galaxy | FPS: {:.1} | seed {} | Tab=Select [ ]=Adjust WASD=Rotate +/-=Zoom O=Ortho N=Reseed Q=Quit",
                self.fps, self.seed
            )),
            ResetColor
        )?;
        for (row, line) in self.panel.lines(&self.params).iter().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(0, row as u16 + 1),
                SetForegroundColor(Color::Grey),
                Print(line),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

/// Aggregate statistics of a generated buffer
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSummary {
    pub points: usize,
    pub point_size: f32,
    pub planar_extent: f32,
    pub mean_radius: f32,
    pub mean_height: f32,
}

impl BufferSummary {
    pub fn from_buffer(buffer: &PointBuffer) -> Self {
        let n = buffer.len().max(1) as f32;
        let (radius_sum, height_sum) = buffer.points().fold((0.0, 0.0), |(r, h), p| {
            let pos = p.position;
            (r + (pos.x * pos.x + pos.z * pos.z).sqrt(), h + pos.y.abs())
        });

        Self {
            points: buffer.len(),
            point_size: buffer.point_size(),
            planar_extent: buffer.planar_extent(),
            mean_radius: radius_sum / n,
            mean_height: height_sum / n,
        }
    }
}

impl fmt::Display for BufferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "points:        {}", self.points)?;
        writeln!(f, "point size:    {:.3}", self.point_size)?;
        writeln!(f, "extent:        {:.3}", self.planar_extent)?;
        writeln!(f, "mean radius:   {:.3}", self.mean_radius)?;
        write!(f, "mean |height|: {:.3}", self.mean_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> GalaxyApp {
        let params = GenerationParameters::default().with_count(500);
        GalaxyApp::with_size(params, 7, 80, 24).unwrap()
    }

    #[test]
    fn test_new_app_publishes_first_generation() {
        let app = app();
        assert_eq!(app.slot().generation(), 1);
        assert_eq!(app.slot().live_buffers(), 1);
        assert_eq!(app.slot().current().unwrap().len(), 500);
    }

    #[test]
    fn test_parameter_keys_regenerate_once() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.params().count, 600);
        assert_eq!(app.slot().generation(), 2);
        assert_eq!(app.slot().live_buffers(), 1);
        assert_eq!(app.slot().stats().released, 1);
        assert_eq!(app.slot().current().unwrap().len(), 600);
    }

    #[test]
    fn test_view_keys_do_not_regenerate() {
        let mut app = app();
        for code in [KeyCode::Left, KeyCode::Up, KeyCode::Char('+'), KeyCode::Tab] {
            app.handle_key(press(code)).unwrap();
        }
        assert_eq!(app.slot().generation(), 1);
        assert_eq!(app.panel.selected(), Tweak::Size);
    }

    #[test]
    fn test_reseed_changes_output() {
        let mut app = app();
        let before = app.slot().current().unwrap().clone();
        app.handle_key(press(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.slot().generation(), 2);
        assert_ne!(app.slot().current().unwrap(), &before);
    }

    #[test]
    fn test_projection_toggle() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.camera.mode, ProjectionMode::Orthographic);
        assert!(app.draw_frame() > 0);
        app.handle_key(press(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.camera.mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_resize_rebuilds_grid() {
        let mut app = app();
        app.resize(40, 10);
        assert_eq!(app.renderer.width(), 40);
        assert_eq!(app.renderer.height(), 10);
        assert!((app.camera.aspect - 2.0).abs() < 1e-6);
        assert!(app.draw_frame() > 0);
        assert_eq!(app.slot().generation(), 1);

        app.resize(0, 0);
        assert!(app.camera.aspect.is_finite());
        assert_eq!(app.draw_frame(), 0);
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('q'))).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_frame_draws_galaxy() {
        let mut app = app();
        assert!(app.draw_frame() > 400, "framed galaxy is mostly on screen");
    }

    #[test]
    fn test_summary() {
        let params = GenerationParameters::default()
            .with_count(1_000)
            .with_radius(2.0)
            .with_randomness(0.0, 1.0);
        let buffer = GalaxyGenerator::generate_seeded(&params, 3);
        let summary = BufferSummary::from_buffer(&buffer);
        assert_eq!(summary.points, 1_000);
        assert_eq!(summary.mean_height, 0.0);
        assert!((summary.mean_radius - 1.0).abs() < 0.1);
        assert!(summary.planar_extent < 2.0);
        assert!(summary.to_string().contains("points:        1000"));
    }
}
