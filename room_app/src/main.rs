//! Room editor demo
//!
//! Runs a scripted editing session without a window: places catalogue
//! items, drags and turns them through the gesture machine, edits a light
//! from the property panel, optionally imports `.glb` files given on the
//! command line, and exports the room to `scene.glb`.
//!
//! ```text
//! room_demo [config.toml|config.ron] [model.glb ...] [--out DIR]
//! ```

use std::path::{Path, PathBuf};

use room_engine::config::{Config, ConfigError, EditorConfig};
use room_engine::editor::{Axis, EditorError, EditorSession, SessionEvent};
use room_engine::foundation::logging;
use room_engine::foundation::math::Vec2;
use room_engine::input::{Modifiers, ViewportPointer};
use room_engine::interaction::PointerTarget;
use room_engine::render::Camera;
use thiserror::Error;

/// Demo failures
#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Usage: {0}")]
    Usage(String),
}

#[derive(Debug, Default)]
struct DemoArgs {
    config: Option<PathBuf>,
    models: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
}

impl DemoArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, DemoError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            if arg == "--out" {
                let dir = args.next().ok_or_else(|| DemoError::Usage("--out needs a directory".to_string()))?;
                parsed.out_dir = Some(PathBuf::from(dir));
                continue;
            }
            let path = PathBuf::from(&arg);
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml" | "ron") => parsed.config = Some(path),
                _ => parsed.models.push(path),
            }
        }
        Ok(parsed)
    }
}

const VIEWPORT_WIDTH: u32 = 1280;
const VIEWPORT_HEIGHT: u32 = 720;

struct RoomDemoApp {
    session: EditorSession,
    camera: Camera,
    viewport: ViewportPointer,
}

impl RoomDemoApp {
    fn new(config: EditorConfig) -> Result<Self, DemoError> {
        let session = EditorSession::new(config)?;
        let camera = session.default_camera(VIEWPORT_WIDTH as f32 / VIEWPORT_HEIGHT as f32);
        Ok(Self {
            session,
            camera,
            viewport: ViewportPointer::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        })
    }

    /// Pointer at a pixel position, in NDC
    fn pointer_at(&mut self, x: f64, y: f64) -> Vec2 {
        self.viewport.update_position(x, y);
        self.viewport.to_ndc().unwrap_or_else(Vec2::zeros)
    }

    fn furnish(&mut self) -> Result<(), DemoError> {
        log::info!("Furnishing room...");
        for key in ["wall", "sofa-1", "table-1", "lamp-1"] {
            let id = self.session.add_from_library(key)?;
            log::info!("  placed {}", id);
        }

        // Library drag-and-drop goes through the JSON payload
        let payload = self.session.library_payload("light-1")?;
        let light = self.session.accept_drop(&payload)?;
        log::info!("  dropped {}", light);
        Ok(())
    }

    fn drag_and_turn(&mut self) -> Result<(), DemoError> {
        let Some(sofa) = self.session.project().iter().find(|e| e.id.as_str().starts_with("sofa")).map(|e| e.id.clone())
        else {
            return Ok(());
        };

        let (cx, cy) = (f64::from(VIEWPORT_WIDTH) / 2.0, f64::from(VIEWPORT_HEIGHT) / 2.0);

        log::info!("Dragging {}...", sofa);
        let start = self.pointer_at(cx, cy);
        self.session
            .pointer_down_on(PointerTarget::Element(sofa.clone()), start, Modifiers::empty());
        for step in 1..=5u8 {
            let ndc = self.pointer_at(cx + 26.0 * f64::from(step), cy + 7.0 * f64::from(step));
            self.session.pointer_move(ndc);
            self.tick();
        }
        self.session.pointer_up();
        self.tick();

        log::info!("Turning {}...", sofa);
        let rotate = self.session.config().interaction.rotate_modifier.flag();
        let start = self.pointer_at(cx, cy);
        self.session.pointer_down_on(PointerTarget::Element(sofa.clone()), start, rotate);
        let turned = self.pointer_at(cx + 160.0, cy);
        self.session.pointer_move(turned);
        self.session.pointer_leave();
        self.tick();

        if let Some(element) = self.session.project().get(&sofa) {
            log::info!(
                "{} now at ({:.2}, {:.2}, {:.2}), heading {:.2} rad",
                sofa,
                element.position.x,
                element.position.y,
                element.position.z,
                element.rotation.y
            );
        }

        self.session.click_background();
        self.tick();
        Ok(())
    }

    fn edit_light(&mut self) -> Result<(), DemoError> {
        let Some(light) = self.session.project().iter().find(|e| e.is_light()).map(|e| e.id.clone()) else {
            return Ok(());
        };
        self.session.pointer_down_on(PointerTarget::Element(light), Vec2::zeros(), Modifiers::empty());
        self.session.pointer_up();
        self.tick();

        let mut panel = self.session.panel()?;
        panel.set_position_field(Axis::X, "1.5")?;
        let intensity = panel.set_intensity(1.26)?;
        let color = panel.set_color("#ffd8a8")?;
        log::info!("Light set to {} at intensity {:.1}", color, intensity);
        Ok(())
    }

    fn import_models(&mut self, models: &[PathBuf]) -> Result<(), DemoError> {
        for path in models {
            let bytes = std::fs::read(path).map_err(|source| DemoError::Read {
                path: path.clone(),
                source,
            })?;
            let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            self.session.import_file_async(&name, bytes)?;
        }
        for event in self.session.finish_jobs() {
            match event {
                SessionEvent::Imported { file_name, id } => log::info!("Imported {} as {}", file_name, id),
                SessionEvent::ImportFailed { file_name, error } => {
                    log::error!("{}: {}", file_name, error);
                }
                SessionEvent::Exported(_) | SessionEvent::ExportFailed(_) => {}
            }
        }
        Ok(())
    }

    fn export(&self, dir: &Path) -> Result<PathBuf, DemoError> {
        self.session
            .export_to_dir(dir)
            .map_err(|e| DemoError::Editor(e.into()))
    }

    fn tick(&mut self) {
        let report = self.session.tick(&self.camera);
        for commit in &report.commits {
            log::debug!("{:?}", commit);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => EditorConfig::load_from_file(path)?,
        None => EditorConfig::default(),
    };
    logging::init_with_level(&config.logging.level);

    log::info!("Starting room editor demo");
    let mut app = RoomDemoApp::new(config)?;
    app.furnish()?;
    app.drag_and_turn()?;
    app.edit_light()?;
    app.import_models(&args.models)?;

    let out_dir = args.out_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = app.export(&out_dir)?;
    log::info!(
        "Exported {} elements to {}",
        app.session.project().len(),
        path.display()
    );
    Ok(())
}
