//! The editing session

use std::fs;
use std::path::{Path, PathBuf};

use super::{EditorError, PropertyPanel};
use crate::assets::{export_scene, AssetImporter, AssetJobs, AssetLibrary, ExportError, JobOutcome};
use crate::config::EditorConfig;
use crate::foundation::math::Vec2;
use crate::input::Modifiers;
use crate::interaction::{pick, InteractionContext, Manipulator, PointerEvent, PointerTarget, TransformCommit};
use crate::model::{library, DesignElement, ElementId, IdGenerator, Project};
use crate::render::{ray_from_pointer, Camera};
use crate::scene::{build_live_scene, SceneNode};

/// Name given to a fresh project
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Room";

/// Something a background job produced, reported from [`EditorSession::tick`]
#[derive(Debug)]
pub enum SessionEvent {
    /// An imported asset was appended to the project
    Imported {
        /// File the asset came from
        file_name: String,
        /// New element id
        id: ElementId,
    },
    /// An import was rejected; the project is unchanged
    ImportFailed {
        /// File the user picked
        file_name: String,
        /// Why it was rejected
        error: EditorError,
    },
    /// An export finished
    Exported(Vec<u8>),
    /// An export failed
    ExportFailed(ExportError),
}

/// What happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    /// Transforms pushed by the gesture machine, in order
    pub commits: Vec<TransformCommit>,
    /// Completed background jobs
    pub events: Vec<SessionEvent>,
}

/// One open room and everything needed to edit it
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    project: Project,
    context: InteractionContext,
    manipulator: Manipulator,
    importer: AssetImporter,
    assets: AssetLibrary,
    ids: IdGenerator,
    jobs: AssetJobs,
}

impl EditorSession {
    /// Start a session with an empty project
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        log::info!("Starting editor session (rotate modifier: {:?})", config.interaction.rotate_modifier);
        Ok(Self {
            manipulator: Manipulator::new(&config.interaction),
            importer: AssetImporter::from(&config.assets),
            config,
            project: Project::new(DEFAULT_PROJECT_NAME),
            context: InteractionContext::new(),
            assets: AssetLibrary::new(),
            ids: IdGenerator::new(),
            jobs: AssetJobs::new(),
        })
    }

    /// Session configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The project being edited
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Rename the project
    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project.name = name.into();
    }

    /// Selection and orbit state
    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// The gesture machine
    pub fn manipulator(&self) -> &Manipulator {
        &self.manipulator
    }

    /// Imported assets
    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    /// Background jobs not yet reported
    pub fn jobs_in_flight(&self) -> usize {
        self.jobs.in_flight()
    }

    /// Camera described by the configuration
    pub fn default_camera(&self, aspect: f32) -> Camera {
        Camera::from_config(&self.config.camera, aspect)
    }

    /// Create an element from a catalogue entry and append it
    pub fn add_from_library(&mut self, key: &str) -> Result<ElementId, EditorError> {
        let item = library::find(key).ok_or_else(|| EditorError::UnknownLibraryItem(key.to_string()))?;
        let element = item.instantiate(&mut self.ids);
        let id = element.id.clone();
        self.project.add(element)?;
        Ok(id)
    }

    /// Start dragging a catalogue entry: the JSON payload for the drop target
    pub fn library_payload(&mut self, key: &str) -> Result<String, EditorError> {
        let item = library::find(key).ok_or_else(|| EditorError::UnknownLibraryItem(key.to_string()))?;
        Ok(item.drag_payload(&mut self.ids)?)
    }

    /// Drop a library payload onto the viewport
    pub fn accept_drop(&mut self, payload: &str) -> Result<ElementId, EditorError> {
        Ok(self.project.accept_drop(payload)?)
    }

    /// Remove an element, ending its gesture and dropping it from the selection
    pub fn remove_element(&mut self, id: &ElementId) -> Result<DesignElement, EditorError> {
        let removed = self.project.remove(id)?;
        self.manipulator.forget(id, &mut self.context);
        if self.context.is_selected(id) {
            self.context.select(None);
        }
        Ok(removed)
    }

    /// Pointer pressed at `ndc`: hit-test the scene and queue the event
    pub fn pointer_down(&mut self, ndc: Vec2, modifiers: Modifiers, camera: &Camera) {
        let target = ray_from_pointer(ndc, camera).map_or(PointerTarget::Nothing, |ray| {
            pick(&ray, &self.project, &self.assets)
        });
        self.pointer_down_on(target, ndc, modifiers);
    }

    /// Pointer pressed on a target the host already hit-tested
    pub fn pointer_down_on(&mut self, target: PointerTarget, ndc: Vec2, modifiers: Modifiers) {
        self.manipulator.push_event(PointerEvent::Down { target, ndc, modifiers });
    }

    /// Pointer moved
    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.manipulator.push_event(PointerEvent::Move { ndc });
    }

    /// Pointer released
    pub fn pointer_up(&mut self) {
        self.manipulator.push_event(PointerEvent::Up);
    }

    /// Pointer left the viewport
    pub fn pointer_leave(&mut self) {
        self.manipulator.push_event(PointerEvent::Leave);
    }

    /// Click on the ground surface
    pub fn click_background(&mut self) {
        self.pointer_down_on(PointerTarget::Ground, Vec2::zeros(), Modifiers::empty());
    }

    /// Switch between desktop and AR surfaces
    pub fn toggle_ar_mode(&mut self) -> bool {
        self.context.toggle_ar_mode()
    }

    /// Per-frame update: collect finished jobs, then run the gesture machine
    pub fn tick(&mut self, camera: &Camera) -> TickReport {
        let mut report = TickReport::default();
        for outcome in self.jobs.poll() {
            report.events.push(self.finish_job(outcome));
        }
        report.commits = self.manipulator.tick(&mut self.context, &mut self.project, camera);
        report
    }

    /// Nodes the viewport should draw, with selection decorations
    pub fn live_scene(&self) -> Vec<SceneNode> {
        build_live_scene(&self.project, &self.context, &self.assets)
    }

    /// Panel for the selected element
    pub fn panel(&mut self) -> Result<PropertyPanel<'_>, EditorError> {
        let id = self.context.selected().cloned().ok_or(EditorError::NothingSelected)?;
        Ok(PropertyPanel::new(&mut self.project, id)?)
    }

    /// Import an asset now, appending it to the project
    pub fn import_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<ElementId, EditorError> {
        self.importer.check_file_name(file_name)?;
        let parsed = self.importer.parse(bytes)?;
        let element = parsed.into_element(&mut self.assets, &mut self.ids);
        self.append_import(file_name, element)
    }

    /// Import an asset on a worker thread; the result arrives through [`tick`](Self::tick)
    pub fn import_file_async(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<(), EditorError> {
        Ok(self.jobs.spawn_import(file_name, bytes, self.importer)?)
    }

    /// Export the project as GLB bytes
    pub fn export(&self) -> Result<Vec<u8>, ExportError> {
        if self.project.is_empty() {
            log::warn!("Export requested for empty project '{}'", self.project.name);
            return Err(ExportError::EmptyProject);
        }
        export_scene(self.project.elements(), &self.assets)
    }

    /// Export into `dir` under the configured file name, returning the path written
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let bytes = self.export()?;
        let path = dir.as_ref().join(&self.config.assets.export_file_name);
        fs::write(&path, &bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Export on a worker thread from a snapshot of the current elements
    pub fn export_async(&mut self) -> Result<(), EditorError> {
        if self.project.is_empty() {
            return Err(ExportError::EmptyProject.into());
        }
        Ok(self.jobs.spawn_export(self.project.elements().to_vec(), self.assets.clone())?)
    }

    /// Wait for every background job and apply the results
    pub fn finish_jobs(&mut self) -> Vec<SessionEvent> {
        self.jobs
            .wait_all()
            .into_iter()
            .map(|outcome| self.finish_job(outcome))
            .collect()
    }

    fn finish_job(&mut self, outcome: JobOutcome) -> SessionEvent {
        match outcome {
            JobOutcome::Imported { file_name, result } => {
                let appended = result
                    .map_err(EditorError::from)
                    .and_then(|parsed| {
                        let element = parsed.into_element(&mut self.assets, &mut self.ids);
                        self.append_import(&file_name, element)
                    });
                match appended {
                    Ok(id) => SessionEvent::Imported { file_name, id },
                    Err(error) => {
                        log::warn!("Import of '{}' failed: {}", file_name, error);
                        SessionEvent::ImportFailed { file_name, error }
                    }
                }
            }
            JobOutcome::Exported(Ok(bytes)) => SessionEvent::Exported(bytes),
            JobOutcome::Exported(Err(error)) => {
                log::error!("Background export failed: {}", error);
                SessionEvent::ExportFailed(error)
            }
        }
    }

    fn append_import(&mut self, file_name: &str, element: DesignElement) -> Result<ElementId, EditorError> {
        let id = element.id.clone();
        let handle = element.asset_reference;
        if let Err(err) = self.project.add(element) {
            if let Some(handle) = handle {
                self.assets.remove(handle);
            }
            return Err(err.into());
        }
        log::info!("Imported '{}' as '{}'", file_name, id);
        Ok(id)
    }
}
