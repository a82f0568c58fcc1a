//! Background import and export
//!
//! Parsing and encoding run on short-lived worker threads. Results come back
//! over a channel and are drained by [`AssetJobs::poll`] from the tick, so
//! the element list is only ever mutated on the interaction thread.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{export_scene, AssetImporter, AssetLibrary, ExportError, ImportError, ParsedAsset};
use crate::model::DesignElement;

/// A finished background job
#[derive(Debug)]
pub enum JobOutcome {
    /// An import finished; the asset is not yet stored
    Imported {
        /// File name the user picked
        file_name: String,
        /// Parsed asset or the reason it was rejected
        result: Result<ParsedAsset, ImportError>,
    },
    /// An export finished
    Exported(Result<Vec<u8>, ExportError>),
}

/// Worker-thread runner for asset jobs
#[derive(Debug)]
pub struct AssetJobs {
    sender: Sender<JobOutcome>,
    receiver: Receiver<JobOutcome>,
    in_flight: usize,
}

impl Default for AssetJobs {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetJobs {
    /// Create an idle runner
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Jobs started but not yet collected by [`poll`](Self::poll)
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Parse an asset off-thread
    ///
    /// The extension check happens up front so a wrong file never spawns a
    /// worker; its rejection is still reported through `poll`.
    pub fn spawn_import(&mut self, file_name: impl Into<String>, bytes: Vec<u8>, importer: AssetImporter) -> io::Result<()> {
        let file_name = file_name.into();
        if let Err(err) = importer.check_file_name(&file_name) {
            self.report(JobOutcome::Imported { file_name, result: Err(err) });
            return Ok(());
        }

        let thread_name = format!("import:{file_name}");
        let panicked_name = file_name.clone();
        self.spawn_worker(
            thread_name,
            move || JobOutcome::Imported {
                result: importer.parse(&bytes),
                file_name,
            },
            move |message| JobOutcome::Imported {
                file_name: panicked_name,
                result: Err(ImportError::ParseFailure(format!("importer panicked: {message}"))),
            },
        )
    }

    /// Encode a snapshot of the scene off-thread
    pub fn spawn_export(&mut self, elements: Vec<DesignElement>, assets: AssetLibrary) -> io::Result<()> {
        self.spawn_worker(
            "export".to_string(),
            move || JobOutcome::Exported(export_scene(&elements, &assets)),
            |message| JobOutcome::Exported(Err(ExportError::SerializationFailure(format!("exporter panicked: {message}")))),
        )
    }

    /// Run `job` on a named worker thread
    ///
    /// A panicking job still reports, through `on_panic`, so every started
    /// job is eventually collected.
    fn spawn_worker<J, P>(&mut self, thread_name: String, job: J, on_panic: P) -> io::Result<()>
    where
        J: FnOnce() -> JobOutcome + Send + 'static,
        P: FnOnce(String) -> JobOutcome + Send + 'static,
    {
        let sender = self.sender.clone();
        thread::Builder::new().name(thread_name).spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
                let message = panic_message(&*payload);
                log::error!("Asset worker panicked: {}", message);
                on_panic(message)
            });
            if sender.send(outcome).is_err() {
                log::debug!("Asset job finished after the job runner was dropped");
            }
        })?;
        self.in_flight += 1;
        Ok(())
    }

    /// Collect every finished job without blocking
    pub fn poll(&mut self) -> Vec<JobOutcome> {
        let outcomes: Vec<_> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        outcomes
    }

    /// Block until every started job has reported
    pub fn wait_all(&mut self) -> Vec<JobOutcome> {
        let mut outcomes = Vec::with_capacity(self.in_flight);
        while self.in_flight > 0 {
            match self.receiver.recv() {
                Ok(outcome) => {
                    outcomes.push(outcome);
                    self.in_flight -= 1;
                }
                Err(_) => break,
            }
        }
        outcomes
    }

    fn report(&mut self, outcome: JobOutcome) {
        // The runner owns a sender, so the channel cannot be closed here
        if self.sender.send(outcome).is_ok() {
            self.in_flight += 1;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
