mod state;
mod toast;
mod ui;

use crate::config::UploaderConfig;
use crate::upload::{sample_loan, ConversionService, FileProcessor, LoanData};
use derivative::Derivative;
use rand::Rng;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use state::{Outcome, UploadStatus, WidgetEvent, WidgetState, MAX_INCREMENT};
use toast::Toasts;

pub const SAMPLE_LOADED_MESSAGE: &str = "Sample loan loaded successfully";
const SAMPLE_LOADED_TOAST: &str = "Sample loan loaded";

/// Receives every loan the widget loads, from an upload or the sample.
pub type DataLoaded = Box<dyn FnMut(LoanData)>;

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Background work of the current upload. Dropping it stops the
/// progress timer and any request still running.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    _ticker: AbortOnDrop,
    _request: AbortOnDrop,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct UploadWidget {
    config: UploaderConfig,
    runtime: Handle,
    #[derivative(Debug = "ignore")]
    service: Arc<dyn ConversionService>,
    #[derivative(Debug = "ignore")]
    on_data_loaded: DataLoaded,
    state: WidgetState,
    selected_file: Option<PathBuf>,
    in_flight: Option<InFlight>,
    next_generation: u64,
    events_tx: std_mpsc::Sender<WidgetEvent>,
    events_rx: std_mpsc::Receiver<WidgetEvent>,
    toasts: Toasts,
}

impl UploadWidget {
    pub fn new(
        config: UploaderConfig,
        runtime: Handle,
        service: Arc<dyn ConversionService>,
        on_data_loaded: DataLoaded,
    ) -> Self {
        let (events_tx, events_rx) = std_mpsc::channel();
        Self {
            config,
            runtime,
            service,
            on_data_loaded,
            state: WidgetState::Idle,
            selected_file: None,
            in_flight: None,
            next_generation: 0,
            events_tx,
            events_rx,
            toasts: Toasts::default(),
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.state.status()
    }

    pub fn is_uploading(&self) -> bool {
        self.state.is_uploading()
    }

    /// Selects a file and starts converting it right away.
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        self.start_upload();
    }

    pub fn start_upload(&mut self) {
        let Some(path) = self.selected_file.clone() else {
            return;
        };
        if self.state.is_uploading() {
            warn!(file = %path.display(), "upload already in progress, ignoring");
            return;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        info!(generation, file = %path.display(), "starting upload");

        self.state = WidgetState::uploading(file_name);

        let ticker = self.spawn_ticker(generation);
        let request = self.spawn_request(generation, path);
        self.in_flight = Some(InFlight {
            generation,
            _ticker: AbortOnDrop(ticker),
            _request: AbortOnDrop(request),
        });
    }

    fn spawn_ticker(&self, generation: u64) -> JoinHandle<()> {
        let tx = self.events_tx.clone();
        let period = self.config.tick_interval;
        self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // the first tick fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let increment = rand::thread_rng().gen_range(0.0..MAX_INCREMENT);
                if tx.send(WidgetEvent::Tick { generation, increment }).is_err() {
                    break;
                }
            }
        })
    }

    fn spawn_request(&self, generation: u64, path: PathBuf) -> JoinHandle<()> {
        let tx = self.events_tx.clone();
        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            let result = match FileProcessor::load(&path).await {
                Ok(document) => {
                    let _ = tx.send(WidgetEvent::Preview {
                        generation,
                        preview: document.preview,
                    });
                    service.convert(document.request).await
                }
                Err(e) => Err(e),
            };
            let _ = tx.send(WidgetEvent::Settled { generation, result });
        })
    }

    /// Applies everything the background tasks posted since the last call.
    /// Returns whether anything changed.
    pub fn poll_events(&mut self) -> bool {
        let mut had_updates = false;
        while let Ok(event) = self.events_rx.try_recv() {
            had_updates |= self.apply(event);
        }
        had_updates
    }

    fn apply(&mut self, event: WidgetEvent) -> bool {
        let current = self.in_flight.as_ref().map(|f| f.generation);
        if current != Some(event.generation()) {
            debug!(
                generation = event.generation(),
                ?current,
                "discarding event from a finished upload"
            );
            return false;
        }

        match event {
            WidgetEvent::Tick { increment, .. } => {
                if let WidgetState::Uploading(upload) = &mut self.state {
                    upload.progress.advance(increment);
                }
            }
            WidgetEvent::Preview { preview, .. } => {
                if let WidgetState::Uploading(upload) = &mut self.state {
                    debug!(lines = preview.line_count, size = %preview.file_size, "preview ready");
                    upload.preview = Some(preview);
                }
            }
            WidgetEvent::Settled { generation, result } => {
                // stops the timer
                self.in_flight = None;
                // lets the same file be picked again
                self.selected_file = None;

                match result {
                    Ok(converted) => {
                        info!(generation, loan_id = %converted.data.loan_id, "conversion succeeded");
                        self.state.settle_success(converted.message.clone());
                        (self.on_data_loaded)(converted.data);
                        self.toasts.success(converted.message);
                    }
                    Err(e) => {
                        let message = e.to_string();
                        warn!(generation, error = %message, "conversion failed");
                        self.state.settle_error(message.clone());
                        self.toasts.error(message);
                    }
                }
            }
        }
        true
    }

    pub fn load_sample(&mut self) {
        if self.state.is_uploading() {
            warn!("upload in progress, not loading the sample");
            return;
        }
        info!("loading sample loan");
        (self.on_data_loaded)(sample_loan());
        self.state = WidgetState::Settled {
            outcome: Outcome::Success(SAMPLE_LOADED_MESSAGE.to_string()),
            progress: 0.0,
        };
        self.toasts.success(SAMPLE_LOADED_TOAST);
    }
}
