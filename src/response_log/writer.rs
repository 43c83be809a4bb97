use super::LogRecord;
use crate::{Result, predict::PredictResponse};
use std::{path::Path, sync::Arc};
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::{Mutex, mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

enum Command {
    Append(String),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Append-only log of successful `/predict` responses.
///
/// Records are handed to a single writer task, so callers never wait on disk
/// and concurrent records never interleave. Failures are reported with
/// `warn!` and otherwise ignored.
#[derive(Clone)]
pub struct ResponseLog {
    tx: Option<mpsc::UnboundedSender<Command>>,
    writer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ResponseLog {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        info!("Writing responses to {}", path.display());

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(file, rx));

        Ok(Self {
            tx: Some(tx),
            writer: Arc::new(Mutex::new(Some(writer))),
        })
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            writer: Arc::new(Mutex::new(None)),
        }
    }

    pub fn record(&self, response: &PredictResponse) {
        let Some(tx) = &self.tx else {
            return;
        };

        let line = match LogRecord::new(response.clone()).to_line() {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize response for the response log: {}", e);
                return;
            }
        };

        if tx.send(Command::Append(line)).is_err() {
            warn!("Response log is closed, dropping record");
        }
    }

    /// Resolves once everything recorded so far has been written out.
    pub async fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        if tx.send(Command::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Flushes and stops the writer. Records sent afterwards are dropped.
    pub async fn shutdown(&self) {
        let Some(tx) = &self.tx else {
            return;
        };

        let _ = tx.send(Command::Shutdown);
        if let Some(writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.await {
                warn!("Response log writer ended abnormally: {}", e);
            }
        }
    }
}

async fn run_writer(mut file: File, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Append(line) => {
                if let Err(e) = file.write_all(line.as_bytes()).await {
                    warn!("Failed to append to response log: {}", e);
                    continue;
                }
                if let Err(e) = file.flush().await {
                    warn!("Failed to flush response log: {}", e);
                }
            }
            Command::Flush(ack) => {
                if let Err(e) = file.sync_data().await {
                    warn!("Failed to sync response log: {}", e);
                }
                let _ = ack.send(());
            }
            Command::Shutdown => break,
        }
    }

    if let Err(e) = file.flush().await {
        warn!("Failed to flush response log on shutdown: {}", e);
    }
    debug!("Response log writer stopped");
}
