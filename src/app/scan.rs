// LinkSphere - app/scan.rs
//
// Scan lifecycle management. Runs the application scanner on a background
// thread, sending progress and results to the UI thread via an mpsc channel.
//
// Architecture:
//   - `ScanManager` lives on the UI thread; `run_scan` runs on a worker thread.
//   - An `Arc<AtomicBool>` cancel flag lets the UI stop the scan cooperatively.
//   - All cross-thread communication is via `ScanEvent` channel messages.
//   - Progress is only sent when the percentage changes, so a scan over tens
//     of thousands of files sends at most ~100 progress messages.

use crate::core::model::{OsKind, ScanEvent, ScanTarget};
use crate::core::scanner;
use crate::util::constants;
use std::cell::Cell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

// =============================================================================
// ScanManager
// =============================================================================

/// Manages an application scan on a background thread.
pub struct ScanManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<ScanEvent>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl ScanManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start scanning the default application directories of `os_kind`, plus
    /// any `extra_roots` from config.toml.
    ///
    /// An OS without a scan target produces a single `ScanEvent::Unsupported`.
    pub fn start_scan(&mut self, os_kind: OsKind, extra_roots: Vec<PathBuf>) {
        match ScanTarget::for_os(os_kind) {
            Some(target) => self.start_scan_target(target.with_extra_roots(extra_roots)),
            None => {
                self.cancel_scan();
                let (tx, rx) = mpsc::channel();
                // The receiver is held below, so this send cannot fail.
                let _ = tx.send(ScanEvent::Unsupported { os_kind });
                self.progress_rx = Some(rx);
                tracing::info!(os = %os_kind, "Scan requested on unsupported platform");
            }
        }
    }

    /// Start scanning an explicit target.
    ///
    /// Spawns a background thread immediately. If a scan is already running it
    /// is cancelled first.
    pub fn start_scan_target(&mut self, target: ScanTarget) {
        self.cancel_scan();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_scan(target, tx, cancel);
        });

        tracing::info!("Scan started");
    }

    /// Request cancellation of the running scan.
    /// The background thread sends `ScanEvent::Cancelled` with partial results.
    pub fn cancel_scan(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("Scan cancellation requested");
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns at most `MAX_SCAN_MESSAGES_PER_FRAME` messages; the rest stay
    /// queued for the next frame.
    pub fn poll_progress(&self) -> Vec<ScanEvent> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < constants::MAX_SCAN_MESSAGES_PER_FRAME {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for ScanManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background scan
// =============================================================================

/// Worker body: run the scanner and forward its output as `ScanEvent`s.
///
/// The scan also stops when the receiver has been dropped (UI closed), since
/// nobody is left to read the result.
fn run_scan(target: ScanTarget, tx: mpsc::Sender<ScanEvent>, cancel: Arc<AtomicBool>) {
    if tx
        .send(ScanEvent::Started {
            os_kind: target.os_kind,
            roots: target.search_roots.len(),
        })
        .is_err()
    {
        return;
    }

    let disconnected = Cell::new(false);
    let mut last_sent: Option<u8> = None;

    let report = scanner::scan_target(
        &target,
        |percent| {
            if last_sent == Some(percent) {
                return;
            }
            last_sent = Some(percent);
            if tx.send(ScanEvent::Progress { percent }).is_err() {
                disconnected.set(true);
            }
        },
        || cancel.load(Ordering::SeqCst) || disconnected.get(),
    );

    if disconnected.get() {
        tracing::debug!("Scan receiver dropped; worker exiting");
        return;
    }

    let msg = if report.cancelled {
        ScanEvent::Cancelled { report }
    } else {
        ScanEvent::Completed { report }
    };
    // Receiver dropped (UI closed); nothing to report to.
    let _ = tx.send(msg);
}
