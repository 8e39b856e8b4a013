//! File system watcher for `--watch` mode.
//!
//! Monitors the content directory and the config file, batching rapid
//! events with a debounce window and re-running the full indexing pass on
//! each batch. There is no incremental update: a pass always rebuilds the
//! whole artifact, so any relevant change simply triggers another pass.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► run_pass ──► artifact
//! ```

use crate::{config::Config, indexer, log, store::{DirStore, is_post_file}};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REINDEX_COOLDOWN_MS: u64 = 800;
const IDLE_POLL_MS: u64 = 400;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Only post files and the config file can trigger a pass. The artifact
/// itself is excluded so writing it never re-triggers the watcher.
fn is_trigger(path: &Path, config: &Config) -> bool {
    if is_temp_file(path) || path == config.index.artifact {
        return false;
    }
    is_post_file(path) || path == config.config_path
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and re-index cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_pass: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_pass: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_pass
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REINDEX_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event, config: &Config) {
        for path in event.paths {
            if is_trigger(&path, config) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_pass(&mut self) {
        self.last_pass = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_millis(IDLE_POLL_MS)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Re-run the indexing pass after a change batch. Failures are logged,
/// never fatal: the watcher keeps running with the previous artifact.
fn reindex(changed: &[PathBuf], config: &'static Config) {
    let triggers: Vec<String> = changed
        .iter()
        .map(|p| {
            p.strip_prefix(&config.root)
                .unwrap_or(p)
                .display()
                .to_string()
        })
        .collect();
    log!("watch"; "{} changed, re-indexing...", triggers.join(", "));

    let store = DirStore::new(&config.index.content);
    if let Err(e) = indexer::run_pass(&store, config) {
        log!("watch"; "indexing failed: {e:#}");
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Start the blocking watch loop. Returns after Ctrl-C.
pub fn watch_for_changes_blocking(config: &'static Config) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;

    watcher
        .watch(&config.index.content, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", config.index.content.display()))?;
    if config.config_path.exists() {
        watcher
            .watch(&config.config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", config.config_path.display()))?;
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .context("Failed to set Ctrl+C handler")?;
    }

    log!("watch"; "watching {} (Ctrl-C to stop)", config.index.content.display());

    let mut debouncer = Debouncer::new();

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(debouncer.timeout()) {
            // Events arriving during the cooldown are buffered too; the
            // pass they trigger just waits until the cooldown expires.
            Ok(Ok(event)) if is_relevant(&event) => {
                debouncer.add(event, config);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(mpsc::RecvTimeoutError::Timeout)
                if debouncer.ready() && !debouncer.in_cooldown() =>
            {
                let changed = debouncer.take();
                if !changed.is_empty() {
                    reindex(&changed, config);
                    debouncer.mark_pass();
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    log!("watch"; "shutting down");
    Ok(())
}
