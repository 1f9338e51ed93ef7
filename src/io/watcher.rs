use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

/// Events sent from the file watcher to a watch session.
#[derive(Debug)]
pub enum ListEvent {
    /// The list document changed on disk.
    Changed,
}

/// Watches the list document for writes from other processes — the local
/// stand-in for the document store pushing authoritative state to every
/// viewer.
pub struct ListWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<ListEvent>,
}

impl ListWatcher {
    /// Start watching the document at `list_path`. The parent directory is
    /// watched because atomic saves replace the file rather than write it.
    pub fn start(list_path: &Path) -> Result<ListWatcher, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target: PathBuf = list_path.to_path_buf();
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        debug!(error = %e, "watch error ignored");
                        return;
                    }
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                if event.paths.iter().any(|p| p == &target) {
                    let _ = tx.send(ListEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(ListWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending events (may be empty).
    pub fn poll(&self) -> Vec<ListEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
