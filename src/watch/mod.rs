//! Watch mode: re-run the full pipeline when an icon source changes.
//!
//! Every trigger performs a complete clean, normalize, generate sequence;
//! there is no incremental path. Normalization leaves already-clean files
//! untouched, so a run settles instead of retriggering itself.

use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use thiserror::Error;

/// Watch mode errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    WatcherError(#[from] notify::Error),
    #[error("Failed to receive events: {0}")]
    RecvError(#[from] std::sync::mpsc::RecvError),
}

/// File watcher for continuous regeneration
pub struct FileWatcher {
    /// Debounce duration in milliseconds
    debounce_ms: u64,

    /// Changes under this root never trigger (the generated output lives
    /// here)
    ignored_root: Option<PathBuf>,
}

impl FileWatcher {
    pub fn new() -> Self {
        Self {
            debounce_ms: 500,
            ignored_root: None,
        }
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_ignored_root(mut self, root: PathBuf) -> Self {
        self.ignored_root = Some(root);
        self
    }

    /// Check if a changed path should trigger a regeneration
    fn should_trigger(&self, path: &Path) -> bool {
        if let Some(ignored) = &self.ignored_root {
            if path.starts_with(ignored) {
                return false;
            }
        }
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }

    /// Watch the given roots and call the callback on relevant changes
    pub fn watch<F>(&self, roots: &[PathBuf], mut on_change: F) -> Result<(), WatchError>
    where
        F: FnMut() -> bool, // Returns false to stop watching
    {
        let (tx, rx) = channel();

        let mut debouncer = new_debouncer(Duration::from_millis(self.debounce_ms), tx)?;

        for root in roots {
            debouncer.watcher().watch(root, RecursiveMode::Recursive)?;
        }

        println!();
        println!(
            "{}",
            "Watch mode active. Press Ctrl+C to stop.".cyan().bold()
        );
        for root in roots {
            println!("{}", format!("   Watching: {}", root.display()).dimmed());
        }
        println!();

        // Run the initial generation
        if !on_change() {
            return Ok(());
        }

        // Event loop
        loop {
            match rx.recv() {
                Ok(result) => match result {
                    Ok(events) => {
                        let relevant: Vec<_> = events
                            .iter()
                            .filter(|e| {
                                matches!(
                                    e.kind,
                                    DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                                ) && self.should_trigger(&e.path)
                            })
                            .collect();

                        if !relevant.is_empty() {
                            println!();
                            println!(
                                "{}",
                                format!(
                                    "Changes detected in {} file(s), regenerating...",
                                    relevant.len()
                                )
                                .yellow()
                            );

                            for event in relevant.iter().take(5) {
                                if let Some(name) = event.path.file_name() {
                                    println!("   - {}", name.to_string_lossy().dimmed());
                                }
                            }
                            if relevant.len() > 5 {
                                println!("   - ... and {} more", relevant.len() - 5);
                            }
                            println!();

                            if !on_change() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("{}: {:?}", "Watch error".red(), e);
                    }
                },
                Err(e) => {
                    return Err(WatchError::RecvError(e));
                }
            }
        }

        Ok(())
    }
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new()
    }
}
