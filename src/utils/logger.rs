//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level echoed to the console
    console_level: Level,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            console_level: Level::Debug,
        })
    }

    /// Creates a logger that discards file output
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            console_level: Level::Error,
        }
    }

    /// Limit which records are echoed to the console
    pub fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the outcome of a whole run
    ///
    /// # Arguments
    ///
    /// * `pairs` - Number of (raster, annotation) pairs processed
    /// * `failed_pairs` - Pairs that could not be opened
    /// * `exported` - Crops written (or planned, in a dry run)
    /// * `skipped` - Polygons skipped
    pub fn print_run_summary(&self, pairs: usize, failed_pairs: usize, exported: usize, skipped: usize) -> io::Result<()> {
        self.log("Run summary:")?;
        self.log(&format!("  Pairs processed: {}", pairs))?;
        self.log(&format!("  Pairs skipped: {}", failed_pairs))?;
        self.log(&format!("  Images exported: {}", exported))?;
        self.log(&format!("  Polygons skipped: {}", skipped))?;
        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, verbose: bool) -> io::Result<()> {
        let console_level = if verbose { Level::Debug } else { Level::Info };
        let global_logger = Logger::new(log_file)?.with_console_level(console_level);

        // Only fails when a logger is already installed
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            if record.level() <= self.console_level {
                println!("{}", message);
            }
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
