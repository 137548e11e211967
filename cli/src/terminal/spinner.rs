use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn current() -> Option<ProgressBar> {
    SPINNER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shows a spinner with `msg` until [`stop`] is called.
pub fn start(msg: String) {
    let mut slot = SPINNER.lock().unwrap_or_else(PoisonError::into_inner);
    let pb = slot.get_or_insert_with(new_spinner);
    pb.set_message(msg);
}

pub fn stop() {
    let pb = SPINNER.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

/// Runs `f` with the spinner line cleared, so output does not tear it.
pub fn suspend<F: FnOnce() -> R, R>(f: F) -> R {
    match current() {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}

/// Log writer that goes to stderr around the spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
