use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use crate::error::{ConfigError, ErrorSink};

/// Writer that counts `write` calls and discards the bytes. The count is
/// shared so it stays readable while a generator borrows the writer.
#[derive(Default)]
pub(crate) struct CountingWriter {
    writes: Arc<AtomicUsize>,
}

impl CountingWriter {
    pub(crate) fn writes(&self) -> Arc<AtomicUsize> {
        self.writes.clone()
    }
}

impl io::Write for CountingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that accepts a fixed number of `write` calls, then fails every
/// call with `BrokenPipe`.
pub(crate) struct FailingWriter {
    calls_left: usize,
}

impl FailingWriter {
    pub(crate) fn after_calls(calls: usize) -> Self {
        Self { calls_left: calls }
    }
}

impl io::Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.calls_left == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "writer failed"));
        }
        self.calls_left -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that collects rendered [`ConfigError`]s for later assertions.
pub(crate) fn collecting_sink() -> (ErrorSink, Arc<Mutex<Vec<String>>>) {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let collected = collected.clone();
        ErrorSink::new(move |error: &ConfigError| {
            collected.lock().unwrap().push(error.to_string());
        })
    };
    (sink, collected)
}

/// Parses one encoded line, tolerating the trailing newline.
pub(crate) fn parse(line: &[u8]) -> serde_json::Value {
    serde_json::from_slice(line).unwrap()
}
