//! Shared test doubles and utilities

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use huectl::render::{DisplaySurface, LightStrip, SinkError};
use huectl::resolver::{Search, SearchError};
use huectl::RgbColor;

/// Every color a recording sink was asked to show, in order.
pub type Pushes = Arc<Mutex<Vec<RgbColor>>>;

/// Display surface that records presented colors.
pub struct RecordingSurface {
    staged: Option<RgbColor>,
    pushes: Pushes,
}

impl RecordingSurface {
    pub fn new() -> (Self, Pushes) {
        let pushes = Pushes::default();
        (
            Self {
                staged: None,
                pushes: Arc::clone(&pushes),
            },
            pushes,
        )
    }
}

impl DisplaySurface for RecordingSurface {
    fn name(&self) -> &'static str {
        "recording-surface"
    }

    fn set_background(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = Some(color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SinkError> {
        if let Some(color) = self.staged {
            self.pushes.lock().unwrap().push(color);
        }
        Ok(())
    }
}

/// Light strip that records flushed colors and can fail a number of flushes.
pub struct RecordingStrip {
    staged: Option<RgbColor>,
    pushes: Pushes,
    failures_left: u32,
}

impl RecordingStrip {
    pub fn new() -> (Self, Pushes) {
        Self::failing(0)
    }

    /// Strip whose first `failures` flushes are rejected.
    pub fn failing(failures: u32) -> (Self, Pushes) {
        let pushes = Pushes::default();
        (
            Self {
                staged: None,
                pushes: Arc::clone(&pushes),
                failures_left: failures,
            },
            pushes,
        )
    }
}

impl LightStrip for RecordingStrip {
    fn name(&self) -> &'static str {
        "recording-strip"
    }

    fn set_all(&mut self, color: RgbColor) -> Result<(), SinkError> {
        self.staged = Some(color);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(SinkError::WriteFailed {
                sink: "recording-strip",
                message: "device busy".to_string(),
            });
        }
        if let Some(color) = self.staged {
            self.pushes.lock().unwrap().push(color);
        }
        Ok(())
    }
}

/// Search backend that always returns the same text.
pub struct CannedSearch(pub &'static str);

impl Search for CannedSearch {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn search(&self, _query: &str) -> Result<String, SearchError> {
        Ok(self.0.to_string())
    }
}

/// Search backend that never answers in time.
pub struct HangingSearch;

impl Search for HangingSearch {
    fn name(&self) -> &'static str {
        "hanging"
    }

    fn search(&self, _query: &str) -> Result<String, SearchError> {
        thread::sleep(Duration::from_secs(3));
        Ok("1, 2, 3".to_string())
    }
}

/// Reader fed line by line from the test, so a session can be kept open.
pub struct ChannelReader {
    rx: Receiver<Vec<u8>>,
    buf: Vec<u8>,
    pos: usize,
}

impl ChannelReader {
    pub fn new() -> (Self, Sender<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                rx,
                buf: Vec::new(),
                pos: 0,
            },
            tx,
        )
    }
}

impl Read for ChannelReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.buf.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.buf = chunk;
                    self.pos = 0;
                }
                // Sender dropped: end of input
                Err(_) => return Ok(0),
            }
        }
        let n = out.len().min(self.buf.len() - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Poll `condition` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

/// Last color a recording sink saw.
pub fn last(pushes: &Pushes) -> Option<RgbColor> {
    pushes.lock().unwrap().last().copied()
}
