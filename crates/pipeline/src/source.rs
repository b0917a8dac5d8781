//! Landmark sources.
//!
//! A source yields one [`HandFrame`] per camera frame, with or without a
//! hand. Live detectors push frames through [`crate::channel`] directly;
//! the sources here cover recorded and in-memory streams.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::{parse_frame_line, parse_header, FrameStreamHeader, HandFrame};

/// Trait for landmark producers.
pub trait LandmarkSource: Send {
    /// The next frame. `Ok(None)` means the stream has ended.
    fn next_frame(&mut self) -> HandsignResult<Option<HandFrame>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Replays a recorded JSONL frame stream from disk, line by line.
pub struct JsonlReplaySource {
    lines: Lines<BufReader<File>>,
    /// First line, when it turned out not to be a header.
    pending: Option<String>,
    path: PathBuf,
    name: String,
    header: Option<FrameStreamHeader>,
    line_no: usize,
}

impl JsonlReplaySource {
    pub fn open(path: &Path) -> HandsignResult<Self> {
        if !path.is_file() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut lines = BufReader::new(File::open(path)?).lines();
        let first = lines.next().transpose()?;
        let header = first.as_deref().and_then(parse_header);
        let pending = if header.is_some() { None } else { first };
        let line_no = usize::from(header.is_some());
        let name = format!("jsonl:{}", path.display());

        tracing::debug!(path = %path.display(), ?header, "Opened frame stream");
        Ok(Self {
            lines,
            pending,
            path: path.to_path_buf(),
            name,
            header,
            line_no,
        })
    }

    /// Stream header, when the file starts with one.
    pub fn header(&self) -> Option<&FrameStreamHeader> {
        self.header.as_ref()
    }
}

impl LandmarkSource for JsonlReplaySource {
    fn next_frame(&mut self) -> HandsignResult<Option<HandFrame>> {
        loop {
            let line = match self.pending.take() {
                Some(line) => line,
                None => match self.lines.next() {
                    Some(line) => line?,
                    None => return Ok(None),
                },
            };
            self.line_no += 1;
            if let Some(parsed) = parse_frame_line(&line) {
                return parsed.map(Some).map_err(|e| {
                    HandsignError::source(format!(
                        "{}:{}: invalid frame: {e}",
                        self.path.display(),
                        self.line_no
                    ))
                });
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Serves frames from memory, in order.
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<HandFrame>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = HandFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for MemorySource {
    fn next_frame(&mut self) -> HandsignResult<Option<HandFrame>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
