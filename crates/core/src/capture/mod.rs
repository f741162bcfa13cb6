use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    codec::ImageContainer,
    config::StudioConfig,
    render::{self, Palette, FRAME_PIXELS, FRAME_RATE, FULL_HEIGHT, FULL_WIDTH, SCREEN_WIDTH},
    storage::{self, Storage},
};

pub const SCREEN_PATTERN: &str = "screen%i.gif";
pub const VIDEO_PATTERN: &str = "video%i.gif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Screenshot,
    Video,
}

impl CaptureKind {
    /// File name pattern searched for a free slot when the capture is saved.
    pub fn pattern(self) -> &'static str {
        match self {
            CaptureKind::Screenshot => SCREEN_PATTERN,
            CaptureKind::Video => VIDEO_PATTERN,
        }
    }
}

/// Configuration options for the capture subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    pub fps: u32,
    /// Length of a video capture in seconds.
    pub seconds: u32,
    pub scale: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::from(&StudioConfig::default())
    }
}

impl From<&StudioConfig> for CaptureSettings {
    fn from(config: &StudioConfig) -> Self {
        Self {
            fps: FRAME_RATE,
            seconds: config.gif_length,
            scale: config.gif_scale,
        }
    }
}

impl CaptureSettings {
    /// Number of frames a capture of `kind` holds, `None` if it overflows.
    fn frames_for(&self, kind: CaptureKind) -> Option<usize> {
        match kind {
            CaptureKind::Screenshot => Some(1),
            CaptureKind::Video => {
                (self.seconds.max(1) as usize).checked_mul(self.fps.max(1) as usize)
            }
        }
    }
}

/// Result of a finished capture, for the shell to notify the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved { name: String, path: PathBuf },
    Failed,
}

/// Collaborators a capture needs once it is finalized.
pub struct CaptureSink<'a> {
    pub codec: &'a dyn ImageContainer,
    pub storage: &'a mut dyn Storage,
}

#[derive(Debug)]
struct CaptureSession {
    kind: CaptureKind,
    frames: Vec<u32>,
    capacity: usize,
    written: usize,
}

/// Accumulates rendered frames into a bounded buffer and turns them into a
/// screenshot or a video file.
#[derive(Debug, Default)]
pub struct CapturePipeline {
    settings: CaptureSettings,
    session: Option<CaptureSession>,
}

impl CapturePipeline {
    pub fn new(settings: CaptureSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn set_settings(&mut self, settings: CaptureSettings) {
        self.settings = settings;
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn kind(&self) -> Option<CaptureKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    pub fn written_frames(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.written)
    }

    /// Starts a capture of `kind`.
    ///
    /// Starting a video while a session runs stops and saves that session
    /// instead. A screenshot requested mid-session is ignored. If the frame
    /// buffer cannot be allocated nothing starts.
    pub fn start(&mut self, kind: CaptureKind, sink: CaptureSink<'_>) -> Option<CaptureOutcome> {
        if self.session.is_some() {
            return match kind {
                CaptureKind::Video => self.finish(sink),
                CaptureKind::Screenshot => {
                    tracing::debug!("screenshot ignored while a capture is running");
                    None
                }
            };
        }

        let capacity = self.settings.frames_for(kind);
        let mut frames = Vec::new();
        let reserved = capacity
            .and_then(|capacity| capacity.checked_mul(FRAME_PIXELS))
            .map(|pixels| frames.try_reserve_exact(pixels).is_ok())
            .unwrap_or(false);

        let capacity = match capacity {
            Some(capacity) if reserved => capacity,
            _ => {
                tracing::warn!(?kind, ?capacity, "unable to allocate capture buffer");
                return None;
            }
        };

        tracing::debug!(?kind, capacity, "capture started");
        self.session = Some(CaptureSession {
            kind,
            frames,
            capacity,
            written: 0,
        });
        None
    }

    /// Stores a copy of the composited frame. Finalizes the capture once the
    /// buffer is full.
    pub fn on_frame_produced(
        &mut self,
        frame: &[u32],
        sink: CaptureSink<'_>,
    ) -> Option<CaptureOutcome> {
        let session = self.session.as_mut()?;

        let start = session.frames.len();
        session.frames.extend(frame.iter().copied().take(FRAME_PIXELS));
        session.frames.resize(start + FRAME_PIXELS, 0);

        let fps = self.settings.fps.max(1) as usize;
        if session.kind == CaptureKind::Video && session.written % fps < fps / 2 {
            render::draw_record_label(
                &mut session.frames[start..],
                SCREEN_WIDTH - 24,
                8,
                Palette::system().color(Palette::RED),
            );
        }

        session.written += 1;

        if session.written >= session.capacity {
            self.finish(sink)
        } else {
            None
        }
    }

    fn finish(&mut self, sink: CaptureSink<'_>) -> Option<CaptureOutcome> {
        let session = self.session.take()?;

        if session.written == 0 {
            tracing::debug!("capture stopped before any frame was recorded");
            return None;
        }

        let encoded = sink.codec.encode_animation(
            FULL_WIDTH as u32,
            FULL_HEIGHT as u32,
            &session.frames,
            self.settings.fps,
            self.settings.scale,
        );

        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%err, "failed to encode capture");
                return Some(CaptureOutcome::Failed);
            }
        };

        let name = storage::free_name(&*sink.storage, session.kind.pattern());
        if sink.storage.save(&name, &bytes, true) {
            tracing::info!(%name, frames = session.written, "capture saved");
            Some(CaptureOutcome::Saved {
                path: sink.storage.path(&name),
                name,
            })
        } else {
            Some(CaptureOutcome::Failed)
        }
    }
}
