//! Core library of the studio shell.
//!
//! The shell owns the top-level application state of a fantasy-console
//! studio: which screen is active, how per-frame input reaches it, and the
//! self-contained services the screens lean on (hiding projects in images,
//! capturing screenshots and videos, recognising pointer gestures). Editors,
//! the project runtime and the host platform plug in through traits.

pub mod capture;
pub mod codec;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod mode;
pub mod overlay;
pub mod project;
pub mod render;
pub mod screen;
pub mod shell;
pub mod stego;
pub mod storage;
pub mod toolbar;

pub use capture::{CaptureKind, CaptureOutcome, CapturePipeline, CaptureSettings};
pub use codec::{ImageContainer, ImageCrateCodec, RasterImage};
pub use config::{Keymap, StudioConfig};
pub use error::{Result, StudioError};
pub use host::{HeadlessHost, Host};
pub use input::{GestureTracker, InputState, Key, MouseButton, Point, Rect};
pub use mode::{AudioSource, BankKind, BankState, Mode, ModeMachine, ModeTransition};
pub use overlay::{Popup, Tooltip};
pub use project::{CartHash, ProjectRuntime, ProjectState};
pub use render::{Frame, Palette};
pub use screen::{DialogKind, FrameContext, Screen, Screens, ShellRequest, StudioEvent};
pub use shell::Studio;
pub use storage::{DirStorage, MemoryStorage, Storage};
