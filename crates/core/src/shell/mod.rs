//! The studio shell: owns the mode machine, the screens and the shared
//! services, and drives them one frame at a time.

mod dialog;
mod shortcuts;

use std::path::Path;

pub use dialog::ConfirmDialog;

use crate::{
    capture::{CaptureKind, CaptureOutcome, CapturePipeline, CaptureSettings, CaptureSink},
    codec::{ImageContainer, ImageCrateCodec},
    config::StudioConfig,
    host::Host,
    input::{GestureTracker, InputState, Rect},
    mode::{Mode, ModeMachine, ModeTransition},
    overlay::{self, Popup, Tooltip},
    project::{CartHash, ProjectRuntime, ProjectState},
    render::{Frame, Palette, FRAME_RATE, FULL_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH},
    screen::{DialogKind, FrameContext, Screens, ShellRequest, StudioEvent},
    stego,
    storage::Storage,
    Result, StudioError,
};

const FILE_NOT_SAVED: &str = "error: file not saved :(";

/// Application context of the studio.
pub struct Studio<R, H, S> {
    config: StudioConfig,
    machine: ModeMachine,
    screens: Screens,
    runtime: R,
    host: H,
    storage: S,
    codec: Box<dyn ImageContainer>,
    capture: CapturePipeline,
    gestures: GestureTracker,
    popup: Popup,
    banner: Option<Rect>,
    tooltip: Tooltip,
    frame: Frame,
    project: ProjectState,
    dialog: Option<DialogKind>,
    console_active: bool,
    reload_requested: bool,
    quit: bool,
}

impl<R: ProjectRuntime, H: Host, S: Storage> Studio<R, H, S> {
    pub fn new(
        config: StudioConfig,
        mut screens: Screens,
        runtime: R,
        mut host: H,
        storage: S,
    ) -> Self {
        if !screens.contains(Mode::Dialog) {
            screens.insert(Mode::Dialog, Box::new(ConfirmDialog::default()));
        }

        host.set_scale(config.ui_scale);
        if config.fullscreen {
            host.toggle_fullscreen();
        }

        Self {
            machine: ModeMachine::new(config.editor_banks),
            capture: CapturePipeline::new(CaptureSettings::from(&config)),
            config,
            screens,
            runtime,
            host,
            storage,
            codec: Box::new(ImageCrateCodec::new()),
            gestures: GestureTracker::new(),
            popup: Popup::default(),
            banner: None,
            tooltip: Tooltip::default(),
            frame: Frame::new(),
            project: ProjectState::default(),
            dialog: None,
            console_active: true,
            reload_requested: false,
            quit: false,
        }
    }

    pub fn with_codec(mut self, codec: Box<dyn ImageContainer>) -> Self {
        self.codec = codec;
        self
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn machine(&self) -> &ModeMachine {
        &self.machine
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    /// Area the popup banner was drawn into this frame, for printing its text.
    pub fn popup_banner(&self) -> Option<Rect> {
        self.banner
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn capture(&self) -> &CapturePipeline {
        &self.capture
    }

    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut ProjectState {
        &mut self.project
    }

    /// The confirmation dialog currently shown.
    pub fn dialog(&self) -> Option<DialogKind> {
        self.dialog
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The console stops taking shortcuts while it runs a command.
    pub fn set_console_active(&mut self, active: bool) {
        self.console_active = active;
    }

    pub fn set_game_menu(&mut self, enabled: bool) {
        self.machine.set_game_menu(enabled);
    }

    /// Runs one frame. The caller feeds `input` beforehand and calls
    /// [`InputState::end_frame`] afterwards.
    pub fn tick(&mut self, input: &mut InputState) {
        self.host.net_begin();

        self.process_shortcuts(input);
        self.gestures.update(input.mouse_buttons, input.mouse);

        let gamepad = self.config.keymap.gamepad_mask(|key| input.key(key));
        input.gamepad = gamepad;

        self.render(input);

        if !matches!(self.machine.mode(), Mode::Run | Mode::Surf | Mode::Menu) {
            input.gamepad = 0;
        }

        if self.config.no_sound {
            self.runtime.silence();
        }

        self.composite();
        self.record_frame();
        self.banner = self.popup.draw(&mut self.frame);

        self.host.net_end();
    }

    fn render(&mut self, input: &InputState) {
        self.tooltip.clear();

        let mode = self.machine.mode();
        let audio = self.machine.audio_source();
        let Some(screen) = self.screens.get_mut(mode, &self.machine.banks) else {
            return;
        };

        let mut ctx = FrameContext {
            mode,
            input,
            gestures: &mut self.gestures,
            tooltip: &mut self.tooltip,
            frame: &mut self.frame,
            audio,
            banks: &self.machine.banks,
            dialog: self.dialog,
            requests: Vec::new(),
        };
        screen.tick(&mut ctx);

        for request in ctx.requests {
            self.apply(request);
        }
    }

    fn composite(&mut self) {
        let mode = self.machine.mode();
        if mode != Mode::Run {
            self.frame.palette = Palette::system();
        }

        let Some(screen) = self.screens.get_mut(mode, &self.machine.banks) else {
            return;
        };

        if screen.has_post_process() {
            for row in 0..FULL_HEIGHT {
                screen.scanline(self.frame.row_mut(row), row);
            }
            screen.overline(&mut self.frame);
        }
    }

    fn record_frame(&mut self) {
        if !self.capture.is_active() {
            return;
        }

        let sink = CaptureSink {
            codec: self.codec.as_ref(),
            storage: &mut self.storage,
        };
        let outcome = self.capture.on_frame_produced(&self.frame.pixels, sink);
        self.report_capture(outcome);
    }

    fn apply(&mut self, request: ShellRequest) {
        match request {
            ShellRequest::SetMode(mode) => self.set_mode(mode),
            ShellRequest::Event(event) => self.studio_event(event),
            ShellRequest::ShowPopup(text) => self.popup.show(&text),
            ShellRequest::DialogAnswered(answer) => self.answer_dialog(answer),
            ShellRequest::RunProject => self.run_project(),
            ShellRequest::RunFromSurf => {
                let transition = self.machine.run_from_surf();
                self.machine.set_game_menu(true);
                self.apply_transition(transition);
            }
            ShellRequest::ShowGameMenu => self.show_game_menu(),
            ShellRequest::HideGameMenu => self.hide_game_menu(),
            ShellRequest::ExitGameMenu => {
                if let Some(transition) = self.machine.exit_game_menu() {
                    self.apply_transition(transition);
                }
            }
            ShellRequest::ResumeRun => self.machine.resume_run_mode(),
            ShellRequest::SaveProject => self.save_project(),
            ShellRequest::Exit => self.request_exit(),
            ShellRequest::ToggleBankPicker => self.machine.banks.show = !self.machine.banks.show,
            ShellRequest::SetBank(index) => {
                let focused = self.machine.focused_bank();
                self.machine.banks.set(focused, index);
            }
            ShellRequest::ToggleChained => {
                let focused = self.machine.focused_bank();
                self.machine.banks.toggle_chained(focused);
            }
        }
    }

    fn apply_transition(&mut self, transition: ModeTransition) {
        if transition.pause_runtime {
            self.runtime.pause();
        }
        if transition.reset_runtime {
            self.runtime.reset();
        }
        if transition.resume_runtime {
            self.runtime.resume();
        }

        if let Some(mode) = transition.init_hook {
            if mode == Mode::Run {
                self.runtime.init_run();
            }
            if let Some(screen) = self.screens.get_mut(mode, &self.machine.banks) {
                screen.enter();
            }
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if let Some(transition) = self.machine.request_mode(mode) {
            self.apply_transition(transition);
        }
    }

    pub fn change_mode(&mut self, dir: i32) {
        if let Some(transition) = self.machine.change_mode(dir) {
            self.apply_transition(transition);
        }
    }

    pub fn run_project(&mut self) {
        let transition = self.machine.run_project();
        self.apply_transition(transition);
    }

    pub fn show_game_menu(&mut self) {
        let transition = self.machine.show_game_menu();
        self.apply_transition(transition);
    }

    pub fn hide_game_menu(&mut self) {
        let transition = self.machine.hide_game_menu();
        self.apply_transition(transition);
    }

    /// Routes a clipboard or history command to the active editor.
    pub fn studio_event(&mut self, event: StudioEvent) {
        let mode = self.machine.mode();
        if !mode.is_editor() {
            return;
        }
        if let Some(screen) = self.screens.get_mut(mode, &self.machine.banks) {
            screen.event(event);
        }
    }

    pub fn show_popup(&mut self, text: &str) {
        self.popup.show(text);
    }

    fn open_dialog(&mut self, kind: DialogKind) {
        let Some(transition) = self.machine.show_dialog() else {
            return;
        };

        self.dialog = Some(kind);
        self.apply_transition(transition);
        if let Some(screen) = self.screens.get_mut(Mode::Dialog, &self.machine.banks) {
            screen.enter();
        }
    }

    fn answer_dialog(&mut self, yes: bool) {
        let Some(kind) = self.dialog.take() else {
            return;
        };

        if let Some(transition) = self.machine.hide_dialog() {
            self.apply_transition(transition);
        }

        tracing::debug!(?kind, yes, "dialog answered");
        match kind {
            DialogKind::ConfirmExit => self.quit = yes,
            DialogKind::ConfirmReload => self.reload_requested |= yes,
        }
    }

    /// Quits, asking first when the project has unsaved changes.
    pub fn request_exit(&mut self) {
        if self.machine.mode() != Mode::Start && self.project.has_unsaved_changes() {
            self.open_dialog(DialogKind::ConfirmExit);
        } else {
            self.quit = true;
        }
    }

    /// Reacts to the project file having been touched on disk.
    pub fn check_external_change(&mut self, disk_mdate: u64) {
        if self.machine.mode() == Mode::Start || !self.project.modified_externally(disk_mdate) {
            return;
        }

        if self.project.has_unsaved_changes() {
            self.open_dialog(DialogKind::ConfirmReload);
        } else {
            self.reload_requested = true;
        }
    }

    /// Returns true once after a reload of the project file was decided.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    pub fn project_loaded(&mut self, bytes: Vec<u8>, name: &str, mdate: u64) {
        tracing::info!(name, len = bytes.len(), "project loaded");
        self.project = ProjectState::new(name, bytes, mdate);
        self.machine.banks.reset();
        self.host.set_title(&format!("studio [{name}]"));
    }

    pub fn project_saved(&mut self, mdate: u64) {
        self.project.mark_saved(mdate);
    }

    /// True when `bytes` differ from the last saved project.
    pub fn project_changed(&self, bytes: &[u8]) -> bool {
        CartHash::of(bytes) != self.project.hash()
    }

    pub fn save_project(&mut self) {
        let name = self.project.name.clone();
        if name.is_empty() {
            self.popup.show("error: missing cart name :(");
            return;
        }

        if self.storage.save(&name, &self.project.bytes, true) {
            let mdate = self.storage.modified(&name);
            self.project.mark_saved(mdate);
            self.popup.show(&overlay::saved_message(&name));
            tracing::info!(%name, hash = %self.project.hash(), "project saved");
        } else {
            self.popup.show(FILE_NOT_SAVED);
        }
    }

    pub fn start_capture(&mut self, kind: CaptureKind) {
        let sink = CaptureSink {
            codec: self.codec.as_ref(),
            storage: &mut self.storage,
        };
        let outcome = self.capture.start(kind, sink);
        self.report_capture(outcome);
    }

    fn report_capture(&mut self, outcome: Option<CaptureOutcome>) {
        match outcome {
            Some(CaptureOutcome::Saved { name, path }) => {
                self.popup.show(&format!("{name} saved :)"));
                self.host.open_path(&path);
            }
            Some(CaptureOutcome::Failed) => self.popup.show(FILE_NOT_SAVED),
            None => {}
        }
    }

    /// Stores the running game's screen as the project cover.
    pub fn set_cover_image(&mut self) {
        if self.machine.mode() != Mode::Run {
            return;
        }

        let pixels = self.frame.screen_pixels();
        match self.codec.encode_animation(
            SCREEN_WIDTH as u32,
            SCREEN_HEIGHT as u32,
            &pixels,
            FRAME_RATE,
            1,
        ) {
            Ok(cover) => {
                self.project.cover = cover;
                self.popup.show("cover image saved :)");
            }
            Err(err) => tracing::warn!(%err, "failed to encode cover image"),
        }
    }

    /// Saves the project hidden inside an image next to the project file.
    pub fn export_cart_png(&mut self, bits: u8) -> Result<String> {
        let stem = Path::new(&self.project.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| StudioError::msg("missing cart name"))?;
        let name = format!("{stem}.png");

        let carrier = stego::default_carrier();
        let bytes = stego::encode_cart(self.codec.as_ref(), &carrier, &self.project.bytes, bits)?;

        if !self.storage.save(&name, &bytes, true) {
            self.popup.show(FILE_NOT_SAVED);
            return Err(StudioError::msg(format!("unable to save {name}")));
        }

        self.popup.show(&overlay::saved_message(&name));
        Ok(name)
    }

    /// Loads a project hidden inside an image from the storage.
    pub fn import_cart_png(&mut self, name: &str, bits: u8) -> Result<()> {
        let bytes = self
            .storage
            .load(name)
            .ok_or_else(|| StudioError::msg(format!("unable to load {name}")))?;
        let payload = stego::decode_cart(self.codec.as_ref(), &bytes, bits)?;

        let cart_name = Path::new(name).with_extension("cart");
        let cart_name = cart_name.to_string_lossy();
        self.project_loaded(payload, &cart_name, 0);
        Ok(())
    }
}
