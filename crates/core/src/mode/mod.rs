//! Application mode state machine.
//!
//! [`ModeMachine`] owns the active [`Mode`] and the bank selection. Every
//! mode change returns a [`ModeTransition`] describing the side effects the
//! shell must apply to the project runtime and the screens, which keeps the
//! machine itself free of collaborators.

mod banks;

pub use banks::{BankKind, BankState};

/// The single active top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Start,
    Console,
    Run,
    Code,
    Sprite,
    Map,
    Sfx,
    Music,
    World,
    Dialog,
    Menu,
    Surf,
}

impl Mode {
    /// Editors in toolbar order, cycled with ctrl+pageup/pagedown.
    pub const EDITORS: [Mode; 5] = [Mode::Code, Mode::Sprite, Mode::Map, Mode::Sfx, Mode::Music];

    pub fn bank_kind(self) -> Option<BankKind> {
        match self {
            Mode::Sprite => Some(BankKind::Sprite),
            Mode::Map => Some(BankKind::Map),
            Mode::Sfx => Some(BankKind::Sfx),
            Mode::Music => Some(BankKind::Music),
            _ => None,
        }
    }

    /// Modes remembered as the place to return to after transient screens.
    pub fn is_creative(self) -> bool {
        Self::EDITORS.contains(&self) || self == Mode::World
    }

    pub fn is_editor(self) -> bool {
        Self::EDITORS.contains(&self)
    }
}

/// Which sound data the audio engine should read during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSource {
    /// Live state of the running project.
    RunningProject,
    /// Shared sounds of the studio chrome.
    SystemDefault,
    /// Banks selected for editing.
    EditorBank { sfx: usize, music: usize },
}

/// Side effects of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
    pub pause_runtime: bool,
    pub reset_runtime: bool,
    pub resume_runtime: bool,
    /// Mode whose screen must be initialised before it becomes active.
    pub init_hook: Option<Mode>,
    /// Previous creative mode once the change is applied.
    pub previous_creative: Mode,
}

impl ModeTransition {
    fn resume(from: Mode, previous_creative: Mode) -> Self {
        Self {
            from,
            to: Mode::Run,
            pause_runtime: false,
            reset_runtime: false,
            resume_runtime: true,
            init_hook: None,
            previous_creative,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModeMachine {
    mode: Mode,
    prev_mode: Mode,
    dialog_mode: Mode,
    game_menu: bool,
    pub banks: BankState,
}

impl ModeMachine {
    pub fn new(bank_count: usize) -> Self {
        Self {
            mode: Mode::Start,
            prev_mode: Mode::Code,
            dialog_mode: Mode::Console,
            game_menu: false,
            banks: BankState::new(bank_count),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last creative mode left, where escape from the console returns to.
    pub fn prev_mode(&self) -> Mode {
        self.prev_mode
    }

    /// Mode the open dialog sits on top of.
    pub fn dialog_mode(&self) -> Mode {
        self.dialog_mode
    }

    pub fn set_game_menu(&mut self, enabled: bool) {
        self.game_menu = enabled;
    }

    /// True while a project launched with the in-game menu is running.
    pub fn is_game_menu(&self) -> bool {
        matches!(self.mode, Mode::Run | Mode::Menu) && self.game_menu
    }

    /// Switches to `target`. Requests for the active mode are ignored.
    pub fn request_mode(&mut self, target: Mode) -> Option<ModeTransition> {
        if target == self.mode {
            return None;
        }

        let from = self.mode;
        match from {
            Mode::Surf if self.prev_mode == Mode::Surf => self.prev_mode = Mode::Code,
            creative if creative.is_creative() => self.prev_mode = creative,
            _ => {}
        }

        self.mode = target;
        tracing::debug!(?from, to = ?target, "mode changed");

        Some(ModeTransition {
            from,
            to: target,
            pause_runtime: from == Mode::Run,
            reset_runtime: target != Mode::Run,
            resume_runtime: false,
            init_hook: matches!(target, Mode::World | Mode::Run | Mode::Surf).then_some(target),
            previous_creative: self.prev_mode,
        })
    }

    /// Cycles through the editors; does nothing outside of them.
    pub fn change_mode(&mut self, dir: i32) -> Option<ModeTransition> {
        let index = Mode::EDITORS.iter().position(|mode| *mode == self.mode)?;
        let count = Mode::EDITORS.len() as i32;
        let next = (index as i32 + dir).rem_euclid(count) as usize;
        self.request_mode(Mode::EDITORS[next])
    }

    /// Escape toggles between the console and the last creative mode.
    pub fn toggle_console(&mut self) -> Option<ModeTransition> {
        let target = if self.mode == Mode::Console {
            self.prev_mode
        } else {
            Mode::Console
        };
        self.request_mode(target)
    }

    /// Opens a modal dialog over the current mode. Dialogs do not stack.
    pub fn show_dialog(&mut self) -> Option<ModeTransition> {
        if self.mode == Mode::Dialog {
            return None;
        }
        self.dialog_mode = self.mode;
        self.request_mode(Mode::Dialog)
    }

    /// Closes the dialog and returns to the mode underneath. A running project
    /// is resumed rather than restarted.
    pub fn hide_dialog(&mut self) -> Option<ModeTransition> {
        if self.mode != Mode::Dialog {
            return None;
        }

        if self.dialog_mode == Mode::Run {
            self.mode = Mode::Run;
            Some(ModeTransition::resume(Mode::Dialog, self.prev_mode))
        } else {
            self.request_mode(self.dialog_mode)
        }
    }

    /// Starts the project from scratch, restarting it if it already runs.
    pub fn run_project(&mut self) -> ModeTransition {
        match self.request_mode(Mode::Run) {
            Some(transition) => ModeTransition {
                reset_runtime: true,
                ..transition
            },
            None => ModeTransition {
                from: Mode::Run,
                to: Mode::Run,
                pause_runtime: false,
                reset_runtime: true,
                resume_runtime: false,
                init_hook: Some(Mode::Run),
                previous_creative: self.prev_mode,
            },
        }
    }

    /// Runs a project picked in the browser; leaving the game returns there.
    pub fn run_from_surf(&mut self) -> ModeTransition {
        let transition = self.run_project();
        self.prev_mode = Mode::Surf;
        ModeTransition {
            previous_creative: Mode::Surf,
            ..transition
        }
    }

    pub fn show_game_menu(&mut self) -> ModeTransition {
        let from = self.mode;
        self.mode = Mode::Menu;
        ModeTransition {
            from,
            to: Mode::Menu,
            pause_runtime: true,
            reset_runtime: true,
            resume_runtime: false,
            init_hook: Some(Mode::Menu),
            previous_creative: self.prev_mode,
        }
    }

    pub fn hide_game_menu(&mut self) -> ModeTransition {
        let from = self.mode;
        self.mode = Mode::Run;
        ModeTransition::resume(from, self.prev_mode)
    }

    /// Leaves the game menu for the browser or the console.
    pub fn exit_game_menu(&mut self) -> Option<ModeTransition> {
        let target = if self.prev_mode == Mode::Surf {
            Mode::Surf
        } else {
            Mode::Console
        };
        self.game_menu = false;
        self.request_mode(target)
    }

    pub fn resume_run_mode(&mut self) {
        self.mode = Mode::Run;
    }

    pub fn audio_source(&self) -> AudioSource {
        match self.mode {
            Mode::Run => AudioSource::RunningProject,
            Mode::Start | Mode::Dialog | Mode::Menu | Mode::Surf => AudioSource::SystemDefault,
            _ => AudioSource::EditorBank {
                sfx: self.banks.index(BankKind::Sfx),
                music: self.banks.index(BankKind::Music),
            },
        }
    }

    /// Bank kind shown by the active editor, sprites outside bank editors.
    pub fn focused_bank(&self) -> BankKind {
        self.mode.bank_kind().unwrap_or(BankKind::Sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in(mode: Mode) -> ModeMachine {
        let mut machine = ModeMachine::new(8);
        machine.request_mode(mode);
        machine
    }

    #[test]
    fn entering_run_initialises_fresh_run_without_pausing() {
        let mut machine = machine_in(Mode::Code);
        let transition = machine.request_mode(Mode::Run).unwrap();

        assert!(!transition.pause_runtime);
        assert!(!transition.reset_runtime);
        assert_eq!(transition.init_hook, Some(Mode::Run));
        assert_eq!(machine.mode(), Mode::Run);
    }

    #[test]
    fn leaving_run_pauses_and_resets() {
        let mut machine = machine_in(Mode::Run);
        let transition = machine.request_mode(Mode::Console).unwrap();

        assert!(transition.pause_runtime);
        assert!(transition.reset_runtime);
        assert_eq!(transition.init_hook, None);
    }

    #[test]
    fn requesting_active_mode_is_a_no_op() {
        let mut machine = machine_in(Mode::Sprite);
        assert!(machine.request_mode(Mode::Sprite).is_none());
    }

    #[test]
    fn creative_modes_are_remembered() {
        let mut machine = machine_in(Mode::Map);
        machine.request_mode(Mode::Console);
        assert_eq!(machine.prev_mode(), Mode::Map);

        machine.request_mode(Mode::World);
        machine.request_mode(Mode::Sfx);
        assert_eq!(machine.prev_mode(), Mode::World);
    }

    #[test]
    fn transient_modes_do_not_update_previous_mode() {
        let mut machine = machine_in(Mode::Music);
        machine.request_mode(Mode::Surf);
        machine.request_mode(Mode::Menu);
        machine.request_mode(Mode::Dialog);
        machine.request_mode(Mode::Console);
        assert_eq!(machine.prev_mode(), Mode::Music);
    }

    #[test]
    fn world_and_surf_have_init_hooks() {
        let mut machine = machine_in(Mode::Code);
        assert_eq!(machine.request_mode(Mode::World).unwrap().init_hook, Some(Mode::World));
        assert_eq!(machine.request_mode(Mode::Surf).unwrap().init_hook, Some(Mode::Surf));
        assert_eq!(machine.request_mode(Mode::Map).unwrap().init_hook, None);
    }

    #[test]
    fn dialog_over_run_resumes_on_close() {
        let mut machine = machine_in(Mode::Run);
        let open = machine.show_dialog().unwrap();
        assert!(open.pause_runtime);
        assert_eq!(machine.dialog_mode(), Mode::Run);

        let close = machine.hide_dialog().unwrap();
        assert!(close.resume_runtime);
        assert!(!close.reset_runtime);
        assert_eq!(close.init_hook, None);
        assert_eq!(machine.mode(), Mode::Run);
    }

    #[test]
    fn dialog_over_editor_returns_to_editor() {
        let mut machine = machine_in(Mode::Sprite);
        machine.show_dialog();
        assert!(machine.show_dialog().is_none());
        assert_eq!(machine.dialog_mode(), Mode::Sprite);

        let close = machine.hide_dialog().unwrap();
        assert!(!close.resume_runtime);
        assert_eq!(machine.mode(), Mode::Sprite);
        assert!(machine.hide_dialog().is_none());
    }

    #[test]
    fn change_mode_wraps_around_editors() {
        let mut machine = machine_in(Mode::Code);
        machine.change_mode(-1);
        assert_eq!(machine.mode(), Mode::Music);
        machine.change_mode(1);
        assert_eq!(machine.mode(), Mode::Code);

        let mut machine = machine_in(Mode::Console);
        assert!(machine.change_mode(1).is_none());
    }

    #[test]
    fn escape_toggles_console_and_previous_mode() {
        let mut machine = machine_in(Mode::Map);
        machine.toggle_console();
        assert_eq!(machine.mode(), Mode::Console);
        machine.toggle_console();
        assert_eq!(machine.mode(), Mode::Map);
    }

    #[test]
    fn run_project_restarts_when_already_running() {
        let mut machine = machine_in(Mode::Run);
        let transition = machine.run_project();
        assert!(transition.reset_runtime);
        assert_eq!(transition.init_hook, Some(Mode::Run));
    }

    #[test]
    fn game_menu_round_trip() {
        let mut machine = machine_in(Mode::Surf);
        machine.run_from_surf();
        machine.set_game_menu(true);
        assert!(machine.is_game_menu());

        let show = machine.show_game_menu();
        assert!(show.pause_runtime && show.reset_runtime);
        assert_eq!(machine.mode(), Mode::Menu);

        assert!(machine.hide_game_menu().resume_runtime);
        assert_eq!(machine.mode(), Mode::Run);

        machine.exit_game_menu();
        assert_eq!(machine.mode(), Mode::Surf);
        assert!(!machine.is_game_menu());
    }

    #[test]
    fn stale_surf_previous_mode_falls_back_to_code() {
        let mut machine = machine_in(Mode::Surf);
        machine.run_from_surf();
        machine.exit_game_menu();
        machine.request_mode(Mode::Console);
        assert_eq!(machine.prev_mode(), Mode::Code);
    }

    #[test]
    fn audio_source_follows_mode() {
        let mut machine = machine_in(Mode::Run);
        assert_eq!(machine.audio_source(), AudioSource::RunningProject);

        machine.request_mode(Mode::Menu);
        assert_eq!(machine.audio_source(), AudioSource::SystemDefault);

        machine.request_mode(Mode::Sfx);
        machine.banks.set(BankKind::Sfx, 3);
        assert_eq!(
            machine.audio_source(),
            AudioSource::EditorBank { sfx: 3, music: 3 }
        );
    }
}
