use crate::{
    capture::CaptureKind,
    host::Host,
    input::{InputState, Key},
    mode::Mode,
    project::ProjectRuntime,
    screen::StudioEvent,
    storage::Storage,
};

use super::Studio;

const EDITOR_KEYS: [(Key, Key, Mode); 5] = [
    (Key::Num1, Key::F1, Mode::Code),
    (Key::Num2, Key::F2, Mode::Sprite),
    (Key::Num3, Key::F3, Mode::Map),
    (Key::Num4, Key::F4, Mode::Sfx),
    (Key::Num5, Key::F5, Mode::Music),
];

const EDIT_KEYS: [(Key, StudioEvent); 5] = [
    (Key::Z, StudioEvent::Undo),
    (Key::Y, StudioEvent::Redo),
    (Key::X, StudioEvent::Cut),
    (Key::C, StudioEvent::Copy),
    (Key::V, StudioEvent::Paste),
];

impl<R: ProjectRuntime, H: Host, S: Storage> Studio<R, H, S> {
    /// Global keyboard shortcuts, handled before the active screen ticks.
    pub(super) fn process_shortcuts(&mut self, input: &InputState) {
        let mode = self.machine.mode();
        if mode == Mode::Start || (mode == Mode::Console && !self.console_active) {
            return;
        }

        let alt = input.key(Key::Alt);
        let ctrl = input.key(Key::Ctrl);
        let once = |key| input.key_pressed_once(key);

        if self.machine.is_game_menu() {
            if once(Key::Escape) {
                if mode == Mode::Menu {
                    self.hide_game_menu();
                } else {
                    self.show_game_menu();
                }
            } else if once(Key::F11) || (alt && once(Key::Enter)) {
                self.host.toggle_fullscreen();
            } else if once(Key::F7) {
                self.set_cover_image();
            } else if once(Key::F8) {
                self.start_capture(CaptureKind::Screenshot);
            } else if ctrl && once(Key::R) {
                self.run_project();
            } else if once(Key::F9) {
                self.start_capture(CaptureKind::Video);
            }
            return;
        }

        if alt {
            if once(Key::Grave) {
                self.set_mode(Mode::Console);
            } else if let Some((_, _, mode)) = EDITOR_KEYS.iter().find(|(key, ..)| once(*key)) {
                self.set_mode(*mode);
            } else if once(Key::Enter) {
                self.host.toggle_fullscreen();
            }
        } else if ctrl {
            if once(Key::PageUp) {
                self.change_mode(-1);
            } else if once(Key::PageDown) {
                self.change_mode(1);
            } else if once(Key::Q) {
                self.request_exit();
            } else if once(Key::R) || once(Key::Enter) {
                self.run_project();
            } else if once(Key::S) {
                self.save_project();
            } else if let Some((_, event)) = EDIT_KEYS.iter().find(|(key, _)| once(*key)) {
                self.studio_event(*event);
            }
        } else if let Some((_, _, mode)) = EDITOR_KEYS.iter().find(|(_, key, _)| once(*key)) {
            self.set_mode(*mode);
        } else if once(Key::F7) {
            self.set_cover_image();
        } else if once(Key::F8) {
            self.start_capture(CaptureKind::Screenshot);
        } else if once(Key::F9) {
            self.start_capture(CaptureKind::Video);
        } else if once(Key::F11) {
            self.host.toggle_fullscreen();
        } else if once(Key::Escape) {
            self.escape();
        }
    }

    fn escape(&mut self) {
        let mode = self.machine.mode();

        if matches!(mode, Mode::Code | Mode::Dialog) {
            let consumed = self
                .screens
                .get_mut(mode, &self.machine.banks)
                .is_some_and(|screen| screen.escape());

            if consumed || mode == Mode::Dialog {
                return;
            }
        }

        if let Some(transition) = self.machine.toggle_console() {
            self.apply_transition(transition);
        }
    }
}
