//! The seam between the shell and the screens it hosts.
//!
//! Every mode is backed by a [`Screen`]. The shell hands the active screen a
//! [`FrameContext`] once per frame; the screen draws into the frame and asks
//! the shell for anything beyond its own state by pushing [`ShellRequest`]s.

use std::collections::HashMap;

use crate::{
    input::{GestureTracker, InputState},
    mode::{AudioSource, BankState, Mode},
    overlay::Tooltip,
    render::Frame,
};

/// Clipboard and history commands routed to the active editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioEvent {
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
}

/// Confirmation dialogs the shell can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    ConfirmExit,
    ConfirmReload,
}

impl DialogKind {
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            DialogKind::ConfirmExit => &[
                "YOU HAVE",
                "UNSAVED CHANGES",
                "",
                "DO YOU REALLY WANT",
                "TO EXIT?",
            ],
            DialogKind::ConfirmReload => &["CART HAS CHANGED!", "", "DO YOU WANT", "TO RELOAD IT?"],
        }
    }
}

/// Something a screen needs the shell to do after its tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    SetMode(Mode),
    Event(StudioEvent),
    ShowPopup(String),
    /// Answer of the open confirmation dialog; closes it.
    DialogAnswered(bool),
    RunProject,
    RunFromSurf,
    ShowGameMenu,
    HideGameMenu,
    ExitGameMenu,
    ResumeRun,
    SaveProject,
    Exit,
    ToggleBankPicker,
    SetBank(usize),
    ToggleChained,
}

/// Per-frame view of the shell handed to the active screen.
pub struct FrameContext<'a> {
    pub mode: Mode,
    pub input: &'a InputState,
    pub gestures: &'a mut GestureTracker,
    pub tooltip: &'a mut Tooltip,
    pub frame: &'a mut Frame,
    pub audio: AudioSource,
    pub banks: &'a BankState,
    /// Open confirmation dialog, if any.
    pub dialog: Option<DialogKind>,
    pub requests: Vec<ShellRequest>,
}

impl FrameContext<'_> {
    pub fn request(&mut self, request: ShellRequest) {
        self.requests.push(request);
    }

    pub fn popup(&mut self, text: impl Into<String>) {
        self.requests.push(ShellRequest::ShowPopup(text.into()));
    }
}

pub trait Screen {
    fn tick(&mut self, ctx: &mut FrameContext<'_>);

    fn event(&mut self, _event: StudioEvent) {}

    /// Adjusts one row of the composited frame.
    fn scanline(&mut self, _row: &mut [u32], _index: usize) {}

    /// Draws on top of the composited frame.
    fn overline(&mut self, _frame: &mut Frame) {}

    /// Whether `scanline` and `overline` should be called at all.
    fn has_post_process(&self) -> bool {
        false
    }

    /// Handles escape; returns false to let the shell toggle the console.
    fn escape(&mut self) -> bool {
        false
    }

    /// Called when the mode this screen backs is (re)initialised.
    fn enter(&mut self) {}
}

/// Mode to screen mapping. Bank editors hold one screen per bank.
#[derive(Default)]
pub struct Screens {
    slots: HashMap<Mode, Vec<Box<dyn Screen>>>,
}

impl Screens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a screen for `mode`. For bank editors each call adds the next bank.
    pub fn insert(&mut self, mode: Mode, screen: Box<dyn Screen>) {
        self.slots.entry(mode).or_default().push(screen);
    }

    pub fn contains(&self, mode: Mode) -> bool {
        self.slots.get(&mode).is_some_and(|screens| !screens.is_empty())
    }

    /// Screen backing `mode`, picking the selected bank for bank editors.
    pub fn get_mut(
        &mut self,
        mode: Mode,
        banks: &BankState,
    ) -> Option<&mut (dyn Screen + 'static)> {
        let screens = self.slots.get_mut(&mode)?;
        let index = mode
            .bank_kind()
            .map(|kind| banks.index(kind))
            .filter(|index| *index < screens.len())
            .unwrap_or(0);

        screens.get_mut(index).map(|screen| screen.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::BankKind;

    struct Tagged(usize, Vec<StudioEvent>);

    impl Screen for Tagged {
        fn tick(&mut self, ctx: &mut FrameContext<'_>) {
            ctx.popup(format!("bank {}", self.0));
        }

        fn event(&mut self, event: StudioEvent) {
            self.1.push(event);
        }
    }

    #[test]
    fn bank_editors_resolve_selected_bank() {
        let mut screens = Screens::new();
        for bank in 0..3 {
            screens.insert(Mode::Sprite, Box::new(Tagged(bank, Vec::new())));
        }

        let mut banks = BankState::new(8);
        banks.set(BankKind::Sprite, 2);

        let mut input = InputState::new();
        input.end_frame();
        let mut gestures = GestureTracker::new();
        let mut tooltip = Tooltip::default();
        let mut frame = Frame::new();
        let mut ctx = FrameContext {
            mode: Mode::Sprite,
            input: &input,
            gestures: &mut gestures,
            tooltip: &mut tooltip,
            frame: &mut frame,
            audio: AudioSource::SystemDefault,
            banks: &banks,
            dialog: None,
            requests: Vec::new(),
        };

        let screen = screens.get_mut(Mode::Sprite, &banks).unwrap();
        screen.tick(&mut ctx);
        assert_eq!(ctx.requests, vec![ShellRequest::ShowPopup("bank 2".into())]);
    }

    #[test]
    fn missing_bank_falls_back_to_first_screen() {
        let mut screens = Screens::new();
        screens.insert(Mode::Map, Box::new(Tagged(0, Vec::new())));

        let mut banks = BankState::new(8);
        banks.set(BankKind::Map, 5);

        let screen = screens.get_mut(Mode::Map, &banks).unwrap();
        screen.event(StudioEvent::Undo);
        assert!(screens.get_mut(Mode::World, &banks).is_none());
        assert!(screens.contains(Mode::Map));
    }
}
