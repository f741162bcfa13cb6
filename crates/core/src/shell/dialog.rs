use crate::{
    input::{Key, MouseButton, Rect},
    render::Palette,
    screen::{FrameContext, Screen, ShellRequest},
};

const PANEL: Rect = Rect::new(60, 38, 120, 60);
const YES: Rect = Rect::new(PANEL.x + 24, PANEL.y + PANEL.h - 16, 28, 10);
const NO: Rect = Rect::new(PANEL.x + PANEL.w - 52, PANEL.y + PANEL.h - 16, 28, 10);

/// Yes/no confirmation used when no dialog screen is registered.
///
/// Enter answers the focused button, left/right/tab move the focus and
/// escape answers no.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    focus_yes: bool,
    answer: Option<bool>,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            focus_yes: true,
            answer: None,
        }
    }
}

impl Screen for ConfirmDialog {
    fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        let palette = ctx.frame.palette;
        ctx.frame.fill_rect(PANEL, palette.color(Palette::DARK_GREY));

        let focused = if self.focus_yes { YES } else { NO };
        ctx.frame.fill_rect(focused, palette.color(Palette::RED));

        if let Some(answer) = self.answer.take() {
            ctx.request(ShellRequest::DialogAnswered(answer));
            return;
        }

        if [Key::Left, Key::Right, Key::Tab]
            .into_iter()
            .any(|key| ctx.input.key_pressed_once(key))
        {
            self.focus_yes = !self.focus_yes;
        }

        let answer = if ctx.gestures.was_clicked(&YES, MouseButton::Left) {
            Some(true)
        } else if ctx.gestures.was_clicked(&NO, MouseButton::Left) {
            Some(false)
        } else if ctx.input.key_pressed_once(Key::Enter) {
            Some(self.focus_yes)
        } else {
            None
        };

        if let Some(answer) = answer {
            ctx.request(ShellRequest::DialogAnswered(answer));
        }
    }

    fn escape(&mut self) -> bool {
        self.answer = Some(false);
        true
    }

    fn enter(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{GestureTracker, InputState, Point},
        mode::{AudioSource, BankState, Mode},
        overlay::Tooltip,
        render::Frame,
    };

    fn tick(
        dialog: &mut ConfirmDialog,
        input: &InputState,
        gestures: &mut GestureTracker,
    ) -> Vec<ShellRequest> {
        let banks = BankState::new(1);
        let mut tooltip = Tooltip::default();
        let mut frame = Frame::new();
        let mut ctx = FrameContext {
            mode: Mode::Dialog,
            input,
            gestures,
            tooltip: &mut tooltip,
            frame: &mut frame,
            audio: AudioSource::SystemDefault,
            banks: &banks,
            dialog: None,
            requests: Vec::new(),
        };
        dialog.tick(&mut ctx);
        ctx.requests
    }

    #[test]
    fn enter_answers_focused_button() {
        let mut dialog = ConfirmDialog::default();
        let mut gestures = GestureTracker::new();

        let mut input = InputState::new();
        input.press(Key::Right);
        assert!(tick(&mut dialog, &input, &mut gestures).is_empty());

        let mut input = InputState::new();
        input.press(Key::Enter);
        assert_eq!(
            tick(&mut dialog, &input, &mut gestures),
            vec![ShellRequest::DialogAnswered(false)]
        );
    }

    #[test]
    fn clicking_yes_confirms() {
        let mut dialog = ConfirmDialog::default();
        let point = Point::new(YES.x + 2, YES.y + 2);
        let mut gestures = GestureTracker::new();
        gestures.update(MouseButton::Left.bit(), point);
        gestures.update(0, point);

        let requests = tick(&mut dialog, &InputState::new(), &mut gestures);
        assert_eq!(requests, vec![ShellRequest::DialogAnswered(true)]);
    }

    #[test]
    fn escape_answers_no_on_next_tick() {
        let mut dialog = ConfirmDialog::default();
        assert!(dialog.escape());

        let requests = tick(&mut dialog, &InputState::new(), &mut GestureTracker::new());
        assert_eq!(requests, vec![ShellRequest::DialogAnswered(false)]);
    }
}
