//! Editor toolbar shared by the editor screens: mode tabs, edit commands and
//! the bank picker.
//!
//! Editors call [`process`] from their `tick`; clicks turn into
//! [`ShellRequest`]s and hovering sets the tooltip.

use crate::{
    input::{MouseButton, Rect},
    mode::{BankState, Mode},
    render::{Palette, FONT_HEIGHT, FONT_WIDTH, SCREEN_WIDTH},
    screen::{FrameContext, ShellRequest, StudioEvent},
};

pub const TOOLBAR_SIZE: i32 = 7;

const EDITOR_TIPS: [&str; 5] = [
    "CODE EDITOR [f1]",
    "SPRITE EDITOR [f2]",
    "MAP EDITOR [f3]",
    "SFX EDITOR [f4]",
    "MUSIC EDITOR [f5]",
];

const EDITOR_NAMES: [&str; 5] = [
    "CODE EDITOR",
    "SPRITE EDITOR",
    "MAP EDITOR",
    "SFX EDITOR",
    "MUSIC EDITOR",
];

const EVENTS: [(StudioEvent, &str); 5] = [
    (StudioEvent::Cut, "CUT [ctrl+x]"),
    (StudioEvent::Copy, "COPY [ctrl+c]"),
    (StudioEvent::Paste, "PASTE [ctrl+v]"),
    (StudioEvent::Undo, "UNDO [ctrl+z]"),
    (StudioEvent::Redo, "REDO [ctrl+y]"),
];

const TAB_COUNT: i32 = Mode::EDITORS.len() as i32;

pub fn tab_rect(index: usize) -> Rect {
    Rect::new(index as i32 * TOOLBAR_SIZE, 0, TOOLBAR_SIZE, TOOLBAR_SIZE)
}

pub fn event_rect(index: usize) -> Rect {
    let x = (TAB_COUNT + 1) * TOOLBAR_SIZE + 17 * FONT_WIDTH;
    Rect::new(x + index as i32 * TOOLBAR_SIZE, 0, TOOLBAR_SIZE, TOOLBAR_SIZE)
}

const BANK_ICON_X: i32 = TAB_COUNT * TOOLBAR_SIZE + 2;

pub fn bank_icon_rect() -> Rect {
    Rect::new(BANK_ICON_X, 0, FONT_WIDTH, FONT_HEIGHT)
}

pub fn bank_rect(bank: usize) -> Rect {
    Rect::new(
        BANK_ICON_X + 2 + (bank as i32 + 1) * TOOLBAR_SIZE,
        0,
        TOOLBAR_SIZE,
        TOOLBAR_SIZE,
    )
}

pub fn chain_pin_rect(banks: &BankState) -> Rect {
    Rect::new(
        BANK_ICON_X + 4 + (banks.count() as i32 + 1) * TOOLBAR_SIZE,
        0,
        TOOLBAR_SIZE,
        TOOLBAR_SIZE,
    )
}

/// Text shown next to the tabs: the tooltip when set, otherwise the editor name.
pub fn label<'a>(mode: Mode, tooltip: &'a str) -> Option<&'a str> {
    let index = Mode::EDITORS.iter().position(|editor| *editor == mode)?;
    Some(if tooltip.is_empty() {
        EDITOR_NAMES[index]
    } else {
        tooltip
    })
}

/// Hit-tests and draws the toolbar for this frame.
pub fn process(ctx: &mut FrameContext<'_>) {
    let palette = ctx.frame.palette;
    ctx.frame.fill_rect(
        Rect::new(0, 0, SCREEN_WIDTH as i32, TOOLBAR_SIZE),
        palette.color(Palette::WHITE),
    );

    let active = Mode::EDITORS.iter().position(|editor| *editor == ctx.mode);

    for (index, mode) in Mode::EDITORS.into_iter().enumerate() {
        let rect = tab_rect(index);
        if ctx.gestures.is_over(&rect) {
            ctx.tooltip.set(EDITOR_TIPS[index]);
            if ctx.gestures.was_clicked(&rect, MouseButton::Left) {
                ctx.request(ShellRequest::SetMode(mode));
            }
        }

        if active == Some(index) {
            ctx.frame.fill_rect(rect, palette.color(Palette::DARK_GREY));
        }
    }

    let Some(active) = active else {
        return;
    };

    for (index, (event, tip)) in EVENTS.into_iter().enumerate() {
        let rect = event_rect(index);
        if ctx.gestures.is_over(&rect) {
            ctx.tooltip.set(tip);
            if ctx.gestures.is_down(&rect, MouseButton::Left) {
                ctx.frame.fill_rect(rect, palette.color(Palette::RED + index));
            } else if ctx.gestures.was_clicked(&rect, MouseButton::Left) {
                ctx.request(ShellRequest::Event(event));
            }
        }
    }

    if active >= 1 && ctx.banks.count() > 1 {
        bank_picker(ctx);
    }
}

fn bank_picker(ctx: &mut FrameContext<'_>) {
    let palette = ctx.frame.palette;
    let icon = bank_icon_rect();

    if ctx.gestures.is_over(&icon) {
        ctx.tooltip.set("SWITCH BANK");
        if ctx.gestures.was_clicked(&icon, MouseButton::Left) {
            ctx.request(ShellRequest::ToggleBankPicker);
        }
    }

    if !ctx.banks.show {
        return;
    }

    let selected = ctx.mode.bank_kind().map(|kind| ctx.banks.index(kind));

    for bank in 0..ctx.banks.count() {
        let rect = bank_rect(bank);
        if ctx.gestures.is_over(&rect) && ctx.gestures.was_clicked(&rect, MouseButton::Left) {
            ctx.request(ShellRequest::SetBank(bank));
        }
        if selected == Some(bank) {
            ctx.frame.fill_rect(rect, palette.color(Palette::RED));
        }
    }

    let pin = chain_pin_rect(ctx.banks);
    if ctx.gestures.is_over(&pin) && ctx.gestures.was_clicked(&pin, MouseButton::Left) {
        ctx.request(ShellRequest::ToggleChained);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{GestureTracker, InputState, Point},
        mode::AudioSource,
        overlay::Tooltip,
        render::Frame,
    };

    fn click_at(point: Point) -> GestureTracker {
        let mut gestures = GestureTracker::new();
        gestures.update(MouseButton::Left.bit(), point);
        gestures.update(0, point);
        gestures
    }

    fn run(
        mode: Mode,
        gestures: &mut GestureTracker,
        banks: &BankState,
    ) -> (Vec<ShellRequest>, String) {
        let input = InputState::new();
        let mut tooltip = Tooltip::default();
        let mut frame = Frame::new();
        let mut ctx = FrameContext {
            mode,
            input: &input,
            gestures,
            tooltip: &mut tooltip,
            frame: &mut frame,
            audio: AudioSource::SystemDefault,
            banks,
            dialog: None,
            requests: Vec::new(),
        };
        process(&mut ctx);
        let requests = ctx.requests;
        (requests, tooltip.text().to_string())
    }

    #[test]
    fn clicking_a_tab_switches_editor() {
        let mut gestures = click_at(Point::new(3 * TOOLBAR_SIZE + 2, 3));
        let (requests, tip) = run(Mode::Code, &mut gestures, &BankState::new(8));

        assert_eq!(requests, vec![ShellRequest::SetMode(Mode::Sfx)]);
        assert_eq!(tip, "SFX EDITOR [f4]");
    }

    #[test]
    fn edit_buttons_emit_events_in_editors_only() {
        let rect = event_rect(3);
        let point = Point::new(rect.x + 1, rect.y + 1);

        let mut gestures = click_at(point);
        let (requests, _) = run(Mode::Map, &mut gestures, &BankState::new(8));
        assert_eq!(requests, vec![ShellRequest::Event(StudioEvent::Undo)]);

        let mut gestures = click_at(point);
        let (requests, _) = run(Mode::Console, &mut gestures, &BankState::new(8));
        assert!(requests.is_empty());
    }

    #[test]
    fn bank_picker_selects_and_pins() {
        let mut banks = BankState::new(8);
        let icon = bank_icon_rect();
        let mut gestures = click_at(Point::new(icon.x + 1, icon.y + 1));
        let (requests, tip) = run(Mode::Sprite, &mut gestures, &banks);
        assert_eq!(requests, vec![ShellRequest::ToggleBankPicker]);
        assert_eq!(tip, "SWITCH BANK");

        banks.show = true;
        let rect = bank_rect(4);
        let mut gestures = click_at(Point::new(rect.x + 1, rect.y + 1));
        let (requests, _) = run(Mode::Sprite, &mut gestures, &banks);
        assert_eq!(requests, vec![ShellRequest::SetBank(4)]);

        let pin = chain_pin_rect(&banks);
        let mut gestures = click_at(Point::new(pin.x + 1, pin.y + 1));
        let (requests, _) = run(Mode::Sprite, &mut gestures, &banks);
        assert_eq!(requests, vec![ShellRequest::ToggleChained]);
    }

    #[test]
    fn code_editor_has_no_bank_picker() {
        let icon = bank_icon_rect();
        let mut gestures = click_at(Point::new(icon.x + 1, icon.y + 1));
        let (requests, _) = run(Mode::Code, &mut gestures, &BankState::new(8));
        assert!(requests.is_empty());
    }

    #[test]
    fn label_prefers_tooltip() {
        assert_eq!(label(Mode::Music, ""), Some("MUSIC EDITOR"));
        assert_eq!(label(Mode::Music, "UNDO [ctrl+z]"), Some("UNDO [ctrl+z]"));
        assert_eq!(label(Mode::Run, ""), None);
    }
}
