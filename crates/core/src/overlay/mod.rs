//! Transient text drawn over the active screen: the popup banner and tooltips.

use crate::{
    input::Rect,
    render::{Frame, Palette, FONT_HEIGHT, FRAME_RATE, SCREEN_WIDTH},
};

/// Size of the studio text buffers, including the terminator slot.
pub const TEXT_BUFFER_WIDTH: usize = 32;
/// Longest text a popup or tooltip keeps.
pub const MAX_TEXT_LEN: usize = TEXT_BUFFER_WIDTH - 1;
pub const POPUP_DURATION: u32 = 2 * FRAME_RATE;

const SLIDE_FRAMES: i32 = (FRAME_RATE / 2) as i32;
const BANNER_HEIGHT: i32 = FONT_HEIGHT + 1;
const SAVED_SUFFIX: &str = " saved :)";
const ELLIPSIS: &str = "[...]";

fn truncated(text: &str) -> String {
    text.chars().take(MAX_TEXT_LEN).collect()
}

/// "`name` saved :)", with long names cut short so the line fits a popup.
pub fn saved_message(name: &str) -> String {
    if name.chars().count() + SAVED_SUFFIX.len() > TEXT_BUFFER_WIDTH {
        let keep = TEXT_BUFFER_WIDTH - SAVED_SUFFIX.len() - ELLIPSIS.len() - 2;
        let head: String = name.chars().take(keep).collect();
        format!("{head}{ELLIPSIS}{SAVED_SUFFIX}")
    } else {
        format!("{name}{SAVED_SUFFIX}")
    }
}

/// Banner that slides in at the top of the screen for two seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Popup {
    text: String,
    counter: u32,
}

impl Popup {
    pub fn show(&mut self, text: &str) {
        self.text = truncated(&text.to_uppercase());
        self.counter = POPUP_DURATION;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Vertical banner offset for the current counter value.
    pub fn offset(&self) -> i32 {
        let counter = self.counter as i32;
        let hold_end = POPUP_DURATION as i32 - SLIDE_FRAMES;

        if counter < SLIDE_FRAMES {
            -((SLIDE_FRAMES - counter) * BANNER_HEIGHT / SLIDE_FRAMES)
        } else if counter >= hold_end {
            (hold_end - counter) * BANNER_HEIGHT / SLIDE_FRAMES
        } else {
            0
        }
    }

    /// Advances the animation one frame and draws the banner. Returns the
    /// banner area when something was drawn so the caller can print the text
    /// into it.
    pub fn draw(&mut self, frame: &mut Frame) -> Option<Rect> {
        if self.counter == 0 {
            return None;
        }

        self.counter -= 1;
        let banner = Rect::new(0, self.offset(), SCREEN_WIDTH as i32, BANNER_HEIGHT);
        let color = frame.palette.color(Palette::RED);
        frame.fill_rect(banner, color);
        Some(banner)
    }
}

/// Hint text for whatever the pointer hovers; cleared at the start of each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tooltip {
    text: String,
}

impl Tooltip {
    pub fn set(&mut self, text: &str) {
        self.text = truncated(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_text_is_uppercased_and_truncated() {
        let mut popup = Popup::default();
        popup.show("a very long message that does not fit at all");

        assert_eq!(popup.text().chars().count(), MAX_TEXT_LEN);
        assert!(popup.text().starts_with("A VERY LONG"));
        assert_eq!(popup.counter(), POPUP_DURATION);
    }

    #[test]
    fn popup_slides_in_holds_and_slides_out() {
        let mut popup = Popup::default();
        popup.show("hi");
        assert_eq!(popup.offset(), -BANNER_HEIGHT);

        let mut frame = Frame::new();
        popup.draw(&mut frame);
        assert!(popup.offset() <= 0);

        let mut offsets = Vec::new();
        while popup.is_active() {
            offsets.push(popup.offset());
            popup.draw(&mut frame);
        }

        assert!(offsets.iter().all(|offset| (-BANNER_HEIGHT..=0).contains(offset)));
        assert_eq!(offsets[60], 0);
        assert_eq!(*offsets.last().unwrap_or(&0), -(BANNER_HEIGHT * 29 / 30));
        assert!(popup.draw(&mut frame).is_none());
    }

    #[test]
    fn popup_starts_above_the_screen() {
        let mut popup = Popup::default();
        popup.show("hi");
        assert_eq!(popup.offset(), -BANNER_HEIGHT);

        popup.counter = POPUP_DURATION - SLIDE_FRAMES as u32;
        assert_eq!(popup.offset(), 0);

        popup.counter = 0;
        assert_eq!(popup.offset(), -BANNER_HEIGHT);
    }

    #[test]
    fn saved_message_shortens_long_names() {
        assert_eq!(saved_message("game.cart"), "game.cart saved :)");

        let long = saved_message("an_extremely_long_cartridge_name.cart");
        assert!(long.contains("[...]"));
        assert!(long.ends_with(" saved :)"));
        assert!(long.chars().count() <= MAX_TEXT_LEN);
    }

    #[test]
    fn tooltip_keeps_bounded_text() {
        let mut tooltip = Tooltip::default();
        tooltip.set(&"x".repeat(100));
        assert_eq!(tooltip.text().len(), MAX_TEXT_LEN);

        tooltip.clear();
        assert!(tooltip.is_empty());
    }
}
