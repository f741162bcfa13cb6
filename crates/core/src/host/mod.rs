use std::path::Path;

/// Operating-system services the shell fires and forgets.
pub trait Host {
    /// Asks the OS to reveal a freshly saved file.
    fn open_path(&mut self, path: &Path);
    fn toggle_fullscreen(&mut self);
    fn set_title(&mut self, title: &str);
    /// Sets the integer scale of the main window.
    fn set_scale(&mut self, scale: u32);
    /// Starts the per-frame network service tick.
    fn net_begin(&mut self) {}
    fn net_end(&mut self) {}
}

/// Host without a window: records requests and logs them.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub title: String,
    pub fullscreen: bool,
    pub scale: u32,
    pub opened: Vec<String>,
    pub net_ticks: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for HeadlessHost {
    fn open_path(&mut self, path: &Path) {
        tracing::info!(?path, "reveal saved file");
        self.opened.push(path.display().to_string());
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        tracing::debug!(fullscreen = self.fullscreen, "fullscreen toggled");
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_scale(&mut self, scale: u32) {
        self.scale = scale;
        tracing::debug!(scale, "window scale set");
    }

    fn net_begin(&mut self) {
        self.net_ticks += 1;
    }
}
