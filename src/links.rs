use webbrowser::Browser;

/// Opens outbound links. URLs are passed through untouched.
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Hands links to the system browser, when there is one.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) {
        if !Browser::is_available() {
            tracing::warn!(url, "no browser available");
            return;
        }
        match webbrowser::open(url) {
            Ok(()) => tracing::info!(url, "opened link"),
            Err(err) => tracing::warn!(url, %err, "failed to open link"),
        }
    }
}

/// Remembers every link instead of opening it.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    pub opened: Vec<String>,
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}
