//! The host shell: forwarding to the event loop, external links and the clipboard.

use anyhow::{Context, Result};
use tao::event_loop::EventLoopProxy;

use super::events::UserEvent;
use crate::core::{HostShell, MainAction};

/// A trait that abstracts the sending of user events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// Implement the trait for the real `tao::event_loop::EventLoopProxy`.
impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // The event loop may already be gone during shutdown; log and move on.
        if let Err(e) = self.send_event(event) {
            tracing::warn!("Failed to send event to event loop: {}", e);
        }
    }
}

/// A proxy for runs without an event loop, such as `--print-menu`.
/// Events are logged and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedProxy;

impl EventProxy for DetachedProxy {
    fn send_event(&self, event: UserEvent) {
        tracing::debug!("No event loop running, dropping {:?}", event);
    }
}

/// Forwards privileged actions to the event loop that owns the windows.
pub struct ShellHost<P: EventProxy> {
    proxy: P,
}

impl<P: EventProxy> ShellHost<P> {
    pub fn new(proxy: P) -> Self {
        Self { proxy }
    }
}

impl<P: EventProxy> HostShell for ShellHost<P> {
    fn forward(&self, action: MainAction) -> Result<()> {
        tracing::debug!("Forwarding {:?} to the host event loop", action);
        self.proxy.send_event(UserEvent::Forward(action));
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("failed to open {url}"))
    }

    fn read_clipboard(&self) -> Result<String> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard.get_text().context("failed to read clipboard")
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text.to_string())
            .context("failed to write clipboard")
    }
}
