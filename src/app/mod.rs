//! Host-side glue around the menu tree: publication, activation, and the
//! channel to the event loop.

pub mod events;
pub mod headless;
pub mod host;
pub mod menu;

pub use headless::HeadlessController;
pub use host::{DetachedProxy, EventProxy, ShellHost};
pub use menu::{build_menu, Menu};
