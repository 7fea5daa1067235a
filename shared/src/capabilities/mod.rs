//! Capabilities the core asks the shell for.
//!
//! We use Crux's built-in Render capability directly because it provides
//! all necessary functionality for triggering view updates. Timers and the
//! platform toast are ours.

mod timer;
mod toast;

pub use self::timer::{Timer, TimerOperation, TimerOutput};
pub use self::toast::{Toast, ToastOperation};
pub use crux_core::render::Render;

use crate::event::Event;
// The Effect derive refers to the app type by name.
#[allow(unused_imports)]
use crate::app::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub timer: Timer<Event>,
    pub toast: Toast<Event>,
}
