use tracing::debug;

use crate::capabilities::Capabilities;
use crate::command::Command;
use crate::event::Event;
use crate::model::{Model, RequestId};
use crate::session::{self, Inputs};
use crate::view::ViewModel;
use crate::UnixTimeMs;

#[derive(Default)]
pub struct App;

impl App {
    fn execute(commands: Vec<Command>, caps: &Capabilities) {
        debug!(count = commands.len(), "executing commands");
        for command in commands {
            match command {
                Command::Render => caps.render.render(),
                Command::StartTimer { id, after_ms } => {
                    caps.timer.start(id, after_ms, |id| Event::TimerFired { id });
                }
                Command::CancelTimer { id } => caps.timer.cancel(id),
                Command::Toast { message } => caps.toast.show(message),
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let inputs = Inputs::new(UnixTimeMs::now(), RequestId::generate());
        let commands = session::reduce(model, event, inputs);
        Self::execute(commands, caps);
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}
