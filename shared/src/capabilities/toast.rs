use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Platform toast (e.g. Android `ToastAndroid`). Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastOperation {
    pub message: String,
}

impl Operation for ToastOperation {
    type Output = ();
}

pub struct Toast<Ev> {
    context: CapabilityContext<ToastOperation, Ev>,
}

impl<Ev> Clone for Toast<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Toast<Ev> {
    type Operation = ToastOperation;
    type MappedSelf<MappedEv> = Toast<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Toast::new(self.context.map_event(f))
    }
}

impl<Ev> Toast<Ev> {
    pub fn new(context: CapabilityContext<ToastOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Toast<Ev>
where
    Ev: Send + 'static,
{
    pub fn show(&self, message: impl Into<String>) {
        let operation = ToastOperation {
            message: message.into(),
        };
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }
}
