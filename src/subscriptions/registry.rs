use crate::app::receiver;
use crate::subscriptions::notifier::Notifier;
use std::collections::HashMap;
use toast_notifications_config::ReceiverConfig;
use tokio::task::JoinHandle;

/// Named receivers running on the current tokio runtime.
///
/// Each name owns an independent collection, configuration and queue.
#[derive(Debug, Default)]
pub struct Receivers {
    notifiers: HashMap<String, Notifier>,
    tasks: Vec<JoinHandle<()>>,
}

impl Receivers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a receiver under `name`.
    ///
    /// Spawning an existing name keeps the running receiver and its
    /// configuration.
    pub fn spawn(&mut self, name: &str, config: ReceiverConfig) -> Notifier {
        if let Some(existing) = self.notifiers.get(name) {
            tracing::warn!("Receiver {} already exists, ignoring new configuration", name);
            return existing.clone();
        }

        let (receiver, notifier) = receiver(name, config);
        self.tasks.push(tokio::spawn(receiver.run()));
        self.notifiers.insert(name.to_string(), notifier.clone());

        tracing::info!("Receiver {} spawned", name);
        notifier
    }

    pub fn get(&self, name: &str) -> Option<&Notifier> {
        self.notifiers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.notifiers.keys().map(String::as_str)
    }

    /// Stop every receiver. Pending timers are dropped with them.
    pub fn shutdown(&mut self) {
        self.notifiers.clear();
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Receivers {
    fn drop(&mut self) {
        self.shutdown();
    }
}
