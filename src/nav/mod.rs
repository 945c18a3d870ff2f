pub mod route;

use flume::{Receiver, Sender};
use tracing::debug;

pub use route::{Page, Route};

/// Observable "current path" surface.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    /// Setting the current value again does not notify.
    fn set_path(&mut self, path: &str);

    fn subscribe(&mut self) -> Receiver<String>;

    fn route(&self) -> Route {
        Route::from_path(&self.current_path())
    }
}

#[derive(Debug, Default)]
pub struct MemoryNavigator {
    path: String,
    subscribers: Vec<Sender<String>>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            path: initial.into(),
            subscribers: Vec::new(),
        }
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn set_path(&mut self, path: &str) {
        if self.path == path {
            return;
        }
        debug!(from = self.path.as_str(), to = path, "navigate");
        self.path = path.to_string();
        self.subscribers
            .retain(|tx| tx.send(path.to_string()).is_ok());
    }

    fn subscribe(&mut self) -> Receiver<String> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_only_on_change() {
        let mut nav = MemoryNavigator::new("/");
        let rx = nav.subscribe();

        nav.set_path("/lesson/a");
        nav.set_path("/lesson/a");
        nav.set_path("/");

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(seen, ["/lesson/a", "/"]);
        assert_eq!(nav.route(), Route::List);
    }
}
