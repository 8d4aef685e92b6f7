// src/util/debounce.rs
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Coalesces a stream of values: keeps the latest one and emits it once
/// `window` has passed without a newer value.
///
/// Dropping the debouncer stops the worker; a pending value is discarded.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(window: Duration, emit: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(first) = rx.recv().await {
                let mut pending = first;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => return,
                        },
                        _ = tokio::time::sleep(window) => {
                            emit(pending);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            log::debug!("Debouncer worker already stopped, value dropped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
