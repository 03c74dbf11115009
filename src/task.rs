//! Fire-and-forget futures whose result the UI picks up on a later frame.
//!
//! Native builds drive the future on a worker thread with `pollster`; on the
//! web it runs on the browser event loop. There is no cancellation: dropping a
//! [`BackgroundTask`] only discards the result once it arrives.

use std::future::Future;
use std::sync::mpsc;

/// Result of polling a [`BackgroundTask`].
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// The worker went away without producing a value, or the value was
    /// already taken.
    Lost,
}

pub struct BackgroundTask<T> {
    rx: mpsc::Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Starts `future` in the background and repaints `ctx` when it finishes.
    pub fn spawn<F>(ctx: &egui::Context, name: &str, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let run = async move {
            let value = future.await;
            if tx.send(value).is_ok() {
                ctx.request_repaint();
            }
        };

        #[cfg(target_arch = "wasm32")]
        {
            let _ = name;
            wasm_bindgen_futures::spawn_local(run);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let spawned = std::thread::Builder::new()
                .name(name.to_owned())
                .spawn(move || pollster::block_on(run));
            if let Err(err) = spawned {
                log::error!("failed to spawn background task '{name}': {err}");
            }
        }

        Self { rx }
    }

    /// A task whose worker is already gone.
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(mpsc::TryRecvError::Empty) => TaskPoll::Pending,
            Err(mpsc::TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}
