// src/state/tasks.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use eframe::egui;
use log::error;

pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// The worker went away without answering (it panicked or never started).
    Lost,
}

/// One blocking job running on its own thread, polled from the UI loop.
pub struct BackgroundTask<T> {
    receiver: Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn spawn<F>(name: &str, repaint: Option<egui::Context>, job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _ = sender.send(job());
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });

        if let Err(e) = spawned {
            error!("Failed to start {} worker: {}", name, e);
        }

        Self { receiver }
    }

    pub fn poll(&self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait<T: Send + 'static>(task: &BackgroundTask<T>) -> TaskPoll<T> {
        for _ in 0..400 {
            match task.poll() {
                TaskPoll::Pending => thread::sleep(Duration::from_millis(5)),
                done => return done,
            }
        }
        TaskPoll::Pending
    }

    #[test]
    fn test_result_is_delivered() {
        let task = BackgroundTask::spawn("test", None, || 21 * 2);
        assert!(matches!(wait(&task), TaskPoll::Ready(42)));
    }

    #[test]
    fn test_panicking_job_is_reported_lost() {
        let task: BackgroundTask<u32> = BackgroundTask::spawn("test-panic", None, || panic!("boom"));
        assert!(matches!(wait(&task), TaskPoll::Lost));
    }
}
