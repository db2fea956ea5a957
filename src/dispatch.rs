//! Main-thread job queue
//!
//! UI work must run on the thread that owns the UI. [`MainQueue`] is the
//! cloneable handle other threads post closures through; [`MainLoop`] is
//! the receiving end, drained in FIFO order by the UI thread.

use crate::core::error::{Error, Result};
use std::time::Duration;
use tokio::sync::mpsc;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone)]
pub struct MainQueue {
    sender: mpsc::UnboundedSender<Job>,
}

/// Receiving end of a [`MainQueue`]; owned by the UI thread.
#[derive(Debug)]
pub struct MainLoop {
    receiver: mpsc::UnboundedReceiver<Job>,
}

/// Creates a connected queue handle and loop.
pub fn main_queue() -> (MainQueue, MainLoop) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MainQueue { sender }, MainLoop { receiver })
}

impl MainQueue {
    /// Queues `job` behind everything already posted.
    ///
    /// # Errors
    ///
    /// [`Error::MainQueueClosed`] if the [`MainLoop`] was dropped.
    pub fn post<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender
            .send(Box::new(job))
            .map_err(|_| Error::MainQueueClosed)
    }

    /// Queues `job` once `delay` has passed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn post_after<F>(&self, delay: Duration, job: F) -> tokio::task::JoinHandle<Result<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            queue.post(job)
        })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl MainLoop {
    /// Runs every job queued right now; returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Waits for the next job and runs it. `false` once every [`MainQueue`]
    /// handle is gone and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Runs jobs until every [`MainQueue`] handle has been dropped.
    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_jobs_run_in_order() {
        let (queue, mut main) = main_queue();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let seen = Arc::clone(&seen);
            queue.post(move || seen.lock().unwrap().push(i)).unwrap();
        }

        assert_eq!(main.run_pending(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(main.run_pending(), 0);
    }

    #[test]
    fn test_post_fails_when_loop_dropped() {
        let (queue, main) = main_queue();
        drop(main);
        assert!(queue.is_closed());
        assert!(matches!(queue.post(|| {}), Err(Error::MainQueueClosed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_after_waits_for_delay() {
        let (queue, mut main) = main_queue();
        let fired = Arc::new(Mutex::new(false));

        let flag = Arc::clone(&fired);
        let handle = queue.post_after(Duration::from_millis(250), move || {
            *flag.lock().unwrap() = true;
        });

        assert_eq!(main.run_pending(), 0);
        handle.await.unwrap().unwrap();
        assert!(main.run_next().await);
        assert!(*fired.lock().unwrap());
    }

    #[tokio::test]
    async fn test_run_stops_when_handles_dropped() {
        let (queue, main) = main_queue();
        let count = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&count);
        queue.post(move || *counter.lock().unwrap() += 1).unwrap();
        drop(queue);

        main.run().await;
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
