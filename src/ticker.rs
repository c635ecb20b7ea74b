use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::session::DrawingSession;

/// Runs a callback at a fixed interval on its own thread until cancelled.
///
/// Dropping the ticker cancels it and waits for the thread, so no tick runs
/// after the owner is gone.
#[derive(Debug)]
pub struct FrameTicker {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FrameTicker {
    /// Start calling `on_tick` every `interval`
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("inkpad-ticker".to_owned())
            .spawn(move || {
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => on_tick(),
                        // Cancelled, or the ticker was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("Frame ticker stopped");
            });

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Failed to start frame ticker: {}", err);
                None
            }
        };

        Self {
            stop: Some(stop),
            thread,
        }
    }

    /// Tick a shared session. Tick errors are logged; the ticker keeps going.
    pub fn for_session(session: Arc<Mutex<DrawingSession>>, interval: Duration) -> Self {
        Self::spawn(interval, move || {
            let mut session = session.lock();
            if session.is_destroyed() {
                return;
            }
            if let Err(err) = session.tick() {
                log::warn!("Draw tick failed: {}", err);
            }
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking and wait for the tick thread to exit
    pub fn cancel(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Frame ticker thread panicked");
            }
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut ticker = FrameTicker::spawn(Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        while count.load(Ordering::SeqCst) < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        ticker.cancel();
        assert!(!ticker.is_running());

        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_drop_stops_a_slow_ticker_promptly() {
        let ticker = FrameTicker::spawn(Duration::from_secs(3600), || {});
        let started = std::time::Instant::now();
        drop(ticker);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
