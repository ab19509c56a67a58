//! A "thinking" spinner shown while the computer searches
//!
//! The spinner runs on its own thread and shares nothing with the search
//! except a completion flag. It only appears once the search has run longer
//! than a delay, so quick moves print nothing.

use indicatif::{ProgressBar, ProgressStyle};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct ThinkingIndicator {
    done: Arc<AtomicBool>,
    start: Instant,
    handle: Option<JoinHandle<()>>,
}

impl ThinkingIndicator {
    /// Starts timing, and if `visible` spawns the spinner thread
    pub fn start(delay: Duration, visible: bool) -> Self {
        let done = Arc::new(AtomicBool::new(false));
        let start = Instant::now();

        let handle = if visible {
            let done = Arc::clone(&done);
            Some(thread::spawn(move || spin(&done, start, delay)))
        } else {
            None
        };

        Self {
            done,
            start,
            handle,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops and joins the spinner, returning the time since it was started
    pub fn finish(mut self) -> Duration {
        self.stop();
        self.start.elapsed()
    }

    fn stop(&mut self) {
        self.done.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            // a panicked spinner only loses the animation
            let _ = handle.join();
        }
    }
}

impl Drop for ThinkingIndicator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spin(done: &AtomicBool, start: Instant, delay: Duration) {
    let mut progress: Option<ProgressBar> = None;

    while !done.load(Ordering::Acquire) {
        if start.elapsed() > delay {
            progress
                .get_or_insert_with(|| {
                    let progress = ProgressBar::new_spinner();
                    progress.set_style(
                        ProgressStyle::default_spinner()
                            .template("{spinner:.cyan} Computer is thinking... {elapsed}"),
                    );
                    progress
                })
                .tick();
        }
        thread::sleep(TICK_INTERVAL);
    }

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
}
