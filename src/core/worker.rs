use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Shared state handed to a running tool loop.
#[derive(Clone)]
pub struct WorkerHandle {
    running: Arc<AtomicBool>,
    status: Arc<Mutex<String>>,
}

impl WorkerHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn set_status(&self, text: &str) {
        *self.status.lock().unwrap() = text.to_string();
    }
}

/// Runs one background automation loop at a time and exposes its state to
/// the UI thread.
pub struct Worker {
    handle: WorkerHandle,
}

impl Default for Worker {
    fn default() -> Self {
        Self {
            handle: WorkerHandle {
                running: Arc::new(AtomicBool::new(false)),
                status: Arc::new(Mutex::new("Ready".to_string())),
            },
        }
    }
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on a background thread. The task should poll
    /// `handle.is_running()` and return promptly once it flips.
    pub fn start<F>(&self, task: F)
    where
        F: FnOnce(WorkerHandle) + Send + 'static,
    {
        self.handle.running.store(true, Ordering::Relaxed);
        let handle = self.handle.clone();
        thread::spawn(move || task(handle));
    }

    pub fn stop(&self) {
        self.handle.request_stop();
        self.handle.set_status("Stopped");
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn status(&self) -> String {
        self.handle.status.lock().unwrap().clone()
    }

    pub fn set_status(&self, text: &str) {
        self.handle.set_status(text);
    }
}
