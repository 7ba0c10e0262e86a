use std::future::Future;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::debug;

/// Owns the tasks spawned on behalf of one mounted screen. Unmounting (or
/// dropping) the scope aborts whatever is still running.
#[derive(Debug, Default)]
pub struct RequestScope {
    label: &'static str,
    handles: Vec<JoinHandle<()>>,
}

impl RequestScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            handles: Vec::new(),
        }
    }

    /// Spawns onto the current runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.track(tokio::spawn(task));
    }

    pub fn spawn_on<F>(&mut self, runtime: &Handle, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.track(runtime.spawn(task));
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn unmount(&mut self) {
        let aborted = self.in_flight();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            debug!(scope = self.label, aborted, "aborted in-flight requests");
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.unmount();
    }
}
