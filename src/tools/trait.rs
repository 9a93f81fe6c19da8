// Shared trait for all automation tools
use crate::core::worker::Worker;

/// Common interface that all tools must implement
pub trait Tool {
    /// Tool name for tab identification
    fn name(&self) -> &str;

    /// Worker backing this tool's background loop
    fn worker(&self) -> &Worker;

    /// Stop the tool (emergency stop)
    fn stop(&mut self) {
        self.worker().stop();
    }

    /// Check if the tool is currently running
    fn is_running(&self) -> bool {
        self.worker().is_running()
    }

    /// Current status message
    fn status(&self) -> String {
        self.worker().status()
    }
}
