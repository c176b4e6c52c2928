//! Reporter trait for dependency injection
//!
//! Lets the engine report progress and status without being coupled to a
//! specific console implementation.

/// Progress and status sink for an acquisition run.
pub trait Reporter: Send + Sync {
    /// Updates the progress of a download. `current == 0` marks the start.
    fn downloading(&self, name: &str, current: u64, total: Option<u64>);

    /// Indicates the downloaded file is being checksum-verified.
    fn verifying(&self, name: &str);

    /// Indicates the verified file is being installed.
    fn installing(&self, name: &str);

    /// Marks the operation as successfully completed.
    fn done(&self, name: &str, detail: &str);

    /// Marks an attempt as failed with a specific reason.
    fn failed(&self, name: &str, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn downloading(&self, name: &str, current: u64, total: Option<u64>) {
        (**self).downloading(name, current, total)
    }
    fn verifying(&self, name: &str) {
        (**self).verifying(name)
    }
    fn installing(&self, name: &str) {
        (**self).installing(name)
    }
    fn done(&self, name: &str, detail: &str) {
        (**self).done(name, detail)
    }
    fn failed(&self, name: &str, reason: &str) {
        (**self).failed(name, reason)
    }
    fn info(&self, msg: &str) {
        (**self).info(msg)
    }
    fn success(&self, msg: &str) {
        (**self).success(msg)
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg)
    }
    fn error(&self, msg: &str) {
        (**self).error(msg)
    }
}

/// A no-op reporter for silent operations (embedding, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn verifying(&self, _: &str) {}
    fn installing(&self, _: &str) {}
    fn done(&self, _: &str, _: &str) {}
    fn failed(&self, _: &str, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
