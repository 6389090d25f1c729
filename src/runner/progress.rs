// src/runner/progress.rs

//! Line-oriented progress reporting.

/// A sink receiving one line of text per progress or output event.
///
/// The runner calls [`ProgressSink::line`] synchronously, in delivery order,
/// for every diagnostic and output line produced during a run. Implementations
/// sit on the critical path between command steps, so they must return
/// promptly and must not panic.
pub trait ProgressSink: Send {
    fn line(&mut self, line: &str);
}

/// Any `FnMut(&str)` closure is a sink.
impl<F> ProgressSink for F
where
    F: FnMut(&str) + Send,
{
    fn line(&mut self, line: &str) {
        self(line)
    }
}
