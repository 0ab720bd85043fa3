use crate::diff::{self, CompareOptions, DiffResult};
use crate::messages::CompareResponse;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Comparison failed: {0}")]
    Failed(String),

    #[error("Comparison worker disconnected")]
    Disconnected,
}

/// Run a comparison, turning a panic inside the engine into an error.
pub fn compare_guarded(
    source: &str,
    target: &str,
    options: &CompareOptions,
) -> Result<DiffResult, CompareError> {
    guard(|| diff::compare(source, target, options))
}

fn guard<T>(f: impl FnOnce() -> T) -> Result<T, CompareError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        error!("Comparison failed: {}", message);
        CompareError::Failed(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

/// Holds the latest comparison for a host.
///
/// A successful run replaces the previous result wholesale; a failed run
/// leaves it untouched.
pub struct CompareSession {
    options: CompareOptions,
    current: Option<DiffResult>,
}

impl CompareSession {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn current(&self) -> Option<&DiffResult> {
        self.current.as_ref()
    }

    pub fn compare(&mut self, source: &str, target: &str) -> Result<&DiffResult, CompareError> {
        let outcome = compare_guarded(source, target, &self.options);
        self.store(outcome)
    }

    /// Accept a response from a [`crate::worker::CompareWorker`].
    pub fn apply(&mut self, response: CompareResponse) -> Result<&DiffResult, CompareError> {
        self.store(response.outcome)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn store(
        &mut self,
        outcome: Result<DiffResult, CompareError>,
    ) -> Result<&DiffResult, CompareError> {
        let result = outcome?;
        info!("Comparison finished with {} changes", result.change_count());
        Ok(&*self.current.insert(result))
    }
}

impl Default for CompareSession {
    fn default() -> Self {
        Self::new(CompareOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_become_failures() {
        let outcome: Result<(), CompareError> = guard(|| panic!("out of memory"));
        match outcome {
            Err(CompareError::Failed(message)) => assert_eq!(message, "out of memory"),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let outcome: Result<(), CompareError> = guard(|| panic!("{} lines", 3));
        match outcome {
            Err(CompareError::Failed(message)) => assert_eq!(message, "3 lines"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn successful_run_replaces_result() {
        let mut session = CompareSession::default();
        assert!(session.current().is_none());

        session.compare("a\nb", "a\nc").unwrap();
        assert_eq!(session.current().unwrap().change_count(), 2);

        session.compare("same", "same").unwrap();
        assert_eq!(session.current().unwrap().change_count(), 0);
    }

    #[test]
    fn failed_run_keeps_previous_result() {
        let mut session = CompareSession::default();
        session.compare("a", "b").unwrap();
        let before = session.current().cloned();

        let failed = session.apply(CompareResponse {
            generation: 7,
            outcome: Err(CompareError::Failed("boom".to_string())),
        });
        assert!(failed.is_err());
        assert_eq!(session.current().cloned(), before);
    }

    #[test]
    fn clear_drops_result() {
        let mut session = CompareSession::default();
        session.compare("a", "b").unwrap();
        session.clear();
        assert!(session.current().is_none());
    }
}
