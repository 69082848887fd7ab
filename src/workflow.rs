//! Submission workflow shared by every form and remote action
//!
//! validate -> refuse re-entry -> one network command -> toast on completion.
//! Each started request gets a fresh id; a completion carrying any other id is
//! stale (its screen was left or the request superseded) and is dropped.

use std::time::Instant;

use crate::constants::TOAST_TTL;
use crate::error::ApiError;
use crate::messages::NetworkCommand;
use crate::validation::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient banner shown at the top of the screen
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_TTL
    }
}

/// Monotonic request id source
#[derive(Debug)]
pub struct RequestIds {
    next: u64,
}

impl Default for RequestIds {
    fn default() -> Self {
        RequestIds { next: 1 }
    }
}

impl RequestIds {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// State of one form or remote action: in-flight request and inline errors
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Submission {
    pending: Option<u64>,
    pub errors: FieldErrors,
}

impl Submission {
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_id(&self) -> Option<u64> {
        self.pending
    }

    /// Start a user submission. Nothing starts while one is in flight or when
    /// validation failed; in the latter case the field errors are kept for display.
    pub fn begin<P>(
        &mut self,
        validated: Result<P, FieldErrors>,
        ids: &mut RequestIds,
    ) -> Option<(u64, P)> {
        if self.is_submitting() {
            return None;
        }
        match validated {
            Err(errors) => {
                self.errors = errors;
                None
            }
            Ok(payload) => {
                self.errors.clear();
                let id = ids.next_id();
                self.pending = Some(id);
                Some((id, payload))
            }
        }
    }

    /// Start a fetch, superseding any fetch still in flight
    pub fn restart(&mut self, ids: &mut RequestIds) -> u64 {
        let id = ids.next_id();
        self.pending = Some(id);
        id
    }

    /// Settle the request `id`. Returns `None` for stale ids; otherwise the
    /// value, or the error toast built from the server message or `fallback`.
    pub fn finish<T>(
        &mut self,
        id: u64,
        result: Result<T, ApiError>,
        fallback: &str,
    ) -> Option<Result<T, Toast>> {
        if self.pending != Some(id) {
            tracing::debug!(id, "Dropping stale response");
            return None;
        }
        self.pending = None;
        Some(result.map_err(|e| {
            if !e.is_app_error() {
                tracing::warn!(id, error = %e, "Request failed");
            }
            Toast::error(e.user_message(fallback))
        }))
    }

    /// Forget the in-flight request, e.g. when its screen unmounts
    pub fn reset(&mut self) {
        *self = Submission::default();
    }
}

/// Run steps 1-3 of the workflow: validate, guard, build the single command.
pub fn submit<P>(
    submission: &mut Submission,
    ids: &mut RequestIds,
    validated: Result<P, FieldErrors>,
    action: impl FnOnce(u64, P) -> NetworkCommand,
) -> Option<NetworkCommand> {
    submission
        .begin(validated, ids)
        .map(|(id, payload)| action(id, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    #[test]
    fn test_validation_failure_starts_nothing() {
        let mut submission = Submission::default();
        let mut ids = RequestIds::default();
        let mut errors = FieldErrors::new();
        errors.add(Field::Password, "too short");

        let cmd = submit(&mut submission, &mut ids, Err::<(), _>(errors), |id, _| {
            NetworkCommand::FetchGroups { id }
        });
        assert!(cmd.is_none());
        assert!(!submission.is_submitting());
        assert_eq!(submission.errors.get(Field::Password), Some("too short"));
    }

    #[test]
    fn test_no_double_submit() {
        let mut submission = Submission::default();
        let mut ids = RequestIds::default();

        assert!(submission.begin(Ok(()), &mut ids).is_some());
        assert!(submission.is_submitting());
        assert!(submission.begin(Ok(()), &mut ids).is_none());
    }

    #[test]
    fn test_finish_maps_errors_to_toasts() {
        let mut submission = Submission::default();
        let mut ids = RequestIds::default();

        let (id, ()) = submission.begin(Ok(()), &mut ids).unwrap();
        let outcome = submission
            .finish::<()>(
                id,
                Err(ApiError::App {
                    status: 400,
                    message: "Exercise already logged today".to_string(),
                }),
                "fallback",
            )
            .unwrap();
        let toast = outcome.unwrap_err();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Exercise already logged today");
        assert!(!submission.is_submitting());

        let (id, ()) = submission.begin(Ok(()), &mut ids).unwrap();
        let toast = submission
            .finish::<()>(id, Err(ApiError::Unknown("reset".to_string())), "fallback")
            .unwrap()
            .unwrap_err();
        assert_eq!(toast.message, "fallback");
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut submission = Submission::default();
        let mut ids = RequestIds::default();

        let first = submission.restart(&mut ids);
        let second = submission.restart(&mut ids);
        assert!(submission.finish(first, Ok(1), "x").is_none());
        assert!(submission.is_submitting());
        assert_eq!(submission.finish(second, Ok(2), "x"), Some(Ok(2)));

        let id = submission.restart(&mut ids);
        submission.reset();
        assert!(submission.finish(id, Ok(3), "x").is_none());
    }

    #[test]
    fn test_toast_expires() {
        let toast = Toast::success("done");
        assert!(toast.is_visible(toast.shown_at));
        assert!(!toast.is_visible(toast.shown_at + TOAST_TTL));
    }
}
