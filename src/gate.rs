//! Decisions the screen takes while acquiring and looping the video, kept
//! apart from the player so they can be checked on their own.

use crate::config::LoopMode;
use crate::lifecycle::{Phase, Transition};
use crate::progress::DownloadProgress;

/// What a progress check should lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Keep waiting for more bytes (or for the transfer to finish).
    Wait,
    /// Enough of the file is there, open the player on it.
    Open,
}

/// What to do when the stream reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Ignore,
    Rewind,
    Recreate,
}

/// Whether the progress poll should keep running.
///
/// A transfer that stopped (finished or failed) has nothing more to report,
/// so polling ends with it even if the screen is still acquiring.
pub fn should_poll(lifecycle_polling: bool, job_running: bool) -> bool {
    lifecycle_polling && job_running
}

/// Decide on a fresh progress snapshot.
///
/// Once an early start has failed, the gate stays shut and the completed
/// file is opened instead.
pub fn poll_decision(
    progress: DownloadProgress,
    threshold: f64,
    awaiting_completion: bool,
) -> GateDecision {
    if awaiting_completion || !progress.reached(threshold) {
        GateDecision::Wait
    } else {
        GateDecision::Open
    }
}

/// Whether a finished transfer should start playback. Only a successful one
/// that the threshold gate has not already acted on does.
pub fn opens_on_completion(phase: Phase, succeeded: bool) -> bool {
    succeeded && phase == Phase::AcquiringSource
}

pub fn loop_action(transition: Transition, mode: LoopMode) -> LoopAction {
    if transition.to != Phase::Playing {
        return LoopAction::Ignore;
    }
    match mode {
        LoopMode::Native => LoopAction::Rewind,
        LoopMode::Recreate => LoopAction::Recreate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{Lifecycle, LifecycleEvent};

    fn playing() -> Lifecycle {
        let mut lifecycle = Lifecycle::default();
        lifecycle.handle(LifecycleEvent::AcquisitionStarted);
        lifecycle.handle(LifecycleEvent::SourceReady);
        lifecycle
    }

    #[test]
    fn test_poll_stops_with_the_transfer() {
        assert!(should_poll(true, true));
        assert!(!should_poll(true, false));
        assert!(!should_poll(false, true));
    }

    #[test]
    fn test_failed_transfer_ends_polling_while_acquiring() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.handle(LifecycleEvent::AcquisitionStarted);

        assert!(lifecycle.is_polling());
        assert!(!should_poll(lifecycle.is_polling(), false));
    }

    #[test]
    fn test_gate_opens_at_threshold() {
        assert_eq!(
            poll_decision(DownloadProgress::new(1000, 799), 80.0, false),
            GateDecision::Wait
        );
        assert_eq!(
            poll_decision(DownloadProgress::new(1000, 800), 80.0, false),
            GateDecision::Open
        );
    }

    #[test]
    fn test_gate_waits_on_unknown_size() {
        assert_eq!(
            poll_decision(DownloadProgress::new(0, 5_000_000), 80.0, false),
            GateDecision::Wait
        );
    }

    #[test]
    fn test_failed_early_start_waits_for_completion() {
        let done = DownloadProgress::new(1000, 1000);
        assert_eq!(poll_decision(done, 80.0, true), GateDecision::Wait);
    }

    #[test]
    fn test_completion_opens_only_while_acquiring() {
        assert!(opens_on_completion(Phase::AcquiringSource, true));
        assert!(!opens_on_completion(Phase::AcquiringSource, false));
        assert!(!opens_on_completion(Phase::Playing, true));
        assert!(!opens_on_completion(Phase::Paused, true));
        assert!(!opens_on_completion(Phase::Destroyed, true));
    }

    #[test]
    fn test_end_of_stream_follows_loop_mode() {
        let mut lifecycle = playing();
        let transition = lifecycle.handle(LifecycleEvent::EndOfStream);

        assert_eq!(loop_action(transition, LoopMode::Native), LoopAction::Rewind);
        assert_eq!(loop_action(transition, LoopMode::Recreate), LoopAction::Recreate);
    }

    #[test]
    fn test_end_of_stream_ignored_when_not_playing() {
        let mut lifecycle = playing();
        lifecycle.handle(LifecycleEvent::Destroy);
        let transition = lifecycle.handle(LifecycleEvent::EndOfStream);

        assert_eq!(loop_action(transition, LoopMode::Recreate), LoopAction::Ignore);

        let paused = Transition {
            from: Phase::Paused,
            to: Phase::Paused,
        };
        assert_eq!(loop_action(paused, LoopMode::Native), LoopAction::Ignore);
    }
}
