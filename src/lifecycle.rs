//! Screen lifecycle as an explicit state machine.
//!
//! Window and player callbacks are turned into [`LifecycleEvent`]s and fed
//! through [`Lifecycle::handle`]; the caller then acts on the resulting
//! [`Transition`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    AcquiringSource,
    Playing,
    Paused,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    AcquisitionStarted,
    SourceReady,
    Pause,
    Resume,
    EndOfStream,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    /// False while the window is in the background. Gates the download poll.
    resumed: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle {
            phase: Phase::Created,
            resumed: true,
        }
    }
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// Whether download progress should keep being re-checked.
    pub fn is_polling(&self) -> bool {
        self.phase == Phase::AcquiringSource && self.resumed
    }

    pub fn handle(&mut self, event: LifecycleEvent) -> Transition {
        use LifecycleEvent as E;
        use Phase as P;

        let from = self.phase;
        if from == P::Destroyed {
            return Transition { from, to: from };
        }

        match event {
            E::Pause => self.resumed = false,
            E::Resume => self.resumed = true,
            _ => {}
        }

        let to = match (from, event) {
            (_, E::Destroy) => P::Destroyed,
            (P::Created, E::AcquisitionStarted) => P::AcquiringSource,
            (P::Created | P::AcquiringSource, E::SourceReady) => {
                if self.resumed {
                    P::Playing
                } else {
                    P::Paused
                }
            }
            (P::Playing, E::Pause) => P::Paused,
            (P::Paused, E::Resume) => P::Playing,
            (P::Playing, E::EndOfStream) => P::Playing,
            (phase, _) => phase,
        };

        if to != from {
            log::debug!("Lifecycle {:?} -> {:?} on {:?}", from, to, event);
        }
        self.phase = to;
        Transition { from, to }
    }
}
