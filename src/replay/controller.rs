//! Frame navigation state machine.
//!
//! The state is a single index into the snapshot store. Both transitions wrap,
//! so there is no terminal state and every index in `[0, N)` is reachable.

use tracing::debug;

use crate::replay::error::PlaybackError;
use crate::replay::store::{Snapshot, SnapshotStore};
use crate::ui::color::ColorPolicy;
use crate::ui::compositor::compose_frame;
use crate::ui::input::KEY_HELP;
use crate::ui::render::Canvas;

/// Navigation commands produced at the input boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    Ignore,
}

pub struct PlaybackController {
    store: SnapshotStore,
    policy: ColorPolicy,
    current: usize,
}

impl PlaybackController {
    /// Starts at the earliest iteration.
    #[must_use]
    pub fn new(store: SnapshotStore, policy: ColorPolicy) -> Self {
        Self {
            store,
            policy,
            current: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn policy(&self) -> &ColorPolicy {
        &self.policy
    }

    /// # Errors
    ///
    /// Only if the index invariant was broken.
    pub fn current_snapshot(&self) -> Result<&Snapshot, PlaybackError> {
        Ok(self.store.get(self.current)?)
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.store.count();
    }

    pub fn retreat(&mut self) {
        let n = self.store.count();
        self.current = (self.current + n - 1) % n;
    }

    /// Applies a command; returns whether a transition happened.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
            Command::Ignore => return false,
        }
        debug!(?command, index = self.current, "Playback transition");
        true
    }

    /// Caption for the current frame: iteration, position and key help.
    ///
    /// # Errors
    ///
    /// Only if the index invariant was broken.
    pub fn caption(&self) -> Result<String, PlaybackError> {
        let snapshot = self.current_snapshot()?;
        Ok(format!(
            "Iteration: {} ({}/{})\n{KEY_HELP}",
            snapshot.iteration,
            self.current + 1,
            self.store.count()
        ))
    }

    /// Composites the current snapshot and hands it to `canvas`.
    ///
    /// # Errors
    ///
    /// Store index errors and display failures.
    pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<(), PlaybackError> {
        let snapshot = self.current_snapshot()?;
        let image = compose_frame(&snapshot.grid, &self.policy);
        canvas.present(&image, &self.caption()?)?;
        Ok(())
    }

    /// Applies `command` and redraws only if the state changed.
    ///
    /// # Errors
    ///
    /// See [`PlaybackController::render`].
    pub fn handle<C: Canvas>(&mut self, command: Command, canvas: &mut C) -> Result<bool, PlaybackError> {
        if !self.apply(command) {
            return Ok(false);
        }
        self.render(canvas)?;
        Ok(true)
    }
}
