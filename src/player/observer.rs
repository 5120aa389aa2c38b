use std::sync::Arc;

/// Events emitted by the player store whenever its state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The queue was replaced by `play` or `play_list`
    QueueReplaced { len: usize, index: usize },

    /// Playback was started or paused
    PlaybackChanged { is_playing: bool },

    /// Loop mode was switched
    LoopChanged { is_looping: bool },

    /// Shuffle mode was switched
    ShuffleChanged { is_shuffling: bool },

    /// The current position in the queue moved
    IndexChanged { index: usize },

    /// The same episode restarts because loop mode is on
    Restarted { index: usize },

    /// The queue was emptied
    Cleared,
}

/// Trait for observing player state changes.
///
/// Views implement this to re-render when the store mutates.
pub trait PlayerObserver: Send + Sync {
    /// Notify about a state change
    fn notify(&self, event: PlayerEvent);
}

/// A shared reference to a player observer
pub type SharedPlayerObserver = Arc<dyn PlayerObserver>;

/// An observer that ignores all events.
/// Useful for tests or headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PlayerObserver for NoopObserver {
    fn notify(&self, _event: PlayerEvent) {}
}

impl NoopObserver {
    /// Create a new NoopObserver wrapped in an Arc
    pub fn shared() -> SharedPlayerObserver {
        Arc::new(Self)
    }
}
