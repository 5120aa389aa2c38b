// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;

use crate::episode::Episode;
use crate::error::PlayerError;

use super::observer::{NoopObserver, PlayerEvent, SharedPlayerObserver};

/// Snapshot of everything the player shows: the queue and the playback flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub episode_list: Vec<Episode>,
    /// Only meaningful while `episode_list` is non-empty
    pub current_episode_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

/// Owned playback queue with a controlled mutation API
///
/// One store lives per session and is handed to whatever view needs it.
/// Every change is reported to the observer so views can re-render.
pub struct PlayerStore {
    state: PlayerState,
    observer: SharedPlayerObserver,
}

impl PlayerStore {
    /// Create an empty store reporting to `observer`
    pub fn new(observer: SharedPlayerObserver) -> Self {
        Self {
            state: PlayerState::default(),
            observer,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.state.episode_list
    }

    pub fn current_episode_index(&self) -> usize {
        self.state.current_episode_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling
    }

    /// The episode at the current index, if the queue is not empty
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state
            .episode_list
            .get(self.state.current_episode_index)
    }

    /// Replace the queue with a single episode and start playing it
    pub fn play(&mut self, episode: Episode) {
        self.state.episode_list = vec![episode];
        self.state.current_episode_index = 0;
        self.state.is_playing = true;

        self.observer.notify(PlayerEvent::QueueReplaced { len: 1, index: 0 });
    }

    /// Replace the queue with `list` and start playing at `index`
    ///
    /// Fails without touching the state if `index` does not address an
    /// episode in `list`.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        if index >= list.len() {
            return Err(PlayerError::OutOfRange {
                index,
                len: list.len(),
            });
        }

        let len = list.len();
        self.state.episode_list = list;
        self.state.current_episode_index = index;
        self.state.is_playing = true;

        self.observer
            .notify(PlayerEvent::QueueReplaced { len, index });
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        self.observer.notify(PlayerEvent::PlaybackChanged {
            is_playing: self.state.is_playing,
        });
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        self.observer.notify(PlayerEvent::LoopChanged {
            is_looping: self.state.is_looping,
        });
    }

    /// Flip shuffle mode. The queue order is never changed.
    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        self.observer.notify(PlayerEvent::ShuffleChanged {
            is_shuffling: self.state.is_shuffling,
        });
    }

    /// Sync the playing flag with the media element (play/pause/ended events)
    pub fn set_playing_state(&mut self, is_playing: bool) {
        if self.state.is_playing == is_playing {
            return;
        }

        self.state.is_playing = is_playing;
        self.observer
            .notify(PlayerEvent::PlaybackChanged { is_playing });
    }

    pub fn has_next(&self) -> bool {
        self.state.is_shuffling
            || self.state.current_episode_index + 1 < self.state.episode_list.len()
    }

    pub fn has_previous(&self) -> bool {
        self.state.current_episode_index > 0
    }

    /// Advance to the next episode using the thread-local RNG for shuffle
    pub fn play_next(&mut self) {
        self.play_next_with(&mut rand::rng());
    }

    /// Advance to the next episode
    ///
    /// In shuffle mode any index of the queue may be picked, the current one
    /// included. Otherwise the index moves forward by one if possible.
    pub fn play_next_with<R: Rng>(&mut self, rng: &mut R) {
        let len = self.state.episode_list.len();
        if len == 0 {
            return;
        }

        let next = if self.state.is_shuffling {
            rng.random_range(0..len)
        } else if self.has_next() {
            self.state.current_episode_index + 1
        } else {
            return;
        };

        self.state.current_episode_index = next;
        self.observer.notify(PlayerEvent::IndexChanged { index: next });
    }

    pub fn play_previous(&mut self) {
        if !self.has_previous() {
            return;
        }

        self.state.current_episode_index -= 1;
        self.observer.notify(PlayerEvent::IndexChanged {
            index: self.state.current_episode_index,
        });
    }

    /// Empty the queue and reset the index
    pub fn clear_player_state(&mut self) {
        self.state.episode_list.clear();
        self.state.current_episode_index = 0;
        self.observer.notify(PlayerEvent::Cleared);
    }

    /// Handle the end of the current track
    pub fn episode_ended(&mut self) {
        self.episode_ended_with(&mut rand::rng());
    }

    /// Handle the end of the current track
    ///
    /// Loop mode restarts the same episode, otherwise playback moves on to
    /// the next one. When nothing follows, the player is cleared.
    pub fn episode_ended_with<R: Rng>(&mut self, rng: &mut R) {
        if self.state.episode_list.is_empty() {
            return;
        }

        if self.state.is_looping {
            self.observer.notify(PlayerEvent::Restarted {
                index: self.state.current_episode_index,
            });
        } else if self.has_next() {
            self.play_next_with(rng);
        } else {
            self.clear_player_state();
        }
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(NoopObserver::shared())
    }
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
