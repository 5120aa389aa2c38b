mod observer;
mod store;

pub use observer::{NoopObserver, PlayerEvent, PlayerObserver, SharedPlayerObserver};
pub use store::{PlayerState, PlayerStore};
