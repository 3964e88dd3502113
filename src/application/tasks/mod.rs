//! Scheduled background tasks

pub mod now_playing;

pub use now_playing::NowPlayingPresence;
