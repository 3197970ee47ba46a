//! Animation playback state.

/// Transport state of the scene's animation timeline.
///
/// History traversal is refused while [`is_playing`](Self::is_playing)
/// returns `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playback {
    playing: bool,
    frame: i32,
}

impl Playback {
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_frame(&self) -> i32 {
        self.frame
    }

    /// Moves the playhead. Works while playing or stopped.
    pub fn seek(&mut self, frame: i32) {
        self.frame = frame;
    }
}
