//! Segment playback against a host transport
//!
//! Authors audition a line or word by playing just its span. The host owns
//! the actual audio; it exposes a [`Transport`] and calls
//! [`SegmentPlayer::tick`] once per display refresh. The player pauses the
//! transport as soon as the playhead reaches the end of the segment. Any
//! user interaction should call [`SegmentPlayer::cancel`].

use crate::core::Result;
use kara_core::{Seconds, TimeSpan};

/// Audio transport controlled by the editor
pub trait Transport {
    /// Current playhead position in seconds
    fn current_time(&self) -> Seconds;

    /// Start or resume playback
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::TransportError`] if the host cannot play.
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::TransportError`] if the host cannot pause.
    fn pause(&mut self) -> Result<()>;

    /// Move the playhead
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::TransportError`] if the host cannot seek.
    fn seek(&mut self, time: Seconds) -> Result<()>;

    /// Length of the media, when known
    fn duration(&self) -> Option<Seconds> {
        None
    }
}

/// Where a segment playback stands
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PlaybackState {
    /// Nothing started yet
    #[default]
    Idle,
    /// Playing until the playhead reaches `end`
    Playing {
        /// Where the segment began
        start: Seconds,
        /// Where playback will pause
        end: Seconds,
    },
    /// Reached the end of the segment and paused
    Finished,
    /// Stopped early by the host
    Cancelled,
}

/// Cooperative, cancellable player for a single segment
#[derive(Debug, Clone, Default)]
pub struct SegmentPlayer {
    state: PlaybackState,
}

impl SegmentPlayer {
    /// Create an idle player
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a segment is playing
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Seek to the segment start and play
    ///
    /// An empty or inverted segment only seeks and finishes immediately.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; the player is left idle.
    pub fn start<T: Transport + ?Sized>(&mut self, transport: &mut T, segment: TimeSpan) -> Result<()> {
        self.state = PlaybackState::Idle;
        transport.seek(segment.start)?;
        if segment.end <= segment.start {
            self.state = PlaybackState::Finished;
            return Ok(());
        }
        transport.play()?;
        tracing::debug!(start = segment.start, end = segment.end, "segment playback started");
        self.state = PlaybackState::Playing {
            start: segment.start,
            end: segment.end,
        };
        Ok(())
    }

    /// Poll once; pauses the transport when the segment end is reached
    ///
    /// Polling is coarse, so a transport found past the end is seeked back to
    /// it and the playhead rests exactly on the segment boundary.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn tick<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<PlaybackState> {
        if let PlaybackState::Playing { end, .. } = self.state {
            if transport.current_time() >= end {
                transport.pause()?;
                transport.seek(end)?;
                tracing::trace!(end, "segment playback finished");
                self.state = PlaybackState::Finished;
            }
        }
        Ok(self.state)
    }

    /// Stop a running segment
    ///
    /// Does nothing unless a segment is playing.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn cancel<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<()> {
        if self.is_playing() {
            transport.pause()?;
            tracing::trace!("segment playback cancelled");
            self.state = PlaybackState::Cancelled;
        }
        Ok(())
    }
}

/// Move the playhead forward by `step`, not past the media end
///
/// # Errors
///
/// Propagates transport failures.
pub fn seek_forward<T: Transport + ?Sized>(transport: &mut T, step: Seconds) -> Result<Seconds> {
    let mut target = transport.current_time() + step;
    if let Some(duration) = transport.duration() {
        target = target.min(duration);
    }
    transport.seek(target)?;
    Ok(target)
}

/// Move the playhead back by `step`, not before zero
///
/// # Errors
///
/// Propagates transport failures.
pub fn seek_backward<T: Transport + ?Sized>(transport: &mut T, step: Seconds) -> Result<Seconds> {
    let target = (transport.current_time() - step).max(0.0);
    transport.seek(target)?;
    Ok(target)
}
