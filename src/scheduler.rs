use std::time::Duration;

use tracing::debug;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Identifies one armed frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's display refresh: something that can call back once per frame.
pub trait FrameHost {
    /// Arrange for the frame callback to run once, on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Best-effort cancellation. Cancelling a handle that already fired, or was never issued,
    /// does nothing.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Paused: nothing happened and no new frame was armed.
    Halted,

    /// The callback was not the one currently armed, e.g. a frame that could not be cancelled
    /// before a pause and a resume. Ignored.
    Stale,

    /// First frame since playback started. Its timestamp is the new baseline.
    Baseline,

    /// Not enough time has passed since the last tick.
    Waiting,

    /// The interval elapsed: the caller must tick the engine once and redraw.
    Tick,
}

/// Throttles engine ticks to a fixed wall-clock interval on top of per-frame callbacks.
///
/// Starts [`PlaybackState::Paused`]. While playing, every frame callback re-arms the next one, and
/// a tick is due whenever strictly more than `tick_interval` passed since the last one. At most one
/// tick fires per frame: time lost to slow frames, or spent paused, is never made up.
#[derive(Debug)]
pub struct AnimationScheduler {
    state: PlaybackState,

    /// In milliseconds, like frame timestamps
    tick_interval: f64,

    /// Timestamp of the last tick, or of the first frame after (re)starting
    last_tick: Option<f64>,

    armed: Option<FrameHandle>,
}

impl AnimationScheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            state: PlaybackState::Paused,
            tick_interval: tick_interval.as_secs_f64() * 1000.0,
            last_tick: None,
            armed: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval / 1000.0)
    }

    /// The frame callback currently armed, if any.
    pub fn armed(&self) -> Option<FrameHandle> {
        self.armed
    }

    /// `Paused -> Playing`. Returns false if already playing.
    pub fn play<H: FrameHost>(&mut self, host: &mut H) -> bool {
        if self.is_playing() {
            return false;
        }

        self.state = PlaybackState::Playing;
        self.last_tick = None;
        self.armed = Some(host.request_frame());

        info!("Playing, one generation every {}ms", self.tick_interval);

        true
    }

    /// `Playing -> Paused`. Returns false if already paused.
    pub fn pause<H: FrameHost>(&mut self, host: &mut H) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.state = PlaybackState::Paused;

        if let Some(handle) = self.armed.take() {
            host.cancel_frame(handle);
        }

        info!("Paused");

        true
    }

    /// The frame callback, run by the host for an armed `handle` with a monotonic timestamp in
    /// milliseconds.
    pub fn on_frame<H: FrameHost>(
        &mut self,
        handle: FrameHandle,
        timestamp: f64,
        host: &mut H,
    ) -> FrameOutcome {
        // The pause may not have managed to cancel us. The state is what counts.
        if !self.is_playing() {
            return FrameOutcome::Halted;
        }

        if self.armed != Some(handle) {
            return FrameOutcome::Stale;
        }

        let outcome = match self.last_tick {
            None => {
                self.last_tick = Some(timestamp);
                FrameOutcome::Baseline
            }
            Some(last) if timestamp - last > self.tick_interval => {
                debug!("Tick after {:.1}ms", timestamp - last);
                self.last_tick = Some(timestamp);
                FrameOutcome::Tick
            }
            Some(_) => FrameOutcome::Waiting,
        };

        self.armed = Some(host.request_frame());

        outcome
    }
}
