use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::config::ViewportGeometry;
use crate::controls::Controls;
use crate::engine::Automaton;
use crate::grid::GridCoordinate;
use crate::interaction;
use crate::interaction::BoundingBox;
use crate::interaction::Command;
use crate::interaction::GLIDER;
use crate::interaction::PointerEvent;
use crate::interaction::Stamp;
use crate::scheduler::AnimationScheduler;
use crate::scheduler::FrameHandle;
use crate::scheduler::FrameHost;
use crate::scheduler::FrameOutcome;
use crate::scheduler::PlaybackState;
use crate::surface::Surface;
use crate::view;
use crate::view::ViewError;

/// Everything one running front end needs: the engine, the surface it is painted on, and the
/// playback state.
///
/// All operations run to completion before returning. Every mutation is followed by a redraw
/// in the same call, so no tick can slip in between a change and its picture.
pub struct Session<A, S, C> {
    engine: A,
    surface: S,
    geometry: ViewportGeometry,
    scheduler: AnimationScheduler,
    controls: C,
    stamp: Stamp,

    /// Ticks fired by the scheduler
    generation: u64,
}

impl<A, S, C> Session<A, S, C>
where
    A: Automaton,
    S: Surface,
    C: Controls,
{
    /// Checks the surface fits the engine's grid exactly, then paints the first frame.
    pub fn new(
        engine: A,
        surface: S,
        geometry: ViewportGeometry,
        tick_interval: Duration,
        mut controls: C,
    ) -> Result<Self, ViewError> {
        let expected = geometry.surface_size(engine.dimensions());
        if surface.size() != expected {
            return Err(ViewError::SurfaceSizeMismatch {
                expected,
                actual: surface.size(),
            });
        }

        let scheduler = AnimationScheduler::new(tick_interval);
        controls.show_playback(scheduler.state());

        let mut session = Self {
            engine,
            surface,
            geometry,
            scheduler,
            controls,
            stamp: GLIDER,
            generation: 0,
        };

        session.redraw()?;

        Ok(session)
    }

    /// Replace the pattern stamped by modified clicks.
    pub fn with_stamp(mut self, stamp: Stamp) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn engine(&self) -> &A {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn play<H: FrameHost>(&mut self, host: &mut H) {
        if self.scheduler.play(host) {
            self.controls.show_playback(self.scheduler.state());
        }
    }

    pub fn pause<H: FrameHost>(&mut self, host: &mut H) {
        if self.scheduler.pause(host) {
            self.controls.show_playback(self.scheduler.state());
        }
    }

    pub fn toggle_playback<H: FrameHost>(&mut self, host: &mut H) {
        match self.scheduler.state() {
            PlaybackState::Paused => self.play(host),
            PlaybackState::Playing => self.pause(host),
        }
    }

    /// Run the frame callback for `handle`. Ticks the engine and redraws when the interval has
    /// elapsed.
    pub fn on_frame<H: FrameHost>(
        &mut self,
        handle: FrameHandle,
        timestamp: f64,
        host: &mut H,
    ) -> Result<FrameOutcome, ViewError> {
        let outcome = self.scheduler.on_frame(handle, timestamp, host);

        if outcome == FrameOutcome::Tick {
            self.engine.tick();
            self.generation += 1;
            self.redraw()?;
        }

        Ok(outcome)
    }

    /// Toggle or stamp the cell under a pointer event, then redraw.
    pub fn on_pointer(
        &mut self,
        event: &PointerEvent,
        bbox: &BoundingBox,
    ) -> Result<GridCoordinate, ViewError> {
        let coord = interaction::locate(
            event,
            self.engine.dimensions(),
            &self.geometry,
            self.surface.size(),
            bbox,
        );

        self.apply(Command::from_event(event, coord))?;

        Ok(coord)
    }

    pub fn toggle(&mut self, coord: GridCoordinate) -> Result<(), ViewError> {
        self.apply(Command::Toggle(coord))
    }

    pub fn stamp(&mut self, anchor: GridCoordinate) -> Result<(), ViewError> {
        self.apply(Command::Stamp(anchor))
    }

    /// Leaves playback alone.
    pub fn randomize(&mut self) -> Result<(), ViewError> {
        info!("Randomizing the grid");

        self.engine.randomize();
        self.redraw()
    }

    /// Leaves playback alone.
    pub fn clear(&mut self) -> Result<(), ViewError> {
        info!("Clearing the grid");

        self.engine.clear();
        self.redraw()
    }

    /// Paint the engine's current cells.
    pub fn redraw(&mut self) -> Result<(), ViewError> {
        let dims = self.engine.dimensions();

        // fetched fresh: any earlier view died with the last mutation
        let cells = self.engine.cells();

        view::draw(cells, dims, &self.geometry, &mut self.surface)
    }

    fn apply(&mut self, command: Command) -> Result<(), ViewError> {
        debug!("Applying {command:?}");

        interaction::apply(&mut self.engine, command, &self.stamp);
        self.redraw()
    }
}
