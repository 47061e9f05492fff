use std::time::Duration;

use proptest::prelude::*;

use lifeview::config::ViewportGeometry;
use lifeview::controls::Controls;
use lifeview::engine::Automaton;
use lifeview::grid::GridCoordinate;
use lifeview::interaction::PointerEvent;
use lifeview::scheduler::FrameOutcome;
use lifeview::scheduler::PlaybackState;
use lifeview::session::Session;
use lifeview::surface::Raster;
use lifeview::terminal;
use lifeview::terminal::TerminalControls;
use lifeview::terminal::TerminalHost;
use lifeview::universe::Universe;

type TestSession = Session<Universe, Raster, TerminalControls>;

fn session(universe: Universe, cell_size: u32, interval_ms: u64) -> TestSession {
    let geometry = ViewportGeometry::with_cell_size(cell_size).unwrap();
    let (w, h) = geometry.surface_size(universe.dimensions());

    Session::new(
        universe,
        Raster::new(w, h),
        geometry,
        Duration::from_millis(interval_ms),
        TerminalControls::default(),
    )
    .unwrap()
}

/// Fire whatever frame the host has armed.
fn frame(session: &mut TestSession, host: &mut TerminalHost, timestamp: f64) -> FrameOutcome {
    let handle = host.take_armed().expect("a frame should be armed");
    session.on_frame(handle, timestamp, host).unwrap()
}

fn alive(session: &TestSession) -> Vec<(u32, u32)> {
    let universe = session.engine();
    let mut cells = Vec::new();

    for row in 0..universe.height() {
        for col in 0..universe.width() {
            if universe.is_alive(row, col) {
                cells.push((row, col));
            }
        }
    }

    cells
}

#[test]
fn stamp_at_origin_wraps() {
    let mut session = session(Universe::with_size(8, 8).unwrap(), 16, 1000);

    session.stamp(GridCoordinate::new(0, 0)).unwrap();

    assert_eq!(alive(&session), vec![(0, 0), (0, 1), (1, 0), (7, 1), (7, 7)]);
}

#[test]
fn stamped_glider_moves() {
    let mut host = TerminalHost::default();
    let mut session = session(Universe::with_size(8, 8).unwrap(), 1, 1000);
    session.stamp(GridCoordinate::new(2, 2)).unwrap();
    let before = alive(&session);

    session.play(&mut host);
    assert_eq!(frame(&mut session, &mut host, 0.0), FrameOutcome::Baseline);
    for t in [1001.0, 2002.0, 3003.0, 4004.0] {
        assert_eq!(frame(&mut session, &mut host, t), FrameOutcome::Tick);
    }

    let mut shifted: Vec<_> = before.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    shifted.sort();

    assert_eq!(session.generation(), 4);
    assert_eq!(alive(&session), shifted);
}

#[test]
fn scheduler_ticks_once_past_the_interval() {
    let mut host = TerminalHost::default();
    let mut session = session(Universe::new(), 1, 1000);
    let start = session.engine().cells().to_vec();

    session.play(&mut host);

    let outcomes: Vec<_> = [0.0, 400.0, 900.0, 1100.0, 1600.0]
        .into_iter()
        .map(|t| frame(&mut session, &mut host, t))
        .collect();

    assert_eq!(outcomes.iter().filter(|&&o| o == FrameOutcome::Tick).count(), 1);
    assert_eq!(outcomes[3], FrameOutcome::Tick);
    assert_eq!(session.generation(), 1);

    let mut expected = Universe::new();
    expected.tick();
    assert_ne!(session.engine().cells(), &start[..]);
    assert_eq!(session.engine().cells(), expected.cells());

    // and the surface shows the new generation
    let fresh = self::session(expected, 1, 1000);
    assert_eq!(session.surface(), fresh.surface());
}

#[test]
fn pause_right_after_play_changes_nothing() {
    let mut host = TerminalHost::default();
    let mut session = session(Universe::new(), 1, 1000);
    let start = session.engine().cells().to_vec();

    session.play(&mut host);
    session.pause(&mut host);

    assert_eq!(host.take_armed(), None);
    assert_eq!(session.engine().cells(), &start[..]);
    assert_eq!(session.state(), PlaybackState::Paused);
    assert_eq!(session.controls().label(), "play");

    // resume much later: a new baseline, no catch-up tick
    session.play(&mut host);
    assert_eq!(session.controls().label(), "pause");
    assert_eq!(frame(&mut session, &mut host, 90_000.0), FrameOutcome::Baseline);
    assert_eq!(frame(&mut session, &mut host, 90_900.0), FrameOutcome::Waiting);
    assert_eq!(session.engine().cells(), &start[..]);

    assert_eq!(frame(&mut session, &mut host, 91_001.0), FrameOutcome::Tick);
    assert_eq!(session.generation(), 1);
}

#[test]
fn clear_paints_everything_dead() {
    let mut session = session(Universe::new(), 2, 1000);

    session.clear().unwrap();

    let geometry = *session.geometry();
    assert!(
        session
            .surface()
            .pixels()
            .iter()
            .all(|&px| px == geometry.grid_color || px == geometry.dead_color)
    );
}

#[test]
fn randomize_then_clear_matches_a_fresh_grid() {
    let mut used = session(Universe::with_size(12, 7).unwrap().with_seed(3), 2, 1000);
    let fresh = session(Universe::with_size(12, 7).unwrap(), 2, 1000);

    used.randomize().unwrap();
    assert_ne!(used.surface(), fresh.surface());

    used.clear().unwrap();
    assert_eq!(used.surface(), fresh.surface());
}

#[test]
fn terminal_click_goes_through_half_block_scaling() {
    let mut session = session(Universe::with_size(4, 4).unwrap(), 1, 1000);

    // 9x9 raster shown as 9 columns by 5 rows
    let bbox = terminal::bounding_box((0, 0), session.surface());
    let event = PointerEvent {
        client_x: 3.5,
        client_y: 2.5,
        modified: false,
    };

    let coord = session.on_pointer(&event, &bbox).unwrap();

    assert_eq!(coord, GridCoordinate::new(2, 1));
    assert_eq!(alive(&session), vec![(2, 1)]);
}

#[test]
fn modified_click_stamps() {
    let mut session = session(Universe::with_size(8, 8).unwrap(), 16, 1000);
    let geometry = *session.geometry();
    let (w, h) = geometry.surface_size(session.engine().dimensions());
    let bbox = lifeview::interaction::BoundingBox {
        left: 0.0,
        top: 0.0,
        width: w as f64,
        height: h as f64,
    };

    let event = PointerEvent {
        client_x: 1.0,
        client_y: 1.0,
        modified: true,
    };
    session.on_pointer(&event, &bbox).unwrap();

    assert_eq!(alive(&session), vec![(0, 0), (0, 1), (1, 0), (7, 1), (7, 7)]);
}

#[test]
fn controls_are_updated_only_on_transitions() {
    #[derive(Default)]
    struct Count(usize);

    impl Controls for Count {
        fn show_playback(&mut self, _state: PlaybackState) {
            self.0 += 1;
        }
    }

    let mut host = TerminalHost::default();
    let universe = Universe::with_size(2, 2).unwrap();
    let geometry = ViewportGeometry::with_cell_size(1).unwrap();
    let mut session = Session::new(
        universe,
        Raster::new(5, 5),
        geometry,
        Duration::from_millis(10),
        Count::default(),
    )
    .unwrap();

    session.pause(&mut host);
    session.play(&mut host);
    session.play(&mut host);

    // initial label plus one transition
    assert_eq!(session.controls().0, 2);
}

proptest! {
    #[test]
    fn double_toggle_is_identity(row in 0u32..10, col in 0u32..6, seed in any::<u64>()) {
        let mut universe = Universe::with_size(6, 10).unwrap().with_seed(seed);
        universe.randomize();
        let mut session = session(universe, 1, 1000);

        let cells = session.engine().cells().to_vec();
        let surface = session.surface().clone();

        session.toggle(GridCoordinate::new(row, col)).unwrap();
        prop_assert_ne!(session.engine().cells(), &cells[..]);

        session.toggle(GridCoordinate::new(row, col)).unwrap();
        prop_assert_eq!(session.engine().cells(), &cells[..]);
        prop_assert_eq!(session.surface(), &surface);
    }
}
