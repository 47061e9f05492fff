//! Showing a [`Raster`] in a terminal, and turning terminal input back into front end input.
//!
//! Pixels are drawn with the upper half block `▀`: the glyph's foreground is the upper pixel, its
//! background the lower one. One terminal cell is therefore one pixel wide and two pixels tall,
//! which makes the displayed surface a different shape from the raster itself. Clicks are mapped
//! back through that scaling like any other displayed surface.

use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use crate::color::Rgb;
use crate::controls;
use crate::controls::Action;
use crate::controls::Controls;
use crate::controls::Keymap;
use crate::interaction::BoundingBox;
use crate::interaction::PointerEvent;
use crate::scheduler::FrameHandle;
use crate::scheduler::FrameHost;
use crate::scheduler::PlaybackState;
use crate::surface::Raster;
use crate::surface::Surface;

const UPPER_HALF_BLOCK: char = '\u{2580}';

/// Input the front end reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Action(Action),
    Pointer(PointerEvent),

    /// The terminal changed size; everything must be repainted.
    Repaint,
}

/// Terminal cells needed to show a `width` by `height` pixel raster.
pub fn displayed_size(width: u32, height: u32) -> (u16, u16) {
    let clamp = |n: u32| n.min(u16::MAX as u32) as u16;

    (clamp(width), clamp(height.div_ceil(2)))
}

/// Where a raster drawn at `origin` sits, in terminal cells.
pub fn bounding_box(origin: (u16, u16), raster: &Raster) -> BoundingBox {
    let (cols, rows) = displayed_size(raster.width(), raster.height());

    BoundingBox {
        left: origin.0 as f64,
        top: origin.1 as f64,
        width: cols as f64,
        height: rows as f64,
    }
}

/// Converts a crossterm event into front end input.
pub fn convert_event(event: CtEvent, keymap: &Keymap) -> Option<Input> {
    match event {
        CtEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,

        CtEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }) => Some(Input::Action(Action::Quit)),

        CtEvent::Key(KeyEvent {
            code: KeyCode::Esc, ..
        }) => Some(Input::Action(Action::Quit)),

        CtEvent::Key(KeyEvent {
            code: KeyCode::Char(c),
            ..
        }) => keymap.action(c).map(Input::Action),

        CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }) => {
            let modified = modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);

            // aim at the middle of the terminal cell
            Some(Input::Pointer(PointerEvent {
                client_x: column as f64 + 0.5,
                client_y: row as f64 + 0.5,
                modified,
            }))
        }

        CtEvent::Resize(..) => Some(Input::Repaint),

        _ => None,
    }
}

/// Queue the whole raster, top left corner at `origin`.
pub fn blit<W: Write>(out: &mut W, raster: &Raster, origin: (u16, u16)) -> io::Result<()> {
    let (_, rows) = displayed_size(raster.width(), raster.height());

    for r in 0..rows as u32 {
        queue!(out, cursor::MoveTo(origin.0, origin.1 + r as u16))?;

        let upper = raster.row(2 * r);
        let lower = (2 * r + 1 < raster.height()).then(|| raster.row(2 * r + 1));

        for (x, &top) in upper.iter().enumerate() {
            let bottom = match lower {
                Some(lower) => to_ct_color(lower[x]),
                None => style::Color::Reset,
            };

            queue!(
                out,
                style::SetForegroundColor(to_ct_color(top)),
                style::SetBackgroundColor(bottom),
                style::Print(UPPER_HALF_BLOCK),
            )?;
        }

        queue!(out, style::ResetColor)?;
    }

    Ok(())
}

/// Queue the status line: playback affordance, generation and key legend.
pub fn status_line<W: Write>(
    out: &mut W,
    row: u16,
    controls: &TerminalControls,
    generation: u64,
    keymap: &Keymap,
) -> io::Result<()> {
    let key = |action| match keymap.key_for(action) {
        Some(' ') => "space".to_string(),
        Some(c) => c.to_string(),
        None => "-".to_string(),
    };

    let status = format!(
        " [{}] {} | [{}] randomize | [{}] clear | click: toggle, ctrl+click: glider | gen {} ",
        key(Action::TogglePlayback),
        controls.label(),
        key(Action::Randomize),
        key(Action::Clear),
        generation,
    );

    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(status),
    )
}

pub fn to_ct_color(c: Rgb) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// The play/pause affordance shown in the status line.
#[derive(Debug, Default)]
pub struct TerminalControls {
    state: PlaybackState,
}

impl TerminalControls {
    pub fn label(&self) -> &'static str {
        controls::playback_label(self.state)
    }
}

impl Controls for TerminalControls {
    fn show_playback(&mut self, state: PlaybackState) {
        self.state = state;
    }
}

/// Frame callbacks driven by the main loop: at most one frame is armed at a time, and the loop
/// takes it once per iteration.
#[derive(Debug, Default)]
pub struct TerminalHost {
    next: u64,
    armed: Option<FrameHandle>,
}

impl TerminalHost {
    /// Disarm and return the pending frame, if any.
    pub fn take_armed(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }
}

impl FrameHost for TerminalHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;

        let handle = FrameHandle(self.next);
        self.armed = Some(handle);

        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}
