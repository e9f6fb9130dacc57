// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recording session.

use kurbo::Point;
use ui_events::keyboard::{Key, KeyboardEvent, Modifiers, NamedKey};
use understudy_player::{AnimateOptions, Call, Statement};

use crate::buffer::ReplayBuffer;
use crate::error::StudioError;
use crate::host::StudioHost;

/// Seconds each registration waits after it has played.
pub const SETTLE_DELAY: f64 = 0.2;

/// Duration of recorded clicks.
pub const CLICK_DURATION: f64 = 0.4;

/// What a key press did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Not a studio chord.
    Ignored,
    /// Meta alone: the current scroll position was registered.
    ScrollRegistered,
    /// Meta + Escape: the session stopped. The host should suppress the key's default.
    Stopped,
}

/// A recording session over a [`StudioHost`].
///
/// The host forwards pointer moves, clicks and key presses while attached. Clicks and the
/// Meta key register groups of [`Statement`]s; Meta + Escape writes the script to the
/// clipboard and ends the session for good.
#[derive(Debug)]
pub struct Studio<H> {
    host: H,
    buffer: ReplayBuffer,
    pointer: Point,
    registered_scroll: f64,
    recording: bool,
}

fn to(pointer: Point) -> Call {
    Call::To {
        x: pointer.x,
        y: pointer.y,
        options: AnimateOptions::new(),
    }
}

fn scroll_to(y: f64) -> Call {
    Call::ScrollTo {
        x: 0.0,
        y,
        options: AnimateOptions::new(),
    }
}

fn settle() -> Statement {
    Statement::awaited(Call::Delay {
        seconds: SETTLE_DELAY,
    })
}

/// Meta held without Control, Alt or Shift.
fn is_meta_only(modifiers: Modifiers) -> bool {
    modifiers.contains(Modifiers::META)
        && !modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::SHIFT)
}

impl<H: StudioHost> Studio<H> {
    /// Attach to `host` and start recording.
    pub fn start(mut host: H) -> Self {
        host.attach();
        let registered_scroll = host.scroll_y();
        tracing::info!("studio started");
        tracing::info!("recording pointer moves");
        tracing::info!("click to register a click");
        tracing::info!("press Meta to register a scroll");
        tracing::info!("press Meta + Escape to stop and copy the script");
        Self {
            host,
            buffer: ReplayBuffer::new(),
            pointer: Point::ZERO,
            registered_scroll,
            recording: true,
        }
    }

    /// Whether input is still being recorded.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Registrations so far.
    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    /// Last observed pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Hand the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The real pointer moved to client `position`.
    pub fn pointer_moved(&mut self, position: Point) {
        if self.recording {
            self.pointer = position;
        }
    }

    /// The user clicked. Registers a move to the pointer and a click, preceded by a scroll
    /// restoration if the page scrolled since the last registration.
    pub fn clicked(&mut self) {
        if !self.recording {
            return;
        }
        let mut group = Vec::with_capacity(4);
        let scroll_y = self.host.scroll_y();
        if scroll_y != self.registered_scroll {
            self.registered_scroll = scroll_y;
            group.push(Statement::awaited(scroll_to(scroll_y)));
        }
        group.push(Statement::awaited(to(self.pointer)));
        group.push(Statement::awaited(Call::Click {
            options: AnimateOptions::new().duration(CLICK_DURATION),
        }));
        group.push(settle());
        tracing::info!(x = self.pointer.x, y = self.pointer.y, "click registered");
        self.buffer.push(group);
    }

    /// A key went down with `modifiers` held.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Result<KeyAction, StudioError> {
        if !self.recording || !is_meta_only(modifiers) {
            return Ok(KeyAction::Ignored);
        }
        if *key == Key::Named(NamedKey::Escape) {
            self.stop()?;
            return Ok(KeyAction::Stopped);
        }
        let scroll_y = self.host.scroll_y();
        self.registered_scroll = scroll_y;
        self.buffer.push([
            Statement::detached(to(self.pointer)),
            Statement::awaited(scroll_to(scroll_y)),
            settle(),
        ]);
        tracing::info!(scroll_y, "scroll registered");
        Ok(KeyAction::ScrollRegistered)
    }

    /// Forward a keyboard event. Only key presses count.
    pub fn keyboard(&mut self, event: &KeyboardEvent) -> Result<KeyAction, StudioError> {
        if !event.state.is_down() {
            return Ok(KeyAction::Ignored);
        }
        self.key_down(&event.key, event.modifiers)
    }

    /// End the session: detach from the host and copy the script to the clipboard.
    ///
    /// Returns the script. The session is over even if the clipboard write fails.
    pub fn stop(&mut self) -> Result<String, StudioError> {
        if !self.recording {
            return Err(StudioError::AlreadyStopped);
        }
        self.recording = false;
        self.host.detach();
        let script = self
            .buffer
            .script(&self.host.location(), self.host.viewport());
        self.host.write_clipboard(&script)?;
        tracing::info!(registrations = self.buffer.len(), "script copied to clipboard");
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipboardError;
    use kurbo::Size;
    use understudy_player::parse_script;

    #[derive(Debug, Default)]
    struct Page {
        scroll_y: f64,
        attached: bool,
        clipboard: Option<String>,
        clipboard_denied: bool,
    }

    impl StudioHost for Page {
        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn location(&self) -> String {
            "https://example.com/pricing".to_owned()
        }

        fn viewport(&self) -> Size {
            Size::new(1440.0, 900.0)
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.clipboard_denied {
                return Err(ClipboardError("permission denied".to_owned()));
            }
            self.clipboard = Some(text.to_owned());
            Ok(())
        }

        fn attach(&mut self) {
            self.attached = true;
        }

        fn detach(&mut self) {
            self.attached = false;
        }
    }

    fn lines(buffer: &ReplayBuffer) -> Vec<String> {
        buffer.statements().map(ToString::to_string).collect()
    }

    fn escape() -> Key {
        Key::Named(NamedKey::Escape)
    }

    fn letter() -> Key {
        Key::Character("m".into())
    }

    #[test]
    fn click_registers_move_click_and_settle() {
        let mut studio = Studio::start(Page::default());
        assert!(studio.host().attached);
        studio.pointer_moved(Point::new(120.0, 48.5));
        studio.clicked();
        assert_eq!(
            lines(studio.buffer()),
            [
                "await mouse.to(120, 48.5)",
                "await mouse.click({ duration: .4 })",
                "await mouse.delay(.2)",
            ]
        );
    }

    #[test]
    fn click_after_scrolling_restores_the_scroll_first() {
        let mut studio = Studio::start(Page::default());
        studio.pointer_moved(Point::new(10.0, 20.0));
        studio.clicked();

        studio.host.scroll_y = 640.0;
        studio.clicked();
        // Same scroll again: no restoration.
        studio.clicked();

        let groups = studio.buffer().groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1][0].to_string(), "await mouse.scrollTo(0, 640)");
        assert_eq!(groups[1][1].to_string(), "await mouse.to(10, 20)");
        assert_eq!(groups[2][0].to_string(), "await mouse.to(10, 20)");
    }

    #[test]
    fn meta_alone_registers_a_scroll_correction() {
        let mut studio = Studio::start(Page::default());
        studio.pointer_moved(Point::new(5.0, 6.0));
        studio.host.scroll_y = 300.0;

        assert_eq!(
            studio.key_down(&Key::Named(NamedKey::Meta), Modifiers::META),
            Ok(KeyAction::ScrollRegistered)
        );
        assert_eq!(
            lines(studio.buffer()),
            [
                "mouse.to(5, 6)",
                "await mouse.scrollTo(0, 300)",
                "await mouse.delay(.2)",
            ]
        );

        // The scroll is registered: the next click does not restore it.
        studio.clicked();
        assert_eq!(studio.buffer().groups()[1][0].to_string(), "await mouse.to(5, 6)");
    }

    #[test]
    fn other_chords_are_ignored() {
        let mut studio = Studio::start(Page::default());
        for modifiers in [
            Modifiers::empty(),
            Modifiers::META | Modifiers::SHIFT,
            Modifiers::META | Modifiers::CONTROL,
            Modifiers::META | Modifiers::ALT,
            Modifiers::CONTROL,
        ] {
            assert_eq!(studio.key_down(&letter(), modifiers), Ok(KeyAction::Ignored));
            assert_eq!(studio.key_down(&escape(), modifiers), Ok(KeyAction::Ignored));
        }
        assert!(studio.buffer().is_empty());
        assert!(studio.is_recording());
    }

    #[test]
    fn meta_escape_copies_a_replayable_script_and_ends_the_session() {
        let mut studio = Studio::start(Page::default());
        studio.pointer_moved(Point::new(200.0, 100.0));
        studio.clicked();
        studio.host.scroll_y = 50.0;
        studio.key_down(&letter(), Modifiers::META).unwrap();

        assert_eq!(
            studio.key_down(&escape(), Modifiers::META),
            Ok(KeyAction::Stopped)
        );
        assert!(!studio.is_recording());
        assert!(!studio.host().attached);

        let script = studio.host().clipboard.clone().unwrap();
        assert!(script.starts_with("// Url: https://example.com/pricing\n// Viewport: 1440x900\n"));
        let statements = parse_script(&script).unwrap();
        // Bootstrap (initHoversHack, initReactEvents) and both registrations.
        assert_eq!(statements.len(), 2 + 3 + 3);
        assert_eq!(statements[0].call, Call::InitHoversHack);
        assert_eq!(statements[1].call, Call::InitReactEvents);

        // Inert from now on.
        studio.clicked();
        assert_eq!(studio.buffer().len(), 2);
        assert_eq!(studio.key_down(&escape(), Modifiers::META), Ok(KeyAction::Ignored));
        assert_eq!(studio.stop(), Err(StudioError::AlreadyStopped));
    }

    #[test]
    fn clipboard_failure_is_reported_after_detaching() {
        let page = Page {
            clipboard_denied: true,
            ..Page::default()
        };
        let mut studio = Studio::start(page);
        studio.clicked();
        assert_eq!(
            studio.stop(),
            Err(StudioError::Clipboard(ClipboardError(
                "permission denied".to_owned()
            )))
        );
        assert!(!studio.host().attached);
        assert!(!studio.is_recording());
    }
}
