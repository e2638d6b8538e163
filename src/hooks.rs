// Collaborator hooks - Engine-facing calls with no presentation effect
//
// The surrounding engine calls these around its frame loop. None of them
// touch the pipeline; the input tick is the only one that does anything,
// and only through an injected event pump.

/// Callback deciding whether the pointer should stay grabbed
pub type GrabMouseCallback = fn() -> bool;

/// Input event source pumped once per game tick
///
/// Substitute an implementation to feed real events into the engine; the
/// default pump discards the tick.
pub trait EventPump {
    fn poll(&mut self);
}

/// Event pump that ignores every tick
#[derive(Debug, Default)]
pub struct NullEventPump;

impl EventPump for NullEventPump {
    fn poll(&mut self) {}
}

/// Hook surface the engine drives around each frame
pub struct FrameHooks {
    pump: Box<dyn EventPump>,
    grab_mouse: Option<GrabMouseCallback>,
}

impl FrameHooks {
    /// Hooks with the default (discarding) event pump
    pub fn new() -> Self {
        Self::with_pump(Box::new(NullEventPump))
    }

    /// Hooks with a caller-supplied event pump
    pub fn with_pump(pump: Box<dyn EventPump>) -> Self {
        Self {
            pump,
            grab_mouse: None,
        }
    }

    /// Start-of-frame notification
    pub fn start_frame(&mut self) {}

    /// Post-update notification for partial-redraw schemes
    pub fn update_no_blit(&mut self) {}

    /// Run one input tick through the injected event pump
    pub fn start_tic(&mut self) {
        self.pump.poll();
    }

    /// Set the window title; a full-screen device has none
    pub fn set_window_title(&mut self, _title: &str) {}

    /// Register the pointer-grab decision callback
    pub fn set_grab_mouse_callback(&mut self, callback: GrabMouseCallback) {
        self.grab_mouse = Some(callback);
    }

    /// The registered pointer-grab callback, if any
    pub fn grab_mouse_callback(&self) -> Option<GrabMouseCallback> {
        self.grab_mouse
    }

    /// Inspect command-line options relevant to presentation
    pub fn check_command_line(&mut self) {}

    /// Toggle the frame-rate indicator overlay
    pub fn display_fps_dots(&mut self, _dots_on: bool) {}

    /// Check whether the process was launched as a screensaver
    pub fn check_screensaver(&mut self) {}
}

impl Default for FrameHooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TICKS: AtomicUsize = AtomicUsize::new(0);

    struct CountingPump;

    impl EventPump for CountingPump {
        fn poll(&mut self) {
            TICKS.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_start_tic_delegates_to_injected_pump() {
        let mut hooks = FrameHooks::with_pump(Box::new(CountingPump));
        let before = TICKS.load(Ordering::SeqCst);
        hooks.start_tic();
        hooks.start_tic();
        assert_eq!(TICKS.load(Ordering::SeqCst) - before, 2);
    }

    #[test]
    fn test_default_pump_discards_ticks() {
        let mut hooks = FrameHooks::new();
        hooks.start_tic(); // must not panic or block
    }

    #[test]
    fn test_grab_mouse_callback_registration() {
        fn always() -> bool {
            true
        }

        let mut hooks = FrameHooks::new();
        assert!(hooks.grab_mouse_callback().is_none());
        hooks.set_grab_mouse_callback(always);
        assert!(hooks.grab_mouse_callback().is_some());
    }

    #[test]
    fn test_no_op_hooks_are_callable() {
        let mut hooks = FrameHooks::new();
        hooks.start_frame();
        hooks.update_no_blit();
        hooks.set_window_title("retrofb");
        hooks.check_command_line();
        hooks.display_fps_dots(true);
        hooks.check_screensaver();
    }
}
