use std::time::Duration;

/// Default redraw cadence.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Whether state changes are waiting to be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderState {
    #[default]
    Clean,
    Dirty,
}

/// Collapses any number of state changes between two timer ticks into at
/// most one render.
///
/// Input can arrive thousands of times per second; drawing happens only when
/// a tick finds the state [`RenderState::Dirty`].  Marking dirty repeatedly
/// before the tick is the same as marking it once.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    state:   RenderState,
    renders: u64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> RenderState {
        self.state
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state == RenderState::Dirty
    }

    /// Record that something worth drawing changed.
    pub fn mark_dirty(&mut self) {
        self.state = RenderState::Dirty;
    }

    /// Called on every timer tick.  Returns `true` when a render should run
    /// now; the caller reports back through [`Self::render_completed`].
    #[must_use]
    pub fn on_tick(&mut self) -> bool {
        self.is_dirty()
    }

    /// Clear the flag once a frame has actually been produced.
    pub fn render_completed(&mut self) {
        self.state = RenderState::Clean;
        self.renders += 1;
    }

    /// Renders completed so far.
    #[inline]
    pub fn renders(&self) -> u64 {
        self.renders
    }
}
