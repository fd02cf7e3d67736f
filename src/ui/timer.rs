//! Elapsed-seconds counter driven by a tokio interval.
//!
//! While running, an interval task sends one [`TimerTick`] per period over a
//! channel that the UI loop drains. Ticks are stamped with the generation of
//! the run that produced them; stopping the timer bumps the generation and
//! aborts the task, so a tick already sitting in the channel when the timer
//! stops is discarded instead of counted.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::ui::controls::{Button, Control};
use crate::ui::key_router::{KeyRouter, KeySubscription};
use crate::ui::keybindings::{shortcuts_for_context, ShortcutContext};

/// Action requested of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Pause,
    Reset,
}

/// Observable timer state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub running: bool,
}

/// One interval callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub generation: u64,
}

/// Background task emitting ticks; aborted on drop
#[derive(Debug)]
struct IntervalTicker {
    handle: JoinHandle<()>,
}

impl IntervalTicker {
    fn spawn(
        runtime: &Handle,
        period: Duration,
        generation: u64,
        tx: UnboundedSender<TimerTick>,
    ) -> Self {
        let handle = runtime.spawn(async move {
            // First tick one full period after start; resuming never replays
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(TimerTick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start/pause/reset counter of elapsed seconds
#[derive(Debug)]
pub struct Timer {
    state: TimerState,
    period: Duration,
    /// Bumped on every start and every cancellation
    generation: u64,
    ticker: Option<IntervalTicker>,
    tick_tx: UnboundedSender<TimerTick>,
    keys: Option<KeySubscription>,
    torn_down: bool,
}

impl Timer {
    pub fn new(period: Duration, tick_tx: UnboundedSender<TimerTick>) -> Self {
        Self {
            state: TimerState::default(),
            period,
            generation: 0,
            ticker: None,
            tick_tx,
            keys: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Whether an interval task is currently scheduled
    pub fn has_pending_ticks(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start counting; no-op if already running or torn down
    pub fn start(&mut self) -> bool {
        if self.state.running || self.torn_down {
            return false;
        }
        self.state.running = true;
        self.generation += 1;

        match Handle::try_current() {
            Ok(runtime) => {
                self.ticker = Some(IntervalTicker::spawn(
                    &runtime,
                    self.period,
                    self.generation,
                    self.tick_tx.clone(),
                ));
            }
            Err(e) => {
                tracing::warn!("No async runtime, timer will only advance on manual ticks: {}", e);
            }
        }

        tracing::debug!(generation = self.generation, "timer started");
        true
    }

    /// Stop counting; no-op if already paused
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        self.cancel_ticks();
        tracing::debug!(elapsed = self.state.elapsed_seconds, "timer paused");
        true
    }

    /// Zero the counter and stop, whatever the prior state.
    ///
    /// Returns whether the visible state changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.state != TimerState::default();
        self.state = TimerState::default();
        self.cancel_ticks();
        tracing::debug!("timer reset");
        changed
    }

    /// Apply an action, returning whether the visible state changed
    pub fn apply(&mut self, action: TimerAction) -> bool {
        match action {
            TimerAction::Start => self.start(),
            TimerAction::Pause => self.pause(),
            TimerAction::Reset => self.reset(),
        }
    }

    /// The tick that the current run would deliver next
    pub fn current_tick(&self) -> TimerTick {
        TimerTick {
            generation: self.generation,
        }
    }

    /// Count one elapsed second if the tick belongs to the current run
    pub fn handle_tick(&mut self, tick: TimerTick) -> bool {
        if self.torn_down || !self.state.running || tick.generation != self.generation {
            tracing::trace!(
                tick = tick.generation,
                current = self.generation,
                "stale timer tick ignored"
            );
            return false;
        }
        self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        true
    }

    fn cancel_ticks(&mut self) {
        self.generation += 1;
        self.ticker = None;
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Start => !self.state.running,
            Control::Pause => self.state.running,
            Control::Reset => true,
            _ => false,
        }
    }

    pub fn hint(&self, control: Control) -> Option<&'static str> {
        match control {
            Control::Start => Some("Start the timer"),
            Control::Pause => Some("Pause the timer"),
            Control::Reset => Some("Reset the timer to zero"),
            _ => None,
        }
    }

    /// Attach the timer shortcuts for as long as the timer stays mounted
    pub fn mount(&mut self, router: &KeyRouter) {
        if self.keys.is_some() {
            return;
        }
        self.torn_down = false;
        self.keys = Some(router.subscribe("timer", shortcuts_for_context(ShortcutContext::Timer)));
    }

    /// Detach shortcuts and cancel the interval; later ticks are ignored
    pub fn unmount(&mut self) {
        self.keys = None;
        self.state.running = false;
        self.cancel_ticks();
        self.torn_down = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.keys.is_some()
    }

    /// Render the counter and its controls, returning control areas
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        focus: Option<Control>,
    ) -> Vec<(Control, Rect)> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Counter
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let status = if self.state.running {
            Span::styled(" running", Style::default().fg(Color::Green))
        } else {
            Span::styled(" paused", Style::default().fg(Color::DarkGray))
        };
        let counter = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Timer: {}s", self.state.elapsed_seconds),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            status,
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(counter, chunks[0]);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(11),
                Constraint::Length(1),
                Constraint::Length(11),
                Constraint::Length(1),
                Constraint::Length(11),
                Constraint::Min(0),
            ])
            .split(chunks[2]);

        let buttons = [
            (Control::Start, "Start", Color::Green, row[1]),
            (Control::Pause, "Pause", Color::Yellow, row[3]),
            (Control::Reset, "Reset", Color::Red, row[5]),
        ];

        let mut hits = Vec::with_capacity(buttons.len());
        for (control, label, accent, rect) in buttons {
            let button = Button::new(label, accent)
                .enabled(self.is_enabled(control))
                .focused(focus == Some(control));
            frame.render_widget(button, rect);
            hits.push((control, rect));
        }
        hits
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.ticker.is_some() {
            tracing::debug!("timer dropped while running, cancelling interval");
            self.cancel_ticks();
        }
    }
}
