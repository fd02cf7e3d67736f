//! Multi-step navigation with step indicators

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::error::WizardError;
use crate::ui::controls::{Button, Control};
use crate::ui::key_router::{KeyRouter, KeySubscription};
use crate::ui::keybindings::{shortcuts_for_context, ShortcutContext};

pub mod indicators;
pub mod types;

pub use indicators::{step_markers, StepIndicators, StepMarker};
pub use types::*;


/// Wizard navigation over a fixed, non-empty list of steps
#[derive(Debug)]
pub struct Stepper {
    steps: Vec<Step>,
    /// Always in `0..steps.len()`
    current: usize,
    /// Derived from `steps` and `current`; rebuilt only when `current` moves
    markers: Vec<StepMarker>,
    keys: Option<KeySubscription>,
}

impl Stepper {
    pub fn new(steps: Vec<Step>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        if let Some(index) = steps.iter().position(|s| s.title.trim().is_empty()) {
            return Err(WizardError::EmptyTitle { index });
        }

        let titles: Vec<&str> = steps.iter().map(|s| s.title.as_str()).collect();
        let markers = step_markers(&titles, 0);

        Ok(Self {
            steps,
            current: 0,
            markers,
            keys: None,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    pub fn markers(&self) -> &[StepMarker] {
        &self.markers
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.steps.len() - 1
    }

    pub fn can_advance(&self) -> bool {
        !self.is_last()
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_first()
    }

    /// Move to the next step; no-op on the last step
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.move_to(self.current + 1);
        true
    }

    /// Move to the previous step; no-op on the first step
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.move_to(self.current - 1);
        true
    }

    /// Apply a navigation action, returning whether the current step changed
    pub fn apply(&mut self, action: StepperAction) -> bool {
        match action {
            StepperAction::Advance => self.advance(),
            StepperAction::Retreat => self.retreat(),
        }
    }

    fn move_to(&mut self, index: usize) {
        tracing::debug!(from = self.current, to = index, "step changed");
        self.current = index;
        let titles: Vec<&str> = self.steps.iter().map(|s| s.title.as_str()).collect();
        self.markers = step_markers(&titles, self.current);
    }

    /// Label of the forward control
    pub fn next_label(&self) -> &'static str {
        if self.is_last() {
            "Finish"
        } else {
            "Next"
        }
    }

    /// Hint for a control, shown while it has focus
    pub fn hint(&self, control: Control) -> Option<&'static str> {
        match control {
            Control::Previous => Some("Go to previous step"),
            Control::Next if self.is_last() => Some("Finish process"),
            Control::Next => Some("Go to next step"),
            _ => None,
        }
    }

    /// Whether one of the stepper's controls is enabled
    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Previous => self.can_retreat(),
            Control::Next => self.can_advance(),
            _ => false,
        }
    }

    /// Attach the navigation shortcuts for as long as the stepper stays mounted
    pub fn mount(&mut self, router: &KeyRouter) {
        if self.keys.is_some() {
            return;
        }
        self.keys = Some(router.subscribe(
            "stepper",
            shortcuts_for_context(ShortcutContext::Stepper),
        ));
    }

    /// Detach the navigation shortcuts
    pub fn unmount(&mut self) {
        self.keys = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.keys.is_some()
    }

    /// Render indicators, current step content and navigation controls.
    ///
    /// Returns the screen area of each control for click handling.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        focus: Option<Control>,
    ) -> Vec<(Control, Rect)> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Indicators
                Constraint::Length(1), // Spacer
                Constraint::Min(5),    // Step content
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Navigation
            ])
            .split(area);

        frame.render_widget(StepIndicators::new(&self.markers), chunks[0]);

        let step = self.current_step();
        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let content_inner = content_block.inner(chunks[2]);
        frame.render_widget(content_block, chunks[2]);

        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Body
            ])
            .split(content_inner);

        let title = Paragraph::new(Line::from(Span::styled(
            step.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, content_chunks[0]);
        step.body.render(content_chunks[2], frame.buffer_mut());

        let nav = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Min(0),
                Constraint::Length(14),
            ])
            .split(chunks[4]);

        let previous = Button::new("Previous", Color::Gray)
            .enabled(self.can_retreat())
            .focused(focus == Some(Control::Previous));
        let next = Button::new(self.next_label(), Color::Blue)
            .enabled(self.can_advance())
            .focused(focus == Some(Control::Next));
        frame.render_widget(previous, nav[0]);
        frame.render_widget(next, nav[2]);

        vec![(Control::Previous, nav[0]), (Control::Next, nav[2])]
    }
}
