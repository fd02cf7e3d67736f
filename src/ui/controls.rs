//! Clickable, focusable buttons shared by the stepper and the timer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::keybindings::Command;
use crate::ui::stepper::StepperAction;
use crate::ui::timer::TimerAction;

/// Every control on the page, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    Next,
    Start,
    Pause,
    Reset,
}

impl Control {
    pub fn all() -> &'static [Control] {
        &[
            Control::Previous,
            Control::Next,
            Control::Start,
            Control::Pause,
            Control::Reset,
        ]
    }

    /// The command a click on this control issues.
    ///
    /// Keyboard shortcuts issue the same commands, so both paths share one
    /// transition.
    pub fn command(&self) -> Command {
        match self {
            Control::Previous => Command::Stepper(StepperAction::Retreat),
            Control::Next => Command::Stepper(StepperAction::Advance),
            Control::Start => Command::Timer(TimerAction::Start),
            Control::Pause => Command::Timer(TimerAction::Pause),
            Control::Reset => Command::Timer(TimerAction::Reset),
        }
    }
}

/// A bordered, single-line button
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    accent: Color,
    enabled: bool,
    focused: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, accent: Color) -> Self {
        Self {
            label,
            accent,
            enabled: true,
            focused: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn style(&self) -> Style {
        if !self.enabled {
            return Style::default().fg(Color::DarkGray);
        }
        let style = Style::default().fg(self.accent).add_modifier(Modifier::BOLD);
        if self.focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.style();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused && self.enabled {
                Style::default().fg(Color::Yellow)
            } else {
                style
            });

        Paragraph::new(self.label)
            .style(style)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_commands() {
        assert_eq!(
            Control::Next.command(),
            Command::Stepper(StepperAction::Advance)
        );
        assert_eq!(
            Control::Previous.command(),
            Command::Stepper(StepperAction::Retreat)
        );
        assert_eq!(Control::Reset.command(), Command::Timer(TimerAction::Reset));
    }

    #[test]
    fn test_disabled_button_is_dimmed() {
        let button = Button::new("Next", Color::Blue).enabled(false).focused(true);
        assert_eq!(button.style().fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_button_renders_label() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        Button::new("Start", Color::Green).render(area, &mut buf);

        let middle: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(middle.contains("Start"));
    }
}
