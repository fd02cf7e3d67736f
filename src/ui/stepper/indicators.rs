//! Row of numbered step markers

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One marker in the indicator row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMarker {
    /// 1-based position
    pub number: usize,
    pub title: String,
    /// Whether this is the current step
    pub current: bool,
}

/// Compute the markers for `titles` with `current` highlighted
pub fn step_markers<S: AsRef<str>>(titles: &[S], current: usize) -> Vec<StepMarker> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| StepMarker {
            number: index + 1,
            title: title.as_ref().to_string(),
            current: index == current,
        })
        .collect()
}

/// Renders precomputed markers as evenly spaced columns
pub struct StepIndicators<'a> {
    markers: &'a [StepMarker],
}

impl<'a> StepIndicators<'a> {
    pub fn new(markers: &'a [StepMarker]) -> Self {
        Self { markers }
    }
}

impl Widget for StepIndicators<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.markers.is_empty() {
            return;
        }

        let count = self.markers.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(self.markers.iter().map(|_| Constraint::Ratio(1, count)))
            .split(area);

        for (marker, column) in self.markers.iter().zip(columns.iter()) {
            let badge_bg = if marker.current {
                Color::Blue
            } else {
                Color::Gray
            };
            let badge = Span::styled(
                format!(" {} ", marker.number),
                Style::default()
                    .fg(Color::White)
                    .bg(badge_bg)
                    .add_modifier(Modifier::BOLD),
            );
            let title_style = if marker.current {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            Paragraph::new(vec![
                Line::from(badge),
                Line::from(Span::styled(marker.title.clone(), title_style)),
            ])
            .alignment(Alignment::Center)
            .render(*column, buf);
        }
    }
}
