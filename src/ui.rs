use ratatui::{prelude::*, widgets::*};

use crate::game::{OptionStatus, OptionView, StepStatus};
use crate::messages::View;

/// Views reachable from `active`; the profile entry is hidden on the login view
fn nav_views(active: View) -> Vec<View> {
    match active {
        View::Login | View::Profile => vec![active],
        View::Game | View::Results => vec![active, View::Profile],
    }
}

/// Header navigation
pub fn render_nav(active: View) -> Tabs<'static> {
    let views = nav_views(active);
    let selected = views.iter().position(|v| *v == active).unwrap_or(0);
    let titles: Vec<Line> = views.iter().map(|v| Line::from(v.title())).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Colour for an answer option
pub fn option_style(status: OptionStatus) -> Style {
    match status {
        OptionStatus::Selected => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        OptionStatus::Correct => Style::default().fg(Color::Green).bold(),
        OptionStatus::Incorrect => Style::default().fg(Color::Red).bold(),
        OptionStatus::Neutral => Style::default(),
    }
}

/// One answer option: focus marker, letter, text and verdict mark
pub fn option_line(option: &OptionView, focused: bool) -> Line<'static> {
    let marker = if focused && !option.inert { "> " } else { "  " };
    let mark = match option.status {
        OptionStatus::Correct => " ✔",
        OptionStatus::Incorrect => " ✖",
        _ => "",
    };
    let mut style = option_style(option.status);
    if option.inert && option.status == OptionStatus::Neutral {
        style = style.fg(Color::DarkGray);
    }

    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("[{}] ", option.letter), style),
        Span::styled(format!("{}{}", option.text, mark), style),
    ])
}

/// Progress dots, one per question
pub fn progress_line(steps: &[StepStatus]) -> Line<'static> {
    let spans: Vec<Span> = steps
        .iter()
        .map(|step| {
            let (symbol, color) = match step {
                StepStatus::Active => ("◉", Color::Yellow),
                StepStatus::Correct => ("●", Color::Green),
                StepStatus::Incorrect => ("●", Color::Red),
                StepStatus::Pending => ("○", Color::Gray),
            };
            Span::styled(format!("{} ", symbol), Style::default().fg(color))
        })
        .collect();
    Line::from(spans).centered()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_option_line_marks_verdict() {
        let option = OptionView {
            letter: 'B',
            text: String::from("Madrid"),
            status: OptionStatus::Incorrect,
            inert: true,
        };
        assert_eq!(text(&option_line(&option, true)), "  [B] Madrid ✖");

        let option = OptionView {
            status: OptionStatus::Selected,
            inert: false,
            ..option
        };
        assert_eq!(text(&option_line(&option, true)), "> [B] Madrid");
    }

    #[test]
    fn test_nav_lists_reachable_views() {
        assert_eq!(nav_views(View::Login), vec![View::Login]);
        assert_eq!(nav_views(View::Game), vec![View::Game, View::Profile]);
        assert_eq!(nav_views(View::Results), vec![View::Results, View::Profile]);
        assert_eq!(nav_views(View::Profile), vec![View::Profile]);
    }

    #[test]
    fn test_progress_line() {
        let line = progress_line(&[StepStatus::Correct, StepStatus::Active, StepStatus::Pending]);
        assert_eq!(text(&line), "● ◉ ○ ");
    }
}
