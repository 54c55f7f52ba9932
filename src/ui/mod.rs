use crate::app::App;
use farmstead::sim::FarmControl;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub mod assets_view;
pub mod farmers_view;
pub mod ledger_view;
pub mod market_view;

pub fn render(frame: &mut Frame, app: &App, control: &FarmControl) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], app, control);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(layout[1]);

    assets_view::render(frame, columns[0], app, control);
    farmers_view::render(frame, columns[1], app, control);
    ledger_view::render(frame, columns[2], app, control);

    render_footer(frame, layout[2]);

    if app.market_open {
        market_view::render(frame, app, control);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, control: &FarmControl) {
    let farm = control.farm();
    let status = match &app.outcome {
        None => Span::styled("Running", Style::default().fg(Color::Green)),
        Some(outcome) => Span::styled(
            outcome.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Farmstead",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  Day: "),
            Span::styled(
                format!("{}", control.day()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  •  Money: "),
            Span::styled(
                format!("{}", farm.money()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("  •  Goal: {}", control.config().win_threshold)),
            Span::raw(format!("  •  Acres: {:.1}", farm.acreage())),
            Span::raw("  •  "),
            status,
        ]),
        Line::from(vec![Span::raw(
            "Tab shifts focus between assets and farmers. N plays the next day.",
        )]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Hotkeys: "),
        Span::styled("[N]", Style::default().fg(Color::Yellow)),
        Span::raw(" next day  •  "),
        Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
        Span::raw(" navigate  •  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" switch focus  •  "),
        Span::styled("[M]", Style::default().fg(Color::Yellow)),
        Span::raw(" market  •  "),
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw(" move perished to back  •  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
