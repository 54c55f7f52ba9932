use crate::app::App;
use farmstead::sim::FarmControl;
use farmstead::sim::market::{self, MARKET_ITEMS};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

pub fn render(frame: &mut Frame, app: &App, control: &FarmControl) {
    let area = centered_rect(60, 70, frame.size());
    frame.render_widget(Clear, area);
    let block = Block::default().title("County Market").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(inner);

    let money = control.farm().money();
    let items: Vec<ListItem> = MARKET_ITEMS
        .iter()
        .map(|item| {
            let cost = market::action_cost(control, item.action);
            let affordable = cost.map(|cost| money >= cost).unwrap_or(true);
            let name_style = Style::default()
                .fg(if affordable {
                    Color::Yellow
                } else {
                    Color::DarkGray
                })
                .add_modifier(Modifier::BOLD);
            let mut line = vec![Span::styled(item.name, name_style)];
            match cost {
                Some(cost) => line.push(Span::raw(format!("  [{cost}]"))),
                None => line.push(Span::styled(
                    "  [varies]",
                    Style::default().fg(Color::Gray),
                )),
            }
            ListItem::new(vec![Line::from(line), Line::from(item.description)])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("For Sale"))
        .highlight_symbol("▶ ")
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default();
    state.select(Some(app.selected_market_item.min(MARKET_ITEMS.len() - 1)));
    frame.render_stateful_widget(list, layout[0], &mut state);

    let footer = Paragraph::new(vec![Line::from(vec![
        Span::raw(format!(
            "Money: {money}  •  Room: {}/{}",
            control.farm().living_count(),
            control.farm().capacity()
        )),
        Span::raw("  •  Enter to buy  •  Esc/M to close"),
    ])])
    .wrap(Wrap { trim: true });
    frame.render_widget(footer, layout[1]);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal[1]
}
