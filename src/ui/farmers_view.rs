use crate::app::{App, FocusTarget};
use farmstead::sim::{FarmControl, FarmerKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

pub fn render(frame: &mut Frame, area: Rect, app: &App, control: &FarmControl) {
    let highlight = app.focus() == FocusTarget::Farmers;
    let border_style = if highlight {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let farmers = control.farm().farmers();
    let mut items: Vec<ListItem> = farmers
        .iter()
        .map(|farmer| {
            let kind = farmer.kind();
            let color = match kind {
                FarmerKind::Merchant => Color::Yellow,
                FarmerKind::Crops => Color::LightYellow,
                FarmerKind::Animal => Color::LightCyan,
                FarmerKind::Veterinary => Color::LightMagenta,
            };
            ListItem::new(vec![
                Line::from(Span::styled(kind.to_string(), Style::default().fg(color))),
                Line::from(Span::raw(kind.role())),
            ])
        })
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Line::from(vec![Span::raw(
            "Nobody on the payroll.",
        )])));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Farmers ({})", farmers.len()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !farmers.is_empty() {
        state.select(Some(app.selected_farmer.min(farmers.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
