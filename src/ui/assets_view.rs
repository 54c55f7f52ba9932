use crate::app::{App, FocusTarget};
use farmstead::sim::{AssetState, FarmControl, Family};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

pub fn render(frame: &mut Frame, area: Rect, app: &App, control: &FarmControl) {
    let highlight = app.focus() == FocusTarget::Assets;
    let border_style = if highlight {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let farm = control.farm();
    let mut items: Vec<ListItem> = farm
        .assets()
        .iter()
        .map(|asset| {
            let state_style = match asset.state() {
                AssetState::Alive => Style::default().fg(Color::LightGreen),
                AssetState::Diseased => Style::default().fg(Color::Yellow),
                AssetState::Dead => Style::default().fg(Color::DarkGray),
            };
            let family_color = match asset.family() {
                Family::Crop => Color::LightYellow,
                Family::Animal => Color::LightCyan,
            };
            let id = asset.id().map(|id| id.to_string()).unwrap_or_default();
            let header = Line::from(vec![
                Span::styled(
                    format!("{} {id}", asset.kind()),
                    Style::default()
                        .fg(family_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format!("| {}", asset.state()), state_style),
            ]);
            let readiness = if asset.is_harvest_eligible() {
                "ready to harvest".to_string()
            } else if asset.is_alive() {
                format!("harvest in {} days", asset.harvest_days())
            } else {
                "not harvestable".to_string()
            };
            let detail = Line::from(vec![Span::raw(format!(
                "Age {} days • {readiness} • worth {}",
                asset.age(),
                asset.profit()
            ))]);
            ListItem::new(vec![header, detail])
        })
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Line::from(vec![Span::raw(
            "No assets yet. Visit the market.",
        )])));
    }

    let title = format!("Assets ({}/{})", farm.living_count(), farm.capacity());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !farm.assets().is_empty() {
        state.select(Some(app.selected_asset.min(farm.assets().len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
