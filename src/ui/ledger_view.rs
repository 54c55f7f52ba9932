use crate::app::App;
use farmstead::sim::{FarmControl, Family};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, app: &App, control: &FarmControl) {
    let sections = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(area);

    let stats_block = Block::default().title("Ledger").borders(Borders::ALL);
    let stats_area = stats_block.inner(sections[0]);
    frame.render_widget(stats_block, sections[0]);

    let bonus = |rate: f64| format!("+{:.0}%", rate * 100.0);
    let mut stats_lines = vec![
        Line::from(vec![
            Span::styled("Money", Style::default().fg(Color::Yellow)),
            Span::raw(format!(": {}", control.farm().money())),
            Span::raw("    Costs/day: "),
            Span::raw(format!("{}", control.operating_costs())),
        ]),
        Line::from(vec![
            Span::styled("Ready now", Style::default().fg(Color::LightGreen)),
            Span::raw(format!(
                ": crops {} • animals {}",
                control.projected_harvest(Family::Crop),
                control.projected_harvest(Family::Animal)
            )),
        ]),
        Line::from(vec![Span::raw(format!(
            "Bonuses: merchant {} • crops {} • animals {}",
            bonus(control.merchant_harvest_bonus()),
            bonus(control.crop_harvest_bonus()),
            bonus(control.animal_harvest_bonus())
        ))]),
        Line::from(vec![Span::raw(format!(
            "Healthy: {} crops • {} animals • vets {}",
            control.healthy_crops().len(),
            control.healthy_animals().len(),
            control.number_of_veterinary_farmers()
        ))]),
    ];
    if let Some(report) = &app.last_report {
        stats_lines.push(Line::from(vec![Span::raw(format!(
            "Day {}: +{} crops, +{} animals, -{} costs",
            report.day, report.crop_revenue, report.animal_revenue, report.operating_costs
        ))]));
        stats_lines.push(Line::from(vec![Span::raw(format!(
            "        {} fell ill, {} died",
            report.newly_diseased, report.newly_dead
        ))]));
    }

    let paragraph = Paragraph::new(stats_lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, stats_area);

    let log_block = Block::default().title("Farm Journal").borders(Borders::ALL);
    let log_area = log_block.inner(sections[1]);
    frame.render_widget(log_block, sections[1]);

    let mut items: Vec<ListItem> = control
        .messages()
        .map(|msg| ListItem::new(msg.clone()))
        .collect();
    if items.is_empty() {
        items.push(ListItem::new("Quiet on the farm."));
    }
    frame.render_widget(List::new(items), log_area);
}
