use farmstead::sim::{DayReport, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Assets,
    Farmers,
}

#[derive(Debug, Default)]
pub struct App {
    focus: FocusTarget,
    pub selected_asset: usize,
    pub selected_farmer: usize,
    pub selected_market_item: usize,
    pub market_open: bool,
    pub last_report: Option<DayReport>,
    pub outcome: Option<SimError>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Assets => FocusTarget::Farmers,
            FocusTarget::Farmers => FocusTarget::Assets,
        };
    }

    pub fn toggle_market(&mut self) {
        self.market_open = !self.market_open;
        if self.market_open {
            self.selected_market_item = 0;
        }
    }

    /// Once a run has ended no further turns are played.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn clamp_asset_selection(&mut self, len: usize) {
        self.selected_asset = clamp(self.selected_asset, len);
    }

    pub fn clamp_farmer_selection(&mut self, len: usize) {
        self.selected_farmer = clamp(self.selected_farmer, len);
    }

    pub fn move_selection(&mut self, delta: isize, assets: usize, farmers: usize) {
        match self.focus {
            FocusTarget::Assets => self.selected_asset = wrap(self.selected_asset, delta, assets),
            FocusTarget::Farmers => {
                self.selected_farmer = wrap(self.selected_farmer, delta, farmers)
            }
        }
    }
}

fn clamp(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

fn wrap(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (selected as isize + delta).rem_euclid(len as isize) as usize
}
