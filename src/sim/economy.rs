use crate::sim::assets::{Asset, Family};
use crate::sim::farmers::{Farmer, FarmerKind};

// Whole percentage points per farmer of the matching role.
pub const MERCHANT_BONUS_PCT: i64 = 4;
pub const CROP_BONUS_PCT: i64 = 4;
pub const ANIMAL_BONUS_PCT: i64 = 2;

pub fn count_role(farmers: &[Farmer], kind: FarmerKind) -> usize {
    farmers.iter().filter(|farmer| farmer.kind() == kind).count()
}

pub fn merchant_bonus_pct(farmers: &[Farmer]) -> i64 {
    count_role(farmers, FarmerKind::Merchant) as i64 * MERCHANT_BONUS_PCT
}

pub fn crop_bonus_pct(farmers: &[Farmer]) -> i64 {
    count_role(farmers, FarmerKind::Crops) as i64 * CROP_BONUS_PCT
}

pub fn animal_bonus_pct(farmers: &[Farmer]) -> i64 {
    count_role(farmers, FarmerKind::Animal) as i64 * ANIMAL_BONUS_PCT
}

/// Bonus for harvesting `family`: the family's own role plus merchants.
pub fn family_bonus_pct(farmers: &[Farmer], family: Family) -> i64 {
    let role = match family {
        Family::Crop => crop_bonus_pct(farmers),
        Family::Animal => animal_bonus_pct(farmers),
    };
    role + merchant_bonus_pct(farmers)
}

pub fn pct_to_rate(pct: i64) -> f64 {
    pct as f64 / 100.0
}

/// `raw × (1 + pct/100)`, truncated toward zero.
pub fn apply_bonus(raw: i64, bonus_pct: i64) -> i64 {
    raw * (100 + bonus_pct) / 100
}

pub fn raw_harvest_value<'a>(assets: impl IntoIterator<Item = &'a Asset>, family: Family) -> i64 {
    assets
        .into_iter()
        .filter(|asset| asset.family() == family && asset.is_harvest_eligible())
        .map(Asset::profit)
        .sum()
}

pub fn upkeep_total(assets: &[Asset]) -> i64 {
    assets
        .iter()
        .filter(|asset| !asset.is_dead())
        .map(|asset| asset.kind().profile().upkeep)
        .sum()
}

pub fn wages_total(farmers: &[Farmer], wage: i64) -> i64 {
    farmers.len() as i64 * wage
}

/// Probability that a living asset falls ill today.
pub fn disease_chance(base: f64, family: Family, vets: usize, mitigation: f64) -> f64 {
    match family {
        Family::Crop => base,
        Family::Animal => (base * (1.0 - mitigation * vets as f64)).max(0.0),
    }
}
