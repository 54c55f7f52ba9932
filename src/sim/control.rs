use super::assets::{Asset, AssetFactory, AssetId, AssetKind, Family};
use super::economy;
use super::farm::{Farm, FarmError};
use super::farmers::{FarmerControl, FarmerKind};
use super::random::{RandomSource, RngSource};
use super::state::AssetState;
use crate::config::SimConfig;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MAX_MESSAGES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub day: u32,
    pub operating_costs: i64,
    pub crop_revenue: i64,
    pub animal_revenue: i64,
    pub newly_diseased: usize,
    pub newly_dead: usize,
    pub money: i64,
}

#[derive(Debug, Clone, Copy, Default)]
struct HealthTally {
    diseased: usize,
    died: usize,
}

pub struct FarmControl<R = RngSource<StdRng>> {
    farm: Farm,
    config: SimConfig,
    rng: R,
    factory: AssetFactory,
    farmer_control: FarmerControl,
    day: u32,
    idle_days: u32,
    messages: VecDeque<String>,
}

impl FarmControl {
    pub fn from_config(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        FarmControl::new(config, rng)
    }
}

impl<R: RandomSource> FarmControl<R> {
    pub fn empty(config: SimConfig, rng: R) -> Self {
        let farm = Farm::new(config.starting_money, config.assets_per_acre);
        Self {
            farm,
            config,
            rng,
            factory: AssetFactory,
            farmer_control: FarmerControl,
            day: 0,
            idle_days: 0,
            messages: VecDeque::with_capacity(MAX_MESSAGES),
        }
    }

    pub fn new(config: SimConfig, rng: R) -> Self {
        let mut control = Self::empty(config, rng);
        for _ in 0..control.config.initial_farmers {
            let farmer = control.farmer_control.random_farmer(&mut control.rng);
            control.farm.add_farmer(farmer);
        }
        control.generate_initial_assets();
        control.push_message(format!(
            "Farm founded with {} farmers and {} assets.",
            control.farm.farmer_count(),
            control.farm.assets().len()
        ));
        control
    }

    pub fn farm(&self) -> &Farm {
        &self.farm
    }

    pub fn farm_mut(&mut self) -> &mut Farm {
        &mut self.farm
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.push_message(message.into());
    }

    pub fn generate_initial_assets(&mut self) -> usize {
        let mut added = 0;
        for _ in 0..self.config.initial_assets {
            let asset = self.factory.random_asset(&mut self.rng);
            match self.farm.add_asset(asset) {
                Ok(_) => added += 1,
                Err(err) => {
                    warn!(%err, "initial stock truncated");
                    break;
                }
            }
        }
        added
    }

    pub fn hire_farmer(&mut self, kind: FarmerKind) -> Result<(), SimError> {
        self.farm.spend(self.config.farmer_hire_cost)?;
        self.farm.add_farmer(self.farmer_control.create_farmer(kind));
        info!(%kind, money = self.farm.money(), "farmer hired");
        self.push_message(format!("Hired a {kind} farmer ({}).", kind.role()));
        Ok(())
    }

    pub fn hire_random_farmer(&mut self) -> Result<FarmerKind, SimError> {
        let kind = self.farmer_control.random_farmer(&mut self.rng).kind();
        self.hire_farmer(kind)?;
        Ok(kind)
    }

    pub fn purchase_asset(&mut self, kind: AssetKind) -> Result<AssetId, SimError> {
        let asset = self.factory.create_kind(kind);
        self.buy(asset)
    }

    pub fn purchase_random_asset(&mut self) -> Result<AssetId, SimError> {
        let asset = self.factory.random_asset(&mut self.rng);
        self.buy(asset)
    }

    fn buy(&mut self, asset: Asset) -> Result<AssetId, SimError> {
        if !self.farm.has_room() {
            return Err(FarmError::AtCapacity {
                capacity: self.farm.capacity(),
            }
            .into());
        }
        let kind = asset.kind();
        let cost = kind.purchase_cost();
        self.farm.spend(cost)?;
        let id = self.farm.add_asset(asset)?;
        info!(%kind, %id, cost, money = self.farm.money(), "asset purchased");
        self.push_message(format!("Bought {kind} {id} for {cost}."));
        Ok(id)
    }

    pub fn buy_acre(&mut self) -> Result<f64, SimError> {
        self.farm.spend(self.config.acre_cost)?;
        self.farm.add_acreage(self.config.acre_increment);
        let acreage = self.farm.acreage();
        info!(acreage, money = self.farm.money(), "acreage purchased");
        self.push_message(format!("Farm expanded to {acreage:.1} acres."));
        Ok(acreage)
    }

    pub fn restock_perished(&mut self) -> usize {
        let perished = self.farm.clear_perished();
        let mut replaced = 0;
        for dead in &perished {
            let replacement = self.factory.create_asset_of_type(dead);
            if let Err(err) = self.buy(replacement) {
                warn!(%err, replaced, perished = perished.len(), "restock stopped");
                self.push_message(format!("Restock stopped: {err}"));
                break;
            }
            replaced += 1;
        }
        if !perished.is_empty() {
            self.push_message(format!(
                "Cleared {} perished assets, replaced {replaced}.",
                perished.len()
            ));
        }
        replaced
    }

    pub fn merchant_harvest_bonus(&self) -> f64 {
        economy::pct_to_rate(economy::merchant_bonus_pct(self.farm.farmers()))
    }

    pub fn crop_harvest_bonus(&self) -> f64 {
        economy::pct_to_rate(economy::crop_bonus_pct(self.farm.farmers()))
    }

    pub fn animal_harvest_bonus(&self) -> f64 {
        economy::pct_to_rate(economy::animal_bonus_pct(self.farm.farmers()))
    }

    pub fn number_of_veterinary_farmers(&self) -> usize {
        self.farm.count_farmers(FarmerKind::Veterinary)
    }

    /// What a harvest of `family` would pay right now, bonus included.
    pub fn projected_harvest(&self, family: Family) -> i64 {
        let raw = economy::raw_harvest_value(self.farm.assets(), family);
        economy::apply_bonus(raw, economy::family_bonus_pct(self.farm.farmers(), family))
    }

    pub fn operating_costs(&self) -> i64 {
        economy::upkeep_total(self.farm.assets())
            + economy::wages_total(self.farm.farmers(), self.config.farmer_wage)
    }

    pub fn harvest_crops(&mut self) -> Result<i64, SimError> {
        let total = self.harvest(Family::Crop);
        self.check_won()?;
        Ok(total)
    }

    // Running costs are charged before the harvests, so this is also the
    // day's solvency checkpoint.
    pub fn harvest_animals(&mut self) -> Result<i64, SimError> {
        let total = self.harvest(Family::Animal);
        self.check_solvent()?;
        self.check_won()?;
        Ok(total)
    }

    fn harvest(&mut self, family: Family) -> i64 {
        let bonus_pct = economy::family_bonus_pct(self.farm.farmers(), family);
        let mut raw = 0;
        let mut harvested = 0;
        for asset in self.farm.assets_mut() {
            if asset.family() == family && asset.is_harvest_eligible() {
                raw += asset.profit();
                asset.restart_harvest_cycle();
                harvested += 1;
            }
        }
        let total = economy::apply_bonus(raw, bonus_pct);
        self.farm.credit(total);
        debug!(?family, harvested, raw, bonus_pct, total, "harvest pass");
        if harvested > 0 {
            let label = match family {
                Family::Crop => "crops",
                Family::Animal => "animals",
            };
            self.push_message(format!("Harvested {harvested} {label} for {total}."));
        }
        total
    }

    fn check_won(&self) -> Result<(), SimError> {
        let money = self.farm.money();
        if money >= self.config.win_threshold {
            info!(money, day = self.day, "farm has won");
            return Err(SimError::Won { money });
        }
        Ok(())
    }

    fn check_solvent(&self) -> Result<(), SimError> {
        let money = self.farm.money();
        if money < 0 {
            warn!(money, day = self.day, "farm is bankrupt");
            return Err(SimError::Bankrupt {
                shortfall: -money,
                balance: money,
            });
        }
        Ok(())
    }

    pub fn healthy_crops(&self) -> Vec<&Asset> {
        self.healthy(Family::Crop)
    }

    pub fn healthy_animals(&self) -> Vec<&Asset> {
        self.healthy(Family::Animal)
    }

    fn healthy(&self, family: Family) -> Vec<&Asset> {
        self.farm
            .assets()
            .iter()
            .filter(|asset| asset.family() == family && asset.is_alive())
            .collect()
    }

    /// Ages every asset by one day, dead or alive, and moves every harvest
    /// countdown one step closer (past zero if nobody harvests).
    pub fn increment_day(&mut self) {
        for asset in self.farm.assets_mut() {
            asset.grow();
        }
        self.day += 1;
    }

    pub fn reorder_all_perished(&mut self) {
        self.farm.partition_perished();
        debug!(
            living = self.farm.living_count(),
            total = self.farm.assets().len(),
            "perished assets moved to the back"
        );
    }

    pub fn run_day(&mut self) -> Result<DayReport, SimError> {
        if self.day >= self.config.max_days {
            warn!(day = self.day, "day limit reached");
            return Err(SimError::Inconclusive {
                day: self.day,
                idle_days: self.idle_days,
            });
        }
        let aging = self.farm.living_count();

        self.increment_day();
        let operating_costs = self.charge_operating_costs();
        let crop_revenue = self.harvest_crops()?;
        let animal_revenue = self.harvest_animals()?;
        let health = self.apply_health_rules();

        let report = DayReport {
            day: self.day,
            operating_costs,
            crop_revenue,
            animal_revenue,
            newly_diseased: health.diseased,
            newly_dead: health.died,
            money: self.farm.money(),
        };

        let productive = crop_revenue > 0
            || animal_revenue > 0
            || aging > 0
            || health.diseased > 0
            || health.died > 0;
        if productive {
            self.idle_days = 0;
        } else {
            self.idle_days += 1;
            if self.idle_days >= self.config.stall_tolerance_days {
                warn!(day = self.day, idle_days = self.idle_days, "simulation stalled");
                return Err(SimError::Inconclusive {
                    day: self.day,
                    idle_days: self.idle_days,
                });
            }
        }

        info!(
            day = report.day,
            crops = report.crop_revenue,
            animals = report.animal_revenue,
            costs = report.operating_costs,
            money = report.money,
            "day complete"
        );
        Ok(report)
    }

    fn charge_operating_costs(&mut self) -> i64 {
        let costs = self.operating_costs();
        if costs > 0 {
            self.farm.charge(costs);
        }
        costs
    }

    fn apply_health_rules(&mut self) -> HealthTally {
        let vets = self.number_of_veterinary_farmers();
        let config = &self.config;
        let mut tally = HealthTally::default();
        let mut events = Vec::new();
        for asset in self.farm.assets_mut() {
            if asset.is_dead() {
                continue;
            }
            if asset.is_past_lifespan() {
                asset.mark_dead();
                tally.died += 1;
                events.push(format!("{} {} died of old age.", asset.kind(), id_label(asset)));
                continue;
            }
            match asset.state() {
                AssetState::Diseased => {
                    if self.rng.chance(config.diseased_death_chance) {
                        asset.mark_dead();
                        tally.died += 1;
                        events.push(format!(
                            "{} {} succumbed to disease.",
                            asset.kind(),
                            id_label(asset)
                        ));
                    }
                }
                AssetState::Alive => {
                    let chance = economy::disease_chance(
                        config.disease_chance,
                        asset.family(),
                        vets,
                        config.vet_mitigation,
                    );
                    if self.rng.chance(chance) && asset.mark_diseased().is_ok() {
                        tally.diseased += 1;
                        events.push(format!("{} {} fell ill.", asset.kind(), id_label(asset)));
                    }
                }
                AssetState::Dead => {}
            }
        }
        for event in events {
            self.push_message(event);
        }
        tally
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() >= MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

fn id_label(asset: &Asset) -> String {
    asset
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unregistered)".to_string())
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("farm has won with {money} in the bank")]
    Won { money: i64 },
    #[error("farm is bankrupt: short by {shortfall} (balance {balance})")]
    Bankrupt { shortfall: i64, balance: i64 },
    #[error("simulation inconclusive on day {day} after {idle_days} idle days")]
    Inconclusive { day: u32, idle_days: u32 },
    #[error(transparent)]
    Farm(FarmError),
}

impl SimError {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SimError::Farm(_))
    }
}

impl From<FarmError> for SimError {
    fn from(err: FarmError) -> Self {
        match err {
            FarmError::InsufficientFunds {
                required,
                available,
            } => SimError::Bankrupt {
                shortfall: required - available,
                balance: available,
            },
            other => SimError::Farm(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedSource;

    fn test_control() -> FarmControl<ScriptedSource> {
        FarmControl::empty(SimConfig::default(), ScriptedSource::quiet())
    }

    fn add_ready(control: &mut FarmControl<ScriptedSource>, kind: AssetKind, days: i32) -> AssetId {
        let mut asset = AssetFactory.create_kind(kind);
        asset.set_harvest_days(days);
        control.farm_mut().add_asset(asset).expect("room on farm")
    }

    fn hire(control: &mut FarmControl<ScriptedSource>, kinds: &[FarmerKind]) {
        for kind in kinds {
            control
                .farm_mut()
                .add_farmer(FarmerControl.create_farmer(*kind));
        }
    }

    #[test]
    fn empty_control_has_no_farmers() {
        let control = test_control();
        assert_eq!(control.farm().farmer_count(), 0);
        assert!(control.farm().assets().is_empty());
    }

    #[test]
    fn new_control_hires_and_plants() {
        let control = FarmControl::new(
            SimConfig::default(),
            ScriptedSource::new(vec![4, 1], false),
        );
        assert_eq!(control.farm().farmer_count(), 3);
        assert_eq!(control.farm().assets().len(), 4);
        assert_eq!(control.farm().money(), SimConfig::default().starting_money);
    }

    #[test]
    fn single_corn_harvest() {
        let mut control = test_control();
        add_ready(&mut control, AssetKind::Corn, 0);
        assert_eq!(control.harvest_crops(), Ok(AssetKind::Corn.profit()));
    }

    #[test]
    fn harvest_crops_skips_ineligible_assets() {
        let mut control = test_control();
        add_ready(&mut control, AssetKind::Cattle, 5);
        add_ready(&mut control, AssetKind::Hog, 0);
        add_ready(&mut control, AssetKind::Corn, 0);
        let waiting = add_ready(&mut control, AssetKind::Corn, 1);
        add_ready(&mut control, AssetKind::Soy, 0);

        assert_eq!(
            control.harvest_crops(),
            Ok(AssetKind::Corn.profit() + AssetKind::Soy.profit())
        );
        let waiting = control.farm().asset_by_id(waiting).expect("still present");
        assert_eq!(waiting.harvest_days(), 1);
        assert_eq!(control.farm().assets().len(), 5);
    }

    #[test]
    fn harvest_animals_sums_ready_animals() {
        let mut control = test_control();
        add_ready(&mut control, AssetKind::Cattle, 0);
        add_ready(&mut control, AssetKind::Hog, 0);
        add_ready(&mut control, AssetKind::Sheep, 0);
        add_ready(&mut control, AssetKind::Sheep, 1);
        add_ready(&mut control, AssetKind::Corn, 0);
        add_ready(&mut control, AssetKind::Soy, 0);
        assert_eq!(
            control.harvest_animals(),
            Ok(AssetKind::Sheep.profit() + AssetKind::Hog.profit() + AssetKind::Cattle.profit())
        );
    }

    #[test]
    fn diseased_and_dead_assets_are_not_harvested() {
        let mut control = test_control();
        let sick = add_ready(&mut control, AssetKind::Corn, 0);
        let dead = add_ready(&mut control, AssetKind::Soy, 0);
        control
            .farm_mut()
            .asset_by_id_mut(sick)
            .expect("present")
            .mark_diseased()
            .expect("alive");
        control.farm_mut().asset_by_id_mut(dead).expect("present").mark_dead();
        assert_eq!(control.harvest_crops(), Ok(0));
        assert_eq!(control.harvest_crops(), Ok(0));
    }

    #[test]
    fn three_merchants_on_cattle() {
        let mut control = test_control();
        hire(&mut control, &[FarmerKind::Merchant; 3]);
        add_ready(&mut control, AssetKind::Cattle, 0);
        assert_eq!(control.harvest_animals(), Ok(AssetKind::Cattle.profit() * 112 / 100));
        assert_eq!(control.harvest_animals(), Ok(0));
    }

    #[test]
    fn two_merchants_on_corn() {
        let mut control = test_control();
        hire(&mut control, &[FarmerKind::Merchant; 2]);
        add_ready(&mut control, AssetKind::Corn, 0);
        assert_eq!(control.harvest_crops(), Ok(AssetKind::Corn.profit() * 108 / 100));
    }

    #[test]
    fn animal_farmers_do_not_help_crops() {
        let mut control = test_control();
        hire(
            &mut control,
            &[
                FarmerKind::Crops,
                FarmerKind::Crops,
                FarmerKind::Crops,
                FarmerKind::Animal,
            ],
        );
        add_ready(&mut control, AssetKind::Corn, 0);
        assert_eq!(control.harvest_crops(), Ok(728));
    }

    #[test]
    fn animal_bonus_is_two_percent_per_farmer() {
        let mut control = test_control();
        hire(
            &mut control,
            &[FarmerKind::Animal, FarmerKind::Animal, FarmerKind::Crops],
        );
        add_ready(&mut control, AssetKind::Cattle, 0);
        assert!((control.animal_harvest_bonus() - 0.04).abs() < 1e-12);
        assert!((control.crop_harvest_bonus() - 0.04).abs() < 1e-12);
        assert!(control.merchant_harvest_bonus().abs() < f64::EPSILON);
        assert_eq!(control.harvest_animals(), Ok(725 * 104 / 100));
    }

    #[test]
    fn harvest_credits_money_and_restarts_countdown() {
        let mut control = test_control();
        let id = add_ready(&mut control, AssetKind::Soy, -2);
        let before = control.farm().money();
        let earned = control.harvest_crops().expect("no terminal condition");
        assert_eq!(control.farm().money(), before + earned);
        let soy = control.farm().asset_by_id(id).expect("present");
        assert_eq!(soy.harvest_days(), AssetKind::Soy.profile().harvest_days);
        assert_eq!(soy.state(), AssetState::Alive);
    }

    #[test]
    fn crossing_threshold_wins() {
        let config = SimConfig {
            starting_money: 0,
            win_threshold: 600,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        add_ready(&mut control, AssetKind::Corn, 0);
        assert_eq!(control.harvest_crops(), Err(SimError::Won { money: 650 }));
    }

    #[test]
    fn negative_balance_at_animal_harvest_is_bankrupt() {
        let config = SimConfig {
            starting_money: 10,
            farmer_wage: 50,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        hire(&mut control, &[FarmerKind::Crops]);
        add_ready(&mut control, AssetKind::Sheep, 9);
        let result = control.run_day();
        assert_eq!(
            result,
            Err(SimError::Bankrupt {
                shortfall: 43,
                balance: -43
            })
        );
        assert!(result.unwrap_err().is_terminal());
    }

    #[test]
    fn veterinary_tally() {
        let mut control = test_control();
        hire(
            &mut control,
            &[
                FarmerKind::Veterinary,
                FarmerKind::Veterinary,
                FarmerKind::Animal,
                FarmerKind::Crops,
                FarmerKind::Merchant,
            ],
        );
        assert_eq!(control.number_of_veterinary_farmers(), 2);
    }

    #[test]
    fn increment_day_ages_only_existing_assets() {
        let mut control = test_control();
        let first = add_ready(&mut control, AssetKind::Cattle, 5);
        control.increment_day();
        let second = add_ready(&mut control, AssetKind::Cattle, 5);
        control.increment_day();
        let third = add_ready(&mut control, AssetKind::Corn, 5);

        let age = |id| control.farm().asset_by_id(id).expect("present").age();
        assert_eq!((age(first), age(second), age(third)), (2, 1, 0));
        let first = control.farm().asset_by_id(first).expect("present");
        assert_eq!(first.harvest_days(), 3);
    }

    #[test]
    fn increment_day_ages_dead_assets_and_passes_zero() {
        let mut control = test_control();
        let id = add_ready(&mut control, AssetKind::Hog, 0);
        control.farm_mut().asset_by_id_mut(id).expect("present").mark_dead();
        control.increment_day();
        let hog = control.farm().asset_by_id(id).expect("present");
        assert_eq!(hog.age(), 1);
        assert_eq!(hog.harvest_days(), -1);
    }

    #[test]
    fn reorder_keeps_identity_and_is_idempotent() {
        let mut control = test_control();
        let dead = add_ready(&mut control, AssetKind::Cattle, 3);
        let corn = add_ready(&mut control, AssetKind::Corn, 3);
        let sheep = add_ready(&mut control, AssetKind::Sheep, 3);
        control.farm_mut().asset_by_id_mut(dead).expect("present").mark_dead();

        control.reorder_all_perished();
        let once: Vec<Option<AssetId>> = control.farm().assets().iter().map(Asset::id).collect();
        assert_eq!(once, vec![Some(corn), Some(sheep), Some(dead)]);
        assert!(!control.farm().asset(0).expect("present").is_dead());

        control.reorder_all_perished();
        let twice: Vec<Option<AssetId>> = control.farm().assets().iter().map(Asset::id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn healthy_filters_exclude_sick_and_dead() {
        let mut control = test_control();
        let cattle = add_ready(&mut control, AssetKind::Cattle, 3);
        let corn = add_ready(&mut control, AssetKind::Corn, 3);
        let sheep = add_ready(&mut control, AssetKind::Sheep, 3);
        let soy_sick = add_ready(&mut control, AssetKind::Soy, 3);
        let soy = add_ready(&mut control, AssetKind::Soy, 3);
        let farm = control.farm_mut();
        farm.asset_by_id_mut(soy_sick).expect("present").mark_diseased().expect("alive");
        farm.asset_by_id_mut(corn).expect("present").mark_dead();
        farm.asset_by_id_mut(cattle).expect("present").mark_diseased().expect("alive");

        let crops: Vec<Option<AssetId>> =
            control.healthy_crops().into_iter().map(Asset::id).collect();
        assert_eq!(crops, vec![Some(soy)]);
        let animals: Vec<Option<AssetId>> =
            control.healthy_animals().into_iter().map(Asset::id).collect();
        assert_eq!(animals, vec![Some(sheep)]);
    }

    #[test]
    fn purchases_spend_money() {
        let mut control = test_control();
        let start = control.farm().money();
        let id = control.purchase_asset(AssetKind::Cattle).expect("affordable");
        assert_eq!(control.farm().money(), start - AssetKind::Cattle.purchase_cost());
        assert!(control.farm().asset_by_id(id).is_some());

        let acreage = control.buy_acre().expect("affordable");
        assert!((acreage - 2.0).abs() < f64::EPSILON);

        let kind = control.hire_random_farmer().expect("affordable");
        assert_eq!(kind, FarmerKind::Merchant);
        assert_eq!(control.farm().farmer_count(), 1);
        assert_eq!(
            control.farm().money(),
            start
                - AssetKind::Cattle.purchase_cost()
                - control.config().acre_cost
                - control.config().farmer_hire_cost
        );
    }

    #[test]
    fn unaffordable_purchase_is_bankrupt_and_changes_nothing() {
        let config = SimConfig {
            starting_money: 100,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        assert_eq!(
            control.purchase_asset(AssetKind::Cattle),
            Err(SimError::Bankrupt {
                shortfall: 300,
                balance: 100
            })
        );
        assert!(matches!(control.buy_acre(), Err(SimError::Bankrupt { .. })));
        assert_eq!(control.farm().money(), 100);
        assert!(control.farm().assets().is_empty());
        assert!((control.farm().acreage() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_farm_rejects_purchase_before_charging() {
        let config = SimConfig {
            assets_per_acre: 1,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        control.purchase_random_asset().expect("first fits");
        let money = control.farm().money();
        let err = control.purchase_random_asset().unwrap_err();
        assert_eq!(err, SimError::Farm(FarmError::AtCapacity { capacity: 1 }));
        assert!(!err.is_terminal());
        assert_eq!(control.farm().money(), money);
    }

    #[test]
    fn empty_farm_stalls_only_after_tolerance() {
        let mut control = test_control();
        let tolerance = control.config().stall_tolerance_days;
        let report = control.run_day().expect("one idle day is not a stall");
        assert_eq!(report.day, 1);
        assert_eq!(report.money, SimConfig::default().starting_money);
        for _ in 2..tolerance {
            control.run_day().expect("still inside the tolerance window");
        }
        assert_eq!(
            control.run_day(),
            Err(SimError::Inconclusive {
                day: tolerance,
                idle_days: tolerance
            })
        );
    }

    #[test]
    fn productive_day_resets_idle_counter() {
        let config = SimConfig {
            stall_tolerance_days: 2,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        control.run_day().expect("first idle day");
        add_ready(&mut control, AssetKind::Soy, 3);
        control.run_day().expect("soy is growing");
        control.farm_mut().asset_mut(0).expect("present").mark_dead();
        control.run_day().expect("idle count restarted");
        assert!(matches!(
            control.run_day(),
            Err(SimError::Inconclusive { day: 4, idle_days: 2 })
        ));
    }

    #[test]
    fn diseased_only_farm_ages_until_old_age() {
        let mut control = test_control();
        let id = add_ready(&mut control, AssetKind::Cattle, 9);
        control
            .farm_mut()
            .asset_by_id_mut(id)
            .expect("present")
            .mark_diseased()
            .expect("alive");
        let lifespan = AssetKind::Cattle.profile().lifespan;
        for _ in 0..lifespan {
            let report = control.run_day().expect("a sick animal still ages");
            assert_eq!(report.crop_revenue + report.animal_revenue, 0);
        }
        let report = control.run_day().expect("death is a change");
        assert_eq!(report.newly_dead, 1);
        assert!(control.farm().asset_by_id(id).expect("present").is_dead());
    }

    #[test]
    fn run_day_ages_then_harvests() {
        let mut control = test_control();
        let corn = add_ready(&mut control, AssetKind::Corn, 1);
        let report = control.run_day().expect("productive day");
        assert_eq!(report.day, 1);
        assert_eq!(report.crop_revenue, AssetKind::Corn.profit());
        assert_eq!(report.operating_costs, 2);
        assert_eq!(
            report.money,
            SimConfig::default().starting_money - 2 + AssetKind::Corn.profit()
        );
        let corn = control.farm().asset_by_id(corn).expect("present");
        assert_eq!(corn.age(), 1);
    }

    #[test]
    fn day_limit_is_inconclusive() {
        let config = SimConfig {
            max_days: 1,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        add_ready(&mut control, AssetKind::Cattle, 9);
        control.run_day().expect("first day runs");
        assert!(matches!(
            control.run_day(),
            Err(SimError::Inconclusive { day: 1, .. })
        ));
    }

    #[test]
    fn health_rules_sicken_then_kill() {
        let mut control = FarmControl::empty(
            SimConfig::default(),
            ScriptedSource::new(Vec::new(), true),
        );
        let id = add_ready(&mut control, AssetKind::Sheep, 9);
        let report = control.run_day().expect("day runs");
        assert_eq!(report.newly_diseased, 1);
        assert_eq!(
            control.farm().asset_by_id(id).map(Asset::state),
            Some(AssetState::Diseased)
        );
        let report = control.run_day().expect("day runs");
        assert_eq!(report.newly_dead, 1);
        assert!(control.farm().asset_by_id(id).expect("present").is_dead());
    }

    #[test]
    fn old_age_kills() {
        let mut control = test_control();
        let id = add_ready(&mut control, AssetKind::Soy, 100);
        let lifespan = AssetKind::Soy.profile().lifespan;
        for _ in 0..lifespan {
            control.run_day().expect("still counting down");
        }
        assert!(!control.farm().asset_by_id(id).expect("present").is_dead());
        let report = control.run_day().expect("death is a change");
        assert_eq!(report.newly_dead, 1);
    }

    #[test]
    fn restock_replaces_dead_with_same_kind() {
        let mut control = test_control();
        let dead = add_ready(&mut control, AssetKind::Hog, 3);
        add_ready(&mut control, AssetKind::Corn, 3);
        control.farm_mut().asset_by_id_mut(dead).expect("present").mark_dead();
        let money = control.farm().money();

        assert_eq!(control.restock_perished(), 1);
        assert_eq!(control.farm().assets().len(), 2);
        assert!(control.farm().asset_by_id(dead).is_none());
        assert_eq!(control.farm().assets()[1].kind(), AssetKind::Hog);
        assert_eq!(control.farm().money(), money - AssetKind::Hog.purchase_cost());
    }

    #[test]
    fn restock_reports_why_it_stopped() {
        let config = SimConfig {
            starting_money: 300,
            ..SimConfig::default()
        };
        let mut control = FarmControl::empty(config, ScriptedSource::quiet());
        let hog = add_ready(&mut control, AssetKind::Hog, 3);
        let cattle = add_ready(&mut control, AssetKind::Cattle, 3);
        let farm = control.farm_mut();
        farm.asset_by_id_mut(hog).expect("present").mark_dead();
        farm.asset_by_id_mut(cattle).expect("present").mark_dead();

        assert_eq!(control.restock_perished(), 1);
        assert_eq!(control.farm().assets().len(), 1);
        assert_eq!(control.farm().money(), 300 - AssetKind::Hog.purchase_cost());
        let messages: Vec<&String> = control.messages().collect();
        assert!(
            messages
                .iter()
                .any(|message| message.starts_with("Restock stopped: farm is bankrupt")),
            "{messages:?}"
        );
        assert_eq!(
            messages.last().map(|message| message.as_str()),
            Some("Cleared 2 perished assets, replaced 1.")
        );
    }

    #[test]
    fn messages_are_bounded() {
        let mut control = test_control();
        for index in 0..(MAX_MESSAGES + 3) {
            control.add_message(format!("event {index}"));
        }
        let messages: Vec<&String> = control.messages().collect();
        assert_eq!(messages.len(), MAX_MESSAGES);
        assert_eq!(messages[0], "event 3");
    }
}
