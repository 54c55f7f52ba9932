use super::assets::{Asset, AssetId};
use super::farmers::{Farmer, FarmerKind};
use thiserror::Error;

pub const STARTING_ACREAGE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Farm {
    assets: Vec<Asset>,
    farmers: Vec<Farmer>,
    money: i64,
    acreage: f64,
    assets_per_acre: usize,
    next_asset_id: u64,
}

impl Farm {
    pub fn new(money: i64, assets_per_acre: usize) -> Self {
        Self {
            assets: Vec::new(),
            farmers: Vec::new(),
            money,
            acreage: STARTING_ACREAGE,
            assets_per_acre,
            next_asset_id: 0,
        }
    }

    pub fn add_asset(&mut self, mut asset: Asset) -> Result<AssetId, FarmError> {
        let capacity = self.capacity();
        if self.living_count() >= capacity {
            return Err(FarmError::AtCapacity { capacity });
        }
        self.next_asset_id += 1;
        let id = AssetId(self.next_asset_id);
        asset.assign_id(id);
        self.assets.push(asset);
        Ok(id)
    }

    pub fn add_farmer(&mut self, farmer: Farmer) {
        self.farmers.push(farmer);
    }

    pub fn asset(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    pub fn asset_mut(&mut self, index: usize) -> Option<&mut Asset> {
        self.assets.get_mut(index)
    }

    pub fn asset_by_id(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id() == Some(id))
    }

    pub fn asset_by_id_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|asset| asset.id() == Some(id))
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub(crate) fn assets_mut(&mut self) -> &mut [Asset] {
        &mut self.assets
    }

    pub fn farmers(&self) -> &[Farmer] {
        &self.farmers
    }

    pub fn farmer_count(&self) -> usize {
        self.farmers.len()
    }

    pub fn count_farmers(&self, kind: FarmerKind) -> usize {
        self.farmers
            .iter()
            .filter(|farmer| farmer.kind() == kind)
            .count()
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn acreage(&self) -> f64 {
        self.acreage
    }

    pub(crate) fn add_acreage(&mut self, acres: f64) {
        self.acreage += acres;
    }

    /// Non-dead assets the current acreage can hold.
    pub fn capacity(&self) -> usize {
        self.acreage.floor().max(0.0) as usize * self.assets_per_acre
    }

    pub fn living_count(&self) -> usize {
        self.assets.iter().filter(|asset| !asset.is_dead()).count()
    }

    pub fn has_room(&self) -> bool {
        self.living_count() < self.capacity()
    }

    pub(crate) fn credit(&mut self, amount: i64) {
        self.money += amount;
    }

    /// Unchecked debit for running costs; the balance may dip below zero
    /// until the next bankruptcy check.
    pub(crate) fn charge(&mut self, amount: i64) {
        self.money -= amount;
    }

    pub(crate) fn spend(&mut self, amount: i64) -> Result<(), FarmError> {
        if amount > self.money {
            return Err(FarmError::InsufficientFunds {
                required: amount,
                available: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    /// Stable partition: every dead asset moves behind every living one.
    pub fn partition_perished(&mut self) {
        self.assets.sort_by_key(Asset::is_dead);
    }

    pub fn clear_perished(&mut self) -> Vec<Asset> {
        self.partition_perished();
        let first_dead = self.living_count();
        self.assets.split_off(first_dead)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FarmError {
    #[error("farm is at capacity ({capacity} assets)")]
    AtCapacity { capacity: usize },
    #[error("not enough money (requires {required}, have {available})")]
    InsufficientFunds { required: i64, available: i64 },
}
