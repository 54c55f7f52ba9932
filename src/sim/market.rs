use super::assets::AssetKind;
use super::control::{FarmControl, SimError};
use super::random::RandomSource;

#[derive(Debug, Clone, Copy)]
pub struct MarketItem {
    pub name: &'static str,
    pub description: &'static str,
    pub action: MarketAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketAction {
    BuyAsset(AssetKind),
    BuyRandomAsset,
    HireRandomFarmer,
    BuyAcre,
    RestockPerished,
}

pub const MARKET_ITEMS: [MarketItem; 10] = [
    MarketItem {
        name: "Cattle",
        description: "Beef herd animal. Slow to mature, best price per head.",
        action: MarketAction::BuyAsset(AssetKind::Cattle),
    },
    MarketItem {
        name: "Hog",
        description: "Fast-growing livestock with a solid return.",
        action: MarketAction::BuyAsset(AssetKind::Hog),
    },
    MarketItem {
        name: "Sheep",
        description: "Shorn for wool every few days. Cheap to keep.",
        action: MarketAction::BuyAsset(AssetKind::Sheep),
    },
    MarketItem {
        name: "Dairy Cow",
        description: "Steady milk income over a long life.",
        action: MarketAction::BuyAsset(AssetKind::DairyCow),
    },
    MarketItem {
        name: "Corn",
        description: "High-value field crop with a long growing cycle.",
        action: MarketAction::BuyAsset(AssetKind::Corn),
    },
    MarketItem {
        name: "Soy",
        description: "Quick, cheap crop. Short-lived.",
        action: MarketAction::BuyAsset(AssetKind::Soy),
    },
    MarketItem {
        name: "Mystery Lot",
        description: "Whatever the auctioneer brings in today.",
        action: MarketAction::BuyRandomAsset,
    },
    MarketItem {
        name: "Hire Farmhand",
        description: "A merchant, crop, animal or veterinary farmer joins the crew.",
        action: MarketAction::HireRandomFarmer,
    },
    MarketItem {
        name: "Buy Acre",
        description: "More land means room for more assets.",
        action: MarketAction::BuyAcre,
    },
    MarketItem {
        name: "Restock Perished",
        description: "Clear out dead assets and buy the same kinds again.",
        action: MarketAction::RestockPerished,
    },
];

/// Price of an action, `None` when it varies with what gets bought.
pub fn action_cost<R: RandomSource>(control: &FarmControl<R>, action: MarketAction) -> Option<i64> {
    match action {
        MarketAction::BuyAsset(kind) => Some(kind.purchase_cost()),
        MarketAction::HireRandomFarmer => Some(control.config().farmer_hire_cost),
        MarketAction::BuyAcre => Some(control.config().acre_cost),
        MarketAction::BuyRandomAsset | MarketAction::RestockPerished => None,
    }
}

/// Runs a market action and returns a one-line summary for the player.
pub fn execute<R: RandomSource>(
    control: &mut FarmControl<R>,
    action: MarketAction,
) -> Result<String, SimError> {
    match action {
        MarketAction::BuyAsset(kind) => {
            let id = control.purchase_asset(kind)?;
            Ok(format!("{kind} {id} joined the farm."))
        }
        MarketAction::BuyRandomAsset => {
            let id = control.purchase_random_asset()?;
            let kind = control
                .farm()
                .asset_by_id(id)
                .map(|asset| asset.kind().to_string())
                .unwrap_or_default();
            Ok(format!("Mystery lot turned out to be {kind} {id}."))
        }
        MarketAction::HireRandomFarmer => {
            let kind = control.hire_random_farmer()?;
            Ok(format!("A {kind} farmer signed on."))
        }
        MarketAction::BuyAcre => {
            let acreage = control.buy_acre()?;
            Ok(format!("Farm now spans {acreage:.1} acres."))
        }
        MarketAction::RestockPerished => {
            let replaced = control.restock_perished();
            Ok(format!("Restocked {replaced} assets."))
        }
    }
}
