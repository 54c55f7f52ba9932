use super::random::RandomSource;
use super::state::{AssetState, TransitionError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Crop,
    Animal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Cattle,
    Hog,
    Sheep,
    DairyCow,
    Corn,
    Soy,
}

#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub kind: AssetKind,
    pub name: &'static str,
    pub family: Family,
    pub profit: i64,
    pub harvest_days: i32,
    pub purchase_cost: i64,
    pub upkeep: i64,
    pub lifespan: u32,
}

// Position in this table is the numeric kind identifier.
static KIND_PROFILES: [KindProfile; 6] = [
    KindProfile {
        kind: AssetKind::Cattle,
        name: "Cattle",
        family: Family::Animal,
        profit: 725,
        harvest_days: 5,
        purchase_cost: 400,
        upkeep: 6,
        lifespan: 60,
    },
    KindProfile {
        kind: AssetKind::Hog,
        name: "Hog",
        family: Family::Animal,
        profit: 480,
        harvest_days: 4,
        purchase_cost: 260,
        upkeep: 4,
        lifespan: 45,
    },
    KindProfile {
        kind: AssetKind::Sheep,
        name: "Sheep",
        family: Family::Animal,
        profit: 310,
        harvest_days: 3,
        purchase_cost: 180,
        upkeep: 3,
        lifespan: 50,
    },
    KindProfile {
        kind: AssetKind::DairyCow,
        name: "Dairy Cow",
        family: Family::Animal,
        profit: 560,
        harvest_days: 4,
        purchase_cost: 450,
        upkeep: 5,
        lifespan: 70,
    },
    KindProfile {
        kind: AssetKind::Corn,
        name: "Corn",
        family: Family::Crop,
        profit: 650,
        harvest_days: 6,
        purchase_cost: 120,
        upkeep: 2,
        lifespan: 30,
    },
    KindProfile {
        kind: AssetKind::Soy,
        name: "Soy",
        family: Family::Crop,
        profit: 420,
        harvest_days: 4,
        purchase_cost: 90,
        upkeep: 1,
        lifespan: 24,
    },
];

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Cattle,
        AssetKind::Hog,
        AssetKind::Sheep,
        AssetKind::DairyCow,
        AssetKind::Corn,
        AssetKind::Soy,
    ];

    pub fn from_index(index: usize) -> Option<AssetKind> {
        Self::ALL.get(index).copied()
    }

    pub fn profile(self) -> &'static KindProfile {
        &KIND_PROFILES[self as usize]
    }

    pub fn family(self) -> Family {
        self.profile().family
    }

    pub fn profit(self) -> i64 {
        self.profile().profit
    }

    pub fn purchase_cost(self) -> i64 {
        self.profile().purchase_cost
    }
}

impl FromStr for AssetKind {
    type Err = AssetError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(*c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "cattle" => Ok(AssetKind::Cattle),
            "hog" => Ok(AssetKind::Hog),
            "sheep" => Ok(AssetKind::Sheep),
            "dairycow" => Ok(AssetKind::DairyCow),
            "corn" => Ok(AssetKind::Corn),
            "soy" => Ok(AssetKind::Soy),
            _ => Err(AssetError::UnknownName(name.to_string())),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Asset {
    id: Option<AssetId>,
    kind: AssetKind,
    age: u32,
    harvest_days: i32,
    state: AssetState,
}

impl Asset {
    fn fresh(kind: AssetKind) -> Self {
        Self {
            id: None,
            kind,
            age: 0,
            harvest_days: kind.profile().harvest_days,
            state: AssetState::Alive,
        }
    }

    /// Assigned by the farm when the asset is added.
    pub fn id(&self) -> Option<AssetId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: AssetId) {
        self.id = Some(id);
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn family(&self) -> Family {
        self.kind.family()
    }

    pub fn profit(&self) -> i64 {
        self.kind.profit()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn harvest_days(&self) -> i32 {
        self.harvest_days
    }

    pub fn set_harvest_days(&mut self, days: i32) {
        self.harvest_days = days;
    }

    pub fn state(&self) -> AssetState {
        self.state
    }

    pub fn mark_diseased(&mut self) -> Result<(), TransitionError> {
        self.state.mark_diseased()
    }

    pub fn mark_dead(&mut self) {
        self.state.mark_dead();
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn is_alive(&self) -> bool {
        self.state == AssetState::Alive
    }

    pub fn is_harvest_eligible(&self) -> bool {
        self.state.is_harvest_eligible() && self.harvest_days <= 0
    }

    pub fn is_past_lifespan(&self) -> bool {
        self.age > self.kind.profile().lifespan
    }

    pub(crate) fn grow(&mut self) {
        self.age += 1;
        self.harvest_days -= 1;
    }

    pub(crate) fn restart_harvest_cycle(&mut self) {
        self.harvest_days = self.kind.profile().harvest_days;
    }
}

/// Kind identifier accepted by the factory: table index or name.
#[derive(Debug, Clone, Copy)]
pub enum KindId<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for KindId<'_> {
    fn from(index: usize) -> Self {
        KindId::Index(index)
    }
}

impl<'a> From<&'a str> for KindId<'a> {
    fn from(name: &'a str) -> Self {
        KindId::Name(name)
    }
}

impl From<AssetKind> for KindId<'_> {
    fn from(kind: AssetKind) -> Self {
        KindId::Index(kind as usize)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetFactory;

impl AssetFactory {
    pub fn create_asset<'a>(&self, id: impl Into<KindId<'a>>) -> Result<Asset, AssetError> {
        let kind = match id.into() {
            KindId::Index(index) => {
                AssetKind::from_index(index).ok_or(AssetError::UnknownIndex(index))?
            }
            KindId::Name(name) => name.parse()?,
        };
        Ok(self.create_kind(kind))
    }

    pub fn create_kind(&self, kind: AssetKind) -> Asset {
        Asset::fresh(kind)
    }

    pub fn create_asset_of_type(&self, existing: &Asset) -> Asset {
        Asset::fresh(existing.kind)
    }

    pub fn random_asset(&self, rng: &mut impl RandomSource) -> Asset {
        let index = rng.pick(AssetKind::ALL.len());
        Asset::fresh(AssetKind::ALL[index % AssetKind::ALL.len()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("no asset kind at index {0}")]
    UnknownIndex(usize),
    #[error("unknown asset kind \"{0}\"")]
    UnknownName(String),
}
