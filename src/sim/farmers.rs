use super::random::RandomSource;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FarmerKind {
    Merchant,
    Crops,
    Animal,
    Veterinary,
}

impl FarmerKind {
    pub const ALL: [FarmerKind; 4] = [
        FarmerKind::Merchant,
        FarmerKind::Crops,
        FarmerKind::Animal,
        FarmerKind::Veterinary,
    ];

    pub fn role(self) -> &'static str {
        match self {
            FarmerKind::Merchant => "sells at a premium",
            FarmerKind::Crops => "tends the fields",
            FarmerKind::Animal => "raises livestock",
            FarmerKind::Veterinary => "keeps animals healthy",
        }
    }
}

impl fmt::Display for FarmerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FarmerKind::Merchant => "Merchant",
            FarmerKind::Crops => "Crops",
            FarmerKind::Animal => "Animal",
            FarmerKind::Veterinary => "Veterinary",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farmer {
    kind: FarmerKind,
}

impl Farmer {
    pub fn kind(&self) -> FarmerKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FarmerControl;

impl FarmerControl {
    pub fn create_farmer(&self, kind: FarmerKind) -> Farmer {
        Farmer { kind }
    }

    pub fn random_farmer(&self, rng: &mut impl RandomSource) -> Farmer {
        let index = rng.pick(FarmerKind::ALL.len()) % FarmerKind::ALL.len();
        self.create_farmer(FarmerKind::ALL[index])
    }
}
