pub mod assets;
pub mod control;
pub mod economy;
pub mod farm;
pub mod farmers;
pub mod market;
pub mod random;
pub mod state;

pub use assets::{Asset, AssetError, AssetFactory, AssetId, AssetKind, Family, KindId};
pub use control::{DayReport, FarmControl, SimError};
pub use farm::{Farm, FarmError};
pub use farmers::{Farmer, FarmerControl, FarmerKind};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use state::{AssetState, TransitionError};
