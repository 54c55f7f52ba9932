use std::fmt;
use thiserror::Error;

/// Life state of a single asset. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetState {
    #[default]
    Alive,
    Diseased,
    Dead,
}

impl AssetState {
    pub fn transition(self, to: AssetState) -> Result<AssetState, TransitionError> {
        match (self, to) {
            (AssetState::Dead, AssetState::Dead) => Ok(AssetState::Dead),
            (AssetState::Dead, _) => Err(TransitionError::AlreadyDead),
            (current, AssetState::Alive) if current != AssetState::Alive => {
                Err(TransitionError::Resurrection { from: current })
            }
            (_, next) => Ok(next),
        }
    }

    /// Alive becomes Diseased; Diseased stays Diseased.
    pub fn mark_diseased(&mut self) -> Result<(), TransitionError> {
        *self = self.transition(AssetState::Diseased)?;
        Ok(())
    }

    pub fn mark_dead(&mut self) {
        *self = AssetState::Dead;
    }

    pub fn is_harvest_eligible(self) -> bool {
        self == AssetState::Alive
    }

    pub fn is_dead(self) -> bool {
        self == AssetState::Dead
    }
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetState::Alive => "alive",
            AssetState::Diseased => "diseased",
            AssetState::Dead => "dead",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("asset is already dead")]
    AlreadyDead,
    #[error("a {from} asset cannot return to alive")]
    Resurrection { from: AssetState },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_alive_and_eligible() {
        let state = AssetState::default();
        assert_eq!(state, AssetState::Alive);
        assert!(state.is_harvest_eligible());
    }

    #[test]
    fn diseased_is_not_eligible_and_can_die() {
        let mut state = AssetState::Alive;
        state.mark_diseased().expect("alive asset can sicken");
        assert!(!state.is_harvest_eligible());
        state.mark_diseased().expect("repeat is a no-op");
        assert_eq!(state, AssetState::Diseased);
        state.mark_dead();
        assert!(state.is_dead());
    }

    #[test]
    fn dead_rejects_disease_and_stays_dead() {
        let mut state = AssetState::Alive;
        state.mark_dead();
        assert_eq!(state.mark_diseased(), Err(TransitionError::AlreadyDead));
        state.mark_dead();
        assert_eq!(state, AssetState::Dead);
    }

    #[test]
    fn no_resurrection() {
        assert_eq!(
            AssetState::Diseased.transition(AssetState::Alive),
            Err(TransitionError::Resurrection {
                from: AssetState::Diseased
            })
        );
        assert_eq!(
            AssetState::Dead.transition(AssetState::Alive),
            Err(TransitionError::AlreadyDead)
        );
        assert_eq!(
            AssetState::Alive.transition(AssetState::Alive),
            Ok(AssetState::Alive)
        );
    }
}
