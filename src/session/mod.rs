//! Session persistence - game state and the slots it is stored in

pub mod state;
pub mod store;

pub use state::GameState;
pub use store::{FileStore, MemoryStore, SessionStore};

use crate::core::error::Result;

/// Read, decode and check a state slot. `None` when the slot is empty.
pub fn read_state<S: SessionStore + ?Sized>(store: &S, key: &str) -> Result<Option<GameState>> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let state = GameState::from_json(&json)?;
    state.validate()?;
    Ok(Some(state))
}

/// Encode and write a state slot
pub fn write_state<S: SessionStore + ?Sized>(
    store: &mut S,
    key: &str,
    state: &GameState,
) -> Result<()> {
    store.set(key, &state.to_json()?)?;
    tracing::debug!("Persisted mission {} to slot {}", state.mission_number, key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MissionError;
    use crate::metrics::Metrics;

    #[test]
    fn test_state_slot_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(read_state(&store, "cmsGameState").unwrap(), None);

        let state = GameState::new("Analyst", Metrics::new(60, 60, 60, 100));
        write_state(&mut store, "cmsGameState", &state).unwrap();

        assert_eq!(read_state(&store, "cmsGameState").unwrap(), Some(state));
    }

    #[test]
    fn test_out_of_range_slot_is_rejected() {
        let mut store = MemoryStore::new();
        store
            .set(
                "cmsGameState",
                r#"{"role":"Analyst","missionNumber":0,"publicTrust":250,"systemResilience":60,"diplomaticStability":60,"budget":100}"#,
            )
            .unwrap();
        assert!(matches!(
            read_state(&store, "cmsGameState"),
            Err(MissionError::CorruptSession(_))
        ));
    }

    #[test]
    fn test_corrupt_slot_is_error() {
        let mut store = MemoryStore::new();
        store.set("cmsGameState", "not json").unwrap();
        assert!(read_state(&store, "cmsGameState").is_err());
    }
}
