use crate::engine::Engine;
use crate::model::Direction;

/// Forwards arrow keys to the engine as direction commands.
///
/// Every qualifying key press is forwarded, repeats included. Whether a
/// direction is legal (e.g. reversing into the body) is the engine's call.
/// Returns the forwarded direction so the caller can suppress the browser's
/// default action for it.
pub fn route_key<E: Engine + ?Sized>(engine: &mut E, key: &str) -> Option<Direction> {
    let direction = Direction::from_key(key)?;
    log::debug!("key {key} -> {direction:?}");
    engine.set_direction(direction);
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineCall, FakeEngine};

    #[test]
    fn forwards_arrows_in_order_and_drops_the_rest() {
        let mut engine = FakeEngine::new(16);
        for key in ["ArrowUp", "Tab", "ArrowLeft"] {
            route_key(&mut engine, key);
        }
        assert_eq!(
            engine.calls,
            vec![
                EngineCall::SetDirection(Direction::Up),
                EngineCall::SetDirection(Direction::Left)
            ]
        );
    }

    #[test]
    fn ignores_non_arrow_keys() {
        let mut engine = FakeEngine::new(16);
        for key in ["a", "Enter", "Shift", "w", " ", "Escape", "arrowup"] {
            assert_eq!(route_key(&mut engine, key), None);
        }
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn repeats_are_not_debounced() {
        let mut engine = FakeEngine::new(16);
        for _ in 0..3 {
            assert_eq!(route_key(&mut engine, "ArrowDown"), Some(Direction::Down));
        }
        assert_eq!(engine.calls.len(), 3);
    }
}
