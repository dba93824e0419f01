// ═══════════════════════════════════════════════════════════════════════
// Round executor
// ═══════════════════════════════════════════════════════════════════════

use crate::mutate::apply_order;
use crate::types::{Event, GameState, Order, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One continuously-consumed source of randomness, serving both the
/// executor's scheduling draws (`next_unit`, a float in `[0, 1)`) and the
/// battle resolver's dice (`roll_die`, an integer in `1..=6`) — the same
/// stream, in call order, never re-seeded mid-round.
pub trait DeterministicSource {
    fn next_unit(&mut self) -> f64;
    fn roll_die(&mut self) -> u8;
}

impl DeterministicSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=6)
    }
}

fn pop_lowest_order(player: &mut Player) -> Option<Order> {
    let slot = player
        .orders
        .iter()
        .enumerate()
        .filter_map(|(i, o)| o.as_ref().map(|o| (i, o.order_number)))
        .min_by_key(|(_, number)| *number)
        .map(|(i, _)| i)?;
    player.orders[slot].take()
}

fn has_queued_orders(player: &Player) -> bool {
    player.orders.iter().any(|o| o.is_some())
}

/// Executes one round if every player is ready, draining every queued
/// order and returning `(new_state, events, true)`. If any player is not
/// ready, returns `(state.clone(), vec![], false)` unchanged.
pub fn execute_round(state: &GameState, seed: u64) -> (GameState, Vec<Event>, bool) {
    execute_round_with(state, ChaCha8Rng::seed_from_u64(seed))
}

/// Same as `execute_round` but accepts any `DeterministicSource`, letting
/// tests replay a scripted sequence instead of real randomness.
pub fn execute_round_with(state: &GameState, mut rng: impl DeterministicSource) -> (GameState, Vec<Event>, bool) {
    let all_ready = state
        .turn_order
        .iter()
        .filter_map(|nickname| state.players.get(nickname))
        .all(|player| player.ready);

    if !all_ready {
        return (state.clone(), Vec::new(), false);
    }

    let mut working = state.clone();
    let round = working.round;
    let mut events = Vec::new();

    loop {
        let any_queued = working
            .turn_order
            .iter()
            .filter_map(|nickname| working.players.get(nickname))
            .any(has_queued_orders);
        if !any_queued {
            break;
        }

        let player_count = working.turn_order.len();
        let draw = (rng.next_unit() * player_count as f64).floor() as usize;
        let draw = draw.min(player_count - 1);
        let nickname = working.turn_order[draw].clone();

        let order = match working.players.get_mut(&nickname).and_then(pop_lowest_order) {
            Some(order) => order,
            None => continue,
        };

        let produced = apply_order(&mut working, &order, round, || rng.roll_die());
        events.extend(produced);
    }

    for nickname in &working.turn_order {
        if let Some(player) = working.players.get_mut(nickname) {
            player.ready = false;
        }
    }
    for knight in working.knights.values_mut() {
        knight.projected_positions = [knight.location; 3];
    }

    let new_round = working.round + 1;
    events.push(Event::RoundAdvanced {
        from_round: round,
        to_round: new_round,
    });
    working.round = new_round;

    (working, events, true)
}
