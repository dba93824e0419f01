// ═══════════════════════════════════════════════════════════════════════
// Public API — the five operations the host drives the engine through.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::build_board as build_board_impl;
use crate::projection::project_positions as project_positions_impl;
use crate::round::execute_round as execute_round_impl;
use crate::types::{Board, Event, GameState, Knight, Order, Player};
use crate::validate::{validate, RejectionCode};
use std::collections::HashMap;

/// Constructs the fixed board topology. Referentially transparent: every
/// call returns an identical `Board`.
pub fn build_board() -> Board {
    build_board_impl()
}

/// Validates `order` against `state` and, if accepted, returns a new
/// state with the order written into the owner's queue at slot
/// `order.order_number`. Writing a slot clears any existing order at a
/// higher slot number (the overwrite rule from §4.2) and recomputes
/// every one of the owner's knights' projected positions so later
/// validations see the update immediately.
pub fn submit_order(state: &GameState, order: Order) -> Result<GameState, RejectionCode> {
    validate(state, &order)?;

    let owner_nickname = order.owner_nickname.clone();
    let slot = (order.order_number - 1) as usize;

    let mut next = state.clone();
    {
        let player = next
            .players
            .get_mut(&owner_nickname)
            .expect("validate() already confirmed the owner exists");
        for later in player.orders.iter_mut().skip(slot) {
            *later = None;
        }
        player.orders[slot] = Some(order);
    }

    refresh_projections(&mut next, &owner_nickname);
    Ok(next)
}

/// Sets a player's readiness flag, returning a new state. Does not touch
/// any other player, order queue, or projection.
pub fn set_ready(state: &GameState, player: &str, ready: bool) -> GameState {
    let mut next = state.clone();
    if let Some(p) = next.players.get_mut(player) {
        p.ready = ready;
    }
    next
}

/// Executes a round if every active player is ready. See
/// `round::execute_round` for the full contract.
pub fn execute_round(state: &GameState, seed: u64) -> (GameState, Vec<Event>, bool) {
    execute_round_impl(state, seed)
}

/// Projected positions (after orders 1, 2, 3) for every knight the given
/// player controls — a read-only helper for UI order planning.
pub fn project_positions(player: &Player, knights: &HashMap<String, Knight>) -> HashMap<String, [u8; 3]> {
    project_positions_impl(player, knights)
}

fn refresh_projections(state: &mut GameState, owner_nickname: &str) {
    let Some(player) = state.players.get(owner_nickname).cloned() else {
        return;
    };
    let projections = project_positions_impl(&player, &state.knights);
    for (knight_name, positions) in projections {
        if let Some(knight) = state.knights.get_mut(&knight_name) {
            knight.projected_positions = positions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::create_initial_state;
    use crate::types::OrderKind;

    fn move_order(order_number: u8, knight_name: &str, owner: &str, from: u8, to: u8) -> Order {
        Order {
            order_number,
            knight_name: knight_name.to_string(),
            owner_nickname: owner.to_string(),
            kind: OrderKind::Move,
            from,
            to,
            troops: 1,
        }
    }

    #[test]
    fn queue_bound_never_exceeds_three() {
        let state = create_initial_state(&["alice".to_string()], 1);
        let knight_name = state.players["alice"].knights[0].clone();
        let location = state.knights[&knight_name].location;
        let hop1 = state.board.hexes[location as usize].neighbors.iter().flatten().next().copied().unwrap();
        let hop2 = state.board.hexes[hop1 as usize].neighbors.iter().flatten().find(|&&n| n != location).copied().unwrap();

        let state = submit_order(&state, move_order(1, &knight_name, "alice", location, hop1)).unwrap();
        let state = submit_order(&state, move_order(2, &knight_name, "alice", hop1, hop2)).unwrap();
        let state = submit_order(&state, move_order(3, &knight_name, "alice", hop2, location)).unwrap();
        assert_eq!(state.players["alice"].queued_orders().len(), 3);
        let numbers: Vec<u8> = state.players["alice"].queued_orders().iter().map(|o| o.order_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // A 4th order number is out of range and must be rejected, so the
        // queue can never grow past three slots.
        let fourth = Order {
            order_number: 4,
            knight_name,
            owner_nickname: "alice".to_string(),
            kind: OrderKind::Move,
            from: location,
            to: location,
            troops: 1,
        };
        assert_eq!(submit_order(&state, fourth), Err(RejectionCode::InvalidOrderNumber));
        assert_eq!(state.players["alice"].queued_orders().len(), 3);
    }

    #[test]
    fn overwriting_slot_n_clears_higher_slots() {
        let state = create_initial_state(&["alice".to_string()], 1);
        let knight_name = state.players["alice"].knights[0].clone();
        let location = state.knights[&knight_name].location;
        let to = state.board.hexes[location as usize].neighbors.iter().flatten().next().copied().unwrap();

        let state = submit_order(&state, move_order(1, &knight_name, "alice", location, to)).unwrap();
        let back = state.board.hexes[to as usize].neighbors.iter().flatten().find(|&&n| n != location).copied().unwrap();
        let state = submit_order(&state, move_order(2, &knight_name, "alice", to, back)).unwrap();
        assert_eq!(state.players["alice"].queued_orders().len(), 2);

        // Re-submitting slot 1 with a different destination must drop slot 2.
        let to2 = state
            .board
            .hexes[location as usize]
            .neighbors
            .iter()
            .flatten()
            .find(|&&n| n != to)
            .copied()
            .unwrap();
        let state = submit_order(&state, move_order(1, &knight_name, "alice", location, to2)).unwrap();
        assert_eq!(state.players["alice"].queued_orders().len(), 1);
        assert!(state.players["alice"].orders[1].is_none());
        assert_eq!(
            state.knights[&knight_name].projected_positions,
            [to2, to2, to2]
        );
    }

    #[test]
    fn set_ready_only_touches_named_player() {
        let state = create_initial_state(&["alice".to_string(), "bob".to_string()], 1);
        let state = set_ready(&state, "alice", true);
        assert!(state.players["alice"].ready);
        assert!(!state.players["bob"].ready);
    }
}
