// ═══════════════════════════════════════════════════════════════════════
// State mutators — Move, Attack, Fortify, Promote.
// ═══════════════════════════════════════════════════════════════════════

use crate::battle::{resolve_battle, BattleInputs};
use crate::types::{Event, GameState, Knight, Order, OrderKind};

const FORTIFY_TROOPS: u32 = 200;
const PROMOTE_COST: u32 = 100;

/// Applies an already-validated order, mutating `state` in place and
/// returning the events it produced (always starting with `OrderIssued`).
pub fn apply_order(state: &mut GameState, order: &Order, round: u32, roll_die: impl FnMut() -> u8) -> Vec<Event> {
    let mut events = vec![Event::OrderIssued {
        round,
        owner_nickname: order.owner_nickname.clone(),
        order: order.clone(),
    }];

    match order.kind {
        OrderKind::Move => apply_move(state, order, round, &mut events),
        OrderKind::Attack => apply_attack(state, order, round, roll_die, &mut events),
        OrderKind::Fortify => apply_fortify(state, order),
        OrderKind::Promote => apply_promote(state, order),
    }

    events
}

/// Sets `hex`'s owner to `mover` if it had none, or if `mover` is now the
/// only nickname with troops present on it. Emits `HexCaptured` when the
/// owner actually changes.
fn maybe_transfer_ownership(state: &mut GameState, hex: u8, mover: &str, round: u32, events: &mut Vec<Event>) {
    let hex_state = &mut state.hexes[hex as usize];
    let holders: Vec<&str> = hex_state
        .troops
        .iter()
        .filter(|(_, &troops)| troops > 0)
        .map(|(nickname, _)| nickname.as_str())
        .collect();

    let should_transfer = match &hex_state.owner {
        None => true,
        Some(owner) => owner != mover && holders == [mover],
    };

    if should_transfer {
        let previous_owner = hex_state.owner.clone();
        if previous_owner.as_deref() != Some(mover) {
            hex_state.owner = Some(mover.to_string());
            events.push(Event::HexCaptured {
                round,
                hex,
                previous_owner,
                new_owner: mover.to_string(),
            });
        }
    }
}

fn apply_move(state: &mut GameState, order: &Order, round: u32, events: &mut Vec<Event>) {
    {
        let from = &mut state.hexes[order.from as usize];
        let remaining = from.troops.entry(order.owner_nickname.clone()).or_insert(0);
        *remaining = remaining.saturating_sub(order.troops);
    }
    {
        let to = &mut state.hexes[order.to as usize];
        *to.troops.entry(order.owner_nickname.clone()).or_insert(0) += order.troops;
    }

    maybe_transfer_ownership(state, order.to, &order.owner_nickname, round, events);

    if let Some(knight) = state.knights.get_mut(&order.knight_name) {
        knight.location = order.to;
    }
}

fn apply_fortify(state: &mut GameState, order: &Order) {
    let hex = &mut state.hexes[order.from as usize];
    *hex.troops.entry(order.owner_nickname.clone()).or_insert(0) += FORTIFY_TROOPS;
}

fn apply_promote(state: &mut GameState, order: &Order) {
    {
        let hex = &mut state.hexes[order.from as usize];
        let troops = hex.troops.entry(order.owner_nickname.clone()).or_insert(0);
        *troops -= PROMOTE_COST;
    }

    let seq = state.next_knight_seq;
    state.next_knight_seq += 1;
    let new_name = format!("{}-knight-{}", order.owner_nickname, seq);

    state.knights.insert(
        new_name.clone(),
        Knight {
            name: new_name.clone(),
            owner_nickname: order.owner_nickname.clone(),
            location: order.from,
            alive: true,
            projected_positions: [order.from; 3],
        },
    );
    if let Some(player) = state.players.get_mut(&order.owner_nickname) {
        player.knights.push(new_name);
    }
}

fn apply_attack(state: &mut GameState, order: &Order, round: u32, roll_die: impl FnMut() -> u8, events: &mut Vec<Event>) {
    let hex = order.to;
    let attacker = order.owner_nickname.clone();
    let defender = state.hexes[hex as usize]
        .owner
        .clone()
        .expect("validator guarantees an attack target has an owner");

    {
        let from = &mut state.hexes[order.from as usize];
        let remaining = from.troops.entry(attacker.clone()).or_insert(0);
        *remaining = remaining.saturating_sub(order.troops);
    }

    let defender_troops = state.hexes[hex as usize].troops_for(&defender);
    let inputs = BattleInputs {
        attacker_nickname: attacker.clone(),
        defender_nickname: defender.clone(),
        attacker_troops: order.troops,
        defender_troops,
        attacker_alliance_size: state.alliance_size(&attacker),
        defender_alliance_size: state.alliance_size(&defender),
        attacker_knights: vec![order.knight_name.clone()],
        defender_knights: state.living_knights_at(hex, &defender),
    };

    let result = resolve_battle(inputs, roll_die);

    for knight_name in &result.eliminated_knights {
        if let Some(knight) = state.knights.get_mut(knight_name) {
            knight.alive = false;
        }
        events.push(Event::KnightEliminated {
            round,
            knight_name: knight_name.clone(),
        });
    }

    events.push(Event::BattleFought {
        round,
        hex,
        attacker_nickname: attacker.clone(),
        defender_nickname: defender.clone(),
        rounds: result.rounds.clone(),
        winner: result.winner,
    });

    let hex_state = &mut state.hexes[hex as usize];
    match result.winner {
        crate::types::Side::Attacker => {
            hex_state.troops.insert(defender.clone(), 0);
            *hex_state.troops.entry(attacker.clone()).or_insert(0) += result.attacker_troops_remaining;
            let previous_owner = hex_state.owner.clone();
            hex_state.owner = Some(attacker.clone());
            events.push(Event::HexCaptured {
                round,
                hex,
                previous_owner,
                new_owner: attacker,
            });
        }
        crate::types::Side::Defender => {
            hex_state.troops.insert(defender, result.defender_troops_remaining);
        }
    }
}
