// ═══════════════════════════════════════════════════════════════════════
// Order model & projection
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Knight, Player};
use std::collections::HashMap;

/// The position a knight occupies after slot `upto` (1-indexed, 1..=3)
/// of its owner's orders have executed, assuming they execute in numeric
/// order. Slots with no order, or whose order belongs to a different
/// knight, inherit the prior slot's position.
fn positions_for(player: &Player, knight: &Knight) -> [u8; 3] {
    let mut positions = [knight.location; 3];
    let mut current = knight.location;
    for (slot, order) in player.orders.iter().enumerate() {
        if let Some(order) = order {
            if order.knight_name == knight.name {
                current = order.to;
            }
        }
        positions[slot] = current;
    }
    positions
}

/// The position a knight must occupy *before* order `order_number`
/// (1-indexed) executes — i.e. the position after the previous slot, or
/// the knight's current location if `order_number == 1`.
pub fn position_before(player: &Player, knight: &Knight, order_number: u8) -> u8 {
    if order_number <= 1 {
        return knight.location;
    }
    let positions = positions_for(player, knight);
    positions[(order_number - 2) as usize]
}

/// Projected positions for every knight a player controls.
pub fn project_positions(player: &Player, knights: &HashMap<String, Knight>) -> HashMap<String, [u8; 3]> {
    player
        .knights
        .iter()
        .filter_map(|name| knights.get(name))
        .map(|knight| (knight.name.clone(), positions_for(player, knight)))
        .collect()
}
