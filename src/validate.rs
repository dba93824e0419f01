// ═══════════════════════════════════════════════════════════════════════
// Order validator — twelve checks, first failure wins.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::are_neighbors;
use crate::projection::position_before;
use crate::types::{GameState, Order, OrderKind, BOARD_SIZE};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionCode {
    #[error("order_number must be 1, 2, or 3")]
    InvalidOrderNumber,
    #[error("owner_nickname does not name a player in this game")]
    PlayerNotFound,
    #[error("knight_name does not name an existing knight")]
    KnightNotFound,
    #[error("the named knight belongs to a different player")]
    KnightNotOwned,
    #[error("the named knight is dead")]
    KnightDead,
    #[error("from or to does not name a hex on the board")]
    HexNotFound,
    #[error("from does not match the knight's projected position at this slot")]
    FromMismatch,
    #[error("a Fortify order's to must equal its from")]
    FortifyDestinationInvalid,
    #[error("a Promote order's to must equal its from")]
    PromoteDestinationInvalid,
    #[error("the owner has fewer than 100 troops on the hex to promote from")]
    PromoteInsufficientTroops,
    #[error("to is not adjacent to from")]
    NotNeighbor,
    #[error("troops must be greater than zero")]
    InvalidTroopCount,
    #[error("the owner does not have enough troops on the hex to cover this order")]
    InsufficientTroops,
    #[error("an Attack's destination hex is not held by an enemy")]
    AttackTargetNotEnemy,
}

use RejectionCode::*;

/// Validates `order` against `state`. Checks run in the order listed
/// below; the first one that fails is returned. A returned `Ok` means
/// the order is safe to apply via the matching state mutator.
pub fn validate(state: &GameState, order: &Order) -> Result<(), RejectionCode> {
    if !(1..=3).contains(&order.order_number) {
        return Err(InvalidOrderNumber);
    }

    let player = state.players.get(&order.owner_nickname).ok_or(PlayerNotFound)?;

    let knight = state.knights.get(&order.knight_name).ok_or(KnightNotFound)?;
    if knight.owner_nickname != order.owner_nickname {
        return Err(KnightNotOwned);
    }

    if !knight.alive {
        return Err(KnightDead);
    }

    if order.from as usize >= BOARD_SIZE || order.to as usize >= BOARD_SIZE {
        return Err(HexNotFound);
    }

    if order.from != position_before(player, knight, order.order_number) {
        return Err(FromMismatch);
    }

    match order.kind {
        OrderKind::Fortify => {
            if order.to != order.from {
                return Err(FortifyDestinationInvalid);
            }
            return Ok(());
        }
        OrderKind::Promote => {
            if order.to != order.from {
                return Err(PromoteDestinationInvalid);
            }
            let available = state.hexes[order.from as usize].troops_for(&order.owner_nickname);
            if available < 100 {
                return Err(PromoteInsufficientTroops);
            }
            return Ok(());
        }
        OrderKind::Move | OrderKind::Attack => {}
    }

    if !are_neighbors(&state.board, order.from, order.to) {
        return Err(NotNeighbor);
    }

    if order.troops == 0 {
        return Err(InvalidTroopCount);
    }

    let available = state.hexes[order.from as usize].troops_for(&order.owner_nickname);
    if available < order.troops {
        return Err(InsufficientTroops);
    }

    if order.kind == OrderKind::Attack {
        let destination_owner = state.hexes[order.to as usize].owner.as_deref();
        if destination_owner.is_none() || destination_owner == Some(order.owner_nickname.as_str()) {
            return Err(AttackTargetNotEnemy);
        }
    }

    Ok(())
}
