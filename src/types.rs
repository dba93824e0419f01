// ═══════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 11;
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

// ── Board ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Blank,
    Land,
    Keep,
    Castle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hex {
    pub index: u8,
    pub tile_type: TileType,
    pub neighbors: [Option<u8>; 6],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub hexes: Vec<Hex>,
}

// ── Knights & players ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Knight {
    pub name: String,
    pub owner_nickname: String,
    pub location: u8,
    pub alive: bool,
    pub projected_positions: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Lobby,
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub nickname: String,
    pub alliance: Option<String>,
    pub knights: Vec<String>,
    pub ready: bool,
    pub orders: [Option<Order>; 3],
}

impl Player {
    pub fn new(nickname: impl Into<String>) -> Self {
        Player {
            nickname: nickname.into(),
            alliance: None,
            knights: Vec::new(),
            ready: false,
            orders: [None, None, None],
        }
    }

    /// Orders currently queued, lowest `order_number` first.
    pub fn queued_orders(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.iter().flatten().collect();
        orders.sort_by_key(|o| o.order_number);
        orders
    }
}

// ── Hex state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HexState {
    pub owner: Option<String>,
    pub troops: HashMap<String, u32>,
}

impl HexState {
    pub fn troops_for(&self, nickname: &str) -> u32 {
        self.troops.get(nickname).copied().unwrap_or(0)
    }
}

// ── Orders ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Move,
    Attack,
    Fortify,
    Promote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_number: u8,
    pub knight_name: String,
    pub owner_nickname: String,
    pub kind: OrderKind,
    pub from: u8,
    pub to: u8,
    /// Meaningful for Move/Attack only; ignored by Fortify/Promote.
    pub troops: u32,
}

// ── Events ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRoundRecord {
    pub attacker_roll: u8,
    pub defender_roll: u8,
    pub attacker_score: u32,
    pub defender_score: u32,
    pub loser: Side,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    OrderIssued {
        round: u32,
        owner_nickname: String,
        order: Order,
    },
    BattleFought {
        round: u32,
        hex: u8,
        attacker_nickname: String,
        defender_nickname: String,
        rounds: Vec<BattleRoundRecord>,
        winner: Side,
    },
    KnightEliminated {
        round: u32,
        knight_name: String,
    },
    HexCaptured {
        round: u32,
        hex: u8,
        previous_owner: Option<String>,
        new_owner: String,
    },
    RoundAdvanced {
        from_round: u32,
        to_round: u32,
    },
}

// ── Game state ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round: u32,
    pub status: GameStatus,
    pub board: Board,
    pub hexes: Vec<HexState>,
    pub players: HashMap<String, Player>,
    pub knights: HashMap<String, Knight>,
    pub alliances: HashMap<String, Vec<String>>,
    /// Player nicknames in join order. The "full player list" the round
    /// executor draws over — kept separate from `players` because a
    /// `HashMap`'s iteration order is not stable across process runs.
    pub turn_order: Vec<String>,
    pub next_knight_seq: u64,
    pub event_log_index: u64,
}

impl GameState {
    pub fn alliance_size(&self, nickname: &str) -> u32 {
        match self.players.get(nickname).and_then(|p| p.alliance.as_ref()) {
            Some(alliance) => self
                .alliances
                .get(alliance)
                .map(|members| members.len() as u32)
                .unwrap_or(1),
            None => 1,
        }
    }

    pub fn living_knights_at(&self, hex: u8, owner: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .knights
            .values()
            .filter(|k| k.alive && k.location == hex && k.owner_nickname == owner)
            .map(|k| k.name.clone())
            .collect();
        names.sort();
        names
    }
}
