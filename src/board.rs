// ═══════════════════════════════════════════════════════════════════════
// Board topology — procedural construction, not a hand-authored table.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Board, Hex, TileType, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

const KEEP_INDICES: [u8; 6] = [23, 26, 52, 58, 83, 86];
const CASTLE_INDEX: u8 = 55;
const LAND_OVERRIDES: [u8; 6] = [35, 46, 75, 63, 43, 66];

/// Row-parity neighbor offsets (odd-r horizontal layout): `(dx, dy)` pairs
/// for a hex on an even row, and for a hex on an odd row.
const EVEN_ROW_OFFSETS: [(i32, i32); 6] = [(1, -1), (1, 0), (1, 1), (0, 1), (-1, 0), (0, -1)];
const ODD_ROW_OFFSETS: [(i32, i32); 6] = [(0, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1)];

fn to_xy(index: u8) -> (i32, i32) {
    let index = index as i32;
    (index % BOARD_WIDTH as i32, index / BOARD_WIDTH as i32)
}

fn to_index(x: i32, y: i32) -> Option<u8> {
    if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
        return None;
    }
    Some((y * BOARD_WIDTH as i32 + x) as u8)
}

fn neighbors_of(index: u8) -> [Option<u8>; 6] {
    let (x, y) = to_xy(index);
    let offsets = if y % 2 == 0 { &EVEN_ROW_OFFSETS } else { &ODD_ROW_OFFSETS };
    let mut out = [None; 6];
    for (i, (dx, dy)) in offsets.iter().enumerate() {
        out[i] = to_index(x + dx, y + dy);
    }
    out
}

/// Builds the 110-hex board: every hex starts blank, the six keeps and the
/// castle are placed, any blank hex adjacent to a keep or the castle is
/// promoted to land, and finally the fixed override set is forced to land
/// regardless of adjacency (a handful of hexes the board calls out as
/// playable even though nothing above would otherwise reach them).
pub fn build_board() -> Board {
    let mut hexes: Vec<Hex> = (0..BOARD_SIZE as u8)
        .map(|index| Hex {
            index,
            tile_type: TileType::Blank,
            neighbors: neighbors_of(index),
        })
        .collect();

    for &keep in &KEEP_INDICES {
        hexes[keep as usize].tile_type = TileType::Keep;
    }
    hexes[CASTLE_INDEX as usize].tile_type = TileType::Castle;

    let special: Vec<u8> = KEEP_INDICES.iter().copied().chain([CASTLE_INDEX]).collect();
    let mut to_promote = Vec::new();
    for &hex_index in &special {
        for neighbor in hexes[hex_index as usize].neighbors.iter().flatten() {
            if hexes[*neighbor as usize].tile_type == TileType::Blank {
                to_promote.push(*neighbor);
            }
        }
    }
    for index in to_promote {
        hexes[index as usize].tile_type = TileType::Land;
    }

    for &index in &LAND_OVERRIDES {
        hexes[index as usize].tile_type = TileType::Land;
    }

    Board { hexes }
}

pub fn are_neighbors(board: &Board, a: u8, b: u8) -> bool {
    board
        .hexes
        .get(a as usize)
        .map(|hex| hex.neighbors.contains(&Some(b)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_110_hexes() {
        let board = build_board();
        assert_eq!(board.hexes.len(), 110);
    }

    #[test]
    fn has_six_keeps_and_one_castle() {
        let board = build_board();
        let keeps = board.hexes.iter().filter(|h| h.tile_type == TileType::Keep).count();
        let castles = board.hexes.iter().filter(|h| h.tile_type == TileType::Castle).count();
        assert_eq!(keeps, 6);
        assert_eq!(castles, 1);
        assert_eq!(board.hexes[CASTLE_INDEX as usize].tile_type, TileType::Castle);
        for &keep in &KEEP_INDICES {
            assert_eq!(board.hexes[keep as usize].tile_type, TileType::Keep);
        }
    }

    #[test]
    fn overrides_are_land() {
        let board = build_board();
        for &index in &LAND_OVERRIDES {
            assert_eq!(board.hexes[index as usize].tile_type, TileType::Land);
        }
    }

    #[test]
    fn neighbors_are_symmetric() {
        let board = build_board();
        for hex in &board.hexes {
            for neighbor in hex.neighbors.iter().flatten() {
                assert!(
                    are_neighbors(&board, *neighbor, hex.index),
                    "hex {} lists {} as a neighbor but not vice versa",
                    hex.index,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn no_hex_is_its_own_neighbor() {
        let board = build_board();
        for hex in &board.hexes {
            assert!(!hex.neighbors.contains(&Some(hex.index)));
        }
    }
}
