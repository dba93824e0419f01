// ═══════════════════════════════════════════════════════════════════════
// Battle resolver
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{BattleRoundRecord, Side};

#[derive(Debug, Clone)]
pub struct BattleInputs {
    pub attacker_nickname: String,
    pub defender_nickname: String,
    pub attacker_troops: u32,
    pub defender_troops: u32,
    pub attacker_alliance_size: u32,
    pub defender_alliance_size: u32,
    pub attacker_knights: Vec<String>,
    pub defender_knights: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BattleResult {
    pub winner: Side,
    pub rounds: Vec<BattleRoundRecord>,
    pub attacker_troops_remaining: u32,
    pub defender_troops_remaining: u32,
    pub eliminated_knights: Vec<String>,
}

/// Resolves a battle round by round until one side's troops hit zero.
/// Each round both sides roll a d6 and add their alliance bonus; ties go
/// to the defender. The loser's troop count drops by one. `roll_die`
/// supplies the dice — production callers wire it to the same RNG stream
/// the round executor is already drawing scheduling order from; tests
/// wire it to a scripted sequence.
pub fn resolve_battle(inputs: BattleInputs, mut roll_die: impl FnMut() -> u8) -> BattleResult {
    let mut attacker_troops = inputs.attacker_troops;
    let mut defender_troops = inputs.defender_troops;
    let mut rounds = Vec::new();

    while attacker_troops > 0 && defender_troops > 0 {
        let attacker_roll = roll_die();
        let defender_roll = roll_die();
        let attacker_score = attacker_roll as u32 + inputs.attacker_alliance_size;
        let defender_score = defender_roll as u32 + inputs.defender_alliance_size;

        let loser = if attacker_score > defender_score {
            defender_troops -= 1;
            Side::Defender
        } else {
            attacker_troops -= 1;
            Side::Attacker
        };

        rounds.push(BattleRoundRecord {
            attacker_roll,
            defender_roll,
            attacker_score,
            defender_score,
            loser,
        });
    }

    let (winner, eliminated_knights) = if attacker_troops == 0 {
        (Side::Defender, inputs.attacker_knights)
    } else {
        (Side::Attacker, inputs.defender_knights)
    };

    BattleResult {
        winner,
        rounds,
        attacker_troops_remaining: attacker_troops,
        defender_troops_remaining: defender_troops,
        eliminated_knights,
    }
}
