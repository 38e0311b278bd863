//! Per-stage difficulty and enemy quota tables
//!
//! Data-driven so balance tweaks do not touch code: the built-in table ships
//! with the crate and a JSON override can replace it wholesale. The stage
//! constructor reads its spinner quotas here and rolls one Any-sector spawn
//! per quota slot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_STAGE_NUM;

/// Number of distinct spinner kinds the quota arrays cover
pub const SPINNER_KINDS: usize = 3;

/// Stage difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

/// Difficulty assignment per stage plus spinner quotas per difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTable {
    /// Indexed by stage number; index 0 is the demo stage
    pub difficulty: Vec<Difficulty>,
    /// Spinner count per kind for each difficulty tier
    pub quotas: HashMap<Difficulty, [u32; SPINNER_KINDS]>,
}

impl StageTable {
    /// Table shipped with the game
    pub fn builtin() -> Self {
        use Difficulty::*;
        let mut difficulty = vec![Easy; MAX_STAGE_NUM as usize + 1];
        for (num, d) in difficulty.iter_mut().enumerate() {
            *d = match num {
                0..=3 => Easy,
                4..=7 => Normal,
                8..=11 => Hard,
                _ => Expert,
            };
        }
        let quotas = HashMap::from([
            (Easy, [2, 0, 0]),
            (Normal, [2, 1, 0]),
            (Hard, [3, 1, 1]),
            (Expert, [3, 2, 2]),
        ]);
        Self { difficulty, quotas }
    }

    /// Parse a replacement table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Difficulty of a stage; numbers past the table clamp to the last tier
    pub fn difficulty_of(&self, stage_num: u32) -> Difficulty {
        let idx = (stage_num as usize).min(self.difficulty.len().saturating_sub(1));
        self.difficulty.get(idx).copied().unwrap_or(Difficulty::Easy)
    }

    /// Spinner quota array for a stage
    pub fn spinner_quotas(&self, stage_num: u32) -> [u32; SPINNER_KINDS] {
        self.quotas
            .get(&self.difficulty_of(stage_num))
            .copied()
            .unwrap_or([0; SPINNER_KINDS])
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_stages() {
        let table = StageTable::builtin();
        assert_eq!(table.difficulty.len(), MAX_STAGE_NUM as usize + 1);
        for num in 0..=MAX_STAGE_NUM {
            // Every stage resolves to a quota array
            let _ = table.spinner_quotas(num);
        }
    }

    #[test]
    fn test_difficulty_clamps_past_table() {
        let table = StageTable::builtin();
        assert_eq!(
            table.difficulty_of(MAX_STAGE_NUM + 10),
            table.difficulty_of(MAX_STAGE_NUM)
        );
    }

    #[test]
    fn test_json_override_round_trip() {
        let table = StageTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(StageTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{
            "difficulty": ["easy", "easy", "hard"],
            "quotas": { "easy": [1, 0, 0], "hard": [2, 2, 1] }
        }"#;
        let table = StageTable::from_json(json).unwrap();
        assert_eq!(table.difficulty_of(2), Difficulty::Hard);
        assert_eq!(table.spinner_quotas(2), [2, 2, 1]);
    }
}
