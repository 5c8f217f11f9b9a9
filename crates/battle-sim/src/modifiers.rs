//! Hook points for equipped capper modifiers.

use battle_core::enums::Modifier;

/// The modifiers one side has equipped, folded into the effects the engine
/// consults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierSet {
    modifiers: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new(modifiers: &[Modifier]) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
        }
    }

    /// Product of all speed multipliers.
    pub fn speed_multiplier(&self) -> f32 {
        self.modifiers.iter().map(|m| m.speed_multiplier()).product()
    }

    /// Sum of all token HP bonuses.
    pub fn token_hp_bonus(&self) -> u8 {
        self.modifiers
            .iter()
            .fold(0u8, |acc, m| acc.saturating_add(m.token_hp_bonus()))
    }

    /// Whether losing a lane fires a counter-volley.
    pub fn counter_volley(&self) -> bool {
        self.modifiers.iter().any(|m| m.triggers_counter_volley())
    }
}
