//! Strength-ratio damage model
//!
//! Damage scales with the ratio of effective strengths. Effective strength
//! falls off with health down to half strength at zero health. Predictions
//! are deterministic; resolution applies a bounded random spread.

use rand::Rng;

use crate::combat::combatant::Combatant;
use crate::core::config::CombatConfig;
use crate::map::tile::Tile;
use crate::units::unit::{MapUnit, MAX_HEALTH};

/// Reference combat math used by `GameState`
#[derive(Debug, Clone, Default)]
pub struct StrengthDamageModel {
    pub config: CombatConfig,
}

impl StrengthDamageModel {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    /// Strength after health scaling (never below 1 before scaling)
    pub fn effective_strength(strength: u32, health: u32, max_health: u32) -> f32 {
        let health_ratio = health.min(max_health) as f32 / max_health.max(1) as f32;
        strength.max(1) as f32 * (0.5 + 0.5 * health_ratio)
    }

    fn ratio_damage(&self, dealer: f32, receiver: f32) -> u32 {
        let damage = self.config.base_damage * dealer / receiver.max(f32::EPSILON);
        damage.round().clamp(0.0, MAX_HEALTH as f32) as u32
    }

    /// Expected damage the defender inflicts back on a unit attacking it
    ///
    /// Ranged attackers take no retaliation and civilians deal none.
    pub fn predicted_damage_to_attacker(&self, attacker: &MapUnit, defender: Combatant<'_>) -> u32 {
        if attacker.is_ranged() || attacker.moves_like_air_units() || defender.is_civilian() {
            return 0;
        }
        let attack = Combatant::Unit(attacker);
        let dealer = Self::effective_strength(
            defender.defending_strength(),
            defender.health(),
            defender.max_health(),
        );
        let receiver = Self::effective_strength(
            attack.attacking_strength(),
            attacker.health,
            MAX_HEALTH,
        );
        self.ratio_damage(dealer, receiver)
    }

    /// Expected damage the attacker inflicts on the defender
    pub fn predicted_damage_to_defender(&self, attacker: Combatant<'_>, defender: Combatant<'_>) -> u32 {
        if attacker.is_civilian() {
            return 0;
        }
        let dealer = Self::effective_strength(
            attacker.attacking_strength(),
            attacker.health(),
            attacker.max_health(),
        );
        let receiver = Self::effective_strength(
            defender.defending_strength(),
            defender.health(),
            defender.max_health(),
        );
        self.ratio_damage(dealer, receiver)
    }

    /// Apply the configured spread to a prediction
    pub fn roll<R: Rng + ?Sized>(&self, predicted: u32, rng: &mut R) -> u32 {
        let spread = self.config.damage_spread;
        if predicted == 0 || spread <= 0.0 {
            return predicted;
        }
        let factor = rng.gen_range((1.0 - spread)..=(1.0 + spread));
        (predicted as f32 * factor).round().max(0.0) as u32
    }

    /// Health a unit loses at the end of a turn on `tile`
    pub fn terrain_damage(&self, tile: &Tile) -> u32 {
        tile.damage_per_turn()
    }
}
