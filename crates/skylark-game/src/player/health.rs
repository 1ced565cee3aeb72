//! Hit points with a post-damage invincibility window

use serde::{Deserialize, Serialize};

/// Result of a damage attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead or invincible; nothing changed
    Ignored,
    /// Took damage and survived
    Damaged { remaining: u32 },
    /// This hit was lethal
    Died,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    max_hp: u32,
    current_hp: u32,
    /// Invincibility granted after each hit, in seconds
    invincibility_time: f32,
    invincible_remaining: f32,
}

impl Health {
    /// Create health at full hit points
    pub fn new(max_hp: u32, invincibility_time: f32) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            invincibility_time,
            invincible_remaining: 0.0,
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_remaining > 0.0
    }

    /// HP as a 0.0-1.0 fraction
    pub fn fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.max_hp as f32
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.is_alive() || self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        self.current_hp = self.current_hp.saturating_sub(amount);
        if self.current_hp == 0 {
            return DamageOutcome::Died;
        }

        self.invincible_remaining = self.invincibility_time;
        DamageOutcome::Damaged {
            remaining: self.current_hp,
        }
    }

    /// Heal by a flat amount, capped at max
    pub fn heal(&mut self, amount: u32) {
        if self.is_alive() {
            self.current_hp = (self.current_hp + amount).min(self.max_hp);
        }
    }

    /// Count down the invincibility window
    pub fn tick(&mut self, dt: f32) {
        self.invincible_remaining = (self.invincible_remaining - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_grants_invincibility() {
        let mut health = Health::new(6, 1.0);

        assert_eq!(health.take_damage(2), DamageOutcome::Damaged { remaining: 4 });
        assert!(health.is_invincible());
        assert_eq!(health.take_damage(2), DamageOutcome::Ignored);

        health.tick(1.0);
        assert!(!health.is_invincible());
        assert_eq!(health.take_damage(1), DamageOutcome::Damaged { remaining: 3 });
    }

    #[test]
    fn test_lethal_damage() {
        let mut health = Health::new(3, 1.0);
        assert_eq!(health.take_damage(10), DamageOutcome::Died);
        assert!(!health.is_alive());
        assert_eq!(health.max_hp(), 3);
        assert_eq!(health.fraction(), 0.0);
        assert_eq!(health.take_damage(1), DamageOutcome::Ignored);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(6, 0.0);
        health.take_damage(4);
        health.heal(1);
        assert_eq!(health.current_hp(), 3);
        health.heal(100);
        assert_eq!(health.current_hp(), 6);
        assert_eq!(health.fraction(), 1.0);
    }
}
