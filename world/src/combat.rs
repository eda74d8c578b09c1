//! Layered shield and damage-over-time arithmetic.
//!
//! Buildups drain over time into their shield pool, shields drain into hit
//! points, and direct hits walk the fixed physical, fire, poison, magic
//! precedence chain. The poison channel spills without defense scaling while
//! burn and bleed scale every conversion; the asymmetry is part of the
//! balance model and pinned by tests.

use path_defence_core::{EnemySpec, ProjectilePayload};

/// Damage-over-time drain rates, in points per second.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DotRates {
    pub(crate) poison_per_sec: f32,
    pub(crate) burn_per_sec: f32,
    pub(crate) bleed_per_sec: f32,
}

/// Mutable combat state of a single enemy.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DamageState {
    pub(crate) hp: f32,
    defense_physical: f32,
    defense_fire: f32,
    defense_poison: f32,
    defense_magic: f32,
    pub(crate) shield_physical: f32,
    pub(crate) shield_fire: f32,
    pub(crate) shield_poison: f32,
    pub(crate) shield_magic: f32,
    buildup_poison: f32,
    buildup_burn: f32,
    buildup_bleed: f32,
}

impl DamageState {
    pub(crate) fn from_spec(spec: &EnemySpec, bonus_hp: f32) -> Self {
        Self {
            hp: spec.hp + bonus_hp,
            defense_physical: spec.defense_physical,
            defense_fire: spec.defense_fire,
            defense_poison: spec.defense_poison,
            defense_magic: spec.defense_magic,
            shield_physical: spec.shield_physical,
            shield_fire: spec.shield_fire,
            shield_poison: spec.shield_poison,
            shield_magic: spec.shield_magic,
            buildup_poison: 0.0,
            buildup_burn: 0.0,
            buildup_bleed: 0.0,
        }
    }

    pub(crate) fn alive(&self) -> bool {
        self.hp > 0.0
    }

    pub(crate) fn add_poison(&mut self, amount: f32) {
        self.buildup_poison += amount;
    }

    pub(crate) fn add_burn(&mut self, amount: f32) {
        self.buildup_burn += amount;
    }

    pub(crate) fn add_bleed(&mut self, amount: f32) {
        self.buildup_bleed += amount;
    }

    /// Applies a detonating projectile's full payload.
    pub(crate) fn strike(&mut self, payload: &ProjectilePayload) {
        self.add_bleed(payload.bleed);
        self.add_poison(payload.poison);
        self.add_burn(payload.burn);
        self.lose_hp(payload.impact);
    }

    /// Advances every damage-over-time channel by `dt_secs`.
    pub(crate) fn advance(&mut self, dt_secs: f32, rates: &DotRates) {
        if !self.alive() {
            return;
        }
        self.apply_poison(dt_secs, rates.poison_per_sec);
        self.apply_burn(dt_secs, rates.burn_per_sec);
        self.apply_bleed(dt_secs, rates.bleed_per_sec);
    }

    // Poison spills into its shield and onward into hit points without any
    // defense scaling.
    fn apply_poison(&mut self, dt_secs: f32, rate: f32) {
        if self.buildup_poison <= 0.0 {
            return;
        }
        self.buildup_poison -= rate * dt_secs;
        if self.buildup_poison < 0.0 {
            self.shield_poison += self.buildup_poison;
            self.buildup_poison = 0.0;
        }
        self.shield_poison -= rate * dt_secs;
        if self.shield_poison < 0.0 {
            self.hp += self.shield_poison;
            self.shield_poison = 0.0;
        }
    }

    fn apply_burn(&mut self, dt_secs: f32, rate: f32) {
        if self.buildup_burn <= 0.0 {
            return;
        }
        let resist = 1.0 - self.defense_fire;
        self.buildup_burn -= rate * dt_secs;
        if self.buildup_burn < 0.0 {
            self.shield_fire += self.buildup_burn * resist;
            self.buildup_burn = 0.0;
        }
        self.shield_fire -= rate * resist * dt_secs;
        if self.shield_fire < 0.0 {
            self.hp += self.shield_fire * resist;
            self.shield_fire = 0.0;
        }
    }

    fn apply_bleed(&mut self, dt_secs: f32, rate: f32) {
        if self.buildup_bleed <= 0.0 {
            return;
        }
        let resist = 1.0 - self.defense_physical;
        self.buildup_bleed -= rate * dt_secs;
        if self.buildup_bleed < 0.0 {
            self.shield_physical += self.buildup_bleed * resist;
            self.buildup_bleed = 0.0;
        }
        self.shield_physical -= rate * resist * dt_secs;
        if self.shield_physical < 0.0 {
            self.hp += self.shield_physical * resist;
            self.shield_physical = 0.0;
        }
    }

    /// Resolves a direct hit through the shield precedence chain.
    ///
    /// Each exhausted pool un-scales its deficit by its own defense and
    /// forwards it scaled by the next pool's defense. The final magic
    /// conversion scales by the physical defense.
    pub(crate) fn lose_hp(&mut self, damage: f32) {
        if self.hp <= 0.0 {
            return;
        }
        self.shield_physical -= damage * (1.0 - self.defense_physical);
        if self.shield_physical < 0.0 {
            self.shield_physical /= 1.0 - self.defense_physical;
            self.shield_fire += self.shield_physical * (1.0 - self.defense_fire);
            self.shield_physical = 0.0;
        }
        if self.shield_fire < 0.0 {
            self.shield_fire /= 1.0 - self.defense_fire;
            self.shield_poison += self.shield_fire * (1.0 - self.defense_poison);
            self.shield_fire = 0.0;
        }
        if self.shield_poison < 0.0 {
            self.shield_poison /= 1.0 - self.defense_poison;
            self.shield_magic += self.shield_poison * (1.0 - self.defense_magic);
            self.shield_poison = 0.0;
        }
        if self.shield_magic < 0.0 {
            self.shield_magic /= 1.0 - self.defense_magic;
            self.hp += self.shield_magic * (1.0 - self.defense_physical);
            self.shield_magic = 0.0;
        }
    }
}
