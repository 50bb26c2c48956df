//! Enemy decision making
//!
//! Each archetype gets one decision function. The function sees a read-only
//! [`Senses`] snapshot of its enemy plus the archetype's private [`Brain`]
//! memory, and answers with a [`Decision`] that the enemy applies to itself.
//! Distances are forward distances from the enemy to the player in world
//! units (see [`crate::signed_distance`]).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Action, Direction};
use crate::consts::{CIRCUMFERENCE, TURN_AROUND_BASE};

/// Walkers pick a new patrol leg of 300..480 ticks
const WALKER_TURN_JITTER: i32 = 180;

const SCORPION_STRIKE_RANGE: f32 = 60.0;
const SCORPION_RECOVERY_TICKS: u32 = 60;
const SCORPION_ATTACK_TICKS: u32 = 72;

const GOLEM_SLAM_RANGE: f32 = 100.0;
const GOLEM_IDLE_TICKS: u32 = 60;
const GOLEM_WALK_TICKS: u32 = 70;
const GOLEM_SLAM_TICKS: u32 = 120;

pub const WITCH_INTRO_DELAY: u32 = 104;
const WITCH_COOLDOWN_PER_HEALTH: u32 = 15;
const WITCH_CAST_TICKS: u32 = 80;
const WITCH_KNOCKDOWN_TICKS: u32 = 100;
const WITCH_ASCENT_TICKS: u32 = 150;
const WITCH_HOVER_SPEED: f32 = 3.0;
const WITCH_CHASE_SPEED: f32 = 6.0;
/// Health values that force the boss back into the air
pub const WITCH_THRESHOLDS: [u16; 2] = [14, 7];

const LIGHTNING_TELEGRAPH_TICKS: u32 = 36;
const LIGHTNING_STRIKE_TICKS: u32 = 12;

/// Ranged attacks the boss can conjure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spell {
    Fireball,
    Lightning,
}

/// Boss memory that survives between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitchMind {
    pub spell_delay: u32,
    /// `None` until the intro ascent is over
    pub next_spell: Option<Spell>,
    pub can_cast: bool,
    thresholds_passed: [bool; 2],
}

impl Default for WitchMind {
    fn default() -> Self {
        Self {
            spell_delay: WITCH_INTRO_DELAY,
            next_spell: None,
            can_cast: false,
            thresholds_passed: [false; 2],
        }
    }
}

/// Per-archetype decision policy and its private memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Brain {
    /// Porcupines and hornets: patrol and turn around on a timer
    Walker,
    Scorpion,
    Golem,
    Witch(WitchMind),
    Fireball,
    Lightning,
}

/// What an enemy knows about itself and the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Senses {
    pub action: Action,
    pub direction: Direction,
    pub anim: u32,
    pub health: u16,
    pub turn_timer: i32,
    /// Forward distance from the enemy to the player, `[0, C)`
    pub distance: f32,
}

impl Senses {
    /// Player is within `range` in the direction the enemy faces
    pub fn player_ahead(&self, range: f32) -> bool {
        match self.direction {
            Direction::Right => self.distance < range,
            Direction::Left => self.distance > CIRCUMFERENCE - range,
        }
    }
}

/// Out-of-band notifications an AI step can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Cast(Spell),
    PhaseThreshold(u16),
    Grounded,
}

/// The outcome of one AI step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub direction: Direction,
    /// Take one step at the (possibly new) speed after turning
    pub advance: bool,
    pub speed: Option<f32>,
    pub lock_reverse: bool,
    pub turn_timer: Option<i32>,
    pub health_cost: u16,
    pub signal: Option<Signal>,
}

impl Decision {
    /// Keep doing what the enemy is doing
    pub fn hold(senses: &Senses) -> Self {
        Self {
            action: senses.action,
            direction: senses.direction,
            advance: false,
            speed: None,
            lock_reverse: false,
            turn_timer: None,
            health_cost: 0,
            signal: None,
        }
    }
}

impl Brain {
    pub fn decide(&mut self, senses: &Senses, rng: &mut Pcg32) -> Decision {
        match self {
            Brain::Walker => walker(senses, rng),
            Brain::Scorpion => scorpion(senses, rng),
            Brain::Golem => golem(senses),
            Brain::Witch(mind) => witch(mind, senses, rng),
            Brain::Fireball => fireball(senses),
            Brain::Lightning => lightning(senses),
        }
    }

    pub fn witch_mind(&self) -> Option<&WitchMind> {
        match self {
            Brain::Witch(mind) => Some(mind),
            _ => None,
        }
    }

    pub fn witch_mind_mut(&mut self) -> Option<&mut WitchMind> {
        match self {
            Brain::Witch(mind) => Some(mind),
            _ => None,
        }
    }
}

fn walker(s: &Senses, rng: &mut Pcg32) -> Decision {
    let mut d = Decision::hold(s);
    let mut timer = s.turn_timer - 1;
    if timer <= 0 {
        timer = TURN_AROUND_BASE + rng.random_range(0..WALKER_TURN_JITTER);
        d.direction = s.direction.opposite();
    }
    d.turn_timer = Some(timer);
    d.advance = true;
    d
}

fn scorpion(s: &Senses, rng: &mut Pcg32) -> Decision {
    let mut d = Decision::hold(s);
    match s.action {
        Action::Idle => {
            d.lock_reverse = true;
            if s.anim >= SCORPION_RECOVERY_TICKS {
                d.action = Action::Walk;
            }
        }
        Action::Walk => {
            let mut timer = s.turn_timer - 1;
            if s.player_ahead(SCORPION_STRIKE_RANGE) {
                d.action = Action::Attack;
                d.turn_timer = Some(TURN_AROUND_BASE + rng.random_range(0..10));
                return d;
            }

            if timer <= 0 {
                let dist = s.distance;
                let behind_left = dist > 250.0 && dist < 500.0;
                let behind_right = dist > CIRCUMFERENCE - 500.0 && dist < CIRCUMFERENCE - 250.0;
                if behind_left && s.direction == Direction::Left {
                    // Player just behind: turn to face them and hold for a tick
                    d.direction = Direction::Right;
                    d.turn_timer = Some(TURN_AROUND_BASE + rng.random_range(0..10));
                    return d;
                }
                if behind_right && s.direction == Direction::Right {
                    d.direction = Direction::Left;
                    d.turn_timer = Some(TURN_AROUND_BASE + rng.random_range(0..10));
                    return d;
                }
                if dist > 500.0 && dist < CIRCUMFERENCE - 500.0 {
                    timer = TURN_AROUND_BASE + rng.random_range(0..20);
                    d.direction = s.direction.opposite();
                }
            }
            d.turn_timer = Some(timer);
            d.advance = true;
        }
        Action::Attack => {
            d.lock_reverse = true;
            if s.anim >= SCORPION_ATTACK_TICKS {
                d.action = Action::Idle;
            }
        }
        _ => {}
    }
    d
}

fn golem(s: &Senses) -> Decision {
    let mut d = Decision::hold(s);
    d.lock_reverse = true;
    match s.action {
        Action::Idle => {
            if s.player_ahead(GOLEM_SLAM_RANGE) {
                d.action = Action::Attack;
            } else if s.anim >= GOLEM_IDLE_TICKS {
                d.action = Action::Walk;
            }
        }
        Action::Walk => {
            if s.anim >= GOLEM_WALK_TICKS {
                d.action = Action::Idle;
            } else {
                d.advance = true;
            }
        }
        Action::Attack => {
            if s.anim >= GOLEM_SLAM_TICKS {
                d.action = Action::Idle;
            }
        }
        _ => {}
    }
    d
}

fn witch(mind: &mut WitchMind, s: &Senses, rng: &mut Pcg32) -> Decision {
    let mut d = Decision::hold(s);

    // Crossing a threshold pre-empts whatever the boss was doing
    let threshold = WITCH_THRESHOLDS
        .iter()
        .position(|&h| h == s.health)
        .filter(|&slot| !mind.thresholds_passed[slot]);
    if let Some(slot) = threshold {
        if !matches!(s.action, Action::Jump | Action::Dying) {
            mind.thresholds_passed[slot] = true;
            d.action = Action::Jump;
            d.signal = Some(Signal::PhaseThreshold(s.health));
            return d;
        }
    }

    let cooldown = u32::from(s.health) * WITCH_COOLDOWN_PER_HEALTH;
    match s.action {
        Action::Idle => d.lock_reverse = true,
        Action::Walk => {
            if mind.spell_delay == 0 {
                if let Some(spell) = mind.next_spell {
                    d.signal = Some(Signal::Cast(spell));
                }
                mind.next_spell = Some(if rng.random_bool(0.5) {
                    Spell::Fireball
                } else {
                    Spell::Lightning
                });
                mind.spell_delay = cooldown;
            }

            steer_witch(&mut d, s.distance);
            d.advance = true;

            if mind.can_cast {
                mind.spell_delay = mind.spell_delay.saturating_sub(1);
            }
            if mind.spell_delay == 0 {
                d.action = if mind.next_spell.is_none() {
                    Action::Jump
                } else {
                    Action::Attack
                };
            }
        }
        Action::Attack => {
            if !mind.can_cast {
                d.action = Action::Walk;
                mind.spell_delay = cooldown;
            } else if s.anim >= WITCH_CAST_TICKS {
                d.action = Action::Walk;
            }
        }
        Action::Roll => {
            if s.anim >= WITCH_KNOCKDOWN_TICKS {
                d.action = Action::Idle;
                d.signal = Some(Signal::Grounded);
            }
        }
        Action::Jump => {
            if s.anim >= WITCH_ASCENT_TICKS {
                d.action = Action::Walk;
            }
        }
        _ => {}
    }
    d
}

/// Hover close to the player: drift slowly nearby, chase when far
fn steer_witch(d: &mut Decision, dist: f32) {
    if d.direction == Direction::Left {
        if dist > 150.0 && dist < 3200.0 {
            d.speed = Some(WITCH_HOVER_SPEED);
        }
        if dist > 200.0 && dist < CIRCUMFERENCE - 222.0 {
            d.speed = Some(WITCH_CHASE_SPEED);
            d.direction = Direction::Right;
        }
    }
    if d.direction == Direction::Right {
        if dist > 3220.0 && dist < CIRCUMFERENCE - 152.0 {
            d.speed = Some(WITCH_HOVER_SPEED);
        }
        if dist > 3220.0 && dist < CIRCUMFERENCE - 202.0 {
            d.speed = Some(WITCH_CHASE_SPEED);
            d.direction = Direction::Left;
        }
    }
}

fn fireball(s: &Senses) -> Decision {
    let mut d = Decision::hold(s);
    d.lock_reverse = true;
    d.advance = true;
    if s.action == Action::Walk {
        d.health_cost = 1;
        if s.health <= 1 {
            d.action = Action::Dying;
        }
    }
    d
}

fn lightning(s: &Senses) -> Decision {
    let mut d = Decision::hold(s);
    d.lock_reverse = true;
    match s.action {
        Action::Idle => {
            if s.anim >= LIGHTNING_TELEGRAPH_TICKS {
                d.action = Action::Attack;
            }
        }
        Action::Attack => {
            if s.anim >= LIGHTNING_STRIKE_TICKS {
                d.action = Action::Dying;
            }
        }
        Action::Dying => {}
        _ => d.action = Action::Idle,
    }
    d
}
