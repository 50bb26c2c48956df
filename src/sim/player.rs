//! Player entity and its input-driven state machine
//!
//! [`PlayerStates`] holds the pure transition logic (holds, locks, combo and
//! timers); [`Player`] owns it together with the physical [`Body`], health
//! and the hit-resolution rules.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::entity::{Action, Body, BoxSpec, Direction, Speed};
use super::rect::HitRect;
use crate::consts::*;
use crate::{normalize_angle, units_to_radians};

pub const PLAYER_SPRITE: Vec2 = Vec2::new(200.0, 135.0);

const REGULAR_BOX: BoxSpec = BoxSpec::new(26.0, 76.0, 85.0, 59.0);
const ROLLING_BOX: BoxSpec = BoxSpec::new(50.0, 32.0, 90.0, 104.0);
const ATTACK_BOX: BoxSpec = BoxSpec::new(80.0, 88.0, 118.0, 48.0);

/// Animation loop lengths (ticks)
const IDLE_LOOP: u32 = 120;
const WALK_LOOP: u32 = 60;
const ATTACK_LOOP: u32 = 48;

/// Abstract, already-debounced input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    PressLeft,
    ReleaseLeft,
    PressRight,
    ReleaseRight,
    PressJump,
    PressRoll,
    PressAttack,
    PressBlock,
    ReleaseBlock,
}

/// Transition logic for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStates {
    direction: Direction,
    action: Action,
    holding_left: bool,
    holding_right: bool,
    locked_left: bool,
    locked_right: bool,
    holding_block: bool,
    attack_combo: bool,
    jump_speed: Speed,
    roll_speed: Speed,
    anim: u32,
    roll_ticks: u32,
    attack_ticks: u32,
    damage_immunity: u32,
}

impl PlayerStates {
    pub fn new(direction: Direction, action: Action) -> Self {
        Self {
            direction,
            action,
            holding_left: false,
            holding_right: false,
            locked_left: false,
            locked_right: false,
            holding_block: false,
            attack_combo: false,
            jump_speed: Speed::Still,
            roll_speed: Speed::Still,
            anim: 0,
            roll_ticks: 0,
            attack_ticks: 0,
            damage_immunity: 0,
        }
    }

    fn set_action(&mut self, action: Action) {
        self.action = action;
        self.anim = 0;
    }

    /// Effective facing: a lock wins over the requested direction
    pub fn direction(&self) -> Direction {
        match self.direction {
            Direction::Left if self.locked_right => Direction::Right,
            Direction::Right if self.locked_left => Direction::Left,
            d => d,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn anim(&self) -> u32 {
        self.anim
    }

    pub fn jump_speed(&self) -> Speed {
        self.jump_speed
    }

    pub fn roll_speed(&self) -> Speed {
        self.roll_speed
    }

    pub fn is_immune(&self) -> bool {
        self.damage_immunity != 0
    }

    pub fn damage_immunity(&self) -> u32 {
        self.damage_immunity
    }

    fn lock_direction(&mut self) {
        match self.direction {
            Direction::Left => self.locked_left = true,
            Direction::Right => self.locked_right = true,
        }
    }

    fn unlock(&mut self) {
        self.locked_left = false;
        self.locked_right = false;
    }

    /// Back on the ground after a jump or knock-back
    pub fn land(&mut self) {
        self.unlock();
        if self.holding_left || self.holding_right {
            self.set_action(Action::Walk);
        } else {
            self.set_action(Action::Idle);
        }
    }

    /// Block if held, else walk if a direction is held, else idle
    fn recover(&mut self) {
        self.unlock();
        if self.holding_block {
            self.set_action(Action::Block);
        } else if self.holding_left || self.holding_right {
            self.set_action(Action::Walk);
        } else {
            self.set_action(Action::Idle);
        }
    }

    fn tick_roll(&mut self) {
        self.roll_ticks = self.roll_ticks.saturating_sub(1);
        if self.roll_ticks == 0 {
            self.recover();
        }
    }

    fn tick_attack(&mut self) {
        self.attack_ticks = self.attack_ticks.saturating_sub(1);
        if self.attack_ticks == 0 {
            if self.attack_combo {
                self.attack_ticks = ATTACK_TICKS;
                self.attack_combo = false;
                return;
            }
            self.recover();
        }
    }

    fn tick_immunity(&mut self) {
        self.damage_immunity = self.damage_immunity.saturating_sub(1);
    }

    /// Advance the per-state animation counter, looping where the sprite loops
    pub fn advance_animation(&mut self) {
        self.anim += 1;
        let period = match self.action {
            Action::Idle => IDLE_LOOP,
            Action::Walk => WALK_LOOP,
            Action::Attack => ATTACK_LOOP,
            _ => return,
        };
        if self.anim >= period {
            self.anim = 0;
        }
    }

    pub fn reset_animation(&mut self) {
        self.anim = 0;
    }

    pub fn press_left(&mut self) {
        self.press(Direction::Left);
    }

    pub fn press_right(&mut self) {
        self.press(Direction::Right);
    }

    fn press(&mut self, requested: Direction) {
        let (locked_same, locked_other) = match requested {
            Direction::Left => (self.locked_left, self.locked_right),
            Direction::Right => (self.locked_right, self.locked_left),
        };

        match self.action {
            Action::Idle => self.set_action(Action::Walk),
            Action::Jump => {
                self.jump_speed = if self.jump_speed == Speed::Still || self.direction == requested {
                    Speed::Fast
                } else {
                    Speed::Slow
                };
            }
            Action::Roll => {
                if locked_same {
                    self.roll_speed = Speed::Fast;
                } else if locked_other {
                    self.roll_speed = Speed::Slow;
                }
            }
            _ => {}
        }

        match requested {
            Direction::Left => self.holding_left = true,
            Direction::Right => self.holding_right = true,
        }
        self.direction = requested;
    }

    pub fn release_left(&mut self) {
        self.release(Direction::Left);
    }

    pub fn release_right(&mut self) {
        self.release(Direction::Right);
    }

    fn release(&mut self, released: Direction) {
        let other_held = match released {
            Direction::Left => self.holding_right,
            Direction::Right => self.holding_left,
        };

        match self.action {
            Action::Walk if !other_held => self.set_action(Action::Idle),
            Action::Jump if self.direction == released => self.jump_speed = Speed::Slow,
            Action::Roll if self.direction == released => self.roll_speed = Speed::Slow,
            _ => {}
        }

        if other_held {
            self.direction = released.opposite();
        }
        match released {
            Direction::Left => self.holding_left = false,
            Direction::Right => self.holding_right = false,
        }
    }

    pub fn jump(&mut self) {
        let speed = match self.action {
            Action::Idle => Speed::Still,
            Action::Walk => Speed::Fast,
            _ => return,
        };
        self.set_action(Action::Jump);
        self.jump_speed = speed;
    }

    pub fn roll(&mut self) {
        let speed = match self.action {
            Action::Idle => Speed::Slow,
            Action::Walk => Speed::Fast,
            _ => return,
        };
        self.lock_direction();
        self.set_action(Action::Roll);
        self.roll_speed = speed;
        self.roll_ticks = ROLL_TICKS;
    }

    pub fn attack(&mut self) {
        match self.action {
            Action::Idle | Action::Walk => {
                self.lock_direction();
                self.set_action(Action::Attack);
                self.attack_ticks = ATTACK_TICKS;
            }
            Action::Attack => self.attack_combo = true,
            _ => {}
        }
    }

    pub fn block(&mut self) {
        if matches!(self.action, Action::Idle | Action::Walk) {
            self.lock_direction();
            self.set_action(Action::Block);
        }
        self.holding_block = true;
    }

    pub fn release_block(&mut self) {
        if self.action == Action::Block {
            self.unlock();
            if self.holding_left || self.holding_right {
                self.set_action(Action::Walk);
            } else {
                self.set_action(Action::Idle);
            }
        }
        self.holding_block = false;
    }

    fn damaged(&mut self, action: Action) {
        self.lock_direction();
        self.damage_immunity = DAMAGE_IMMUNITY_TICKS;
        self.set_action(action);
    }

    pub fn victory(&mut self) {
        self.set_action(Action::Victory);
    }

    /// Force Idle and forget every held key, lock and queued combo
    pub fn idle(&mut self) {
        self.set_action(Action::Idle);
        self.holding_left = false;
        self.holding_right = false;
        self.holding_block = false;
        self.unlock();
        self.attack_combo = false;
    }
}

/// What the player needs to know about an enemy touching it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub x: f32,
    pub threatening: bool,
    pub blockable: bool,
    /// Lumbering attackers can be bounced on while harmless
    pub bounceable: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    states: PlayerStates,
    health: u8,
    accepting_input: bool,
    damage_direction: Direction,
    /// Set when a blockable hit was absorbed; cleared every update
    immune: bool,
    invincible: bool,
}

impl Player {
    pub fn new(invincible: bool) -> Self {
        Self {
            body: Body::new(0.0, PLAYER_SPRITE, PLAYER_SPEED),
            states: PlayerStates::new(Direction::Right, Action::Idle),
            health: PLAYER_MAX_HEALTH,
            accepting_input: false,
            damage_direction: Direction::Left,
            immune: false,
            invincible,
        }
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn action(&self) -> Action {
        self.states.action()
    }

    pub fn direction(&self) -> Direction {
        self.states.direction()
    }

    pub fn anim(&self) -> u32 {
        self.states.anim()
    }

    pub fn states(&self) -> &PlayerStates {
        &self.states
    }

    pub fn is_transient_immune(&self) -> bool {
        self.immune
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// World rotation implied by the player's position, in `[-π, π)`
    pub fn rotation(&self) -> f32 {
        normalize_angle(-units_to_radians(self.body.x))
    }

    pub fn enable_input(&mut self) {
        self.accepting_input = true;
        self.states.idle();
    }

    pub fn disable_input(&mut self) {
        self.accepting_input = false;
        self.states.idle();
    }

    /// Stop taking input and strike the victory pose
    pub fn victory(&mut self) {
        self.accepting_input = false;
        self.states.reset_animation();
        self.states.victory();
    }

    /// Restore health, never past the maximum
    pub fn increase_health(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(PLAYER_MAX_HEALTH);
    }

    /// Feed one input intent; ignored while input is disabled
    pub fn apply_intent(&mut self, intent: Intent) {
        if !self.accepting_input {
            return;
        }
        match intent {
            Intent::PressLeft => self.states.press_left(),
            Intent::ReleaseLeft => self.states.release_left(),
            Intent::PressRight => self.states.press_right(),
            Intent::ReleaseRight => self.states.release_right(),
            Intent::PressJump => self.states.jump(),
            Intent::PressRoll => self.states.roll(),
            Intent::PressAttack => self.states.attack(),
            Intent::PressBlock => self.states.block(),
            Intent::ReleaseBlock => self.states.release_block(),
        }
    }

    /// One tick of movement and timers
    pub fn update(&mut self) {
        self.immune = false;
        self.body.gravity();
        self.body.speed = PLAYER_SPEED;
        let direction = self.states.direction();

        match self.states.action() {
            Action::Walk => self.body.step(direction),
            Action::Jump => {
                match self.states.jump_speed() {
                    Speed::Slow => self.body.move_pixels(direction, PLAYER_SPEED / 2.0),
                    Speed::Fast => self.body.step(direction),
                    Speed::Still => {}
                }
                self.body.y -= JUMP_LIFT;
                if self.body.y >= 0.0 {
                    self.states.land();
                }
            }
            Action::Roll => {
                match self.states.roll_speed() {
                    Speed::Slow => self.body.move_pixels(direction, PLAYER_SPEED / 2.0),
                    Speed::Fast => self.body.move_pixels(direction, PLAYER_SPEED * 1.5),
                    Speed::Still => {}
                }
                self.states.tick_roll();
            }
            Action::Attack => self.states.tick_attack(),
            Action::DamagedFront | Action::DamagedBack => {
                self.states.tick_immunity();
                if self.health == 0 {
                    return;
                }
                self.body.y -= KNOCKBACK_LIFT;
                self.body.step(self.damage_direction);
                if !self.states.is_immune() {
                    self.states.land();
                }
            }
            _ => {}
        }
    }

    pub fn advance_animation(&mut self) {
        self.states.advance_animation();
    }

    /// Body hit box; shrinks while rolling
    pub fn hit_box(&self) -> HitRect {
        let spec = if self.states.action() == Action::Roll {
            &ROLLING_BOX
        } else {
            &REGULAR_BOX
        };
        self.body.place(self.direction(), spec)
    }

    /// Sword box, only during the two active swing windows of the attack
    pub fn attack_box(&self) -> HitRect {
        let anim = self.states.anim();
        let active = (6..18).contains(&anim) || (30..42).contains(&anim);
        if self.states.action() != Action::Attack || !active {
            return HitRect::EMPTY;
        }
        self.body.place(self.direction(), &ATTACK_BOX)
    }

    /// Resolve contact with an enemy. Returns true when damage was taken.
    pub fn player_hit(&mut self, threat: &Threat) -> bool {
        if self.states.is_immune() {
            return false;
        }

        if threat.bounceable && !threat.threatening && self.action() == Action::Jump {
            self.body.gravity_accel /= 2.0;
            return false;
        }

        if !threat.threatening {
            return false;
        }

        let facing = self.direction();
        let blocking = self.action() == Action::Block;

        // Which side the blow lands on, and which way it throws the player
        let sides = [
            (threat.x >= self.body.x, Direction::Left),
            (threat.x <= self.body.x, Direction::Right),
        ];
        for (on_side, knock_to) in sides {
            if !on_side {
                continue;
            }
            // The enemy sits on the side the player would be knocked away from
            let front = facing != knock_to;
            let absorbed = if front {
                (blocking || self.immune) && threat.blockable
            } else {
                blocking && self.immune && threat.blockable
            };
            if absorbed {
                self.immune = true;
                debug!("player absorbed a hit at x={:.1}", threat.x);
                return false;
            }

            self.damage_direction = knock_to;
            if !self.invincible {
                self.health = self.health.saturating_sub(1);
            }
            let action = if front {
                Action::DamagedFront
            } else {
                Action::DamagedBack
            };
            self.states.damaged(action);
            debug!(
                "player hit ({:?}) from x={:.1}, health {}",
                action, threat.x, self.health
            );
            return true;
        }

        false
    }
}
