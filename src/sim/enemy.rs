//! Enemy archetypes and shared enemy bookkeeping
//!
//! Archetype-specific numbers live in one static table ([`ArchetypeSpec`]);
//! behaviour lives in [`super::ai`]. Everything else (reversal, hit
//! resolution, fade in/out) is common to all enemies.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use log::debug;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{Brain, Senses, Signal, Spell, WitchMind};
use super::entity::{Action, Body, BoxSpec, Colour, Direction, FlashCode};
use super::player::Threat;
use super::rect::HitRect;
use super::state::SpawnError;
use super::zone::is_vulnerable;
use crate::consts::*;
use crate::{normalize_angle, signed_distance, units_to_radians};

/// Spawn fade-in: alpha step per tick and the alpha at which it ends
const FADE_IN_STEP: u8 = 5;
const FADE_IN_END: u8 = 240;

const SCORPION_PUSHBACK_PIXELS: f32 = 75.0;

const SCORPION_IDLE_BOX: BoxSpec = BoxSpec::new(50.0, 34.0, 34.0, 17.0);
const SCORPION_STING_BOX: BoxSpec = BoxSpec::new(67.0, 34.0, 34.0, 17.0);
const GOLEM_SWING_BOX: BoxSpec = BoxSpec::new(115.0, 120.0, 5.0, 48.0);
const GOLEM_SLAM_BOX: BoxSpec = BoxSpec::new(104.0, 57.0, 15.0, 111.0);

/// Opaque handle to an enemy in the world arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every kind of enemy the world knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Weak walker
    Porcupine,
    /// Flying walker, too tall to jump over
    Hornet,
    /// Aggressive melee
    Scorpion,
    /// Lumbering attacker
    Golem,
    /// Boss
    Witch,
    /// Constant-velocity spell bolt
    Fireball,
    /// Stationary spell strike
    Lightning,
}

/// Static per-archetype numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeSpec {
    pub name: &'static str,
    pub sprite: Vec2,
    pub body_box: BoxSpec,
    pub health: u16,
    pub speed: f32,
    pub blockable: bool,
    /// Ignores reversal requests entirely
    pub fixed_facing: bool,
    pub fades_in: bool,
    /// Ticks spent in `Dying` before the fade-out starts
    pub fade_delay: u32,
    pub fade_ticks: u16,
}

const SPECS: [ArchetypeSpec; 7] = [
    ArchetypeSpec {
        name: "porcupine",
        sprite: Vec2::new(60.0, 50.0),
        body_box: BoxSpec::new(43.0, 43.0, 7.0, 7.0),
        health: 4,
        speed: 1.0,
        blockable: true,
        fixed_facing: false,
        fades_in: true,
        fade_delay: 0,
        fade_ticks: 15,
    },
    ArchetypeSpec {
        name: "hornet",
        sprite: Vec2::new(70.0, 100.0),
        body_box: BoxSpec::new(26.0, 46.0, 28.0, 13.0),
        health: 4,
        speed: 1.0,
        blockable: true,
        fixed_facing: false,
        fades_in: true,
        fade_delay: 0,
        fade_ticks: 15,
    },
    ArchetypeSpec {
        name: "scorpion",
        sprite: Vec2::new(100.0, 50.0),
        body_box: BoxSpec::new(45.0, 50.0, 15.0, 0.0),
        health: 6,
        speed: 1.0,
        blockable: true,
        fixed_facing: false,
        fades_in: true,
        fade_delay: 0,
        fade_ticks: 15,
    },
    ArchetypeSpec {
        name: "golem",
        sprite: Vec2::new(124.0, 168.0),
        body_box: BoxSpec::new(53.0, 145.0, 18.0, 23.0),
        health: 12,
        speed: 1.0,
        blockable: true,
        fixed_facing: true,
        fades_in: true,
        fade_delay: 0,
        fade_ticks: 15,
    },
    ArchetypeSpec {
        name: "witch",
        sprite: Vec2::new(100.0, 325.0),
        body_box: BoxSpec::new(72.0, 44.0, 16.0, 280.0),
        health: 21,
        speed: 3.0,
        blockable: true,
        fixed_facing: true,
        fades_in: false,
        fade_delay: 44,
        fade_ticks: 254,
    },
    ArchetypeSpec {
        name: "fireball",
        sprite: Vec2::new(50.0, 100.0),
        body_box: BoxSpec::new(25.0, 19.0, 21.0, 13.0),
        health: 300,
        speed: 10.0,
        blockable: false,
        fixed_facing: true,
        fades_in: false,
        fade_delay: 0,
        fade_ticks: 15,
    },
    ArchetypeSpec {
        name: "lightning",
        sprite: Vec2::new(100.0, 200.0),
        body_box: BoxSpec::new(20.0, 200.0, 40.0, 0.0),
        health: 300,
        speed: 0.0,
        blockable: false,
        fixed_facing: true,
        fades_in: false,
        fade_delay: 0,
        fade_ticks: 15,
    },
];

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Porcupine,
        Archetype::Hornet,
        Archetype::Scorpion,
        Archetype::Golem,
        Archetype::Witch,
        Archetype::Fireball,
        Archetype::Lightning,
    ];

    pub fn spec(self) -> &'static ArchetypeSpec {
        &SPECS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    fn brain(self) -> Brain {
        match self {
            Archetype::Porcupine | Archetype::Hornet => Brain::Walker,
            Archetype::Scorpion => Brain::Scorpion,
            Archetype::Golem => Brain::Golem,
            Archetype::Witch => Brain::Witch(WitchMind::default()),
            Archetype::Fireball => Brain::Fireball,
            Archetype::Lightning => Brain::Lightning,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = SpawnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| SpawnError::UnknownArchetype(s.to_string()))
    }
}

/// A request to put an enemy on the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub archetype: Archetype,
    pub direction: Direction,
    pub action: Action,
    /// Offset from the player's position at spawn time, in pixels
    pub offset: f32,
    pub colour: Colour,
}

impl Spawn {
    pub const fn new(
        archetype: Archetype,
        direction: Direction,
        action: Action,
        offset: f32,
        colour: Colour,
    ) -> Self {
        Self {
            archetype,
            direction,
            action,
            offset,
            colour,
        }
    }
}

/// Fireballs appear ahead of the player, lightning right on top of it
const FIREBALL_SPAWN: Spawn = Spawn::new(
    Archetype::Fireball,
    Direction::Left,
    Action::Walk,
    400.0,
    Colour::None,
);
const LIGHTNING_SPAWN: Spawn = Spawn::new(
    Archetype::Lightning,
    Direction::Left,
    Action::Idle,
    0.0,
    Colour::None,
);

impl Spell {
    /// Where and how the projectile for this spell enters the world
    pub fn spawn(self) -> Spawn {
        match self {
            Spell::Fireball => FIREBALL_SPAWN,
            Spell::Lightning => LIGHTNING_SPAWN,
        }
    }
}

/// Result of the player's sword meeting an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still invulnerable or already dying
    Ignored,
    /// Wrong colour for the attack direction
    Deflected,
    Damaged,
    Killed,
}

/// One live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    archetype: Archetype,
    pub body: Body,
    direction: Direction,
    action: Action,
    anim: u32,
    health: u16,
    colour: Colour,
    invulnerable: u32,
    flash: FlashCode,
    turn_timer: i32,
    reverse_lock: u8,
    /// Render rotation relative to the player, `[-π, π)`
    rotation: f32,
    brain: Brain,
}

impl Enemy {
    /// Build an enemy at an absolute track position
    pub fn new(id: EnemyId, spawn: &Spawn, x: f32, player_x: f32, rng: &mut Pcg32) -> Self {
        let spec = spawn.archetype.spec();
        let body = Body::new(x, spec.sprite, spec.speed);
        let rotation = normalize_angle(units_to_radians(player_x - body.x));
        Self {
            id,
            archetype: spawn.archetype,
            body,
            direction: spawn.direction,
            action: spawn.action,
            anim: 0,
            health: spec.health,
            colour: spawn.colour,
            invulnerable: 0,
            flash: if spec.fades_in {
                FlashCode::FadeIn { alpha: 0 }
            } else {
                FlashCode::None
            },
            turn_timer: TURN_AROUND_BASE + rng.random_range(0..10),
            reverse_lock: 0,
            rotation,
            brain: spawn.archetype.brain(),
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn anim(&self) -> u32 {
        self.anim
    }

    pub fn health(&self) -> u16 {
        self.health
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn flash(&self) -> FlashCode {
        self.flash
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn turn_timer(&self) -> i32 {
        self.turn_timer
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    pub fn is_reverse_locked(&self) -> bool {
        self.reverse_lock > 0
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    pub(crate) fn brain_mut(&mut self) -> &mut Brain {
        &mut self.brain
    }

    /// Dying and the fade-out has finished
    pub fn is_dead(&self) -> bool {
        self.action == Action::Dying && self.flash == FlashCode::Fading { remaining: 0 }
    }

    fn set_action(&mut self, action: Action) {
        if action == self.action {
            return;
        }
        if action == Action::Dying {
            self.enter_dying();
            return;
        }
        self.action = action;
        self.anim = 0;
    }

    fn enter_dying(&mut self) {
        let spec = self.archetype.spec();
        self.action = Action::Dying;
        self.anim = 0;
        self.flash = if spec.fade_delay == 0 {
            FlashCode::Fading {
                remaining: spec.fade_ticks,
            }
        } else {
            FlashCode::None
        };
    }

    /// Walk `pixels` along the current facing, keeping the render rotation in step
    fn advance(&mut self, pixels: f32) {
        self.body.move_pixels(self.direction, pixels);
        self.rotation = normalize_angle(self.rotation - self.direction.sign() * pixels * RADIANS_PER_PIXEL);
    }

    /// One tick: shared bookkeeping, then the archetype's AI
    pub fn update(&mut self, world_delta: f32, player_x: f32, rng: &mut Pcg32) -> Option<Signal> {
        self.reverse_lock = self.reverse_lock.saturating_sub(1);
        self.rotation = normalize_angle(self.rotation - world_delta);

        if self.action == Action::Dying {
            self.fade_out();
            return None;
        }

        if self.invulnerable > 0 {
            self.invulnerable -= 1;
            if self.invulnerable < FLASH_CLEAR_BELOW {
                self.flash = FlashCode::None;
            }
        }

        if let FlashCode::FadeIn { alpha } = self.flash {
            let alpha = alpha.saturating_add(FADE_IN_STEP);
            self.flash = if alpha >= FADE_IN_END {
                FlashCode::None
            } else {
                FlashCode::FadeIn { alpha }
            };
        }

        let senses = Senses {
            action: self.action,
            direction: self.direction,
            anim: self.anim,
            health: self.health,
            turn_timer: self.turn_timer,
            distance: signed_distance(self.body.x, player_x),
        };
        let decision = self.brain.decide(&senses, rng);

        if decision.lock_reverse {
            self.reverse_lock = REVERSE_LOCK_TICKS;
        }
        if let Some(timer) = decision.turn_timer {
            self.turn_timer = timer;
        }
        if let Some(speed) = decision.speed {
            self.body.speed = speed;
        }
        self.direction = decision.direction;
        self.health = self.health.saturating_sub(decision.health_cost);
        if decision.advance {
            self.advance(self.body.speed);
        }
        self.set_action(decision.action);

        decision.signal
    }

    fn fade_out(&mut self) {
        let spec = self.archetype.spec();
        if !matches!(self.flash, FlashCode::Fading { .. }) && self.anim >= spec.fade_delay {
            self.flash = FlashCode::Fading {
                remaining: spec.fade_ticks,
            };
        }
        if let FlashCode::Fading { remaining } = self.flash {
            self.flash = FlashCode::Fading {
                remaining: remaining.saturating_sub(1),
            };
        }
    }

    pub fn advance_animation(&mut self) {
        self.anim = self.anim.saturating_add(1);
    }

    /// Ask the enemy to turn around. Returns true if it did.
    pub fn reverse(&mut self, rng: &mut Pcg32) -> bool {
        if self.reverse_lock > 0 || self.archetype.spec().fixed_facing {
            return false;
        }
        self.reverse_lock = REVERSE_LOCK_TICKS;
        self.direction = self.direction.opposite();

        if self.archetype == Archetype::Scorpion {
            self.turn_timer += TURN_AROUND_BASE + rng.random_range(0..20);
            self.advance(SCORPION_PUSHBACK_PIXELS);
        } else {
            self.turn_timer += TURN_AROUND_BASE;
        }
        true
    }

    /// The player's sword connected
    pub fn attacked_by_player(&mut self, attack: Direction) -> HitOutcome {
        if self.invulnerable > 0 || self.action == Action::Dying {
            return HitOutcome::Ignored;
        }

        self.invulnerable = ENEMY_INVULNERABLE_TICKS;
        if !is_vulnerable(self.colour, attack) {
            self.flash = FlashCode::Deflected(self.colour);
            debug!("{} {} deflected a {:?} attack", self.archetype, self.id, attack);
            return HitOutcome::Deflected;
        }

        self.health = self.health.saturating_sub(1);
        self.flash = FlashCode::Hit;
        debug!("{} {} hit, health {}", self.archetype, self.id, self.health);
        if self.health == 0 {
            self.enter_dying();
            return HitOutcome::Killed;
        }
        HitOutcome::Damaged
    }

    /// Boss knock-down: fall to the ground and lose one health.
    /// Returns false for anything that is not a living boss.
    pub fn knock_down(&mut self) -> bool {
        if self.archetype != Archetype::Witch || self.action == Action::Dying {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.enter_dying();
        } else {
            self.action = Action::Roll;
            self.anim = 0;
        }
        true
    }

    /// Contact may hurt the player right now
    pub fn is_threatening(&self) -> bool {
        match self.archetype {
            Archetype::Witch => false,
            Archetype::Golem => !(self.action == Action::Attack && (48..102).contains(&self.anim)),
            _ => true,
        }
    }

    /// Contact can be stopped by a block
    pub fn is_blockable(&self) -> bool {
        if self.archetype == Archetype::Golem
            && self.action == Action::Attack
            && (30..42).contains(&self.anim)
        {
            return false;
        }
        self.archetype.spec().blockable
    }

    pub fn threat(&self) -> Threat {
        Threat {
            x: self.body.x,
            threatening: self.is_threatening(),
            blockable: self.is_blockable(),
            bounceable: self.archetype == Archetype::Golem,
        }
    }

    /// Current collision box; empty when nothing can be touched
    pub fn hit_box(&self) -> HitRect {
        if self.action == Action::Dying {
            return HitRect::EMPTY;
        }
        let anim = self.anim;
        let spec = match (self.archetype, self.action) {
            (Archetype::Witch, Action::Idle) => &self.archetype.spec().body_box,
            (Archetype::Witch, _) => return HitRect::EMPTY,
            (Archetype::Lightning, Action::Attack) => &self.archetype.spec().body_box,
            (Archetype::Lightning, _) => return HitRect::EMPTY,
            (Archetype::Scorpion, Action::Idle) => &SCORPION_IDLE_BOX,
            (Archetype::Scorpion, Action::Attack) if (66..78).contains(&anim) => &SCORPION_STING_BOX,
            (Archetype::Golem, Action::Attack)
                if (30..36).contains(&anim) || (108..114).contains(&anim) =>
            {
                &GOLEM_SWING_BOX
            }
            (Archetype::Golem, Action::Attack) if (36..108).contains(&anim) => &GOLEM_SLAM_BOX,
            _ => &self.archetype.spec().body_box,
        };
        self.body.place(self.direction, spec)
    }

    #[cfg(test)]
    pub(crate) fn force_action(&mut self, action: Action, anim: u32) {
        self.action = action;
        self.anim = anim;
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, health: u16) {
        self.health = health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawn(archetype: Archetype, colour: Colour) -> (Enemy, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(3);
        let spawn = Spawn::new(archetype, Direction::Left, Action::Walk, 1000.0, colour);
        let enemy = Enemy::new(EnemyId(1), &spawn, 1000.0, 0.0, &mut rng);
        (enemy, rng)
    }

    #[test]
    fn test_spec_table_matches_archetypes() {
        for archetype in Archetype::ALL {
            let parsed: Archetype = archetype.name().parse().unwrap();
            assert_eq!(parsed, archetype);
            assert!(!archetype.spec().body_box.is_degenerate());
        }
        assert!("Dragon".parse::<Archetype>().is_err());
        assert_eq!("  Golem ".parse::<Archetype>().unwrap(), Archetype::Golem);
    }

    #[test]
    fn test_spell_spawns() {
        let fireball = Spell::Fireball.spawn();
        assert_eq!(fireball.archetype, Archetype::Fireball);
        assert_eq!(fireball.offset, 400.0);
        assert_eq!(fireball.action, Action::Walk);
        let lightning = Spell::Lightning.spawn();
        assert_eq!(lightning.offset, 0.0);
        assert_eq!(lightning.action, Action::Idle);
    }

    #[test]
    fn test_colour_gates_damage() {
        let (mut red, _) = spawn(Archetype::Porcupine, Colour::Red);
        assert_eq!(red.attacked_by_player(Direction::Left), HitOutcome::Deflected);
        assert_eq!(red.health(), 4);
        assert_eq!(red.flash(), FlashCode::Deflected(Colour::Red));

        let (mut blue, _) = spawn(Archetype::Porcupine, Colour::Blue);
        assert_eq!(blue.attacked_by_player(Direction::Left), HitOutcome::Damaged);
        assert_eq!(blue.health(), 3);
        assert_eq!(blue.flash(), FlashCode::Hit);
    }

    #[test]
    fn test_invulnerability_blocks_repeat_hits() {
        let (mut enemy, mut rng) = spawn(Archetype::Porcupine, Colour::None);
        enemy.attacked_by_player(Direction::Right);
        for _ in 0..ENEMY_INVULNERABLE_TICKS - 1 {
            assert_eq!(enemy.attacked_by_player(Direction::Right), HitOutcome::Ignored);
            enemy.update(0.0, 0.0, &mut rng);
        }
        assert_eq!(enemy.health(), 3);
        enemy.update(0.0, 0.0, &mut rng);
        assert_eq!(enemy.attacked_by_player(Direction::Right), HitOutcome::Damaged);
        assert_eq!(enemy.health(), 2);
    }

    #[test]
    fn test_flash_clears_before_invulnerability_ends() {
        let (mut enemy, mut rng) = spawn(Archetype::Hornet, Colour::None);
        enemy.attacked_by_player(Direction::Left);
        for _ in 0..=(ENEMY_INVULNERABLE_TICKS - FLASH_CLEAR_BELOW) {
            enemy.update(0.0, 0.0, &mut rng);
        }
        assert_eq!(enemy.flash(), FlashCode::None);
        assert!(enemy.is_invulnerable());
    }

    #[test]
    fn test_fade_in() {
        let (mut enemy, mut rng) = spawn(Archetype::Porcupine, Colour::None);
        assert_eq!(enemy.flash(), FlashCode::FadeIn { alpha: 0 });
        enemy.update(0.0, 0.0, &mut rng);
        assert_eq!(enemy.flash(), FlashCode::FadeIn { alpha: 5 });
        for _ in 0..47 {
            enemy.update(0.0, 0.0, &mut rng);
        }
        assert_eq!(enemy.flash(), FlashCode::None);

        let (projectile, _) = spawn(Archetype::Fireball, Colour::None);
        assert_eq!(projectile.flash(), FlashCode::None);
    }

    #[test]
    fn test_reverse_lock() {
        let (mut enemy, mut rng) = spawn(Archetype::Porcupine, Colour::None);
        let timer = enemy.turn_timer();
        assert!(enemy.reverse(&mut rng));
        assert_eq!(enemy.direction(), Direction::Right);
        assert_eq!(enemy.turn_timer(), timer + TURN_AROUND_BASE);
        assert!(!enemy.reverse(&mut rng));
        assert_eq!(enemy.direction(), Direction::Right);
    }

    #[test]
    fn test_fixed_facing_never_reverses() {
        for archetype in [
            Archetype::Golem,
            Archetype::Witch,
            Archetype::Fireball,
            Archetype::Lightning,
        ] {
            let (mut enemy, mut rng) = spawn(archetype, Colour::None);
            assert!(!enemy.reverse(&mut rng));
            assert_eq!(enemy.direction(), Direction::Left);
        }
    }

    #[test]
    fn test_scorpion_reverse_pushes_back() {
        let (mut enemy, mut rng) = spawn(Archetype::Scorpion, Colour::None);
        assert!(enemy.reverse(&mut rng));
        assert!((enemy.x() - (1000.0 + SCORPION_PUSHBACK_PIXELS * UNITS_PER_PIXEL)).abs() < 0.01);
    }

    #[test]
    fn test_death_fade_and_removal() {
        let (mut enemy, mut rng) = spawn(Archetype::Porcupine, Colour::None);
        enemy.set_health(1);
        assert_eq!(enemy.attacked_by_player(Direction::Left), HitOutcome::Killed);
        assert_eq!(enemy.action(), Action::Dying);
        assert!(enemy.hit_box().is_empty());
        assert_eq!(enemy.attacked_by_player(Direction::Left), HitOutcome::Ignored);
        for _ in 0..14 {
            enemy.update(0.0, 0.0, &mut rng);
            assert!(!enemy.is_dead());
        }
        enemy.update(0.0, 0.0, &mut rng);
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_witch_defeat_pause() {
        let (mut witch, mut rng) = spawn(Archetype::Witch, Colour::None);
        witch.force_action(Action::Idle, 0);
        witch.set_health(1);
        assert_eq!(witch.attacked_by_player(Direction::Right), HitOutcome::Killed);
        assert_eq!(witch.flash(), FlashCode::None);
        for _ in 0..44 {
            witch.update(0.0, 0.0, &mut rng);
            witch.advance_animation();
        }
        witch.update(0.0, 0.0, &mut rng);
        assert_eq!(witch.flash(), FlashCode::Fading { remaining: 253 });
    }

    #[test]
    fn test_witch_box_only_when_grounded() {
        let (mut witch, _) = spawn(Archetype::Witch, Colour::None);
        assert!(witch.hit_box().is_empty());
        assert!(!witch.is_threatening());
        witch.knock_down();
        assert_eq!(witch.action(), Action::Roll);
        assert_eq!(witch.health(), 20);
        assert!(witch.hit_box().is_empty());
        witch.force_action(Action::Idle, 0);
        assert_eq!(witch.hit_box().size, Vec2::new(72.0, 44.0));
    }

    #[test]
    fn test_golem_slam_windows() {
        let (mut golem, _) = spawn(Archetype::Golem, Colour::None);
        golem.force_action(Action::Attack, 32);
        assert_eq!(golem.hit_box().size, Vec2::new(115.0, 120.0));
        assert!(!golem.is_blockable());
        golem.force_action(Action::Attack, 60);
        assert_eq!(golem.hit_box().size, Vec2::new(104.0, 57.0));
        assert!(!golem.is_threatening());
        assert!(golem.is_blockable());
        // Outside the attack the recovery frames do not make it harmless
        golem.force_action(Action::Walk, 60);
        assert!(golem.is_threatening());
    }

    #[test]
    fn test_lightning_box_only_while_striking() {
        let (mut bolt, _) = spawn(Archetype::Lightning, Colour::None);
        bolt.force_action(Action::Idle, 0);
        assert!(bolt.hit_box().is_empty());
        bolt.force_action(Action::Attack, 0);
        assert!(!bolt.hit_box().is_empty());
        assert!(!bolt.is_blockable());
    }

    #[test]
    fn test_rotation_tracks_relative_position() {
        let (mut enemy, mut rng) = spawn(Archetype::Porcupine, Colour::None);
        for _ in 0..200 {
            enemy.update(0.0, 0.0, &mut rng);
        }
        let expected = normalize_angle(units_to_radians(0.0 - enemy.x()));
        assert!((normalize_angle(enemy.rotation() - expected)).abs() < 1e-3);
    }
}
