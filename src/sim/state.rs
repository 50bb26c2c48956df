//! World state
//!
//! The [`World`] owns the player, every live enemy and the seeded RNG. It is
//! the only place enemies are created, and the only handle the outside world
//! gets to them is an [`EnemyId`].

use log::{info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ai::Spell;
use super::enemy::{Archetype, Enemy, EnemyId, Spawn};
use super::entity::{Action, Colour, Direction};
use super::player::Player;
use super::zone::ZoneOverlay;
use crate::levels::Wave;
use crate::settings::SimSettings;
use crate::{normalize, pixels_to_units};

/// Reasons a spawn request is refused. The world is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("unknown archetype `{0}`")]
    UnknownArchetype(String),

    #[error("{archetype} cannot start in {action:?}")]
    InvalidInitialAction { archetype: Archetype, action: Action },

    #[error("{archetype} has a degenerate hit box")]
    DegenerateHitBox { archetype: Archetype },

    #[error("spawn offset {0} is not a finite number of pixels")]
    InvalidOffset(f32),

    #[error("a witch is already in the world")]
    DuplicateWitch,
}

/// Boss milestones reported to the level script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WitchEvent {
    /// A spell finished casting and its projectile was spawned
    SpellCast { spell: Spell, projectile: EnemyId },
    /// Health reached one of the phase thresholds; the boss is ascending
    PhaseThreshold { health: u16 },
    /// The knock-down fall ended and the boss is vulnerable
    Grounded,
    Defeated,
}

/// The whole simulation
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    /// Live enemies in spawn order
    enemies: Vec<Enemy>,
    next_id: u32,
    rng: Pcg32,
    /// Colour-zone graphic; rendering only
    pub zone: ZoneOverlay,
    /// Player rotation seen on the previous tick
    pub(crate) last_rotation: f32,
    /// Accumulated rotation of the stage backdrop, `[-π, π)`
    pub stage_rotation: f32,
    pub time_ticks: u64,
    invincible: bool,
    /// Events raised between ticks, reported by the next tick
    pub(crate) pending_events: Vec<WitchEvent>,
}

impl World {
    pub fn new(settings: &SimSettings) -> Self {
        let player = Player::new(settings.invincible);
        Self {
            last_rotation: player.rotation(),
            player,
            enemies: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(settings.seed),
            zone: ZoneOverlay::default(),
            stage_rotation: 0.0,
            time_ticks: 0,
            invincible: settings.invincible,
            pending_events: Vec::new(),
        }
    }

    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&SimSettings {
            seed,
            ..Default::default()
        })
    }

    /// Fresh player for a new level attempt; enemies are kept
    pub fn reset_player(&mut self) {
        self.player = Player::new(self.invincible);
        self.last_rotation = self.player.rotation();
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// The boss, if one is in the world
    pub fn witch(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.archetype() == Archetype::Witch)
    }

    fn witch_mut(&mut self) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|e| e.archetype() == Archetype::Witch)
    }

    /// Allocate a new enemy ID
    pub fn next_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn living_witches(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.archetype() == Archetype::Witch && e.action() != Action::Dying)
            .count()
    }

    /// Place an enemy relative to the player's current position
    pub fn spawn_enemy(&mut self, spawn: Spawn) -> Result<EnemyId, SpawnError> {
        validate(&spawn)?;
        if spawn.archetype == Archetype::Witch && self.living_witches() > 0 {
            return Err(SpawnError::DuplicateWitch);
        }
        Ok(self.insert(&spawn))
    }

    /// Spawn by archetype name, e.g. from a level script
    pub fn spawn_named(
        &mut self,
        archetype: &str,
        direction: Direction,
        action: Action,
        offset: f32,
        colour: Colour,
    ) -> Result<EnemyId, SpawnError> {
        let archetype: Archetype = archetype.parse()?;
        self.spawn_enemy(Spawn::new(archetype, direction, action, offset, colour))
    }

    /// Spawn a whole roster, or nothing if any entry is rejected
    pub fn spawn_all(&mut self, spawns: &[Spawn]) -> Result<Vec<EnemyId>, SpawnError> {
        for spawn in spawns {
            validate(spawn)?;
        }
        let witches = spawns
            .iter()
            .filter(|s| s.archetype == Archetype::Witch)
            .count();
        if witches > 0 && witches + self.living_witches() > 1 {
            return Err(SpawnError::DuplicateWitch);
        }
        Ok(spawns.iter().map(|spawn| self.insert(spawn)).collect())
    }

    /// Spawn a wave's roster and bring up the colour zone
    pub fn spawn_wave(&mut self, wave: Wave) -> Result<Vec<EnemyId>, SpawnError> {
        let ids = self.spawn_all(wave.roster())?;
        if wave.resets_zone() {
            self.zone = ZoneOverlay::default();
        }
        self.zone.form();
        info!("Wave {wave:?} spawned {} enemies", ids.len());
        Ok(ids)
    }

    fn insert(&mut self, spawn: &Spawn) -> EnemyId {
        let id = self.next_enemy_id();
        let player_x = self.player.x();
        let x = normalize(player_x + pixels_to_units(spawn.offset));
        let enemy = Enemy::new(id, spawn, x, player_x, &mut self.rng);
        info!(
            "Spawned {} {} at x={:.1} facing {:?}",
            spawn.archetype, id, x, spawn.direction
        );
        self.enemies.push(enemy);
        id
    }

    /// Allow or forbid the boss to cast
    pub fn notify_can_cast(&mut self, can_cast: bool) {
        let mind = self
            .witch_mut()
            .and_then(|witch| witch.brain_mut().witch_mind_mut());
        match mind {
            Some(mind) => mind.can_cast = can_cast,
            None => warn!("notify_can_cast({can_cast}) with no witch present"),
        }
    }

    /// Knock the boss out of the air
    pub fn notify_knock_down(&mut self) {
        let Some(witch) = self.witch_mut() else {
            warn!("notify_knock_down with no witch present");
            return;
        };
        if !witch.knock_down() {
            warn!("notify_knock_down ignored, the witch is already dying");
            return;
        }
        let health = witch.health();
        info!("Witch knocked down, health {health}");
        if health == 0 {
            self.pending_events.push(WitchEvent::Defeated);
        }
    }

    /// Split borrow used by the tick
    pub(crate) fn parts_mut(&mut self) -> (&mut Player, &mut Vec<Enemy>, &mut Pcg32) {
        (&mut self.player, &mut self.enemies, &mut self.rng)
    }

    #[cfg(test)]
    pub(crate) fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }
}

/// Checks that only depend on the request itself
fn validate(spawn: &Spawn) -> Result<(), SpawnError> {
    if !spawn.offset.is_finite() {
        return Err(SpawnError::InvalidOffset(spawn.offset));
    }
    if !matches!(spawn.action, Action::Idle | Action::Walk | Action::Attack) {
        return Err(SpawnError::InvalidInitialAction {
            archetype: spawn.archetype,
            action: spawn.action,
        });
    }
    if spawn.archetype.spec().body_box.is_degenerate() {
        return Err(SpawnError::DegenerateHitBox {
            archetype: spawn.archetype,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CIRCUMFERENCE;

    fn porcupine(offset: f32) -> Spawn {
        Spawn::new(
            Archetype::Porcupine,
            Direction::Left,
            Action::Walk,
            offset,
            Colour::Red,
        )
    }

    #[test]
    fn test_spawn_relative_to_player() {
        let mut world = World::with_seed(1);
        world.player.body.x = 100.0;
        let id = world.spawn_enemy(porcupine(-200.0)).unwrap();
        let enemy = world.enemy(id).unwrap();
        let expected = normalize(100.0 + pixels_to_units(-200.0));
        assert!((enemy.x() - expected).abs() < 1e-3);
        assert!(enemy.x() > CIRCUMFERENCE / 2.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut world = World::with_seed(1);
        let a = world.spawn_enemy(porcupine(500.0)).unwrap();
        let b = world.spawn_enemy(porcupine(600.0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(world.enemies().len(), 2);
    }

    #[test]
    fn test_rejected_spawns_leave_world_untouched() {
        let mut world = World::with_seed(1);

        let mut bad = porcupine(100.0);
        bad.action = Action::Dying;
        assert!(matches!(
            world.spawn_enemy(bad),
            Err(SpawnError::InvalidInitialAction { .. })
        ));
        assert!(matches!(
            world.spawn_enemy(porcupine(f32::NAN)),
            Err(SpawnError::InvalidOffset(_))
        ));
        assert_eq!(
            world.spawn_named("dragon", Direction::Left, Action::Walk, 0.0, Colour::None),
            Err(SpawnError::UnknownArchetype("dragon".into()))
        );
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_roster_is_all_or_nothing() {
        let mut world = World::with_seed(1);
        let mut bad = porcupine(300.0);
        bad.action = Action::Roll;
        let result = world.spawn_all(&[porcupine(100.0), bad]);
        assert!(result.is_err());
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_single_witch() {
        let mut world = World::with_seed(1);
        let witch = Spawn::new(
            Archetype::Witch,
            Direction::Left,
            Action::Walk,
            800.0,
            Colour::None,
        );
        world.spawn_enemy(witch).unwrap();
        assert_eq!(world.spawn_enemy(witch), Err(SpawnError::DuplicateWitch));
        assert_eq!(world.spawn_all(&[witch]), Err(SpawnError::DuplicateWitch));
    }

    #[test]
    fn test_witch_callbacks() {
        let mut world = World::with_seed(1);
        // No witch: both are no-ops
        world.notify_can_cast(true);
        world.notify_knock_down();

        let id = world
            .spawn_named("Witch", Direction::Left, Action::Walk, 800.0, Colour::None)
            .unwrap();
        world.notify_can_cast(true);
        let witch = world.enemy(id).unwrap();
        assert!(witch.brain().witch_mind().unwrap().can_cast);

        world.notify_knock_down();
        let witch = world.enemy(id).unwrap();
        assert_eq!(witch.action(), Action::Roll);
        assert_eq!(witch.health(), 20);
    }

    #[test]
    fn test_knock_down_to_defeat() {
        let mut world = World::with_seed(1);
        let id = world
            .spawn_named("witch", Direction::Left, Action::Walk, 800.0, Colour::None)
            .unwrap();
        if let Some(witch) = world.enemy_mut(id) {
            witch.set_health(1);
        }
        world.notify_knock_down();
        assert_eq!(world.enemy(id).unwrap().action(), Action::Dying);
        assert_eq!(world.pending_events, vec![WitchEvent::Defeated]);

        // Already dying
        world.notify_knock_down();
        assert_eq!(world.pending_events.len(), 1);
    }

    #[test]
    fn test_reset_player() {
        let mut world = World::with_seed(1);
        world.player.body.x = 500.0;
        world.player.enable_input();
        world.reset_player();
        assert_eq!(world.player.x(), 0.0);
        assert!(!world.player.is_accepting_input());
        assert_eq!(world.last_rotation, world.player.rotation());
    }
}
