//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one 60 Hz step:
//! input, player, world rotation, enemies, collisions, animation, removal,
//! and finally the projectiles the boss asked for.

use log::{debug, info, warn};
use serde::Serialize;

use super::ai::Signal;
use super::combat;
use super::enemy::{Archetype, EnemyId};
pub use super::player::Intent;
use super::state::{WitchEvent, World};
use crate::normalize_angle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents in the order they arrived
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }
}

/// What the level script needs to know after a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick number this report belongs to (1-based)
    pub tick: u64,
    pub player_health: u8,
    pub player_is_dead: bool,
    pub enemies_remaining: usize,
    /// Enemies removed at the end of this tick
    pub enemy_deaths: Vec<EnemyId>,
    pub witch_events: Vec<WitchEvent>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    let was_alive = !world.player.is_dead();
    let mut witch_events = std::mem::take(&mut world.pending_events);

    for &intent in &input.intents {
        world.player.apply_intent(intent);
    }
    world.player.update();

    // The world turns under the player
    let rotation = world.player.rotation();
    let delta = normalize_angle(rotation - world.last_rotation);
    world.last_rotation = rotation;
    world.stage_rotation = normalize_angle(world.stage_rotation - delta);

    world.zone.update();

    let (player, enemies, rng) = world.parts_mut();
    let player_x = player.x();
    let mut spells = Vec::new();
    for enemy in enemies.iter_mut() {
        match enemy.update(delta, player_x, rng) {
            Some(Signal::Cast(spell)) => spells.push(spell),
            Some(Signal::PhaseThreshold(health)) => {
                info!("Witch reached health {health}, ascending");
                witch_events.push(WitchEvent::PhaseThreshold { health });
            }
            Some(Signal::Grounded) => {
                info!("Witch grounded");
                witch_events.push(WitchEvent::Grounded);
            }
            None => {}
        }
    }

    let outcome = combat::resolve(player, enemies, rng);
    if outcome.player_hits > 0 || outcome.reversals > 0 {
        debug!(
            "collisions: {} player hits, {} reversals",
            outcome.player_hits, outcome.reversals
        );
    }
    let witch_killed = outcome.kills.iter().any(|id| {
        enemies
            .iter()
            .any(|e| e.id == *id && e.archetype() == Archetype::Witch)
    });
    if witch_killed {
        info!("Witch defeated");
        witch_events.push(WitchEvent::Defeated);
    }

    player.advance_animation();
    for enemy in enemies.iter_mut() {
        enemy.advance_animation();
    }

    // Batch removal once nothing is iterating
    let mut enemy_deaths = Vec::new();
    enemies.retain(|enemy| {
        if enemy.is_dead() {
            enemy_deaths.push(enemy.id);
            false
        } else {
            true
        }
    });
    for id in &enemy_deaths {
        debug!("enemy {id} removed");
    }

    for spell in spells {
        match world.spawn_enemy(spell.spawn()) {
            Ok(projectile) => witch_events.push(WitchEvent::SpellCast { spell, projectile }),
            Err(err) => warn!("{spell:?} could not be spawned: {err}"),
        }
    }

    world.time_ticks += 1;
    if was_alive && world.player.is_dead() {
        info!("Player died at tick {}", world.time_ticks);
    }

    TickReport {
        tick: world.time_ticks,
        player_health: world.player.health(),
        player_is_dead: world.player.is_dead(),
        enemies_remaining: world.enemies().len(),
        enemy_deaths,
        witch_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RADIANS_PER_UNIT;
    use crate::levels::Wave;
    use crate::sim::ai::Spell;
    use crate::sim::enemy::{HitOutcome, Spawn};
    use crate::sim::entity::{Action, Colour, Direction};

    /// Player standing at x = 1000, facing right, taking input
    fn arena(seed: u64) -> World {
        let mut world = World::with_seed(seed);
        world.player.body.x = 1000.0;
        world.last_rotation = world.player.rotation();
        world.player.enable_input();
        world
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_front_hit_then_immunity() {
        let mut world = arena(1);
        world
            .spawn_enemy(Spawn::new(
                Archetype::Fireball,
                Direction::Left,
                Action::Walk,
                20.0,
                Colour::None,
            ))
            .unwrap();

        let report = tick(&mut world, &idle());
        assert_eq!(report.player_health, 4);
        assert_eq!(world.player.action(), Action::DamagedFront);

        // Still overlapping on the next tick, but immune
        let report = tick(&mut world, &idle());
        assert_eq!(report.player_health, 4);
        assert!(!report.player_is_dead);
    }

    #[test]
    fn test_block_absorbs_without_bounce() {
        let mut world = arena(1);
        let id = world
            .spawn_enemy(Spawn::new(
                Archetype::Scorpion,
                Direction::Left,
                Action::Attack,
                15.0,
                Colour::Red,
            ))
            .unwrap();

        let report = tick(&mut world, &TickInput::new([Intent::PressBlock]));
        assert_eq!(world.player.action(), Action::Block);
        assert_eq!(report.player_health, 5);
        assert!(world.player.is_transient_immune());
        let scorpion = world.enemy(id).unwrap();
        assert_eq!(scorpion.direction(), Direction::Left);
        assert_eq!(scorpion.action(), Action::Attack);
    }

    #[test]
    fn test_killed_enemy_is_removed_after_fade() {
        let mut world = arena(1);
        let id = world
            .spawn_enemy(Spawn::new(
                Archetype::Porcupine,
                Direction::Right,
                Action::Walk,
                2000.0,
                Colour::None,
            ))
            .unwrap();

        for hit in 1..=4 {
            let outcome = world.enemy_mut(id).unwrap().attacked_by_player(Direction::Right);
            if hit < 4 {
                assert_eq!(outcome, HitOutcome::Damaged);
                for _ in 0..18 {
                    tick(&mut world, &idle());
                }
            } else {
                assert_eq!(outcome, HitOutcome::Killed);
            }
        }
        assert_eq!(world.enemy(id).unwrap().action(), Action::Dying);

        for n in 1..=15 {
            let report = tick(&mut world, &idle());
            if n < 15 {
                assert!(report.enemy_deaths.is_empty());
                assert_eq!(report.enemies_remaining, 1);
            } else {
                assert_eq!(report.enemy_deaths, vec![id]);
                assert_eq!(report.enemies_remaining, 0);
            }
        }
        assert!(world.enemy(id).is_none());

        let report = tick(&mut world, &idle());
        assert_eq!(report.player_health, 5);
        assert!(report.enemy_deaths.is_empty());
    }

    #[test]
    fn test_witch_threshold_interrupts_attack() {
        let mut world = arena(1);
        let id = world
            .spawn_enemy(Spawn::new(
                Archetype::Witch,
                Direction::Left,
                Action::Walk,
                800.0,
                Colour::None,
            ))
            .unwrap();
        world.notify_can_cast(true);
        {
            let witch = world.enemy_mut(id).unwrap();
            witch.force_action(Action::Attack, 40);
            witch.set_health(15);
        }
        let report = tick(&mut world, &idle());
        assert!(report.witch_events.is_empty());
        assert_eq!(world.enemy(id).unwrap().action(), Action::Attack);

        world.enemy_mut(id).unwrap().set_health(14);
        let report = tick(&mut world, &idle());
        assert_eq!(world.enemy(id).unwrap().action(), Action::Jump);
        assert_eq!(
            report.witch_events,
            vec![WitchEvent::PhaseThreshold { health: 14 }]
        );
    }

    #[test]
    fn test_adjacent_enemies_reverse_once_per_lock() {
        let mut world = arena(1);
        let a = world
            .spawn_enemy(Spawn::new(
                Archetype::Porcupine,
                Direction::Right,
                Action::Walk,
                2000.0,
                Colour::Red,
            ))
            .unwrap();
        let b = world
            .spawn_enemy(Spawn::new(
                Archetype::Porcupine,
                Direction::Left,
                Action::Walk,
                2030.0,
                Colour::Blue,
            ))
            .unwrap();

        tick(&mut world, &idle());
        assert_eq!(world.enemy(a).unwrap().direction(), Direction::Left);
        assert_eq!(world.enemy(b).unwrap().direction(), Direction::Right);

        // Still overlapping while the lock runs down
        for _ in 0..4 {
            tick(&mut world, &idle());
            assert_eq!(world.enemy(a).unwrap().direction(), Direction::Left);
            assert_eq!(world.enemy(b).unwrap().direction(), Direction::Right);
        }
    }

    #[test]
    fn test_contact_across_seam() {
        let mut world = World::with_seed(1);
        world.player.body.x = 5.0;
        world.last_rotation = world.player.rotation();
        world.player.enable_input();
        world
            .spawn_enemy(Spawn::new(
                Archetype::Porcupine,
                Direction::Left,
                Action::Walk,
                -10.0,
                Colour::Red,
            ))
            .unwrap();

        let report = tick(&mut world, &idle());
        assert_eq!(report.player_health, 4);
        // Sides are decided on raw positions, so x = C - 6 counts as in front
        assert_eq!(world.player.action(), Action::DamagedFront);
    }

    #[test]
    fn test_spell_spawns_at_end_of_tick() {
        let mut world = arena(1);
        let id = world
            .spawn_enemy(Spawn::new(
                Archetype::Witch,
                Direction::Left,
                Action::Walk,
                800.0,
                Colour::None,
            ))
            .unwrap();
        world.notify_can_cast(true);
        if let Some(mind) = world
            .enemy_mut(id)
            .and_then(|w| w.brain_mut().witch_mind_mut())
        {
            mind.spell_delay = 0;
            mind.next_spell = Some(Spell::Lightning);
        }

        let report = tick(&mut world, &idle());
        let (spell, projectile) = match report.witch_events.as_slice() {
            [WitchEvent::SpellCast { spell, projectile }] => (*spell, *projectile),
            other => panic!("expected one spell, got {other:?}"),
        };
        assert_eq!(spell, Spell::Lightning);
        let bolt = world.enemy(projectile).unwrap();
        assert_eq!(bolt.archetype(), Archetype::Lightning);
        assert_eq!(bolt.action(), Action::Idle);
        assert_eq!(bolt.anim(), 0);
        assert!((bolt.x() - world.player.x()).abs() < 1e-3);
        assert_eq!(report.enemies_remaining, 2);
    }

    #[test]
    fn test_knock_down_events() {
        let mut world = arena(1);
        let id = world
            .spawn_named("witch", Direction::Left, Action::Walk, 800.0, Colour::None)
            .unwrap();
        world.notify_knock_down();

        let mut grounded = 0;
        for _ in 0..120 {
            let report = tick(&mut world, &idle());
            grounded += report
                .witch_events
                .iter()
                .filter(|e| **e == WitchEvent::Grounded)
                .count();
        }
        assert_eq!(grounded, 1);
        let witch = world.enemy(id).unwrap();
        assert_eq!(witch.action(), Action::Idle);
        assert!(!witch.hit_box().is_empty());

        world.enemy_mut(id).unwrap().set_health(1);
        world.notify_knock_down();
        let report = tick(&mut world, &idle());
        assert_eq!(report.witch_events, vec![WitchEvent::Defeated]);
    }

    fn scripted(t: u64) -> TickInput {
        let intents = match t % 240 {
            0 => vec![Intent::PressRight],
            60 => vec![Intent::PressAttack],
            90 => vec![Intent::ReleaseRight, Intent::PressLeft],
            150 => vec![Intent::PressJump],
            200 => vec![Intent::ReleaseLeft, Intent::PressRoll],
            _ => Vec::new(),
        };
        TickInput { intents }
    }

    #[test]
    fn test_enemy_rotation_tracks_player() {
        let mut world = arena(5);
        world.spawn_wave(Wave::One).unwrap();
        for t in 0..900 {
            tick(&mut world, &scripted(t));
            for enemy in world.enemies() {
                let expected = normalize_angle((world.player.x() - enemy.x()) * RADIANS_PER_UNIT);
                let error = normalize_angle(enemy.rotation() - expected).abs();
                assert!(error < 1e-2, "{} drifted by {error}", enemy.id);
            }
        }
    }

    #[test]
    fn test_positions_stay_on_track() {
        let mut world = arena(11);
        world.spawn_wave(Wave::Three).unwrap();
        for t in 0..600 {
            tick(&mut world, &scripted(t));
            assert!((0.0..crate::consts::CIRCUMFERENCE).contains(&world.player.x()));
            assert!(world.player.y() <= 0.0);
            for enemy in world.enemies() {
                assert!((0.0..crate::consts::CIRCUMFERENCE).contains(&enemy.x()));
            }
        }
    }

    #[test]
    fn test_determinism() {
        // Two worlds with same seed should produce identical results
        let mut world1 = arena(99999);
        let mut world2 = arena(99999);
        world1.spawn_wave(Wave::Two).unwrap();
        world2.spawn_wave(Wave::Two).unwrap();

        for t in 0..1200 {
            let input = scripted(t);
            let report1 = tick(&mut world1, &input);
            let report2 = tick(&mut world2, &input);
            assert_eq!(report1, report2);
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.player.x(), world2.player.x());
        let snapshot = |world: &World| {
            world
                .enemies()
                .iter()
                .map(|e| (e.id, e.x(), e.action(), e.direction(), e.health()))
                .collect::<Vec<_>>()
        };
        assert_eq!(snapshot(&world1), snapshot(&world2));
    }
}
