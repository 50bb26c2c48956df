//! Per-tick collision pass
//!
//! Runs once after every entity has moved. Boxes are snapshotted up front so
//! that reversals issued during the pass (the scorpion's push-back moves it)
//! do not change what the rest of the pass sees. Every test covers both the
//! primary box and its seam mirror.

use log::debug;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyId, HitOutcome};
use super::entity::Action;
use super::player::Player;
use super::rect::WrappedRect;

/// What happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatOutcome {
    /// Contacts that actually damaged the player
    pub player_hits: u32,
    /// Reversal requests that were honoured
    pub reversals: u32,
    /// Enemies whose last health point was taken this pass
    pub kills: Vec<EnemyId>,
}

/// Resolve every overlap between the player, its sword and the enemies
pub fn resolve(player: &mut Player, enemies: &mut [Enemy], rng: &mut Pcg32) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();

    let boxes: Vec<Option<WrappedRect>> = enemies
        .iter()
        .map(|e| {
            let rect = e.hit_box();
            (!e.is_dead() && !rect.is_empty()).then(|| rect.with_mirror())
        })
        .collect();
    let player_box = player.hit_box().with_mirror();
    let attack_box = if player.action() == Action::Attack {
        Some(player.attack_box().with_mirror())
    } else {
        None
    };

    for i in 0..enemies.len() {
        let Some(enemy_box) = boxes[i] else {
            continue;
        };

        // Body contact
        for _ in 0..enemy_box.overlap_count(&player_box) {
            let threat = enemies[i].threat();
            if player.player_hit(&threat) {
                outcome.player_hits += 1;
            } else if enemies[i].reverse(rng) {
                outcome.reversals += 1;
            }
        }

        // Sword contact, only while a body hit above has not cut the swing short
        if let Some(attack_box) = attack_box.filter(|_| player.action() == Action::Attack) {
            let facing = player.direction();
            for _ in 0..enemy_box.overlap_count(&attack_box) {
                if enemies[i].attacked_by_player(facing) == HitOutcome::Killed {
                    debug!("{} {} killed", enemies[i].archetype(), enemies[i].id);
                    outcome.kills.push(enemies[i].id);
                }
            }
        }

        // Enemies bumping into each other
        for j in (i + 1)..enemies.len() {
            let Some(other_box) = boxes[j] else {
                continue;
            };
            for _ in 0..enemy_box.overlap_count(&other_box) {
                let (head, tail) = enemies.split_at_mut(j);
                if head[i].reverse(rng) {
                    outcome.reversals += 1;
                }
                if tail[0].reverse(rng) {
                    outcome.reversals += 1;
                }
            }
        }
    }

    outcome
}
