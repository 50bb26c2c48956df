//! Round World entry point
//!
//! Headless runner: loads settings, plays the waves in order with a scripted
//! input pattern and reports progress. Ticks run back to back without
//! sleeping; the simulation itself is fixed at 60 Hz.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use log::{debug, info};
    use round_world::levels::{WITCH_INTRO, Wave};
    use round_world::sim::{Archetype, Intent, TickInput, TickReport, WitchEvent, World, tick};
    use round_world::SimSettings;

    /// Walk back and forth, swinging and jumping on a fixed rhythm
    fn scripted_input(t: u64) -> TickInput {
        let mut intents = Vec::new();
        match t % 600 {
            0 => intents.extend([Intent::ReleaseLeft, Intent::PressRight]),
            300 => intents.extend([Intent::ReleaseRight, Intent::PressLeft]),
            _ => {}
        }
        match t % 120 {
            20 | 50 => intents.push(Intent::PressAttack),
            80 => intents.push(Intent::PressJump),
            100 => intents.push(Intent::PressBlock),
            110 => intents.push(Intent::ReleaseBlock),
            _ => {}
        }
        TickInput { intents }
    }

    fn is_boss_wave(wave: Wave) -> bool {
        matches!(wave, Wave::FinalA | Wave::FinalB | Wave::FinalC)
    }

    /// Minimal level script: next wave when the minions are gone, knock the
    /// boss down between boss waves
    struct Script {
        wave: Wave,
        boss_knocked_down: bool,
        finished: bool,
    }

    impl Script {
        fn start(world: &mut World) -> Result<Self, Box<dyn std::error::Error>> {
            world.spawn_wave(Wave::One)?;
            world.player.enable_input();
            Ok(Self {
                wave: Wave::One,
                boss_knocked_down: false,
                finished: false,
            })
        }

        fn minions_left(world: &World) -> usize {
            world
                .enemies()
                .iter()
                .filter(|e| {
                    !matches!(
                        e.archetype(),
                        Archetype::Witch | Archetype::Fireball | Archetype::Lightning
                    )
                })
                .count()
        }

        fn advance(&mut self, world: &mut World, report: &TickReport) -> Result<(), Box<dyn std::error::Error>> {
            for event in &report.witch_events {
                match event {
                    WitchEvent::PhaseThreshold { .. } => {
                        if let Some(next) = self.wave.next() {
                            world.spawn_wave(next)?;
                            world.notify_can_cast(true);
                            self.wave = next;
                            self.boss_knocked_down = false;
                        }
                    }
                    WitchEvent::Defeated => {
                        info!("Boss defeated, victory");
                        world.player.victory();
                        self.finished = true;
                    }
                    other => debug!("witch event {other:?}"),
                }
            }
            if self.finished || Self::minions_left(world) > 0 {
                return Ok(());
            }

            if is_boss_wave(self.wave) {
                if !self.boss_knocked_down {
                    world.notify_can_cast(false);
                    world.notify_knock_down();
                    world.player.increase_health(2);
                    self.boss_knocked_down = true;
                }
                return Ok(());
            }

            world.zone.clear();
            match self.wave.next() {
                Some(next) => {
                    info!("Wave {:?} cleared", self.wave);
                    world.reset_player();
                    world.player.enable_input();
                    if next == Wave::FinalA {
                        world.spawn_enemy(WITCH_INTRO)?;
                        world.notify_can_cast(true);
                    }
                    world.spawn_wave(next)?;
                    self.wave = next;
                }
                None => self.finished = true,
            }
            Ok(())
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let settings = match std::env::args().nth(1) {
            Some(path) => SimSettings::load(path)?,
            None => SimSettings::default(),
        };
        info!(
            "Round World starting (seed {}, {} ticks at {} Hz)",
            settings.seed, settings.run_ticks, settings.tick_rate
        );

        let mut world = World::new(&settings);
        let mut script = Script::start(&mut world)?;
        let mut deaths = 0;
        let mut last = TickReport::default();

        for t in 0..settings.run_ticks {
            let report = tick(&mut world, &scripted_input(t));
            deaths += report.enemy_deaths.len();
            script.advance(&mut world, &report)?;

            if settings.log_every > 0 && report.tick % settings.log_every == 0 {
                info!(
                    "tick {}: wave {:?}, health {}, {} enemies left, {} defeated",
                    report.tick, script.wave, report.player_health, report.enemies_remaining, deaths
                );
            }
            let stop = report.player_is_dead || script.finished;
            last = report;
            if stop {
                break;
            }
        }

        println!(
            "ran {} ticks ({:.1} s of play): wave {:?}, player health {}{}, {} enemies defeated, {} remaining",
            last.tick,
            last.tick as f64 / f64::from(settings.tick_rate),
            script.wave,
            last.player_health,
            if last.player_is_dead { " (dead)" } else { "" },
            deaths,
            last.enemies_remaining,
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    runner::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; there is no headless runner
}
