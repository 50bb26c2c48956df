//! Stage rosters
//!
//! Data only: which enemies each wave puts on the track, with offsets in
//! pixels from the player. Deciding when a wave starts or ends belongs to
//! the level script driving the [`World`](crate::sim::World).

use serde::{Deserialize, Serialize};

use crate::sim::enemy::Archetype::{self, Golem, Hornet, Porcupine, Scorpion};
use crate::sim::enemy::Spawn;
use crate::sim::entity::Action;
use crate::sim::entity::Colour::{self, Blue, Red};
use crate::sim::entity::Direction::{self, Left, Right};

const fn walker(archetype: Archetype, direction: Direction, offset: f32, colour: Colour) -> Spawn {
    Spawn::new(archetype, direction, Action::Walk, offset, colour)
}

const WAVE_ONE: [Spawn; 8] = [
    walker(Porcupine, Left, 500.0, Red),
    walker(Porcupine, Right, 4700.0, Blue),
    walker(Porcupine, Left, 4000.0, Red),
    walker(Porcupine, Right, 2000.0, Blue),
    walker(Porcupine, Left, 1000.0, Red),
    walker(Porcupine, Right, 1600.0, Blue),
    walker(Porcupine, Left, 2800.0, Red),
    walker(Porcupine, Right, 3200.0, Blue),
];

const WAVE_TWO: [Spawn; 8] = [
    walker(Hornet, Left, 3900.0, Red),
    walker(Hornet, Right, 1900.0, Blue),
    walker(Hornet, Left, 400.0, Blue),
    walker(Hornet, Right, 4700.0, Red),
    walker(Porcupine, Left, 2500.0, Red),
    walker(Porcupine, Right, 900.0, Blue),
    walker(Porcupine, Left, 3100.0, Red),
    walker(Porcupine, Right, 3300.0, Blue),
];

const WAVE_THREE: [Spawn; 8] = [
    walker(Scorpion, Left, 600.0, Red),
    walker(Scorpion, Right, 4500.0, Blue),
    walker(Scorpion, Left, 3200.0, Red),
    walker(Hornet, Right, 2800.0, Blue),
    walker(Hornet, Left, 4000.0, Red),
    walker(Porcupine, Right, 1100.0, Blue),
    walker(Porcupine, Left, 1300.0, Red),
    walker(Porcupine, Right, 3900.0, Blue),
];

const WAVE_FOUR: [Spawn; 8] = [
    walker(Golem, Right, 4800.0, Red),
    walker(Scorpion, Right, 700.0, Blue),
    walker(Scorpion, Left, 3200.0, Red),
    walker(Porcupine, Right, 1500.0, Blue),
    walker(Porcupine, Left, 2900.0, Red),
    walker(Hornet, Right, 1100.0, Blue),
    walker(Hornet, Left, 2000.0, Red),
    walker(Hornet, Right, 2600.0, Blue),
];

const FINAL_A: [Spawn; 6] = [
    walker(Porcupine, Right, 500.0, Blue),
    walker(Hornet, Left, 2000.0, Red),
    walker(Porcupine, Right, 4700.0, Blue),
    walker(Hornet, Right, 1300.0, Blue),
    walker(Porcupine, Left, 2500.0, Red),
    walker(Hornet, Right, 3700.0, Blue),
];

const FINAL_B: [Spawn; 12] = [
    walker(Porcupine, Left, 4000.0, Red),
    walker(Porcupine, Right, 2000.0, Blue),
    walker(Porcupine, Left, 1100.0, Red),
    walker(Porcupine, Right, 4600.0, Blue),
    walker(Hornet, Left, 800.0, Red),
    walker(Hornet, Right, 1600.0, Blue),
    walker(Hornet, Left, 3100.0, Red),
    walker(Hornet, Right, 4200.0, Blue),
    walker(Scorpion, Left, 500.0, Red),
    walker(Scorpion, Right, 2600.0, Blue),
    walker(Scorpion, Left, 3500.0, Red),
    walker(Scorpion, Right, 4800.0, Blue),
];

const FINAL_C: [Spawn; 8] = [
    walker(Golem, Right, 4600.0, Red),
    walker(Golem, Left, 400.0, Blue),
    walker(Scorpion, Left, 2000.0, Red),
    walker(Scorpion, Right, 2400.0, Blue),
    walker(Scorpion, Left, 2800.0, Red),
    walker(Scorpion, Right, 3200.0, Blue),
    walker(Scorpion, Left, 3600.0, Red),
    walker(Scorpion, Right, 4000.0, Blue),
];

/// The boss enters flying, a little ahead of the player
pub const WITCH_INTRO: Spawn = Spawn::new(
    Archetype::Witch,
    Direction::Left,
    Action::Walk,
    800.0,
    Colour::None,
);

/// Every wave of the game, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wave {
    One,
    Two,
    Three,
    Four,
    /// Minions summoned during the boss fight
    FinalA,
    FinalB,
    FinalC,
}

impl Wave {
    pub const ALL: [Wave; 7] = [
        Wave::One,
        Wave::Two,
        Wave::Three,
        Wave::Four,
        Wave::FinalA,
        Wave::FinalB,
        Wave::FinalC,
    ];

    pub fn roster(self) -> &'static [Spawn] {
        match self {
            Wave::One => &WAVE_ONE,
            Wave::Two => &WAVE_TWO,
            Wave::Three => &WAVE_THREE,
            Wave::Four => &WAVE_FOUR,
            Wave::FinalA => &FINAL_A,
            Wave::FinalB => &FINAL_B,
            Wave::FinalC => &FINAL_C,
        }
    }

    /// Later boss waves keep the colour zone that is already up
    pub fn resets_zone(self) -> bool {
        !matches!(self, Wave::FinalB | Wave::FinalC)
    }

    pub fn next(self) -> Option<Wave> {
        let index = Wave::ALL.iter().position(|&w| w == self)?;
        Wave::ALL.get(index + 1).copied()
    }
}
