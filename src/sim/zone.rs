//! Colour zones
//!
//! The arena is split into a red half and a blue half. Which half an attack
//! comes from is decided purely by the attacker's facing, so the rule itself
//! is a pure function. [`ZoneOverlay`] only tracks how the zone graphic
//! fades in and out between waves.

use serde::{Deserialize, Serialize};

use super::entity::{Colour, Direction};

/// Red only yields to right-facing attacks, Blue to left-facing ones
pub fn is_vulnerable(colour: Colour, attack: Direction) -> bool {
    match colour {
        Colour::None => true,
        Colour::Red => attack == Direction::Right,
        Colour::Blue => attack == Direction::Left,
    }
}

const LAST_FRAME: u8 = 5;
const TICKS_PER_FRAME: i32 = 6;
/// Pause before the overlay starts dissolving
const CLEAR_DELAY_TICKS: i32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZonePhase {
    #[default]
    Inactive,
    Forming,
    Active,
    Clearing,
}

/// Animation state of the colour-zone graphic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOverlay {
    phase: ZonePhase,
    /// 0 is fully formed, 5 is gone
    frame: u8,
    ticks_to_next: i32,
}

impl Default for ZoneOverlay {
    fn default() -> Self {
        Self {
            phase: ZonePhase::Inactive,
            frame: LAST_FRAME,
            ticks_to_next: 0,
        }
    }
}

impl ZoneOverlay {
    pub fn phase(&self) -> ZonePhase {
        self.phase
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn form(&mut self) {
        self.phase = ZonePhase::Forming;
    }

    pub fn clear(&mut self) {
        self.phase = ZonePhase::Clearing;
        self.ticks_to_next = CLEAR_DELAY_TICKS;
    }

    pub fn update(&mut self) {
        match self.phase {
            ZonePhase::Inactive | ZonePhase::Active => {}
            ZonePhase::Forming => {
                if !self.countdown() {
                    return;
                }
                if self.frame == 0 {
                    self.phase = ZonePhase::Active;
                    return;
                }
                self.frame -= 1;
                self.ticks_to_next = TICKS_PER_FRAME;
            }
            ZonePhase::Clearing => {
                if !self.countdown() {
                    return;
                }
                if self.frame == LAST_FRAME {
                    self.phase = ZonePhase::Inactive;
                    return;
                }
                self.frame += 1;
                self.ticks_to_next = TICKS_PER_FRAME;
            }
        }
    }

    /// True when the current frame has run out
    fn countdown(&mut self) -> bool {
        self.ticks_to_next -= 1;
        self.ticks_to_next <= 0
    }
}
