/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ToggleTiming {
    pub high_ms: u16,
    pub low_ms: u16,
}

/// FSM for endless blinking
#[derive(Debug, Clone, Copy)]
pub struct BlinkFsm {
    /// Current state of output, starts from high
    state: bool,
    /// The time left for next event
    duration: u16,
}

impl BlinkFsm {
    pub const fn rising(timing: &ToggleTiming) -> Self {
        Self {
            state: true,
            duration: timing.high_ms,
        }
    }

    /// Substract `elapsed` ms, flip the output when the current half is over
    pub fn substract(&self, timing: &ToggleTiming, elapsed: u16) -> Self {
        match self.duration > elapsed {
            true => BlinkFsm {
                state: self.state,
                duration: self.duration - elapsed,
            },
            false => match self.state {
                true => BlinkFsm {
                    state: false,
                    duration: timing.low_ms,
                },
                false => BlinkFsm {
                    state: true,
                    duration: timing.high_ms,
                },
            },
        }
    }

    pub fn duration(&self) -> u16 {
        self.duration
    }

    pub fn expect_output_pin_state(&self) -> bool {
        self.state
    }
}
