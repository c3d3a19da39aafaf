//! Rate limiting for high-frequency wheel input.
//!
//! A wheel gesture fires dozens of events; the page wants at most one
//! discrete "advance" per cooldown window. Excess events are dropped, never
//! queued for later.

/// Default minimum spacing between accepted wheel events.
pub const DEFAULT_COOLDOWN_MS: f64 = 1000.0;

/// Holds the timestamp of the last accepted event.
///
/// Two accepted events are never closer together than `cooldown_ms`.
/// The first event is always accepted.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    cooldown_ms: f64,
    last_accepted: Option<f64>,
}

impl ThrottleGate {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms: cooldown_ms.max(0.0),
            last_accepted: None,
        }
    }

    /// Accept the event at `now_ms` if the cooldown has elapsed, recording it.
    /// Non-finite timestamps are rejected and leave the gate untouched.
    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            log::warn!("wheel event with invalid timestamp {} dropped", now_ms);
            return false;
        }
        let open = match self.last_accepted {
            None => true,
            Some(last) => now_ms - last >= self.cooldown_ms,
        };
        if open {
            self.last_accepted = Some(now_ms);
        }
        open
    }
}

impl Default for ThrottleGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS)
    }
}

/// Integer state cycling through `0..len`, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCycle {
    state: u8,
    len: u8,
}

impl StepCycle {
    /// A cycle of `len` states starting at 0. `len` of 0 is treated as 1.
    pub fn new(len: u8) -> Self {
        Self { state: 0, len: len.max(1) }
    }

    /// Move to the next state, wrapping to 0 after the last. Returns the new state.
    pub fn step(&mut self) -> u8 {
        self.state = (self.state + 1) % self.len;
        self.state
    }

    pub fn state(&self) -> u8 {
        self.state
    }

}

/// Scroll direction of an accepted wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Positive deltas scroll down; zero and negative count as up.
    pub fn from_delta(delta_y: f32) -> Self {
        if delta_y > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }

    /// Wire encoding for scene events.
    pub fn as_f32(self) -> f32 {
        match self {
            ScrollDirection::Up => -1.0,
            ScrollDirection::Down => 1.0,
        }
    }
}

/// Notification emitted for every accepted wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Cycle state after the step.
    pub state: u8,
    pub direction: ScrollDirection,
}

impl Advance {
    /// Whether this advance completed a full cycle.
    pub fn wrapped(&self) -> bool {
        self.state == 0
    }
}

/// Throttle gate plus step cycle: turns raw wheel events into discrete advances.
#[derive(Debug, Clone)]
pub struct WheelThrottle {
    gate: ThrottleGate,
    cycle: StepCycle,
}

impl WheelThrottle {
    pub fn new(cooldown_ms: f64, states: u8) -> Self {
        Self {
            gate: ThrottleGate::new(cooldown_ms),
            cycle: StepCycle::new(states),
        }
    }

    /// Step the cycle if the gate is open at `now_ms`. Returns the new state.
    pub fn try_advance(&mut self, now_ms: f64) -> Option<u8> {
        if self.gate.try_accept(now_ms) {
            Some(self.cycle.step())
        } else {
            None
        }
    }

    /// Consume one wheel event. Rejected events leave all state untouched.
    pub fn on_wheel(&mut self, delta_y: f32, now_ms: f64) -> Option<Advance> {
        let state = self.try_advance(now_ms)?;
        Some(Advance {
            state,
            direction: ScrollDirection::from_delta(delta_y),
        })
    }

    pub fn state(&self) -> u8 {
        self.cycle.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_always_accepted() {
        let mut gate = ThrottleGate::default();
        assert!(gate.try_accept(0.0));
        assert_eq!(gate.last_accepted, Some(0.0));
    }

    #[test]
    fn events_inside_cooldown_are_dropped() {
        let mut throttle = WheelThrottle::new(1000.0, 4);
        assert_eq!(throttle.try_advance(0.0), Some(1));
        assert_eq!(throttle.try_advance(500.0), None);
        assert_eq!(throttle.state(), 1);
        // Exactly one cooldown later is accepted
        assert_eq!(throttle.try_advance(1000.0), Some(2));
    }

    #[test]
    fn rejected_event_does_not_move_the_window() {
        let mut gate = ThrottleGate::new(1000.0);
        assert!(gate.try_accept(0.0));
        assert!(!gate.try_accept(999.0));
        assert_eq!(gate.last_accepted, Some(0.0));
        assert!(gate.try_accept(1000.0));
    }

    #[test]
    fn cycle_wraps_after_four_steps() {
        let mut cycle = StepCycle::new(4);
        let seen: Vec<u8> = (0..4).map(|_| cycle.step()).collect();
        assert_eq!(seen, vec![1, 2, 3, 0]);
        assert_eq!(cycle.state(), 0);
    }

    #[test]
    fn accepted_events_never_closer_than_cooldown() {
        let mut throttle = WheelThrottle::new(1000.0, 4);
        let mut accepted = Vec::new();
        let mut t = 0.0;
        while t < 10_000.0 {
            if throttle.try_advance(t).is_some() {
                accepted.push(t);
            }
            t += 16.7;
        }
        for pair in accepted.windows(2) {
            assert!(pair[1] - pair[0] >= 1000.0, "{pair:?}");
        }
        assert!(accepted.len() >= 9);
    }

    #[test]
    fn direction_follows_delta_sign() {
        let mut throttle = WheelThrottle::new(1000.0, 4);
        let a = throttle.on_wheel(53.0, 0.0).unwrap();
        assert_eq!(a.direction, ScrollDirection::Down);
        let b = throttle.on_wheel(-53.0, 1000.0).unwrap();
        assert_eq!(b.direction, ScrollDirection::Up);
        // Scrolling up still advances the cycle forward
        assert_eq!(b.state, 2);
    }

    #[test]
    fn fourth_advance_wraps() {
        let mut throttle = WheelThrottle::new(1000.0, 4);
        let wrapped: Vec<bool> = (0..4)
            .map(|i| throttle.on_wheel(1.0, i as f64 * 1000.0).unwrap().wrapped())
            .collect();
        assert_eq!(wrapped, vec![false, false, false, true]);
    }

    #[test]
    fn non_finite_timestamp_leaves_gate_untouched() {
        let mut throttle = WheelThrottle::new(1000.0, 4);
        assert_eq!(throttle.try_advance(f64::NAN), None);
        assert_eq!(throttle.try_advance(f64::INFINITY), None);
        assert_eq!(throttle.state(), 0);
        assert_eq!(throttle.gate.last_accepted, None);

        let later: Vec<Option<u8>> = [10_000.0, 20_000.0, 30_000.0, 40_000.0]
            .into_iter()
            .map(|t| throttle.try_advance(t))
            .collect();
        assert_eq!(later, vec![Some(1), Some(2), Some(3), Some(0)]);
    }

    #[test]
    fn non_finite_timestamp_after_accept_is_dropped() {
        let mut gate = ThrottleGate::default();
        assert!(gate.try_accept(0.0));
        assert!(!gate.try_accept(f64::NAN));
        assert_eq!(gate.last_accepted, Some(0.0));
        assert!(gate.try_accept(1000.0));
    }
}
