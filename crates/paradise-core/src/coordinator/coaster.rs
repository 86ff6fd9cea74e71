//! The rollercoaster: roster, ride progress, and the crash checkpoint.
//!
//! ```text
//! BOARDING --(roster full)--> RUNNING --(lap done)--> BOARDING
//!                                |
//!                      (crash roll at 0.5)
//!                                v
//!                             CRASHED --(cooldown)--> BOARDING
//! ```

use paradise_agents::BoardingRefused;
use paradise_types::{AgentId, CartSnapshot, RideStatus};
use paradise_world::{CartTransform, Chance, CoasterTrack};
use tracing::{debug, info};

/// Track progress at which the crash roll happens (top of the loop).
pub const CRASH_CHECKPOINT: f32 = 0.5;

/// Progress per second on level track.
const BASE_SPEED: f32 = 0.2;

/// Height of the loop's crest above the platform.
const CREST_HEIGHT: f32 = 45.0;

/// Height drop over which the cart reaches full speed.
const GRAVITY_SPAN: f32 = 30.0;

/// Slowest the cart ever goes, as a share of full speed.
const MIN_GRAVITY: f32 = 0.1;

/// What a frame of riding produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RideOutcome {
    /// The cart crashed at the checkpoint. These riders are the victims.
    Crashed(Vec<AgentId>),
    /// The cart completed a lap and these riders got off.
    Completed(Vec<AgentId>),
}

/// Coordinator-owned coaster state.
#[derive(Debug, Clone)]
pub struct Coaster {
    status: RideStatus,
    riders: Vec<AgentId>,
    seats: usize,
    progress: f32,
    cooldown: f32,
    crash_cooldown: f32,
    transform: CartTransform,
}

impl Coaster {
    /// An empty cart waiting on the platform.
    pub fn new(track: &CoasterTrack, seats: usize, crash_cooldown: f32) -> Self {
        Self {
            status: RideStatus::Boarding,
            riders: Vec::with_capacity(seats),
            seats,
            progress: 0.0,
            cooldown: 0.0,
            crash_cooldown,
            transform: track.transform_at(0.0),
        }
    }

    /// Current status.
    pub const fn status(&self) -> RideStatus {
        self.status
    }

    /// Riders in seat order.
    pub fn riders(&self) -> &[AgentId] {
        &self.riders
    }

    /// Track progress in `[0, 1)`.
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Cart transform this frame.
    pub const fn transform(&self) -> CartTransform {
        self.transform
    }

    /// Boarding with at least one free seat.
    pub fn has_room(&self) -> bool {
        self.status == RideStatus::Boarding && self.riders.len() < self.seats
    }

    /// Seat held by `agent`.
    pub fn seat_of(&self, agent: AgentId) -> Option<usize> {
        self.riders.iter().position(|r| *r == agent)
    }

    /// Put `agent` on the roster.
    ///
    /// # Errors
    ///
    /// Returns [`BoardingRefused`] if the cart is not boarding or is full.
    pub fn try_board(&mut self, agent: AgentId) -> Result<usize, BoardingRefused> {
        if self.status != RideStatus::Boarding {
            return Err(BoardingRefused::NotBoarding(self.status));
        }
        if let Some(seat) = self.seat_of(agent) {
            return Ok(seat);
        }
        if self.riders.len() >= self.seats {
            return Err(BoardingRefused::Full { seats: self.seats });
        }
        let seat = self.riders.len();
        self.riders.push(agent);
        debug!(agent = %agent, seat, "Boarded the coaster");
        Ok(seat)
    }

    /// Advance the ride by one frame.
    ///
    /// `crash_chance` is rolled only on the frame the cart crosses the
    /// checkpoint.
    pub fn advance(
        &mut self,
        delta: f32,
        track: &CoasterTrack,
        crash_chance: f64,
        chance: &mut dyn Chance,
    ) -> Option<RideOutcome> {
        match self.status {
            RideStatus::Boarding => {
                self.transform = track.transform_at(0.0);
                if self.riders.len() >= self.seats {
                    self.status = RideStatus::Running;
                    self.progress = 0.0;
                    info!(riders = self.riders.len(), "Coaster departed");
                }
                None
            }
            RideStatus::Running => {
                let height = track.point_at(self.progress).y - track.point_at(0.0).y;
                let gravity = ((CREST_HEIGHT - height) / GRAVITY_SPAN).max(MIN_GRAVITY);
                let next = (BASE_SPEED * delta).mul_add(gravity, self.progress);

                if self.progress < CRASH_CHECKPOINT
                    && next >= CRASH_CHECKPOINT
                    && chance.chance(crash_chance)
                {
                    self.status = RideStatus::Crashed;
                    self.progress = CRASH_CHECKPOINT;
                    self.transform = track.transform_at(CRASH_CHECKPOINT);
                    self.cooldown = self.crash_cooldown;
                    info!(victims = self.riders.len(), "Coaster crashed");
                    return Some(RideOutcome::Crashed(self.riders.clone()));
                }

                if next >= 1.0 {
                    self.status = RideStatus::Boarding;
                    self.progress = 0.0;
                    self.transform = track.transform_at(0.0);
                    info!("Coaster completed a lap");
                    return Some(RideOutcome::Completed(std::mem::take(&mut self.riders)));
                }

                self.progress = next;
                self.transform = track.transform_at(next);
                None
            }
            RideStatus::Crashed => {
                self.cooldown = (self.cooldown - delta).max(0.0);
                if self.cooldown <= 0.0 {
                    self.riders.clear();
                    self.status = RideStatus::Boarding;
                    self.progress = 0.0;
                    self.transform = track.transform_at(0.0);
                    info!("Coaster wreck cleared, boarding again");
                }
                None
            }
        }
    }

    /// Renderer view.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            status: self.status,
            riders: self.riders.clone(),
            position: self.transform.position,
            forward: self.transform.forward,
            yaw: self.transform.yaw,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use glam::Vec3;
    use paradise_world::ScriptedChance;

    use super::*;

    fn cart() -> (Coaster, CoasterTrack) {
        let track = CoasterTrack::new(Vec3::ZERO);
        (Coaster::new(&track, 4, 5.0), track)
    }

    fn fill(coaster: &mut Coaster) {
        for i in 0..4 {
            coaster.try_board(AgentId::new(i)).unwrap();
        }
    }

    #[test]
    fn seats_follow_boarding_order() {
        let (mut coaster, _) = cart();
        assert_eq!(coaster.try_board(AgentId::new(7)), Ok(0));
        assert_eq!(coaster.try_board(AgentId::new(3)), Ok(1));
        assert_eq!(coaster.try_board(AgentId::new(7)), Ok(0));
        assert_eq!(coaster.seat_of(AgentId::new(3)), Some(1));
        assert!(coaster.has_room());
    }

    #[test]
    fn fifth_rider_is_refused() {
        let (mut coaster, _) = cart();
        fill(&mut coaster);
        assert_eq!(
            coaster.try_board(AgentId::new(9)),
            Err(BoardingRefused::Full { seats: 4 })
        );
        assert_eq!(coaster.riders().len(), 4);
        assert!(!coaster.has_room());
    }

    #[test]
    fn departs_only_when_full() {
        let (mut coaster, track) = cart();
        let mut chance = ScriptedChance::new([0.9]);
        coaster.try_board(AgentId::new(0)).unwrap();
        assert!(coaster.advance(0.1, &track, 0.5, &mut chance).is_none());
        assert_eq!(coaster.status(), RideStatus::Boarding);

        fill(&mut coaster);
        let _ = coaster.advance(0.1, &track, 0.5, &mut chance);
        assert_eq!(coaster.status(), RideStatus::Running);
        assert_eq!(
            coaster.try_board(AgentId::new(9)),
            Err(BoardingRefused::NotBoarding(RideStatus::Running))
        );
    }

    #[test]
    fn crash_at_checkpoint_then_cooldown() {
        let (mut coaster, track) = cart();
        fill(&mut coaster);
        // Departure, then a roll below 0.5 at the checkpoint.
        let mut chance = ScriptedChance::new([0.1]);
        let _ = coaster.advance(0.0, &track, 0.5, &mut chance);

        let mut outcome = None;
        for _ in 0..10_000 {
            outcome = coaster.advance(0.05, &track, 0.5, &mut chance);
            if outcome.is_some() {
                break;
            }
        }
        let victims: Vec<_> = (0..4).map(AgentId::new).collect();
        assert_eq!(outcome, Some(RideOutcome::Crashed(victims)));
        assert_eq!(coaster.status(), RideStatus::Crashed);
        assert_eq!(coaster.riders().len(), 4);

        let _ = coaster.advance(4.0, &track, 0.5, &mut chance);
        assert_eq!(coaster.status(), RideStatus::Crashed);
        let _ = coaster.advance(1.5, &track, 0.5, &mut chance);
        assert_eq!(coaster.status(), RideStatus::Boarding);
        assert!(coaster.riders().is_empty());
    }

    #[test]
    fn safe_lap_disembarks_everyone() {
        let (mut coaster, track) = cart();
        fill(&mut coaster);
        let mut chance = ScriptedChance::new([0.9]);
        let _ = coaster.advance(0.0, &track, 0.5, &mut chance);

        let mut outcome = None;
        for _ in 0..100_000 {
            outcome = coaster.advance(0.05, &track, 0.5, &mut chance);
            if outcome.is_some() {
                break;
            }
        }
        assert!(matches!(outcome, Some(RideOutcome::Completed(ref r)) if r.len() == 4));
        assert_eq!(coaster.status(), RideStatus::Boarding);
        assert!(coaster.riders().is_empty());
        assert_eq!(chance.remaining(), 0);
    }

    #[test]
    fn progress_slows_near_the_crest() {
        let (mut coaster, track) = cart();
        fill(&mut coaster);
        let mut chance = ScriptedChance::new([0.9]);
        let _ = coaster.advance(0.0, &track, 0.5, &mut chance);
        let before = coaster.progress();
        let _ = coaster.advance(0.1, &track, 0.5, &mut chance);
        let step = coaster.progress() - before;
        // On the platform the cart moves at 1.5x base speed.
        assert!((step - 0.2 * 0.1 * 1.5).abs() < 1e-4);
    }
}
