//! Day phases derived from the position in the 360-second cycle.
//!
//! | Cycle (s) | Minute | Parents            | Children        |
//! |-----------|--------|--------------------|-----------------|
//! | 0-60      | 1      | sleep              | sleep           |
//! | 60-120    | 2      | work or leisure    | free            |
//! | 120-180   | 3      | work or leisure    | school          |
//! | 180-240   | 4      | work or leisure    | free            |
//! | 240-300   | 5      | work or leisure    | park            |
//! | 300-360   | 6      | sleep              | sleep           |

/// Length of one day in seconds.
pub const DAY_LENGTH: f32 = 360.0;

/// Length of one in-game minute in seconds.
pub const MINUTE_LENGTH: f32 = 60.0;

const NIGHT_ENDS: f32 = 60.0;
const NIGHT_BEGINS: f32 = 300.0;
const SCHOOL: (f32, f32) = (120.0, 180.0);
const PARK: (f32, f32) = (240.0, 300.0);

/// What children are supposed to be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildPhase {
    /// In bed.
    Sleep,
    /// At a school desk.
    School,
    /// Park, beach, or arcade.
    Park,
    /// Free to pick any leisure.
    Free,
}

/// Time of day as seen by the residents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTime {
    cycle: f32,
}

impl DayTime {
    /// Wrap any number of seconds into the day cycle.
    pub fn new(seconds: f32) -> Self {
        Self {
            cycle: seconds.rem_euclid(DAY_LENGTH),
        }
    }

    /// Seconds into the current day, `[0, 360)`.
    pub const fn cycle(self) -> f32 {
        self.cycle
    }

    /// Night window: the first and last minute.
    pub fn is_night(self) -> bool {
        self.cycle < NIGHT_ENDS || self.cycle >= NIGHT_BEGINS
    }

    /// Job holders are expected at their post.
    pub fn is_work_time(self) -> bool {
        !self.is_night()
    }

    /// Children's phase.
    pub fn child_phase(self) -> ChildPhase {
        if self.is_night() {
            ChildPhase::Sleep
        } else if (SCHOOL.0..SCHOOL.1).contains(&self.cycle) {
            ChildPhase::School
        } else if (PARK.0..PARK.1).contains(&self.cycle) {
            ChildPhase::Park
        } else {
            ChildPhase::Free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_covers_first_and_last_minute() {
        assert!(DayTime::new(0.0).is_night());
        assert!(DayTime::new(59.9).is_night());
        assert!(!DayTime::new(60.0).is_night());
        assert!(!DayTime::new(299.9).is_night());
        assert!(DayTime::new(300.0).is_night());
    }

    #[test]
    fn child_phases_follow_the_table() {
        assert_eq!(DayTime::new(30.0).child_phase(), ChildPhase::Sleep);
        assert_eq!(DayTime::new(90.0).child_phase(), ChildPhase::Free);
        assert_eq!(DayTime::new(150.0).child_phase(), ChildPhase::School);
        assert_eq!(DayTime::new(200.0).child_phase(), ChildPhase::Free);
        assert_eq!(DayTime::new(250.0).child_phase(), ChildPhase::Park);
        assert_eq!(DayTime::new(330.0).child_phase(), ChildPhase::Sleep);
    }

    #[test]
    fn cycle_wraps_negative_and_large() {
        assert!((DayTime::new(-10.0).cycle() - 350.0).abs() < 1e-4);
        assert!((DayTime::new(725.0).cycle() - 5.0).abs() < 1e-4);
    }
}
