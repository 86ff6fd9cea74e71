//! Leisure bracket tables.
//!
//! A single uniform roll is compared against cumulative upper bounds in
//! order. The first bracket whose bound exceeds the roll *and* whose choice
//! the resident is eligible for wins. An ineligible bracket falls through
//! to the next one, so e.g. a child who already holds ice cream and rolls
//! `0.03` goes shopping instead.

use paradise_types::Inventory;

/// Something to do with free time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leisure {
    /// Walk to the ice-cream shop.
    IceCream,
    /// Walk to a store shelf.
    Shopping,
    /// Build a sand castle at the beach.
    SandCastle,
    /// Play a claw machine.
    Arcade,
    /// Queue for the rollercoaster.
    Coaster,
    /// Play in the park.
    Park,
    /// Watch TV on the couch.
    Tv,
    /// Stroll near home.
    Wander,
}

/// One row of a bracket table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Exclusive cumulative upper bound of the roll.
    pub upper: f64,
    /// What the bracket selects.
    pub choice: Leisure,
}

const fn bracket(upper: f64, choice: Leisure) -> Bracket {
    Bracket { upper, choice }
}

/// Children in the free phase. No match means eat held ice cream, else
/// wander.
pub const CHILD_FREE: [Bracket; 5] = [
    bracket(0.05, Leisure::IceCream),
    bracket(0.15, Leisure::Shopping),
    bracket(0.25, Leisure::SandCastle),
    bracket(0.55, Leisure::Arcade),
    bracket(0.60, Leisure::Coaster),
];

/// Children in the park phase. No match means play in the park.
pub const CHILD_PARK: [Bracket; 2] = [
    bracket(0.1, Leisure::SandCastle),
    bracket(0.6, Leisure::Arcade),
];

/// Parents off work during the day. Re-rolled every frame while idle; no
/// match means stay idle.
pub const PARENT_DAY: [Bracket; 5] = [
    bracket(0.01, Leisure::Tv),
    bracket(0.015, Leisure::Shopping),
    bracket(0.05, Leisure::Arcade),
    bracket(0.053, Leisure::Coaster),
    bracket(0.063, Leisure::Wander),
];

/// Which choices a resident may take right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Eligibility {
    /// Already holding ice cream.
    pub has_ice_cream: bool,
    /// Already carrying groceries.
    pub has_groceries: bool,
    /// Already carrying a toy.
    pub has_toy: bool,
    /// The coaster is boarding with a free seat and the resident can climb in.
    pub can_ride: bool,
}

impl Eligibility {
    /// Build from a resident's inventory and the coaster's availability.
    pub const fn new(inventory: &Inventory, ride_has_room: bool) -> Self {
        Self {
            has_ice_cream: inventory.has_ice_cream,
            has_groceries: inventory.has_groceries,
            has_toy: inventory.has_toy,
            can_ride: ride_has_room && !inventory.has_wheelchair,
        }
    }

    /// Everything allowed.
    pub const fn unrestricted() -> Self {
        Self {
            has_ice_cream: false,
            has_groceries: false,
            has_toy: false,
            can_ride: true,
        }
    }

    /// Whether `choice` is open.
    pub const fn allows(&self, choice: Leisure) -> bool {
        match choice {
            Leisure::IceCream => !self.has_ice_cream,
            Leisure::Shopping => !self.has_groceries,
            Leisure::Arcade => !self.has_toy,
            Leisure::Coaster => self.can_ride,
            Leisure::SandCastle | Leisure::Park | Leisure::Tv | Leisure::Wander => true,
        }
    }
}

/// First eligible bracket the roll falls under.
pub fn choose(table: &[Bracket], roll: f64, eligibility: &Eligibility) -> Option<Leisure> {
    table
        .iter()
        .find(|b| roll < b.upper && eligibility.allows(b.choice))
        .map(|b| b.choice)
}
