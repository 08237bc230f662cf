//! Optional startup seeding of a sample ward and nurse roster.

mod roster;
mod startup;

pub use startup::{SeedOutcome, SeedPorts, StartupSeedingError, seed_example_roster};
