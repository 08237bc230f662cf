//! Sample roster of five wards and twenty nurses.

use crate::domain::WardColor;

pub(crate) struct RosterWard {
    pub(crate) name: &'static str,
    pub(crate) color: WardColor,
}

/// A sample nurse; `ward` indexes into [`WARDS`].
pub(crate) struct RosterNurse {
    pub(crate) first_name: &'static str,
    pub(crate) last_name: &'static str,
    pub(crate) email: &'static str,
    pub(crate) ward: usize,
}

const fn ward(name: &'static str, color: WardColor) -> RosterWard {
    RosterWard { name, color }
}

pub(crate) const WARDS: [RosterWard; 5] = [
    ward("Ward 1", WardColor::Red),
    ward("Ward 2", WardColor::Green),
    ward("Ward 3", WardColor::Blue),
    ward("Ward 4", WardColor::Yellow),
    ward("Ward 5", WardColor::Red),
];

const fn nurse(
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    ward: usize,
) -> RosterNurse {
    RosterNurse {
        first_name,
        last_name,
        email,
        ward,
    }
}

pub(crate) const NURSES: [RosterNurse; 20] = [
    nurse("John", "Doe", "john.doe@example.com", 0),
    nurse("Jane", "Doe", "jane.doe@example.com", 1),
    nurse("Alice", "Smith", "alice.smith@example.com", 2),
    nurse("Bob", "Johnson", "bob.johnson@example.com", 3),
    nurse("Charlie", "Brown", "charlie.brown@example.com", 4),
    nurse("Emma", "Wilson", "emma.wilson@example.com", 0),
    nurse("Liam", "Martinez", "liam.martinez@example.com", 1),
    nurse("Olivia", "Anderson", "olivia.anderson@example.com", 2),
    nurse("Noah", "Thomas", "noah.thomas@example.com", 3),
    nurse("Sophia", "Garcia", "sophia.garcia@example.com", 4),
    nurse("Mason", "Taylor", "mason.taylor@example.com", 0),
    nurse("Isabella", "Hernandez", "isabella.hernandez@example.com", 1),
    nurse("James", "Moore", "james.moore@example.com", 2),
    nurse("Ava", "Rodriguez", "ava.rodriguez@example.com", 3),
    nurse("Elijah", "Lopez", "elijah.lopez@example.com", 4),
    nurse("Lucas", "Gonzalez", "lucas.gonzalez@example.com", 0),
    nurse("Mia", "Perez", "mia.perez@example.com", 1),
    nurse("Ethan", "Walker", "ethan.walker@example.com", 2),
    nurse("Harper", "Hall", "harper.hall@example.com", 3),
    nurse("Benjamin", "Young", "benjamin.young@example.com", 4),
];
