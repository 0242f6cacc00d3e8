//! Hand-placed constellation shown before any knowledge-base query has run.

use crate::model::{Deity, Position};

fn star(
    id: u32,
    name: &str,
    mythology: &str,
    (x, y, z): (f64, f64, f64),
    relations: &[u32],
) -> Deity {
    Deity::new(id, name, mythology)
        .at(Position::new(x, y, z))
        .with_relations(relations.iter().copied())
}

/// Fifty deities across five pantheons with fixed positions and curated relations.
///
/// Relations here are directed as curated and are not guaranteed to be symmetric.
pub fn classic_pantheon() -> Vec<Deity> {
    vec![
        // Greek
        star(1, "Zeus", "Greek", (0.0, 5.0, 0.0), &[2, 3, 4]),
        star(2, "Hera", "Greek", (2.0, 5.0, 1.0), &[1, 3]),
        star(3, "Poseidon", "Greek", (-3.0, 4.0, -2.0), &[1, 4]),
        star(4, "Athena", "Greek", (3.0, 4.0, 2.0), &[1, 5]),
        star(5, "Apollo", "Greek", (4.0, 3.0, 1.0), &[1, 4, 6]),
        star(6, "Artemis", "Greek", (5.0, 3.0, 0.0), &[1, 5]),
        star(7, "Ares", "Greek", (-5.0, 2.0, 0.0), &[1, 2]),
        star(8, "Aphrodite", "Greek", (-4.0, 3.0, 1.0), &[1, 7]),
        star(9, "Hephaestus", "Greek", (-2.0, 2.0, -1.0), &[1, 8]),
        star(10, "Hermes", "Greek", (1.0, 4.0, -1.0), &[1, 5]),
        star(11, "Dionysus", "Greek", (2.0, 2.0, 2.0), &[1]),
        star(12, "Demeter", "Greek", (-1.0, 3.0, 3.0), &[1, 13]),
        star(13, "Persephone", "Greek", (-2.0, 1.0, 4.0), &[12, 14]),
        star(14, "Hades", "Greek", (-3.0, 0.0, 5.0), &[1, 13]),

        // Norse
        star(15, "Odin", "Norse", (8.0, 5.0, -3.0), &[16, 17]),
        star(16, "Thor", "Norse", (9.0, 4.0, -2.0), &[15, 17, 18]),
        star(17, "Frigg", "Norse", (7.0, 5.0, -4.0), &[15]),
        star(18, "Loki", "Norse", (10.0, 3.0, -1.0), &[15, 16, 19]),
        star(19, "Freya", "Norse", (6.0, 4.0, -5.0), &[15, 20]),
        star(20, "Freyr", "Norse", (5.0, 4.0, -6.0), &[19]),
        star(21, "Baldur", "Norse", (8.0, 3.0, -3.0), &[15, 17]),
        star(22, "Tyr", "Norse", (9.0, 2.0, -4.0), &[15]),
        star(23, "Heimdall", "Norse", (7.0, 3.0, -2.0), &[15]),
        star(24, "Hel", "Norse", (11.0, 0.0, -5.0), &[18]),

        // Egyptian
        star(25, "Ra", "Egyptian", (0.0, 5.0, 8.0), &[26, 27]),
        star(26, "Osiris", "Egyptian", (-1.0, 4.0, 9.0), &[25, 27, 28]),
        star(27, "Isis", "Egyptian", (1.0, 4.0, 9.0), &[25, 26, 28]),
        star(28, "Horus", "Egyptian", (0.0, 3.0, 10.0), &[26, 27, 29]),
        star(29, "Set", "Egyptian", (-2.0, 3.0, 8.0), &[26, 28]),
        star(30, "Anubis", "Egyptian", (-1.0, 2.0, 11.0), &[26]),
        star(31, "Thoth", "Egyptian", (2.0, 3.0, 8.0), &[25]),
        star(32, "Bastet", "Egyptian", (1.0, 2.0, 7.0), &[25]),
        star(33, "Sekhmet", "Egyptian", (-2.0, 2.0, 10.0), &[25]),
        star(34, "Hathor", "Egyptian", (2.0, 2.0, 9.0), &[25]),

        // Hindu
        star(35, "Brahma", "Hindu", (-8.0, 5.0, 5.0), &[36, 37]),
        star(36, "Vishnu", "Hindu", (-9.0, 5.0, 6.0), &[35, 37, 38]),
        star(37, "Shiva", "Hindu", (-7.0, 5.0, 4.0), &[35, 36, 39]),
        star(38, "Lakshmi", "Hindu", (-10.0, 4.0, 6.0), &[36]),
        star(39, "Parvati", "Hindu", (-6.0, 4.0, 4.0), &[37, 40]),
        star(40, "Ganesha", "Hindu", (-7.0, 3.0, 5.0), &[37, 39]),
        star(41, "Hanuman", "Hindu", (-9.0, 3.0, 7.0), &[36]),
        star(42, "Durga", "Hindu", (-6.0, 4.0, 3.0), &[37]),
        star(43, "Kali", "Hindu", (-5.0, 3.0, 5.0), &[37, 42]),
        star(44, "Indra", "Hindu", (-8.0, 4.0, 6.0), &[35]),

        // Celtic
        star(45, "Dagda", "Celtic", (3.0, -4.0, -5.0), &[46, 47]),
        star(46, "Morrigan", "Celtic", (4.0, -3.0, -6.0), &[45]),
        star(47, "Brigid", "Celtic", (2.0, -3.0, -4.0), &[45]),
        star(48, "Lugh", "Celtic", (3.0, -2.0, -5.0), &[45]),
        star(49, "Cernunnos", "Celtic", (5.0, -4.0, -7.0), &[]),
        star(50, "Danu", "Celtic", (1.0, -5.0, -3.0), &[45]),
    ]
}
