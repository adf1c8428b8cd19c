//! Generated flavour text for settlements.
//!
//! The generator is seeded from the settlement id, so a given burg always
//! gets the same lore and re-running an export changes nothing.

use fmg_model::EntityId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const HISTORIES: [&str; 5] = [
    "{name} was founded after a devastating storm.",
    "{name} rose on the ruins of ancient settlements.",
    "{name} is famous for its miraculous well.",
    "Legend says {name} was built overnight by faerie folk.",
    "{name} survived a rebellion in the Year of Soot.",
];

const FESTIVAL_TYPES: [&str; 5] = ["Harvest", "Solstice", "Remembrance", "Lights", "Trade"];
const FESTIVAL_DESCRIPTORS: [&str; 5] = ["Grand", "Silent", "Ancient", "Day of", "Festival of"];
const FESTIVAL_DAYS: [&str; 5] = ["Dawn", "Lights", "Plenty", "Remembrance", "Wellsprings"];

const RULER_TITLES: [&str; 5] = ["Lord", "Lady", "Baron", "Duke", "Chancellor"];
const RULER_FIRST_NAMES: [&str; 5] = ["Gerin", "Mirala", "Edris", "Tharan", "Cyra"];
const RULER_SURNAMES: [&str; 5] = ["Ashfall", "Velora", "Silvervein", "Dorn", "Gleam"];

const MYTH_SUBJECTS: [&str; 6] = ["Stag", "Well", "Spirit", "Oak", "Torrent", "Star"];
const MYTH_ADJECTIVES: [&str; 5] = ["Silver", "Endless", "Hollow", "Sacred", "Lost"];
const MYTH_TEMPLATES: [&str; 3] = [
    "The {adj} {subj} guards the town's luck.",
    "{adj} {subj} appears every century.",
    "Only the worthy see the {adj} {subj} at dawn.",
];

/// Lore for one settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurgLore {
    pub history: String,
    pub festivals: Vec<String>,
    pub rulers: Vec<String>,
    pub myths: Vec<String>,
}

impl BurgLore {
    pub fn generate(id: EntityId, name: &str) -> Self {
        let mut rng = StdRng::seed_from_u64(id.0 as u64);

        let history = pick(&mut rng, &HISTORIES).replace("{name}", name);
        let festivals = (0..rng.gen_range(1..=2)).map(|_| festival(&mut rng)).collect();
        let rulers = (0..rng.gen_range(1..=3)).map(|_| ruler(&mut rng)).collect();
        let myths = (0..rng.gen_range(1..=2)).map(|_| myth(&mut rng)).collect();

        Self {
            history,
            festivals,
            rulers,
            myths,
        }
    }

    /// Bullet lines for the note's lore section.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("History: {}", self.history),
            format!("Festivals: {}", self.festivals.join(", ")),
            format!("Rulers: {}", self.rulers.join(", ")),
            format!("Myths: {}", self.myths.join(" ")),
        ]
    }
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn festival<R: Rng>(rng: &mut R) -> String {
    let descriptor = pick(rng, &FESTIVAL_DESCRIPTORS);
    let pool: &[&str] = if rng.gen_bool(0.5) {
        &FESTIVAL_TYPES
    } else {
        &FESTIVAL_DAYS
    };
    format!("{descriptor} {}", pick(rng, pool))
}

fn ruler<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, &RULER_TITLES),
        pick(rng, &RULER_FIRST_NAMES),
        pick(rng, &RULER_SURNAMES)
    )
}

fn myth<R: Rng>(rng: &mut R) -> String {
    let template = pick(rng, &MYTH_TEMPLATES);
    template
        .replace("{adj}", pick(rng, &MYTH_ADJECTIVES))
        .replace("{subj}", pick(rng, &MYTH_SUBJECTS))
}
