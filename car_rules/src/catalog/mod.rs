//! The built-in catalog the guesser is seeded with when no snapshot exists.

use crate::entities::{DisambiguationRule, Entity};

/// Seed cars as `(name, code)`, in display order.
const SEED_CARS: &[(&str, &str)] = &[
    ("Ferrari F40", "1-1-0-1-1"),
    ("Lamborghini Diablo", "1-1-1-0-1"),
    ("Porsche 959", "1-1-1-1-1"),
    ("McLaren F1", "1-1-0-0-1-1"),
    ("Pagani Zonda  c12", "1-1-0-0-1-0"),
    ("corvette c8 zr1", "0-0-0-1-1"),
    ("Bugatti Veyron", "1-0-1-1-1"),
    ("Maserati MC12", "1-0-0-0-1"),
    ("Alfa Romeo 8C Competizione", "1-0-0-0-0"),
    ("corvette e ray", "0-0-1-0-1"),
    ("BMW M3 E30", "1-1-0-0-0"),
    ("acura ", "0-0-1-1-1"),
    ("Audi R8", "1-0-1-0-1"),
    ("Jeep wilis", "0-1-1-0-0"),
    ("Koenigsegg Agera RS", "1-0-0-1-1"),
    ("M3 e92", "1-0-0-1-0"),
    ("Ford GT40 (1964)", "0-1-0-0-1-1"),
    ("Honda NSX (1990)", "0-1-0-0-1-0"),
    ("Chevrolet Corvette C1", "0-1-0-0-0"),
    ("Dodge Challenger Hellcat (2015)", "0-0-0-1-0"),
    ("Nissan GT-R R35(1999)", "0-1-1-1-0"),
    ("Toyota Supra MK4 (1993)", "0-1-0-1-0-0"),
    ("Mazda RX-7 FD (1992)", "0-1-0-1-0-1"),
    ("Apollo IE ", "0-0-0-0-1"),
    ("Mitsubishi Lancer Evolution IX ", "0-0-1-1-0"),
    ("golf mk4 tdi", "1-1-0-1-0"),
    ("Audi RS4 B7", "1-0-1-0-0"),
    ("Lexus LFA (2010)", "0-0-0-0-0"),
    ("audi rs3 8v", "1-0-1-1-0"),
    ("Tesla model s plaid", "0-0-1-0-0"),
    ("Ford Sierra RS Cosworth (4x4)", "1-1-1-1-0"),
    ("Mercedes-Benz G500 W463", "1-1-1-0-0"),
];

/// Seed rules as `(prefix, question)`.
const SEED_RULES: &[(&str, &str)] = &[
    (
        "1-1-0-0-1",
        "¿El coche tiene un asiento central en el habitáculo?",
    ),
    (
        "0-1-0-0-1",
        "¿El coche fue diseñado originalmente para competir en Le Mans?",
    ),
    ("0-1-0-1-0", "¿El coche utiliza un motor rotativo (Wankel)?"),
];

/// The seed cars, in display order.
pub fn seed_entities() -> Vec<Entity> {
    SEED_CARS
        .iter()
        .filter_map(|(name, bits)| Entity::parse(*name, bits).ok())
        .collect()
}

/// The seed disambiguation rules.
pub fn seed_rules() -> Vec<DisambiguationRule> {
    SEED_RULES
        .iter()
        .filter_map(|(key, question)| {
            let key = key.parse().ok()?;
            DisambiguationRule::new(key, *question).ok()
        })
        .collect()
}
