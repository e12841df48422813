//! The base attributes every car is described by, and answer parsing.

use serde::{Deserialize, Serialize};

use crate::entities::PREFIX_BITS;

/// The five base attributes, in the fixed order their answers appear in a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseAttribute {
    European,
    LaunchedBefore2000,
    /// AWD or 4x4.
    AllWheelDrive,
    /// Turbocharged or supercharged.
    ForcedInduction,
    RearEngine,
}

impl BaseAttribute {
    /// All attributes in question order.
    pub const ALL: [BaseAttribute; PREFIX_BITS] = [
        BaseAttribute::European,
        BaseAttribute::LaunchedBefore2000,
        BaseAttribute::AllWheelDrive,
        BaseAttribute::ForcedInduction,
        BaseAttribute::RearEngine,
    ];

    /// Position of this attribute's bit in a code.
    pub fn index(&self) -> usize {
        match self {
            BaseAttribute::European => 0,
            BaseAttribute::LaunchedBefore2000 => 1,
            BaseAttribute::AllWheelDrive => 2,
            BaseAttribute::ForcedInduction => 3,
            BaseAttribute::RearEngine => 4,
        }
    }

    /// The question put to the user for this attribute.
    pub fn question(&self) -> &'static str {
        match self {
            BaseAttribute::European => "1) ¿Tu coche es europeo?",
            BaseAttribute::LaunchedBefore2000 => "2) ¿Tu coche fue lanzado antes del año 2000?",
            BaseAttribute::AllWheelDrive => "3) ¿Tu coche es AWD o 4x4?",
            BaseAttribute::ForcedInduction => "4) ¿Tu coche es turbo o supercargado?",
            BaseAttribute::RearEngine => "5) ¿Tu coche usa motor trasero?",
        }
    }
}

/// Interpret a typed yes/no reply. Returns `None` for anything unrecognised.
pub fn parse_answer(reply: &str) -> Option<bool> {
    let folded = reply.trim().to_lowercase().replace('í', "i");
    match folded.as_str() {
        "si" | "s" | "y" | "yes" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
