use crate::error::D2Error;
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt, str::FromStr};

lazy_static! {
    static ref LAYER_NAME_TO_TYPE: HashMap<&'static str, CompositeType> = {
        let mut m = HashMap::new();
        for layer in CompositeType::ALL {
            m.insert(layer.name(), layer);
        }
        m.shrink_to_fit();
        m
    };
}

/// Component slot of a composite (multi-layer) animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompositeType {
    Head = 0,
    Torso,
    Legs,
    RightArm,
    LeftArm,
    RightHand,
    LeftHand,
    Shield,
    Special1,
    Special2,
    Special3,
    Special4,
    Special5,
    Special6,
    Special7,
    Special8,
}

impl CompositeType {
    pub const ALL: [CompositeType; 16] = [
        Self::Head,
        Self::Torso,
        Self::Legs,
        Self::RightArm,
        Self::LeftArm,
        Self::RightHand,
        Self::LeftHand,
        Self::Shield,
        Self::Special1,
        Self::Special2,
        Self::Special3,
        Self::Special4,
        Self::Special5,
        Self::Special6,
        Self::Special7,
        Self::Special8,
    ];

    /// Weapon class used when no animation exists for the requested one.
    pub const FALLBACK_CLASS: &'static str = "HTH";

    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "HD",
            Self::Torso => "TR",
            Self::Legs => "LG",
            Self::RightArm => "RA",
            Self::LeftArm => "LA",
            Self::RightHand => "RH",
            Self::LeftHand => "LH",
            Self::Shield => "SH",
            Self::Special1 => "S1",
            Self::Special2 => "S2",
            Self::Special3 => "S3",
            Self::Special4 => "S4",
            Self::Special5 => "S5",
            Self::Special6 => "S6",
            Self::Special7 => "S7",
            Self::Special8 => "S8",
        }
    }
}

impl fmt::Display for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompositeType {
    type Err = D2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LAYER_NAME_TO_TYPE
            .get(s.to_uppercase().as_str())
            .copied()
            .ok_or_else(|| D2Error::LayerName(s.into()))
    }
}
