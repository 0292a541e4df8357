use crate::{error::D2Error, layer::CompositeType};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Number of tab-separated columns in one lookup row.
pub const FIELD_COUNT: usize = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ObjectType {
    Character = 1,
    Item = 2,
}

impl From<ObjectType> for i32 {
    fn from(value: ObjectType) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for ObjectType {
    type Error = D2Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Character),
            2 => Ok(Self::Item),
            other => Err(D2Error::ObjectType(other)),
        }
    }
}

/// Parses a decimal integer column, yielding 0 for anything that is not one.
pub fn safe_int(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

fn deserialize_safe_int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Cow<'de, str> = Deserialize::deserialize(deserializer)?;
    Ok(safe_int(&text))
}

/// One row of the object lookup table, keyed by act, type and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLookupRecord {
    #[serde(rename = "Act", deserialize_with = "deserialize_safe_int")]
    pub act: i32,
    #[serde(rename = "Type", deserialize_with = "deserialize_safe_int")]
    pub typ: i32,
    #[serde(rename = "Id", deserialize_with = "deserialize_safe_int")]
    pub id: i32,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ObjectsTxtId", deserialize_with = "deserialize_safe_int")]
    pub objects_txt_id: i32,
    #[serde(rename = "MonstatsTxtId", deserialize_with = "deserialize_safe_int")]
    pub monstats_txt_id: i32,
    #[serde(rename = "Direction", deserialize_with = "deserialize_safe_int")]
    pub direction: i32,
    #[serde(rename = "Base")]
    pub base: String,
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "HD")]
    pub hd: String,
    #[serde(rename = "TR")]
    pub tr: String,
    #[serde(rename = "LG")]
    pub lg: String,
    #[serde(rename = "RA")]
    pub ra: String,
    #[serde(rename = "LA")]
    pub la: String,
    #[serde(rename = "RH")]
    pub rh: String,
    #[serde(rename = "LH")]
    pub lh: String,
    #[serde(rename = "SH")]
    pub sh: String,
    #[serde(rename = "S1")]
    pub s1: String,
    #[serde(rename = "S2")]
    pub s2: String,
    #[serde(rename = "S3")]
    pub s3: String,
    #[serde(rename = "S4")]
    pub s4: String,
    #[serde(rename = "S5")]
    pub s5: String,
    #[serde(rename = "S6")]
    pub s6: String,
    #[serde(rename = "S7")]
    pub s7: String,
    #[serde(rename = "S8")]
    pub s8: String,
    #[serde(rename = "ColorMap")]
    pub color_map: String,
    #[serde(rename = "Index", deserialize_with = "deserialize_safe_int")]
    pub index: i32,
}

impl ObjectLookupRecord {
    pub fn key(&self) -> (i32, i32, i32) {
        (self.act, self.typ, self.id)
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        ObjectType::try_from(self.typ).ok()
    }

    /// Palette shift resource, if the row names one.
    pub fn color_map(&self) -> Option<&str> {
        Some(self.color_map.as_str()).filter(|path| !path.is_empty())
    }

    /// Component code stored in the column for `layer`.
    pub fn layer(&self, layer: CompositeType) -> &str {
        match layer {
            CompositeType::Head => &self.hd,
            CompositeType::Torso => &self.tr,
            CompositeType::Legs => &self.lg,
            CompositeType::RightArm => &self.ra,
            CompositeType::LeftArm => &self.la,
            CompositeType::RightHand => &self.rh,
            CompositeType::LeftHand => &self.lh,
            CompositeType::Shield => &self.sh,
            CompositeType::Special1 => &self.s1,
            CompositeType::Special2 => &self.s2,
            CompositeType::Special3 => &self.s3,
            CompositeType::Special4 => &self.s4,
            CompositeType::Special5 => &self.s5,
            CompositeType::Special6 => &self.s6,
            CompositeType::Special7 => &self.s7,
            CompositeType::Special8 => &self.s8,
        }
    }

    /// Slots that carry a component code, in draw-slot order.
    pub fn layers(&self) -> impl Iterator<Item = (CompositeType, &str)> {
        CompositeType::ALL
            .into_iter()
            .map(move |layer| (layer, self.layer(layer)))
            .filter(|(_, code)| !code.is_empty())
    }

    /// Candidate animation resources for one layer, most specific first.
    ///
    /// Returns `None` when the row has no component code for `layer`. The
    /// requested weapon class is tried before the hand-to-hand fallback, and
    /// `.dcc` before `.dc6`.
    pub fn layer_animation_paths(
        &self,
        layer: CompositeType,
        animation_mode: &str,
        weapon_class: &str,
    ) -> Option<[String; 4]> {
        let code = self.layer(layer);
        if code.is_empty() {
            return None;
        }

        let path = |class: &str, ext: &str| {
            let (base, token, name) = (&self.base, &self.token, layer.name());
            format!("{base}/{token}/{name}/{token}{name}{code}{animation_mode}{class}.{ext}")
        };

        Some([
            path(weapon_class, "dcc"),
            path(CompositeType::FALLBACK_CLASS, "dcc"),
            path(weapon_class, "dc6"),
            path(CompositeType::FALLBACK_CLASS, "dc6"),
        ])
    }
}
