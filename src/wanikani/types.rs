use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    ItemKind,
    Reading,
    ReadingKind,
    StudyItem,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInformation {
    pub username: String,
    pub level: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One raw record as the user API returns it. Only the fields we read are modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    /// Learning statistics; `null` until the user has started the item.
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
    #[serde(default)]
    pub kana: Option<String>,
    #[serde(default)]
    pub onyomi: Option<String>,
    #[serde(default)]
    pub kunyomi: Option<String>,
    #[serde(default)]
    pub nanori: Option<String>,
    #[serde(default)]
    pub important_reading: Option<String>,
}

/// Vocabulary comes grouped under `general`, kanji and radicals as a plain list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RequestedInformation {
    List(Vec<RawItem>),
    Grouped { general: Vec<RawItem> },
}

impl RequestedInformation {
    pub fn into_items(self) -> Vec<RawItem> {
        match self {
            RequestedInformation::List(items) => items,
            RequestedInformation::Grouped { general } => general,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub user_information: Option<UserInformation>,
    #[serde(default)]
    pub requested_information: Option<RequestedInformation>,
}

impl RawItem {
    pub fn is_studied(&self) -> bool {
        match &self.stats {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Array(a)) => !a.is_empty(),
            Some(serde_json::Value::Object(o)) => !o.is_empty(),
        }
    }

    pub fn character(&self) -> Option<&str> {
        self.character.as_deref().filter(|c| !c.is_empty())
    }

    fn reading(&self, kind: ItemKind) -> Reading {
        match kind {
            ItemKind::Radical => Reading::None,
            ItemKind::Vocabulary => match self.kana.as_deref().filter(|k| !k.is_empty()) {
                Some(kana) => Reading::Kana { kana: kana.to_string() },
                None => Reading::None,
            },
            ItemKind::Kanji => {
                let reading_kind = match self.important_reading.as_deref() {
                    Some("onyomi") => ReadingKind::Onyomi,
                    Some("kunyomi") => ReadingKind::Kunyomi,
                    Some("nanori") => ReadingKind::Nanori,
                    _ => return Reading::None,
                };
                let value = match reading_kind {
                    ReadingKind::Onyomi => &self.onyomi,
                    ReadingKind::Kunyomi => &self.kunyomi,
                    ReadingKind::Nanori => &self.nanori,
                };
                match value.as_deref().filter(|v| !v.is_empty()) {
                    Some(value) => Reading::Kanji { kind: reading_kind, value: value.to_string() },
                    None => Reading::None,
                }
            }
        }
    }

    /// Converts the record, ignoring studied/renderable checks; `None` when the
    /// record has no usable character or level.
    pub fn to_study_item(&self, kind: ItemKind) -> Option<StudyItem> {
        let character = self.character()?;
        let level = self.level.filter(|l| *l > 0)?;

        Some(StudyItem {
            character: character.to_string(),
            kind,
            level,
            meaning: self.meaning.clone().unwrap_or_default(),
            reading: self.reading(kind),
        })
    }
}
