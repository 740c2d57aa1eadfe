use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::{CatalogEntity, EntityKind};
use crate::validation::{rules::genre_rules, CleanForm, DraftForm, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDraft {
    pub name: String,
}

impl Genre {
    pub fn from_draft(id: Uuid, draft: GenreDraft) -> Self {
        Self { id, name: draft.name }
    }
}

impl CatalogEntity for Genre {
    type Draft = GenreDraft;

    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> Uuid {
        self.id
    }

    // Names are compared exactly, case included
    fn unique_key(draft: &GenreDraft) -> Option<&str> {
        Some(&draft.name)
    }

    fn view(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "url": self.url(),
        })
    }
}

impl DraftForm for GenreDraft {
    fn rules() -> &'static RuleSet {
        genre_rules()
    }

    fn from_clean(form: &CleanForm) -> Self {
        Self {
            name: form.value("name").to_string(),
        }
    }
}
