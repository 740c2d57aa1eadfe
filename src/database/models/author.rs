use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::{CatalogEntity, EntityKind};
use crate::validation::{parse_date, rules::author_rules, CleanForm, DraftForm, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated author fields, without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_draft(id: Uuid, draft: AuthorDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            family_name: draft.family_name,
            date_of_birth: draft.date_of_birth,
            date_of_death: draft.date_of_death,
        }
    }

    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// e.g. "Jan 3, 1892 - Sep 2, 1973"; either side may be blank
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

impl CatalogEntity for Author {
    type Draft = AuthorDraft;

    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> Uuid {
        self.id
    }

    fn view(&self) -> Value {
        json!({
            "id": self.id,
            "first_name": self.first_name,
            "family_name": self.family_name,
            "date_of_birth": self.date_of_birth,
            "date_of_death": self.date_of_death,
            "date_of_birth_formatted": format_date(self.date_of_birth),
            "date_of_death_formatted": format_date(self.date_of_death),
            "name": self.name(),
            "lifespan": self.lifespan(),
            "url": self.url(),
        })
    }
}

impl DraftForm for AuthorDraft {
    fn rules() -> &'static RuleSet {
        author_rules()
    }

    fn from_clean(form: &CleanForm) -> Self {
        Self {
            first_name: form.value("first_name").to_string(),
            family_name: form.value("family_name").to_string(),
            date_of_birth: form.optional("date_of_birth").and_then(parse_date),
            date_of_death: form.optional("date_of_death").and_then(parse_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FormInput, Validated};

    fn tolkien() -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            family_name: "Tolkien".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: NaiveDate::from_ymd_opt(1973, 9, 2),
        }
    }

    #[test]
    fn formats_name_and_lifespan() {
        let author = tolkien();
        assert_eq!(author.name(), "Tolkien, John");
        assert_eq!(author.lifespan(), "Jan 3, 1892 - Sep 2, 1973");

        let living = Author { date_of_death: None, ..author };
        assert_eq!(living.lifespan(), "Jan 3, 1892 - ");
    }

    #[test]
    fn view_carries_url_and_iso_dates() {
        let author = tolkien();
        let view = author.view();
        assert_eq!(view["url"], format!("/author/{}", author.id));
        assert_eq!(view["date_of_birth"], "1892-01-03");
        assert_eq!(view["name"], "Tolkien, John");
    }

    #[test]
    fn draft_from_form_trims_and_parses_dates() {
        let input = FormInput::new()
            .with("first_name", " John ")
            .with("family_name", "Tolkien")
            .with("date_of_birth", "1892-01-03")
            .with("date_of_death", "");

        match AuthorDraft::validate(&input) {
            Validated::Valid(draft) => {
                assert_eq!(draft.first_name, "John");
                assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1892, 1, 3));
                assert_eq!(draft.date_of_death, None);
            }
            Validated::Invalid(errors) => panic!("unexpected errors: {:?}", errors),
        }
    }
}
