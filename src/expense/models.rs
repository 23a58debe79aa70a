//! The expense records exchanged with the expense backend.

use serde::{Deserialize, Serialize};

/// The identifier the backend assigns to a record.
pub type RecordId = String;

/// The `{id, title}` shape shared by categories, subcategories and embedded
/// relations.
///
/// Records may carry `id`, `_id` or both. `id` wins when both are present.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<RecordId>,
    #[serde(default)]
    title: Option<String>,
}

impl RawRecord {
    fn into_parts(self) -> (Option<RecordId>, Option<String>) {
        (self.id.or(self.mongo_id), self.title)
    }

    fn into_required_parts(self) -> Result<(RecordId, String), String> {
        match self.into_parts() {
            (Some(id), Some(title)) => Ok((id, title)),
            (None, _) => Err("missing field `id`".to_owned()),
            (_, None) => Err("missing field `title`".to_owned()),
        }
    }
}

/// The `{id, title}` object the backend embeds when it populates a relation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct RelatedRecord {
    pub id: RecordId,
    pub title: String,
}

impl From<RawRecord> for RelatedRecord {
    fn from(raw: RawRecord) -> Self {
        let (id, title) = raw.into_parts();

        Self {
            id: id.unwrap_or_default(),
            title: title.unwrap_or_default(),
        }
    }
}

/// A category or subcategory field of an expense.
///
/// The backend either embeds the related record or sends its bare
/// identifier, depending on whether the relation was populated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<RelationRepr>")]
pub enum Relation {
    /// The full related record.
    Embedded(RelatedRecord),
    /// Only the identifier of the related record.
    Reference(RecordId),
    /// The field was `null` or missing.
    #[default]
    Absent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RelationRepr {
    Embedded(RelatedRecord),
    Reference(RecordId),
}

impl From<Option<RelationRepr>> for Relation {
    fn from(value: Option<RelationRepr>) -> Self {
        match value {
            Some(RelationRepr::Embedded(record)) => Relation::Embedded(record),
            Some(RelationRepr::Reference(id)) => Relation::Reference(id),
            None => Relation::Absent,
        }
    }
}

impl Relation {
    /// The title of the related record, only available when it is embedded.
    ///
    /// A bare identifier has no title, so it is treated the same as a
    /// missing value.
    pub fn title(&self) -> Option<&str> {
        match self {
            Relation::Embedded(record) => Some(&record.title),
            Relation::Reference(_) | Relation::Absent => None,
        }
    }
}

/// A signed monetary transaction as returned by the backend.
///
/// Positive amounts are income and negative amounts are spending.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawExpense")]
pub struct Expense {
    pub id: Option<RecordId>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Relation,
    pub sub_category: Relation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExpense {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<RecordId>,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Relation,
    #[serde(default)]
    sub_category: Relation,
}

impl From<RawExpense> for Expense {
    fn from(raw: RawExpense) -> Self {
        Self {
            id: raw.id.or(raw.mongo_id),
            amount: raw.amount,
            description: raw.description,
            date: raw.date,
            category: raw.category,
            sub_category: raw.sub_category,
        }
    }
}

impl Expense {
    /// The amount used for sums, a missing amount counts as zero.
    pub fn signed_amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// A top level category, e.g. "Food".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Category {
    pub id: RecordId,
    pub title: String,
}

impl TryFrom<RawRecord> for Category {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let (id, title) = raw.into_required_parts()?;

        Ok(Self { id, title })
    }
}

/// A subcategory, scoped to exactly one [Category].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Subcategory {
    pub id: RecordId,
    pub title: String,
}

impl TryFrom<RawRecord> for Subcategory {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let (id, title) = raw.into_required_parts()?;

        Ok(Self { id, title })
    }
}

/// The payload for creating an expense.
///
/// Relations are sent as bare identifiers, the backend assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: RecordId,
    pub sub_category: RecordId,
}

/// A list response from the backend.
///
/// Paginated endpoints wrap their results in a `{docs: [...]}` envelope,
/// others return a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Collection<T> {
    Envelope { docs: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Collection<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Collection::Envelope { docs } => docs,
            Collection::Bare(items) => items,
        }
    }
}
