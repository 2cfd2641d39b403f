//! Deal model and pipeline stages.

use std::fmt;

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, like_pattern, lower, opt_eq, present};
use crate::{
    db::connection::DbConnection,
    prelude::*,
    schema::deal::{self, dsl},
    store::{Resource, ResourceStore},
};

/// Where a deal sits in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prospecting => "Prospecting",
            Self::Qualification => "Qualification",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    AsChangeset,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = crate::schema::deal)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    /// Id of the contact or company the deal is with.
    pub contact_or_company: Uuid,
    /// One of the [`DealStage`] names.
    pub stage: String,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub name: String,
    pub value: f64,
    pub contact_or_company: Uuid,
    pub stage: DealStage,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner: Option<String>,
}

/// Updatable deal fields. An unknown stage fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub contact_or_company: Option<Uuid>,
    pub stage: Option<DealStage>,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealFilter {
    /// Matches the deal name, ignoring case.
    pub search: Option<String>,
    pub stage: Option<String>,
    pub owner: Option<String>,
    /// `name` or `closeDate`.
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DealSort {
    Name,
    CloseDate,
}

impl DealFilter {
    fn sort(&self) -> Option<DealSort> {
        match present(&self.sort_by)?.as_str() {
            "name" => Some(DealSort::Name),
            "closeDate" => Some(DealSort::CloseDate),
            _ => None,
        }
    }
}

impl Resource for Deal {
    type New = NewDeal;
    type Patch = DealPatch;
    type Filter = DealFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn create(new: NewDeal, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            value: new.value,
            contact_or_company: new.contact_or_company,
            stage: new.stage.as_str().to_string(),
            close_date: new.close_date,
            notes: new.notes,
            owner: new.owner,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: DealPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(target) = patch.contact_or_company {
            self.contact_or_company = target;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage.as_str().to_string();
        }
        if patch.close_date.is_some() {
            self.close_date = patch.close_date;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        if patch.owner.is_some() {
            self.owner = patch.owner;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &DealFilter) -> bool {
        present(&filter.search).is_none_or(|search| contains_ignore_case(&self.name, search))
            && opt_eq(Some(self.stage.as_str()), present(&filter.stage))
            && opt_eq(self.owner.as_deref(), present(&filter.owner))
    }

    fn sort(items: &mut [Self], filter: &DealFilter) {
        match filter.sort() {
            Some(DealSort::Name) => items.sort_by_key(|d| d.name.to_lowercase()),
            // Deals without a close date go last.
            Some(DealSort::CloseDate) => {
                items.sort_by_key(|d| (d.close_date.is_none(), d.close_date))
            }
            None => {}
        }
    }
}

impl ResourceStore<Deal> for DbConnection {
    fn create(&self, new: NewDeal) -> Result<Deal> {
        let row = <Deal as Resource>::create(new, Utc::now());
        let conn = &mut self.get()?;
        Ok(diesel::insert_into(dsl::deal)
            .values(&row)
            .returning(Deal::as_returning())
            .get_result(conn)?)
    }

    fn fetch_all(&self, filter: &DealFilter) -> Result<Vec<Deal>> {
        let conn = &mut self.get()?;
        Ok(list_query(filter).select(Deal::as_select()).load(conn)?)
    }

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<Deal>> {
        let conn = &mut self.get()?;
        Ok(dsl::deal
            .find(*id)
            .select(Deal::as_select())
            .first(conn)
            .optional()?)
    }

    fn update(&self, id: &Uuid, patch: DealPatch) -> Result<Option<Deal>> {
        let conn = &mut self.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let Some(mut row) = dsl::deal
                .find(*id)
                .select(Deal::as_select())
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };
            row.apply(patch, Utc::now());
            Ok(Some(
                diesel::update(dsl::deal.find(*id))
                    .set(&row)
                    .returning(Deal::as_returning())
                    .get_result(conn)?,
            ))
        })
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = &mut self.get()?;
        Ok(diesel::delete(dsl::deal.find(*id)).execute(conn)? > 0)
    }
}

/// Filtered and ordered `SELECT` behind [`ResourceStore::fetch_all`].
fn list_query(filter: &DealFilter) -> deal::BoxedQuery<'_, Pg> {
    let mut query = dsl::deal.into_boxed();

    if let Some(search) = present(&filter.search) {
        query = query.filter(dsl::name.ilike(like_pattern(search)));
    }
    if let Some(stage) = present(&filter.stage) {
        query = query.filter(dsl::stage.eq(stage));
    }
    if let Some(owner) = present(&filter.owner) {
        query = query.filter(dsl::owner.eq(owner));
    }

    query = match filter.sort() {
        Some(DealSort::Name) => query.order(lower(dsl::name).asc()),
        Some(DealSort::CloseDate) => query.order(dsl::close_date.asc().nulls_last()),
        None => query.order(dsl::created_at.asc()),
    };

    query
}
