//! Support ticket model.

use std::fmt;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, like_pattern, opt_eq, present};
use crate::{
    db::connection::DbConnection,
    prelude::*,
    schema::ticket::dsl,
    store::{Resource, ResourceStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for TicketPriority {
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
#[diesel(table_name = crate::schema::ticket)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub contact_or_company: Uuid,
    /// Email of the account working the ticket.
    pub assigned_user: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub name: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub contact_or_company: Uuid,
    pub assigned_user: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub contact_or_company: Option<Uuid>,
    pub assigned_user: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_user: Option<String>,
    /// `createdAt` or `updatedAt`, newest first.
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketSort {
    CreatedAt,
    UpdatedAt,
}

impl TicketFilter {
    fn sort(&self) -> Option<TicketSort> {
        match present(&self.sort_by)?.as_str() {
            "createdAt" => Some(TicketSort::CreatedAt),
            "updatedAt" => Some(TicketSort::UpdatedAt),
            _ => None,
        }
    }
}

impl Resource for Ticket {
    type New = NewTicket;
    type Patch = TicketPatch;
    type Filter = TicketFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn create(new: NewTicket, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            status: new.status.as_str().to_string(),
            priority: new.priority.as_str().to_string(),
            contact_or_company: new.contact_or_company,
            assigned_user: new.assigned_user,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: TicketPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status.as_str().to_string();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority.as_str().to_string();
        }
        if let Some(target) = patch.contact_or_company {
            self.contact_or_company = target;
        }
        if patch.assigned_user.is_some() {
            self.assigned_user = patch.assigned_user;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &TicketFilter) -> bool {
        present(&filter.search).is_none_or(|search| contains_ignore_case(&self.name, search))
            && opt_eq(Some(self.status.as_str()), present(&filter.status))
            && opt_eq(Some(self.priority.as_str()), present(&filter.priority))
            && opt_eq(self.assigned_user.as_deref(), present(&filter.assigned_user))
    }

    fn sort(items: &mut [Self], filter: &TicketFilter) {
        match filter.sort() {
            Some(TicketSort::CreatedAt) => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Some(TicketSort::UpdatedAt) => items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            None => {}
        }
    }
}

impl ResourceStore<Ticket> for DbConnection {
    fn create(&self, new: NewTicket) -> Result<Ticket> {
        let row = <Ticket as Resource>::create(new, Utc::now());
        let conn = &mut self.get()?;
        Ok(diesel::insert_into(dsl::ticket)
            .values(&row)
            .returning(Ticket::as_returning())
            .get_result(conn)?)
    }

    fn fetch_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let conn = &mut self.get()?;
        let mut query = dsl::ticket.select(Ticket::as_select()).into_boxed();

        if let Some(search) = present(&filter.search) {
            query = query.filter(dsl::name.ilike(like_pattern(search)));
        }
        if let Some(status) = present(&filter.status) {
            query = query.filter(dsl::status.eq(status));
        }
        if let Some(priority) = present(&filter.priority) {
            query = query.filter(dsl::priority.eq(priority));
        }
        if let Some(assigned_user) = present(&filter.assigned_user) {
            query = query.filter(dsl::assigned_user.eq(assigned_user));
        }

        query = match filter.sort() {
            Some(TicketSort::CreatedAt) => query.order(dsl::created_at.desc()),
            Some(TicketSort::UpdatedAt) => query.order(dsl::updated_at.desc()),
            None => query.order(dsl::created_at.asc()),
        };

        Ok(query.load(conn)?)
    }

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<Ticket>> {
        let conn = &mut self.get()?;
        Ok(dsl::ticket
            .find(*id)
            .select(Ticket::as_select())
            .first(conn)
            .optional()?)
    }

    fn update(&self, id: &Uuid, patch: TicketPatch) -> Result<Option<Ticket>> {
        let conn = &mut self.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let Some(mut row) = dsl::ticket
                .find(*id)
                .select(Ticket::as_select())
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };
            row.apply(patch, Utc::now());
            Ok(Some(
                diesel::update(dsl::ticket.find(*id))
                    .set(&row)
                    .returning(Ticket::as_returning())
                    .get_result(conn)?,
            ))
        })
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = &mut self.get()?;
        Ok(diesel::delete(dsl::ticket.find(*id)).execute(conn)? > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn ticket(name: &str, now: DateTime<Utc>) -> Ticket {
        Ticket::create(
            NewTicket {
                name: name.into(),
                description: "printer on fire".into(),
                status: TicketStatus::New,
                priority: TicketPriority::default(),
                contact_or_company: Uuid::new_v4(),
                assigned_user: Some("agent@x.com".into()),
                category: None,
            },
            now,
        )
    }

    #[test]
    fn priority_defaults_to_medium() {
        let row = ticket("t", Utc::now());
        assert_eq!(row.priority, "Medium");
        assert_eq!(row.status, "New");
    }

    #[test]
    fn status_accepts_in_progress() {
        let patch: TicketPatch = serde_json::from_str(r#"{"status":"In Progress"}"#).unwrap();
        assert_eq!(patch.status, Some(TicketStatus::InProgress));
        assert!(serde_json::from_str::<TicketPatch>(r#"{"priority":"Urgent"}"#).is_err());
    }

    #[test]
    fn updated_at_sort_is_newest_first() {
        let now = Utc::now();
        let mut first = ticket("first", now);
        let second = ticket("second", now + TimeDelta::seconds(1));
        first.apply(TicketPatch::default(), now + TimeDelta::seconds(10));

        let mut items = vec![second, first];
        Ticket::sort(
            &mut items,
            &TicketFilter {
                sort_by: Some("updatedAt".into()),
                ..Default::default()
            },
        );
        assert_eq!(items[0].name, "first");
    }

    #[test]
    fn filters_on_assignee_and_priority() {
        let row = ticket("t", Utc::now());
        let mine = TicketFilter {
            assigned_user: Some("agent@x.com".into()),
            priority: Some("Medium".into()),
            ..Default::default()
        };
        let theirs = TicketFilter {
            assigned_user: Some("other@x.com".into()),
            ..Default::default()
        };
        assert!(row.matches(&mine));
        assert!(!row.matches(&theirs));
    }
}
