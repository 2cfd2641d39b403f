//! Contact model.

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, like_pattern, lower, opt_eq, present};
use crate::{
    db::connection::DbConnection,
    prelude::*,
    schema::contact::{self, dsl},
    store::{Resource, ResourceStore},
};

/// A person the CRM keeps in touch with.
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
#[diesel(table_name = crate::schema::contact)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// List query for contacts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    /// Matches name, email or phone, ignoring case.
    pub search: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    /// `name` or `createdAt`.
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactSort {
    Name,
    CreatedAt,
}

impl ContactFilter {
    fn sort(&self) -> Option<ContactSort> {
        match present(&self.sort_by)?.as_str() {
            "name" => Some(ContactSort::Name),
            "createdAt" => Some(ContactSort::CreatedAt),
            _ => None,
        }
    }
}

impl Resource for Contact {
    type New = NewContact;
    type Patch = ContactPatch;
    type Filter = ContactFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn create(new: NewContact, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            address: new.address,
            position: new.position,
            status: new.status,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if patch.company.is_some() {
            self.company = patch.company;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.position.is_some() {
            self.position = patch.position;
        }
        if patch.status.is_some() {
            self.status = patch.status;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &ContactFilter) -> bool {
        let search = present(&filter.search).is_none_or(|search| {
            contains_ignore_case(&self.name, search)
                || contains_ignore_case(&self.email, search)
                || contains_ignore_case(&self.phone, search)
        });
        search
            && opt_eq(self.company.as_deref(), present(&filter.company))
            && opt_eq(self.status.as_deref(), present(&filter.status))
    }

    fn sort(items: &mut [Self], filter: &ContactFilter) {
        match filter.sort() {
            Some(ContactSort::Name) => items.sort_by_key(|c| c.name.to_lowercase()),
            Some(ContactSort::CreatedAt) => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            None => {}
        }
    }
}

impl ResourceStore<Contact> for DbConnection {
    fn create(&self, new: NewContact) -> Result<Contact> {
        let row = <Contact as Resource>::create(new, Utc::now());
        let conn = &mut self.get()?;
        Ok(diesel::insert_into(dsl::contact)
            .values(&row)
            .returning(Contact::as_returning())
            .get_result(conn)?)
    }

    fn fetch_all(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
        let conn = &mut self.get()?;
        Ok(list_query(filter).select(Contact::as_select()).load(conn)?)
    }

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<Contact>> {
        let conn = &mut self.get()?;
        Ok(dsl::contact
            .find(*id)
            .select(Contact::as_select())
            .first(conn)
            .optional()?)
    }

    fn update(&self, id: &Uuid, patch: ContactPatch) -> Result<Option<Contact>> {
        let conn = &mut self.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let Some(mut row) = dsl::contact
                .find(*id)
                .select(Contact::as_select())
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };
            row.apply(patch, Utc::now());
            Ok(Some(
                diesel::update(dsl::contact.find(*id))
                    .set(&row)
                    .returning(Contact::as_returning())
                    .get_result(conn)?,
            ))
        })
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = &mut self.get()?;
        Ok(diesel::delete(dsl::contact.find(*id)).execute(conn)? > 0)
    }
}

/// Filtered and ordered `SELECT` behind [`ResourceStore::fetch_all`].
fn list_query(filter: &ContactFilter) -> contact::BoxedQuery<'_, Pg> {
    let mut query = dsl::contact.into_boxed();

    if let Some(search) = present(&filter.search) {
        let pattern = like_pattern(search);
        query = query.filter(
            dsl::name
                .ilike(pattern.clone())
                .or(dsl::email.ilike(pattern.clone()))
                .or(dsl::phone.ilike(pattern)),
        );
    }
    if let Some(company) = present(&filter.company) {
        query = query.filter(dsl::company.eq(company));
    }
    if let Some(status) = present(&filter.status) {
        query = query.filter(dsl::status.eq(status));
    }

    query = match filter.sort() {
        Some(ContactSort::Name) => query.order(lower(dsl::name).asc()),
        Some(ContactSort::CreatedAt) => query.order(dsl::created_at.desc()),
        None => query.order(dsl::created_at.asc()),
    };

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_order_ignores_case() {
        let filter = ContactFilter {
            sort_by: Some("name".into()),
            ..Default::default()
        };
        let sql = diesel::debug_query::<Pg, _>(&list_query(&filter)).to_string();
        assert!(sql.contains("ORDER BY lower("), "{sql}");
    }

    fn contact(name: &str, status: Option<&str>) -> Contact {
        Contact::create(
            NewContact {
                name: name.into(),
                email: format!("{}@x.com", name.to_lowercase()),
                phone: "0900".into(),
                company: Some("Acme".into()),
                address: None,
                position: None,
                status: status.map(String::from),
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn search_covers_email() {
        let filter = ContactFilter {
            search: Some("BOB@".into()),
            ..Default::default()
        };
        assert!(contact("Bob", None).matches(&filter));
        assert!(!contact("Alice", None).matches(&filter));
    }

    #[test]
    fn status_filter_skips_contacts_without_status() {
        let filter = ContactFilter {
            status: Some("lead".into()),
            ..Default::default()
        };
        assert!(contact("Bob", Some("lead")).matches(&filter));
        assert!(!contact("Bob", None).matches(&filter));
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let mut items = vec![contact("carol", None), contact("Alice", None), contact("bob", None)];
        Contact::sort(
            &mut items,
            &ContactFilter {
                sort_by: Some("name".into()),
                ..Default::default()
            },
        );
        let names: Vec<_> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alice", "bob", "carol"]);
    }
}
