//! Company model.

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, like_pattern, lower, opt_eq, present};
use crate::{
    db::connection::DbConnection,
    prelude::*,
    schema::company::{self, dsl},
    store::{Resource, ResourceStore},
};

/// A company tracked by the CRM.
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
#[diesel(table_name = crate::schema::company)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub industry: String,
    pub website: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated data for a new company.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub phone: String,
    pub industry: String,
    pub website: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

/// Fields an update may change. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

/// List query for companies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Matches name, phone or industry, ignoring case.
    pub search: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    /// `name` or `createdAt`. Anything else keeps insertion order.
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompanySort {
    Name,
    CreatedAt,
}

impl CompanyFilter {
    fn sort(&self) -> Option<CompanySort> {
        match present(&self.sort_by)?.as_str() {
            "name" => Some(CompanySort::Name),
            "createdAt" => Some(CompanySort::CreatedAt),
            _ => None,
        }
    }
}

impl Resource for Company {
    type New = NewCompany;
    type Patch = CompanyPatch;
    type Filter = CompanyFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn create(new: NewCompany, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            phone: new.phone,
            industry: new.industry,
            website: new.website,
            address: new.address,
            country: new.country,
            city: new.city,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: CompanyPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(industry) = patch.industry {
            self.industry = industry;
        }
        if patch.website.is_some() {
            self.website = patch.website;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.country.is_some() {
            self.country = patch.country;
        }
        if patch.city.is_some() {
            self.city = patch.city;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &CompanyFilter) -> bool {
        let search = present(&filter.search).is_none_or(|search| {
            contains_ignore_case(&self.name, search)
                || contains_ignore_case(&self.phone, search)
                || contains_ignore_case(&self.industry, search)
        });
        search
            && opt_eq(self.country.as_deref(), present(&filter.country))
            && opt_eq(Some(self.industry.as_str()), present(&filter.industry))
    }

    fn sort(items: &mut [Self], filter: &CompanyFilter) {
        match filter.sort() {
            Some(CompanySort::Name) => items.sort_by_key(|c| c.name.to_lowercase()),
            Some(CompanySort::CreatedAt) => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            None => {}
        }
    }
}

impl ResourceStore<Company> for DbConnection {
    fn create(&self, new: NewCompany) -> Result<Company> {
        let row = <Company as Resource>::create(new, Utc::now());
        let conn = &mut self.get()?;
        Ok(diesel::insert_into(dsl::company)
            .values(&row)
            .returning(Company::as_returning())
            .get_result(conn)?)
    }

    fn fetch_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
        let conn = &mut self.get()?;
        Ok(list_query(filter).select(Company::as_select()).load(conn)?)
    }

    fn fetch_by_id(&self, id: &Uuid) -> Result<Option<Company>> {
        let conn = &mut self.get()?;
        Ok(dsl::company
            .find(*id)
            .select(Company::as_select())
            .first(conn)
            .optional()?)
    }

    fn update(&self, id: &Uuid, patch: CompanyPatch) -> Result<Option<Company>> {
        let conn = &mut self.get()?;
        conn.transaction::<_, Error, _>(|conn| {
            let Some(mut row) = dsl::company
                .find(*id)
                .select(Company::as_select())
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };
            row.apply(patch, Utc::now());
            Ok(Some(
                diesel::update(dsl::company.find(*id))
                    .set(&row)
                    .returning(Company::as_returning())
                    .get_result(conn)?,
            ))
        })
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = &mut self.get()?;
        Ok(diesel::delete(dsl::company.find(*id)).execute(conn)? > 0)
    }
}

/// Filtered and ordered `SELECT` behind [`ResourceStore::fetch_all`].
fn list_query(filter: &CompanyFilter) -> company::BoxedQuery<'_, Pg> {
    let mut query = dsl::company.into_boxed();

    if let Some(search) = present(&filter.search) {
        let pattern = like_pattern(search);
        query = query.filter(
            dsl::name
                .ilike(pattern.clone())
                .or(dsl::phone.ilike(pattern.clone()))
                .or(dsl::industry.ilike(pattern)),
        );
    }
    if let Some(country) = present(&filter.country) {
        query = query.filter(dsl::country.eq(country));
    }
    if let Some(industry) = present(&filter.industry) {
        query = query.filter(dsl::industry.eq(industry));
    }

    query = match filter.sort() {
        Some(CompanySort::Name) => query.order(lower(dsl::name).asc()),
        Some(CompanySort::CreatedAt) => query.order(dsl::created_at.desc()),
        None => query.order(dsl::created_at.asc()),
    };

    query
}
