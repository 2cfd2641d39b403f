use std::sync::Arc;

use crm_models::{
    crm::company::{Company, CompanyPatch, NewCompany},
    store::ResourceStore,
};
use serde::Deserialize;

use super::{ApiResource, cleared, required};
use crate::{prelude::*, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPost {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

impl ApiResource for Company {
    type Post = CompanyPost;

    const NAME: &'static str = "Company";
    const KEY: &'static str = "company";

    fn store(state: &AppState) -> &Arc<dyn ResourceStore<Self>> {
        &state.companies
    }

    fn validate(post: CompanyPost) -> Result<NewCompany> {
        let (Some(name), Some(phone), Some(industry)) = (
            required(post.name),
            required(post.phone),
            required(post.industry),
        ) else {
            return Err(Error::Validation(String::from(
                "Name, phone, and industry are required.",
            )));
        };
        Ok(NewCompany {
            name,
            phone,
            industry,
            website: post.website,
            address: post.address,
            country: post.country,
            city: post.city,
            notes: post.notes,
        })
    }

    fn validate_patch(patch: &CompanyPatch) -> Result<()> {
        if cleared(&[&patch.name, &patch.phone, &patch.industry]) {
            return Err(Error::Validation(String::from(
                "Name, phone, and industry cannot be empty.",
            )));
        }
        Ok(())
    }
}
