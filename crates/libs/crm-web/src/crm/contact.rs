use std::sync::Arc;

use crm_models::{
    crm::contact::{Contact, ContactPatch, NewContact},
    store::ResourceStore,
};
use serde::Deserialize;

use super::{ApiResource, cleared, required};
use crate::{prelude::*, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPost {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl ApiResource for Contact {
    type Post = ContactPost;

    const NAME: &'static str = "Contact";
    const KEY: &'static str = "contact";

    fn store(state: &AppState) -> &Arc<dyn ResourceStore<Self>> {
        &state.contacts
    }

    fn validate(post: ContactPost) -> Result<NewContact> {
        let (Some(name), Some(email), Some(phone)) = (
            required(post.name),
            required(post.email),
            required(post.phone),
        ) else {
            return Err(Error::Validation(String::from(
                "Name, email, and phone are required.",
            )));
        };
        Ok(NewContact {
            name,
            email,
            phone,
            company: post.company,
            address: post.address,
            position: post.position,
            status: post.status,
            notes: post.notes,
        })
    }

    fn validate_patch(patch: &ContactPatch) -> Result<()> {
        if cleared(&[&patch.name, &patch.email, &patch.phone]) {
            return Err(Error::Validation(String::from(
                "Name, email, and phone cannot be empty.",
            )));
        }
        Ok(())
    }
}
