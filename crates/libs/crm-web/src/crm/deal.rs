use std::sync::Arc;

use chrono::{DateTime, Utc};
use crm_models::{
    crm::deal::{Deal, DealPatch, DealStage, NewDeal},
    store::ResourceStore,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiResource, cleared, required};
use crate::{prelude::*, state::AppState};

/// Unknown stages and malformed ids are rejected while parsing the body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPost {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub contact_or_company: Option<Uuid>,
    pub stage: Option<DealStage>,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub owner: Option<String>,
}

impl ApiResource for Deal {
    type Post = DealPost;

    const NAME: &'static str = "Deal";
    const KEY: &'static str = "deal";

    fn store(state: &AppState) -> &Arc<dyn ResourceStore<Self>> {
        &state.deals
    }

    fn validate(post: DealPost) -> Result<NewDeal> {
        let (Some(name), Some(value), Some(contact_or_company), Some(stage)) = (
            required(post.name),
            post.value,
            post.contact_or_company,
            post.stage,
        ) else {
            return Err(Error::Validation(String::from(
                "Name, value, contactOrCompany, and stage are required.",
            )));
        };
        check_value(value)?;
        Ok(NewDeal {
            name,
            value,
            contact_or_company,
            stage,
            close_date: post.close_date,
            notes: post.notes,
            owner: post.owner,
        })
    }

    fn validate_patch(patch: &DealPatch) -> Result<()> {
        if cleared(&[&patch.name]) {
            return Err(Error::Validation(String::from("Name cannot be empty.")));
        }
        patch.value.map_or(Ok(()), check_value)
    }
}

fn check_value(value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(Error::Validation(String::from(
            "Value must be a positive number.",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(value: f64) -> DealPost {
        DealPost {
            name: Some("Renewal".into()),
            value: Some(value),
            contact_or_company: Some(Uuid::new_v4()),
            stage: Some(DealStage::Proposal),
            ..Default::default()
        }
    }

    #[test]
    fn value_must_be_positive() {
        assert!(Deal::validate(post(10.5)).is_ok());
        assert!(matches!(Deal::validate(post(0.0)), Err(Error::Validation(_))));
        assert!(matches!(Deal::validate(post(-3.0)), Err(Error::Validation(_))));
    }

    #[test]
    fn update_keeps_value_positive() {
        let patch = |value| DealPatch {
            value: Some(value),
            ..Default::default()
        };
        assert!(Deal::validate_patch(&patch(1.0)).is_ok());
        assert!(matches!(Deal::validate_patch(&patch(-5.0)), Err(Error::Validation(_))));
        assert!(matches!(Deal::validate_patch(&patch(0.0)), Err(Error::Validation(_))));
    }

    #[test]
    fn stage_is_required() {
        let post = DealPost {
            stage: None,
            ..post(10.0)
        };
        let err = Deal::validate(post).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Name, value, contactOrCompany, and stage are required."
        );
    }
}
