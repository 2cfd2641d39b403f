use std::sync::Arc;

use crm_models::{
    crm::ticket::{NewTicket, Ticket, TicketPatch, TicketPriority, TicketStatus},
    store::ResourceStore,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiResource, cleared, required};
use crate::{prelude::*, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPost {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub contact_or_company: Option<Uuid>,
    pub assigned_user: Option<String>,
    pub category: Option<String>,
}

impl ApiResource for Ticket {
    type Post = TicketPost;

    const NAME: &'static str = "Ticket";
    const KEY: &'static str = "ticket";

    fn store(state: &AppState) -> &Arc<dyn ResourceStore<Self>> {
        &state.tickets
    }

    fn validate(post: TicketPost) -> Result<NewTicket> {
        let (Some(name), Some(description), Some(status), Some(contact_or_company)) = (
            required(post.name),
            required(post.description),
            post.status,
            post.contact_or_company,
        ) else {
            return Err(Error::Validation(String::from(
                "Name, description, status, and contactOrCompany are required.",
            )));
        };
        Ok(NewTicket {
            name,
            description,
            status,
            priority: post.priority.unwrap_or_default(),
            contact_or_company,
            assigned_user: post.assigned_user,
            category: post.category,
        })
    }

    fn validate_patch(patch: &TicketPatch) -> Result<()> {
        if cleared(&[&patch.name, &patch.description]) {
            return Err(Error::Validation(String::from(
                "Name and description cannot be empty.",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_defaults_to_medium() {
        let post = TicketPost {
            name: Some("Printer".into()),
            description: Some("On fire".into()),
            status: Some(TicketStatus::New),
            contact_or_company: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(Ticket::validate(post).unwrap().priority, TicketPriority::Medium);
    }

    #[test]
    fn update_cannot_blank_description() {
        let patch = TicketPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(Ticket::validate_patch(&patch), Err(Error::Validation(_))));
        assert!(Ticket::validate_patch(&TicketPatch::default()).is_ok());
    }
}
