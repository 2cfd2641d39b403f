use serde_json::json;
use uuid::Uuid;

use common::{register_and_login, test_context::TestContext};

mod common;

#[tokio::test]
async fn resources_require_authentication() {
    let ctx = TestContext::start().await;
    for endpoint in ["companies", "contacts", "deals", "tickets"] {
        let (status, _) = ctx.api.get(endpoint, None).await;
        assert_eq!(status, 401, "{endpoint}");
    }
}

#[tokio::test]
async fn company_crud() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());

    let (status, body) = api
        .post(
            "companies",
            token,
            &json!({ "name": "Acme", "phone": "0123", "industry": "Retail", "country": "VN" }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Company created successfully");
    assert_eq!(body["company"]["name"], "Acme");
    let id = body["company"]["id"].as_str().unwrap().to_string();

    let (status, body) = api.get(&format!("companies/{id}"), token).await;
    assert_eq!(status, 200);
    assert_eq!(body["country"], "VN");
    assert!(body.get("createdAt").is_some());

    let (status, body) = api
        .put(
            &format!("companies/{id}"),
            token,
            &json!({ "city": "Hanoi", "id": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Company updated successfully");
    assert_eq!(body["company"]["city"], "Hanoi");
    assert_eq!(body["company"]["id"], id.as_str());

    let (status, body) = api.delete(&format!("companies/{id}"), token).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Company deleted successfully");

    let (status, body) = api.get(&format!("companies/{id}"), token).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["message"], "Company not found");

    let (status, _) = api
        .put(&format!("companies/{id}"), token, &json!({ "city": "Hue" }))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());

    let (status, body) = api
        .post("companies", token, &json!({ "name": "Acme", "phone": "0123" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"]["message"],
        "Name, phone, and industry are required."
    );

    let (status, body) = api
        .post("contacts", token, &json!({ "name": "Bob", "email": "" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Name, email, and phone are required.");

    let (status, _) = api.get("companies/not-a-uuid", token).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn company_list_filters_and_sorts() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());

    for (name, country) in [("zeta", "VN"), ("Alpha", "US"), ("acme", "VN")] {
        let (status, _) = api
            .post(
                "companies",
                token,
                &json!({ "name": name, "phone": "1", "industry": "Retail", "country": country }),
            )
            .await;
        assert_eq!(status, 201);
    }

    let names = |body: &serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = api.get("companies?sortBy=name", token).await;
    assert_eq!(names(&body), ["acme", "Alpha", "zeta"]);

    let (_, body) = api.get("companies?country=VN", token).await;
    assert_eq!(names(&body), ["zeta", "acme"]);

    let (_, body) = api.get("companies?search=ALP", token).await;
    assert_eq!(names(&body), ["Alpha"]);
}

#[tokio::test]
async fn deal_validation() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());
    let target = Uuid::new_v4();

    let (status, body) = api
        .post(
            "deals",
            token,
            &json!({ "name": "Renewal", "value": 500.0, "contactOrCompany": target, "stage": "Closed Won" }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["deal"]["stage"], "Closed Won");
    let id = body["deal"]["id"].as_str().unwrap().to_string();

    let (status, _) = api
        .post(
            "deals",
            token,
            &json!({ "name": "Bad", "value": 1, "contactOrCompany": target, "stage": "Won" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = api
        .post(
            "deals",
            token,
            &json!({ "name": "Free", "value": 0, "contactOrCompany": target, "stage": "Proposal" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = api
        .post(
            "deals",
            token,
            &json!({ "name": "Bad id", "value": 1, "contactOrCompany": "abc", "stage": "Proposal" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = api
        .put(&format!("deals/{id}"), token, &json!({ "stage": "Lost" }))
        .await;
    assert_eq!(status, 400);

    let (status, body) = api
        .put(&format!("deals/{id}"), token, &json!({ "stage": "Negotiation" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["deal"]["stage"], "Negotiation");

    let (_, body) = api.get("deals?stage=Negotiation", token).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn updates_keep_required_fields_valid() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());

    let (_, body) = api
        .post(
            "deals",
            token,
            &json!({ "name": "Renewal", "value": 500.0, "contactOrCompany": Uuid::new_v4(), "stage": "Proposal" }),
        )
        .await;
    let deal = format!("deals/{}", body["deal"]["id"].as_str().unwrap());

    let (status, body) = api.put(&deal, token, &json!({ "value": -5 })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Value must be a positive number.");

    let (status, _) = api.put(&deal, token, &json!({ "name": "" })).await;
    assert_eq!(status, 400);

    let (_, body) = api.get(&deal, token).await;
    assert_eq!(body["name"], "Renewal");
    assert_eq!(body["value"], 500.0);

    let (_, body) = api
        .post(
            "companies",
            token,
            &json!({ "name": "Acme", "phone": "0123", "industry": "Retail" }),
        )
        .await;
    let company = format!("companies/{}", body["company"]["id"].as_str().unwrap());

    let (status, body) = api.put(&company, token, &json!({ "industry": "" })).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"]["message"],
        "Name, phone, and industry cannot be empty."
    );

    let (status, _) = api.put(&company, token, &json!({ "notes": "" })).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn ticket_defaults_and_filters() {
    let ctx = TestContext::start().await;
    let api = &ctx.api;
    let token = register_and_login(api, "a@x.com", "pw1").await;
    let token = Some(token.as_str());
    let target = Uuid::new_v4();

    let (status, body) = api
        .post(
            "tickets",
            token,
            &json!({
                "name": "Printer",
                "description": "On fire",
                "status": "New",
                "contactOrCompany": target,
                "assignedUser": "a@x.com",
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["ticket"]["priority"], "Medium");

    let (status, body) = api
        .post(
            "tickets",
            token,
            &json!({ "name": "Printer", "status": "New", "contactOrCompany": target }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"]["message"],
        "Name, description, status, and contactOrCompany are required."
    );

    let (_, body) = api.get("tickets?assignedUser=a@x.com", token).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = api.get("tickets?priority=High", token).await;
    assert!(body.as_array().unwrap().is_empty());
}
