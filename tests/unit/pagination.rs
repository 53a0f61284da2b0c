// tests/unit/pagination.rs
//! Lazy pagination: pull-driven calls, failure placement, clean stops.

use crate::common::{api, client, Reply, ScriptedTransport};
use ghrecon::{AppError, Method, Params};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;

fn three_pages(transport: &ScriptedTransport) {
    transport.on(
        "/orgs/rust-lang/public_members",
        Reply::json(json!([{"login": "a"}, {"login": "b"}]))
            .with_next(&api("/organizations/1/public_members?page=2")),
    );
    transport.on(
        &api("/organizations/1/public_members?page=2"),
        Reply::json(json!([{"login": "c"}]))
            .with_next(&api("/organizations/1/public_members?page=3")),
    );
    transport.on(
        &api("/organizations/1/public_members?page=3"),
        Reply::json(json!([{"login": "d"}])),
    );
}

fn logins(page: &ghrecon::Page) -> Vec<String> {
    page.records
        .iter()
        .map(|record| record["login"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn three_pages_are_pulled_one_call_at_a_time() {
    let transport = ScriptedTransport::new();
    three_pages(&transport);
    let client = client(&transport);

    let mut pages = client.get_organizations_public_members("rust-lang").unwrap();
    assert_eq!(transport.calls(), 0);

    let first = pages.next().unwrap().unwrap();
    assert_eq!(transport.calls(), 1);
    assert_eq!(logins(&first), vec!["a", "b"]);
    assert_eq!(first.status, StatusCode::OK);

    let second = pages.next().unwrap().unwrap();
    assert_eq!(transport.calls(), 2);
    assert_eq!(logins(&second), vec!["c"]);

    let third = pages.next().unwrap().unwrap();
    assert_eq!(transport.calls(), 3);
    assert_eq!(logins(&third), vec!["d"]);

    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
    assert_eq!(transport.calls(), 3);
}

#[test]
fn continuation_uses_next_link_verbatim() {
    let transport = ScriptedTransport::new();
    three_pages(&transport);
    let client = client(&transport);

    let count = client
        .get_organizations_public_members("rust-lang")
        .unwrap()
        .count();
    assert_eq!(count, 3);

    let urls: Vec<String> = transport
        .requests()
        .iter()
        .map(|request| request.full_url().to_string())
        .collect();
    assert_eq!(
        urls,
        vec![
            api("/orgs/rust-lang/public_members?per_page=100"),
            api("/organizations/1/public_members?page=2"),
            api("/organizations/1/public_members?page=3"),
        ]
    );
}

#[test]
fn failure_on_second_page_follows_the_first() {
    let transport = ScriptedTransport::new();
    transport.on(
        "/repos/rust-lang/cargo/contributors",
        Reply::json(json!([{"login": "a", "contributions": 10}]))
            .with_next(&api("/repositories/2/contributors?page=2")),
    );
    transport.on(
        &api("/repositories/2/contributors?page=2"),
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "Server Error"})),
    );
    let client = client(&transport);

    let results: Vec<_> = client
        .get_repository_contributors("rust-lang", "cargo", None)
        .unwrap()
        .collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(AppError::ApiCall(error)) => {
            assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected an API failure, got {other:?}"),
    }
    assert_eq!(transport.calls(), 2);
}

#[test]
fn failure_exhausts_the_sequence() {
    let transport = ScriptedTransport::new();
    transport.on(
        "/orgs/ghost/public_members",
        Reply::status(StatusCode::NOT_FOUND, json!({"message": "Not Found"})),
    );
    let client = client(&transport);

    let mut pages = client.get_organizations_public_members("ghost").unwrap();
    assert!(pages.next().unwrap().unwrap_err().is_not_found());
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
    assert_eq!(transport.calls(), 1);
}

#[test]
fn no_content_continuation_ends_cleanly() {
    let transport = ScriptedTransport::new();
    transport.on(
        "/users/octocat/orgs",
        Reply::json(json!([{"login": "github"}])).with_next(&api("/user/9/orgs?page=2")),
    );
    transport.on(&api("/user/9/orgs?page=2"), Reply::empty(StatusCode::NO_CONTENT));
    let client = client(&transport);

    let results: Vec<_> = client
        .get_users_public_organizations("octocat")
        .unwrap()
        .collect();
    assert_eq!(results.len(), 1);
    assert_eq!(logins(results[0].as_ref().unwrap()), vec!["github"]);
    assert_eq!(transport.calls(), 2);
}

#[test]
fn non_array_page_is_malformed() {
    let transport = ScriptedTransport::new();
    transport.on("/orgs/rust-lang/repos", Reply::json(json!({"message": "odd"})));
    let client = client(&transport);

    let mut pages = client
        .paginated_call(Method::Get, &["orgs", "rust-lang", "repos"], Params::new())
        .unwrap();
    assert!(matches!(
        pages.next(),
        Some(Err(AppError::MalformedResponse(_)))
    ));
    assert!(pages.next().is_none());
}

#[test]
fn caller_page_size_is_not_overridden() {
    let transport = ScriptedTransport::new();
    transport.on("/orgs/rust-lang/repos", Reply::json(json!([])));
    let client = client(&transport);

    let mut params = Params::new();
    params.insert("per_page".to_string(), 10u32.into());
    client
        .paginated_call(Method::Get, &["orgs", "rust-lang", "repos"], params)
        .unwrap()
        .for_each(drop);
    assert_eq!(
        transport.requests()[0].full_url().as_str(),
        api("/orgs/rust-lang/repos?per_page=10")
    );
}
