// tests/unit/endpoints.rs
//! Endpoint validation and request shapes.

use crate::common::{api, authenticated_client, client, Reply, ScriptedTransport};
use ghrecon::{AppError, CommitFilter, ParamValue, ValidationError};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;

#[test]
fn authenticated_endpoints_refuse_without_credential() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    assert!(matches!(
        client.get_users_organizations(),
        Err(AppError::AuthenticationRequired {
            endpoint: "get_users_organizations"
        })
    ));
    assert!(matches!(
        client.get_organization("rust-lang"),
        Err(AppError::AuthenticationRequired {
            endpoint: "get_organization"
        })
    ));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn authenticated_endpoints_send_the_credential() {
    let transport = ScriptedTransport::new();
    transport.on("/user/orgs", Reply::json(json!([{"login": "rust-lang"}])));
    transport.on("/orgs/rust-lang", Reply::json(json!({"login": "rust-lang"})));
    let client = authenticated_client(&transport);

    let (orgs, status) = client.get_users_organizations().unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orgs.len(), 1);
    let (org, _) = client.get_organization("rust-lang").unwrap();
    assert_eq!(org.get("login"), Some(&json!("rust-lang")));

    for request in transport.requests() {
        assert_eq!(
            request.credential.as_ref().map(|c| c.as_str()),
            Some("ghp_testtoken")
        );
    }
    assert_eq!(transport.calls(), 2);
}

#[test]
fn bogus_sort_is_rejected_before_any_call() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    let error = client
        .get_users_public_repositories("octocat", None, Some("bogus"), None)
        .unwrap_err();
    match error {
        AppError::InvalidArgument {
            parameter,
            value,
            allowed,
        } => {
            assert_eq!(parameter, "sort");
            assert_eq!(value, "bogus");
            assert_eq!(allowed, &["created", "updated", "pushed", "full_name"]);
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn every_enumerated_parameter_is_validated() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    let invalid = [
        client
            .get_users_public_repositories("octocat", Some("forks"), None, None)
            .map(|_| ()),
        client
            .get_users_public_repositories("octocat", None, None, Some("up"))
            .map(|_| ()),
        client
            .get_organizations_public_repositories("rust-lang", Some("owner"))
            .map(|_| ()),
        client
            .get_repository_contributors("rust-lang", "cargo", Some("yes"))
            .map(|_| ()),
    ];
    for result in invalid {
        assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn valid_parameters_reach_the_first_request() {
    let transport = ScriptedTransport::new();
    transport.on("/users/octocat/repos", Reply::json(json!([])));
    let client = client(&transport);

    let pages = client
        .get_users_public_repositories("octocat", Some("owner"), Some("full_name"), Some("asc"))
        .unwrap();
    assert_eq!(pages.count(), 1);

    let requests = transport.requests();
    assert_eq!(
        requests[0].full_url().as_str(),
        api("/users/octocat/repos?type=owner&sort=full_name&direction=asc&per_page=100")
    );
}

#[test]
fn commit_filters_become_params() {
    let transport = ScriptedTransport::new();
    transport.on("/repos/octocat/hello/commits", Reply::json(json!([])));
    let client = client(&transport);

    let filter = CommitFilter {
        author: Some("octocat".to_string()),
        since: Some("2020-01-01T00:00:00Z".to_string()),
        ..CommitFilter::default()
    };
    client
        .get_repository_commits("octocat", "hello", &filter)
        .unwrap()
        .for_each(drop);

    let request = &transport.requests()[0];
    assert_eq!(
        request.params.get("author"),
        Some(&ParamValue::Text("octocat".to_string()))
    );
    assert_eq!(
        request.params.get("since"),
        Some(&ParamValue::Text("2020-01-01T00:00:00Z".to_string()))
    );
    assert!(request.params.get("sha").is_none());
}

#[test]
fn contributor_stats_in_progress_is_empty() {
    let transport = ScriptedTransport::new();
    transport.on(
        "/repos/rust-lang/cargo/stats/contributors",
        Reply::status(StatusCode::ACCEPTED, json!({})),
    );
    let (stats, status) = client(&transport)
        .get_repository_contributor_stats("rust-lang", "cargo")
        .unwrap();
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(stats.is_empty());
}

#[test]
fn names_stay_inside_their_path_segment() {
    let transport = ScriptedTransport::new();
    transport.on("/users/a%2Fb", Reply::json(json!({"login": "a/b"})));
    let client = client(&transport);

    client.get_user("a/b").unwrap();
    let _ = client.get_user("x?per_page=1#frag");
    let _ = client
        .get_repository_commits("octocat/hello", "world", &CommitFilter::default())
        .unwrap()
        .next();

    let urls: Vec<String> = transport
        .requests()
        .iter()
        .map(|request| request.full_url().to_string())
        .collect();
    assert_eq!(
        urls,
        vec![
            api("/users/a%2Fb"),
            api("/users/x%3Fper_page=1%23frag"),
            api("/repos/octocat%2Fhello/world/commits?per_page=100"),
        ]
    );
}

#[test]
fn dot_segments_are_rejected_before_any_call() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    assert!(matches!(
        client.get_public_repository("..", "orgs"),
        Err(AppError::Validation(ValidationError::InvalidPathSegment(_)))
    ));
    assert!(client.get_organizations_public_members(".").is_err());
    assert!(client.get_user("").is_err());
    assert_eq!(transport.calls(), 0);
}
