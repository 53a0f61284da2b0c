// tests/unit/normalize.rs
//! Normalizer field order and strictness across every record kind.

use ghrecon::{normalize, normalize_pages, AppError, Page, RawRecord, RecordKind};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

/// A raw record holding every declared path of `kind`, inserted in reverse
/// declaration order so raw key order never matches output order.
fn full_raw(kind: RecordKind) -> RawRecord {
    let mut raw = Map::new();
    for (index, (path, _)) in kind.fields().iter().enumerate().rev() {
        let segments: Vec<&str> = path.split('.').collect();
        let leaf = json!(format!("value-{}", index));
        insert_path(&mut raw, &segments, leaf);
    }
    raw
}

fn insert_path(map: &mut Map<String, Value>, segments: &[&str], leaf: Value) {
    match segments {
        [last] => {
            map.insert(last.to_string(), leaf);
        }
        [first, rest @ ..] => {
            let child = map
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = child {
                insert_path(child, rest, leaf);
            }
        }
        [] => {}
    }
}

#[test]
fn output_order_matches_declared_order_for_every_kind() {
    for kind in RecordKind::ALL {
        let record = normalize(kind, &full_raw(kind)).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        let declared: Vec<&str> = kind.field_names().collect();
        assert_eq!(keys, declared, "key order for {}", kind.name());
    }
}

#[test]
fn shuffled_raw_keys_do_not_change_output() {
    let forward = json!({
        "login": "octocat",
        "site_admin": false,
        "html_url": "https://github.com/octocat",
    });
    let backward = json!({
        "html_url": "https://github.com/octocat",
        "site_admin": false,
        "login": "octocat",
    });
    let a = normalize(RecordKind::OrganizationMember, forward.as_object().unwrap()).unwrap();
    let b = normalize(RecordKind::OrganizationMember, backward.as_object().unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        r#"{"Username":"octocat","Site Administrator":false,"Github URL":"https://github.com/octocat"}"#
    );
}

#[test]
fn extra_raw_fields_are_ignored() {
    let raw = json!({"login": "rust-lang", "id": 5430905, "avatar_url": "x"});
    let record = normalize(RecordKind::UserOrganization, raw.as_object().unwrap()).unwrap();
    assert_eq!(record.len(), 1);
    assert_eq!(record.text("Organization"), "rust-lang");
}

#[test]
fn every_missing_field_is_a_schema_mismatch() {
    for kind in RecordKind::ALL {
        for (path, _) in kind.fields() {
            let mut raw = full_raw(kind);
            let top = path.split('.').next().unwrap();
            if top == *path {
                raw.remove(top);
            } else {
                // Drop the leaf, keep its parents.
                let segments: Vec<&str> = path.split('.').collect();
                let mut cursor = raw.get_mut(segments[0]).unwrap();
                for segment in &segments[1..segments.len() - 1] {
                    cursor = cursor.get_mut(*segment).unwrap();
                }
                cursor
                    .as_object_mut()
                    .unwrap()
                    .remove(*segments.last().unwrap());
            }
            let error = normalize(kind, &raw).unwrap_err();
            match error {
                AppError::SchemaMismatch { record, field, .. } => {
                    assert_eq!(record, kind.name());
                    assert_eq!(field, *path);
                }
                other => panic!("expected SchemaMismatch for {path}, got {other:?}"),
            }
        }
    }
}

#[test]
fn null_values_are_kept_not_dropped() {
    let raw = json!({
        "name": "ghrecon",
        "description": null,
        "html_url": "https://github.com/o/ghrecon",
        "clone_url": "https://github.com/o/ghrecon.git",
    });
    let record = normalize(RecordKind::UserRepository, raw.as_object().unwrap()).unwrap();
    assert_eq!(record.len(), 4);
    assert!(record.get("Description").unwrap().is_null());
}

#[test]
fn pages_flatten_in_platform_order() {
    let page = |logins: &[&str]| -> Result<Page, AppError> {
        Ok(Page {
            records: logins
                .iter()
                .map(|login| {
                    json!({"login": login, "contributions": 1})
                        .as_object()
                        .unwrap()
                        .clone()
                })
                .collect(),
            status: StatusCode::OK,
        })
    };
    let records = normalize_pages(
        RecordKind::Contributor,
        vec![page(&["a", "b"]), page(&[]), page(&["c"])],
    )
    .unwrap();
    let logins: Vec<String> = records.iter().map(|r| r.text("Username")).collect();
    assert_eq!(logins, vec!["a", "b", "c"]);
}

#[test]
fn page_failure_stops_flattening() {
    let pages: Vec<Result<Page, AppError>> = vec![
        Ok(Page {
            records: vec![json!({"login": "a", "contributions": 1})
                .as_object()
                .unwrap()
                .clone()],
            status: StatusCode::OK,
        }),
        Err(AppError::MalformedResponse("boom".to_string())),
    ];
    assert!(matches!(
        normalize_pages(RecordKind::Contributor, pages),
        Err(AppError::MalformedResponse(_))
    ));
}
