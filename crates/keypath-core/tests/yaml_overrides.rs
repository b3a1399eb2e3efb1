// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end: decode YAML, normalize, apply overrides, encode again

use keypath_core::{apply_overrides, get, normalize, parse_path, set, Error, Override};
use serde_json::{json, Value as J};

const VALUES: &str = r#"
image:
  repository: nginx
  tag: "1.25"
service:
  ports:
    - name: http
      port: 80
ingress:
  hosts: []
"#;

#[test]
fn test_override_decoded_document() -> anyhow::Result<()> {
    let doc: serde_yaml::Value = serde_yaml::from_str(VALUES)?;
    let mut tree = normalize(&doc)?;

    let overrides = [
        "image.tag=1.27",
        "service.ports[0].port=8080",
        "service.ports[1].name=https",
        "ingress.hosts[0]=example.com",
        r"annotations.prometheus\.io/scrape=true",
    ]
    .iter()
    .map(|s| s.parse::<Override>())
    .collect::<Result<Vec<_>, _>>()?;
    apply_overrides(&mut tree, &overrides)?;

    assert_eq!(
        J::Object(tree.clone()),
        json!({
            "image": {"repository": "nginx", "tag": "1.27"},
            "service": {"ports": [
                {"name": "http", "port": "8080"},
                {"name": "https"}
            ]},
            "ingress": {"hosts": ["example.com"]},
            "annotations": {"prometheus.io/scrape": "true"}
        })
    );

    let encoded = serde_yaml::to_string(&tree)?;
    let reparsed: serde_yaml::Value = serde_yaml::from_str(&encoded)?;
    assert_eq!(normalize(&reparsed)?, tree);
    Ok(())
}

#[test]
fn test_parsed_key_drives_set() -> anyhow::Result<()> {
    let mut tree = normalize(&serde_yaml::from_str::<serde_yaml::Value>("a: {b: 1}")?)?;
    set(&mut tree, &parse_path(r"a.c\.d"), "x")?;
    assert_eq!(get(&tree, r"a.c\.d"), Some(&json!("x")));
    assert_eq!(get(&tree, "a.b"), Some(&json!(1)));
    Ok(())
}

#[test]
fn test_non_string_key_reports_context() {
    let doc: serde_yaml::Value = serde_yaml::from_str(
        r#"
        ports:
          8080: web
        "#,
    )
    .unwrap();

    let err = normalize(&doc).unwrap_err();
    assert!(matches!(err, Error::KeyType { kind: "int", .. }));
    let msg = err.to_string();
    assert!(msg.contains("value=8080"), "{msg}");
    assert!(msg.contains("map="), "{msg}");
}

#[test]
fn test_descending_through_sequence_is_a_conflict() {
    let mut tree = serde_json::Map::new();
    set(&mut tree, &["a[0]"], "v").unwrap();
    let err = set(&mut tree, &["a", "b"], "w").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"cannot resolve `a`: expected mapping, found ["v"](sequence)"#
    );
}
