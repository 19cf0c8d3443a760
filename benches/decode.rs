// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::{json, Value};
use tessera::format::{decode_slice, decode_value, to_vec_pretty, DecodeOptions};
use tessera::resolve::{Environment, OverrideResolver, Scope};

// Benchmark identity (keep stable):
// - Group names: `format.decode_current`, `format.decode_legacy`, `format.encode`,
//   `resolve.environment_for`
// - Case IDs: `small`, `medium`, `large`

#[derive(Debug, Clone, Copy)]
enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn screens(self) -> usize {
        match self {
            Self::Small => 2,
            Self::Medium => 20,
            Self::Large => 200,
        }
    }
}

const ROWS_PER_SCREEN: usize = 8;

/// One component plus `screens` screens, each holding rows of an instance, a text and a button.
/// Instances come before the component so every link is a forward reference.
fn current_document(case: Case) -> Value {
    let mut nodes = Vec::new();
    for screen in 0..case.screens() {
        let rows = (0..ROWS_PER_SCREEN)
            .map(|row| {
                json!({
                    "__typeName": "Stack", "id": format!("s{screen}-row{row}"), "axis": "horizontal",
                    "spacing": { "literal": 4.0 },
                    "children": [
                        { "__typeName": "ComponentInstance", "id": format!("s{screen}-card{row}"),
                          "value": { "component": "card" },
                          "overrides": {
                              "title": { "text": { "dataPath": format!("items[{row}].title") } },
                              "count": { "number": { "literal": row as f64 } }
                          } },
                        { "__typeName": "Text", "id": format!("s{screen}-label{row}"),
                          "text": { "literal": "Label" }, "color": { "documentColor": "brand" } },
                        { "__typeName": "Button", "id": format!("s{screen}-go{row}"),
                          "actions": [{ "navigate": { "destination": format!("s{}", (screen + 1) % case.screens()) } }] }
                    ]
                })
            })
            .collect::<Vec<_>>();
        nodes.push(json!({
            "__typeName": "Screen", "id": format!("s{screen}"), "title": format!("Screen {screen}"),
            "children": [{ "__typeName": "Stack", "id": format!("s{screen}-body"), "axis": "vertical",
                           "children": rows }]
        }));
    }
    nodes.push(json!({
        "__typeName": "MainComponent", "id": "card", "name": "Card",
        "properties": [
            { "name": "title", "value": { "text": "Untitled" } },
            { "name": "count", "value": { "number": 0.0 } }
        ],
        "children": [{ "__typeName": "Text", "id": "card-title", "text": { "property": "title" } }]
    }));

    json!({
        "metadata": { "documentVersion": 21, "compatibilityVersion": 1 },
        "document": {
            "nodes": nodes,
            "colors": [{ "id": "brand", "color": { "r": 0.2, "g": 0.4, "b": 1.0, "a": 1.0 } }]
        }
    })
}

/// The same tree in the pre-binding shape, so every field goes through an upgrade branch.
fn legacy_document(case: Case) -> Value {
    let mut nodes = Vec::new();
    for screen in 0..case.screens() {
        let rows = (0..ROWS_PER_SCREEN)
            .map(|row| {
                json!({
                    "__typeName": "Stack", "id": format!("s{screen}-row{row}"), "isHorizontal": true,
                    "spacing": 4.0,
                    "children": [
                        { "__typeName": "ComponentInstance", "id": format!("s{screen}-card{row}"),
                          "component": "card", "overrides": { "count": { "number": row as f64 } } },
                        { "__typeName": "Text", "id": format!("s{screen}-label{row}"),
                          "text": "Label", "color": "#3366FF" },
                        { "__typeName": "Button", "id": format!("s{screen}-go{row}"),
                          "action": { "type": "navigate",
                                      "destination": format!("s{}", (screen + 1) % case.screens()) } }
                    ]
                })
            })
            .collect::<Vec<_>>();
        nodes.push(json!({
            "__typeName": "Screen", "id": format!("s{screen}"), "title": format!("Screen {screen}"),
            "children": [{ "__typeName": "Stack", "id": format!("s{screen}-body"), "children": rows }]
        }));
    }
    nodes.push(json!({
        "__typeName": "MainComponent", "id": "card", "name": "Card",
        "properties": { "title": { "text": "Untitled" }, "count": { "number": 0.0 } },
        "children": [{ "__typeName": "Text", "id": "card-title", "text": "Untitled" }]
    }));

    json!({
        "metadata": { "documentVersion": 10, "compatibilityVersion": 1 },
        "document": { "nodes": nodes }
    })
}

fn node_count(case: Case) -> u64 {
    (case.screens() * (2 + ROWS_PER_SCREEN * 4) + 2) as u64
}

fn benches_decode(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("format.decode_current");
        for case in Case::ALL {
            let bytes = serde_json::to_vec(&current_document(case)).expect("serialize fixture");
            group.throughput(Throughput::Elements(node_count(case)));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let decoded =
                        decode_slice(black_box(&bytes), DecodeOptions::default()).expect("decode");
                    black_box(decoded.document.nodes().len())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.decode_legacy");
        for case in Case::ALL {
            let value = legacy_document(case);
            group.throughput(Throughput::Elements(node_count(case)));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let decoded =
                        decode_value(black_box(&value), DecodeOptions::default()).expect("decode");
                    black_box(decoded.report.links_resolved)
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.encode");
        for case in Case::ALL {
            let document = decode_value(&current_document(case), DecodeOptions::default())
                .expect("decode")
                .document;
            group.throughput(Throughput::Elements(node_count(case)));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(to_vec_pretty(black_box(&document)).expect("encode").len()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("resolve.environment_for");
        for case in Case::ALL {
            let document = decode_value(&current_document(case), DecodeOptions::default())
                .expect("decode")
                .document;
            let instances = (0..case.screens())
                .flat_map(|screen| (0..ROWS_PER_SCREEN).map(move |row| format!("s{screen}-card{row}")))
                .filter_map(|id| document.find(&id))
                .collect::<Vec<_>>();
            let data = json!({ "items": (0..ROWS_PER_SCREEN)
                .map(|row| json!({ "title": format!("Item {row}") }))
                .collect::<Vec<_>>() });
            group.throughput(Throughput::Elements(instances.len() as u64));
            group.bench_function(case.id(), |b| {
                let resolver = OverrideResolver::new(&document);
                let env = Environment::new();
                let scope = Scope::new(&env).with_data(&data);
                b.iter(|| {
                    let mut resolved = 0usize;
                    for &instance in &instances {
                        if let Some(expansion) = resolver.environment_for(instance, &scope) {
                            resolved += expansion.environment.len();
                        }
                    }
                    black_box(resolved)
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_decode);
criterion_main!(benches);
