// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};
use serde_json::json;

use super::{discard_temp, DocumentFile, StoreError, WriteDurability};
use crate::format::{DecodeError, DecodeOptions};
use crate::model::{fixtures, CURRENT_DOCUMENT_VERSION};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("tessera-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> Vec<String> {
        let mut names = fs::read_dir(&self.path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

struct DocumentFileTestCtx {
    tmp: TempDir,
}

impl DocumentFileTestCtx {
    fn file(&self, name: &str) -> DocumentFile {
        DocumentFile::new(self.tmp.path().join(name))
    }

    fn write_json(&self, name: &str, value: &serde_json::Value) -> DocumentFile {
        let file = self.file(name);
        fs::write(file.path(), serde_json::to_vec_pretty(value).unwrap()).unwrap();
        file
    }
}

#[fixture]
fn ctx() -> DocumentFileTestCtx {
    DocumentFileTestCtx {
        tmp: TempDir::new("document-file"),
    }
}

fn unknown_tag_document() -> serde_json::Value {
    json!({
        "metadata": { "documentVersion": 21, "compatibilityVersion": 1 },
        "document": {
            "nodes": [
                { "__typeName": "Text", "id": "kept", "text": { "literal": "hi" } },
                { "__typeName": "Carousel", "id": "future" }
            ]
        }
    })
}

#[rstest]
#[case::best_effort(WriteDurability::BestEffort)]
#[case::durable(WriteDurability::Durable)]
fn save_then_load_preserves_structure(ctx: DocumentFileTestCtx, #[case] durability: WriteDurability) {
    let doc = fixtures::card_screen();
    let file = ctx.file("card.json").with_durability(durability);

    file.save(&doc).unwrap();
    let loaded = file.load().unwrap();

    assert!(loaded.document.structurally_eq(&doc));
    assert_eq!(loaded.report.source_version, CURRENT_DOCUMENT_VERSION);
    assert!(!loaded.report.was_upgraded());
    assert!(loaded.report.unknown_variants.is_empty());
}

#[rstest]
fn save_replaces_existing_contents_without_leaving_temp_files(ctx: DocumentFileTestCtx) {
    let file = ctx.file("card.json");
    fs::write(file.path(), b"stale").unwrap();

    file.save(&fixtures::card_screen()).unwrap();

    assert_eq!(ctx.tmp.entries(), ["card.json"]);
    let bytes = fs::read(file.path()).unwrap();
    assert!(bytes.ends_with(b"\n"));
    assert!(file.load().is_ok());
}

#[rstest]
fn load_reports_missing_files_as_io(ctx: DocumentFileTestCtx) {
    let err = ctx.file("missing.json").load().unwrap_err();
    match err {
        StoreError::Io { path, source } => {
            assert!(path.ends_with("missing.json"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[rstest]
fn load_reports_invalid_json_as_decode(ctx: DocumentFileTestCtx) {
    let file = ctx.file("broken.json");
    fs::write(file.path(), b"{ \"metadata\": ").unwrap();

    let err = file.load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Decode {
            source: DecodeError::Json(_),
            ..
        }
    ));
}

#[rstest]
fn decode_options_are_applied_on_load(ctx: DocumentFileTestCtx) {
    let file = ctx.write_json("future.json", &unknown_tag_document());

    let lenient = file.load().unwrap();
    assert_eq!(lenient.report.unknown_variants.len(), 1);
    assert!(lenient.document.find("kept").is_some());

    let strict = file.clone().with_decode_options(DecodeOptions {
        strict_unknown_variants: true,
    });
    assert!(matches!(
        strict.load().unwrap_err(),
        StoreError::Decode {
            source: DecodeError::MalformedValue { .. },
            ..
        }
    ));
}

#[rstest]
fn rewriting_a_legacy_file_stores_the_current_shape(ctx: DocumentFileTestCtx) {
    let legacy = json!({
        "metadata": { "documentVersion": 10, "compatibilityVersion": 1 },
        "document": {
            "nodes": [{
                "__typeName": "Stack", "id": "root", "isHorizontal": false, "spacing": 4,
                "children": [{ "__typeName": "Text", "id": "label", "text": "Hello" }]
            }]
        }
    });
    let file = ctx.write_json("legacy.json", &legacy);

    let first = file.load().unwrap();
    assert!(first.report.was_upgraded());
    file.save(&first.document).unwrap();

    let second = file.load().unwrap();
    assert!(!second.report.was_upgraded());
    assert!(second.document.structurally_eq(&first.document));

    let stored: serde_json::Value = serde_json::from_slice(&fs::read(file.path()).unwrap()).unwrap();
    assert_eq!(stored["metadata"]["documentVersion"], json!(CURRENT_DOCUMENT_VERSION));
    assert_eq!(stored["document"]["nodes"][0]["axis"], json!("vertical"));
}

#[rstest]
fn failed_temp_writes_remove_the_temp_file(ctx: DocumentFileTestCtx) {
    let tmp_path = ctx.tmp.path().join(".tessera.tmp.card.json.1.2");
    fs::write(&tmp_path, b"partial").unwrap();

    let err = discard_temp(
        tmp_path.clone(),
        std::io::Error::new(std::io::ErrorKind::Other, "sync failed"),
    );

    match err {
        StoreError::Io { path, source } => {
            assert_eq!(path, tmp_path);
            assert_eq!(source.kind(), std::io::ErrorKind::Other);
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(ctx.tmp.entries().is_empty());
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_write_through_symlinks(ctx: DocumentFileTestCtx) {
    let target = ctx.tmp.path().join("target.json");
    fs::write(&target, b"original").unwrap();
    let link = ctx.tmp.path().join("link.json");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let err = DocumentFile::new(&link).save(&fixtures::card_screen()).unwrap_err();
    assert!(matches!(err, StoreError::SymlinkRefused { .. }));
    assert_eq!(fs::read(&target).unwrap(), b"original");
}
