// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tessera CLI entrypoint.
//!
//! Loads a document file, prints a summary of what it contains and, with `--rewrite`, stores it
//! back in the current shape. Set `RUST_LOG` (e.g. `RUST_LOG=tessera=debug`) to see upgrade
//! details.

use std::error::Error;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

use tessera::format::DecodeOptions;
use tessera::model::{Document, CURRENT_DOCUMENT_VERSION};
use tessera::resolve::InMemoryAssets;
use tessera::store::{DocumentFile, WriteDurability};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <document.json> [--strict] [--assets <dir>] [--rewrite] [--durable-writes]\n\n--strict fails on node types this build does not know instead of skipping them.\n--assets lists images and fonts the document uses that <dir> does not provide\n(file stem = image name or font family).\n--rewrite saves the document back in the current format.\n--durable-writes syncs the rewritten file to stable storage where supported."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    path: Option<String>,
    strict: bool,
    assets_dir: Option<String>,
    rewrite: bool,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => {
                if options.strict {
                    return Err(());
                }
                options.strict = true;
            }
            "--assets" => {
                if options.assets_dir.is_some() {
                    return Err(());
                }
                options.assets_dir = Some(args.next().ok_or(())?);
            }
            "--rewrite" => {
                if options.rewrite {
                    return Err(());
                }
                options.rewrite = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.path.is_some() {
                    return Err(());
                }
                options.path = Some(arg);
            }
        }
    }

    if options.path.is_none() {
        return Err(());
    }

    if options.durable_writes && !options.rewrite {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_assets(dir: &Path) -> std::io::Result<InMemoryAssets> {
    let mut assets = InMemoryAssets::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let is_font = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        let bytes = fs::read(&path)?;
        assets = if is_font {
            assets.with_font(stem, bytes)
        } else {
            assets.with_image(stem, bytes)
        };
    }
    Ok(assets)
}

fn node_counts(document: &Document) -> IndexMap<&'static str, usize> {
    let mut counts = IndexMap::new();
    for (_, node) in document.nodes().iter() {
        *counts.entry(node.kind().type_name()).or_insert(0) += 1;
    }
    counts.sort_keys();
    counts
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tessera".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        init_tracing();

        let path = options.path.unwrap_or_default();
        let mut file = DocumentFile::new(&path).with_decode_options(DecodeOptions {
            strict_unknown_variants: options.strict,
        });
        if options.durable_writes {
            file = file.with_durability(WriteDurability::Durable);
        }

        let decoded = file.load()?;
        let document = &decoded.document;
        let report = &decoded.report;

        println!("{path}");
        println!(
            "  format version {} (compatibility {}){}",
            report.source_version,
            document.metadata().compatibility_version,
            if report.was_upgraded() { ", upgraded on load" } else { "" }
        );
        println!(
            "  {} nodes, {} roots, {} colors, {} gradients, {} references resolved",
            document.nodes().len(),
            document.roots().len(),
            document.colors().len(),
            document.gradients().len(),
            report.links_resolved
        );
        for (type_name, count) in node_counts(document) {
            println!("    {type_name}: {count}");
        }

        if !report.unknown_variants.is_empty() {
            println!("  skipped {} unknown node(s):", report.unknown_variants.len());
            for unknown in &report.unknown_variants {
                let id = unknown.id.as_deref().unwrap_or("<no id>");
                match &unknown.parent {
                    Some(parent) => println!("    {} {id} (in {parent})", unknown.tag),
                    None => println!("    {} {id} (root)", unknown.tag),
                }
            }
        }

        let used = document.referenced_components(document.roots());
        if !used.is_empty() {
            let names = used
                .iter()
                .filter_map(|&key| document.node(key))
                .map(|node| node.name().map_or_else(|| node.id().to_string(), str::to_owned))
                .collect::<Vec<_>>();
            println!("  components used: {}", names.join(", "));
        }

        if let Some(dir) = options.assets_dir.as_deref() {
            let assets = load_assets(Path::new(dir))?;
            let missing = document.missing_assets(&assets);
            if missing.is_empty() {
                println!("  all assets available in {dir}");
            } else {
                for image in &missing.images {
                    println!("  missing image: {}", image.as_str());
                }
                for font in &missing.fonts {
                    println!("  missing font: {font}");
                }
            }
        }

        if options.rewrite {
            file.save(document)?;
            println!("  rewrote {path} as format version {CURRENT_DOCUMENT_VERSION}");
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("tessera: {err}");
        std::process::exit(1);
    }
}
