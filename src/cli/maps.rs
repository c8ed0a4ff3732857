use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use nativebin::diagnostic::Diagnostic;
use nativebin::modulemap::write_module_map;
use nativebin::{BinaryDescriptor, ModuleMap};

use super::{display_path, fail, fail_build, find_binary, load_project};

#[derive(Serialize)]
struct BinaryModuleMaps<'a> {
    binary: &'a str,
    module_maps: &'a [ModuleMap],
}

pub fn cmd_module_maps(input: Option<PathBuf>, binary: Option<&str>, json: bool) {
    let project = load_project(input);
    let selected: Vec<&BinaryDescriptor> = match binary {
        Some(name) => vec![find_binary(&project, name)],
        None => project.binaries().iter().collect(),
    };

    // Independent binaries resolve concurrently; each evaluates once.
    let results: Vec<_> = selected
        .par_iter()
        .map(|b| (b.name(), b.compile_module_maps()))
        .collect();

    let mut report = Vec::new();
    for (name, result) in results {
        match result {
            Ok(maps) => report.push(BinaryModuleMaps {
                binary: name,
                module_maps: maps,
            }),
            Err(err) => fail_build(err),
        }
    }

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => fail(Diagnostic::error(format!("cannot encode JSON: {}", e))),
        }
        return;
    }

    for entry in &report {
        println!("{}:", entry.binary);
        if entry.module_maps.is_empty() {
            println!("  (no module maps)");
        }
        for map in entry.module_maps {
            println!("  module {}", map.module_name);
            for header in &map.public_header_paths {
                println!("    {}", header);
            }
        }
    }
}

pub fn cmd_generate(input: Option<PathBuf>, binary: &str, output: Option<PathBuf>) {
    let project = load_project(input);
    let descriptor = find_binary(&project, binary);
    let maps = descriptor
        .compile_module_maps()
        .unwrap_or_else(|err| fail_build(err));

    let out_dir = output.unwrap_or_else(|| descriptor.module_maps_dir().to_path_buf());

    for map in maps {
        match write_module_map(map, &out_dir) {
            Ok(path) => println!("{}", display_path(&path)),
            Err(e) => fail(Diagnostic::error(format!(
                "cannot write module map for '{}' into '{}': {}",
                map.module_name,
                out_dir.display(),
                e
            ))),
        }
    }
    eprintln!(
        "Wrote {} module map(s) for {} into {}",
        maps.len(),
        descriptor.name(),
        out_dir.display()
    );
}
