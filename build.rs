/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::process::Command;

use cargo_metadata::{Error, MetadataCommand};
use git2::Repository;

const UNKNOWN: &str = "unknown";

struct GitInfo {
    hash: String,
    short_hash: String,
    datetime: String,
}

fn git_info() -> Option<GitInfo> {
    let repo = Repository::discover(".").ok()?;
    let commit = repo.head().ok()?.peel_to_commit().ok()?;
    let commit_hash = commit.id().to_string();
    let short_hash = commit
        .as_object()
        .short_id()
        .ok()?
        .as_str()
        .map(str::to_ascii_lowercase)?;

    let is_dirty = repo.statuses(None).ok()?.iter().any(|status| {
        let s = status.status();
        !((s == git2::Status::CURRENT) | (s == git2::Status::IGNORED))
    });

    let (dirty_str, short_dirty_str) = match is_dirty {
        true => ("-dirty", "-d"),
        false => ("", ""),
    };

    let datetime = Command::new("git")
        .args(["log", "-1", "--format=%ai", &commit_hash])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_owned())
        .unwrap_or_else(|_| UNKNOWN.to_owned());

    Some(GitInfo {
        hash: format!("{}{}", commit_hash, dirty_str),
        short_hash: format!("{}{}", short_hash, short_dirty_str),
        datetime,
    })
}

fn main() -> Result<(), Error> {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Get project name and version
    let metadata = MetadataCommand::new().no_deps().exec()?;
    let main_package = metadata
        .packages
        .iter()
        .find(|package| package.name == env!("CARGO_PKG_NAME"));

    match main_package {
        Some(package) => {
            println!("cargo:rustc-env=PROJECT_NAME={}", package.name);
            println!("cargo:rustc-env=PROJECT_VERSION={}", package.version);
        }
        None => {
            println!("cargo:rustc-env=PROJECT_NAME={}", UNKNOWN);
            println!("cargo:rustc-env=PROJECT_VERSION=?.?.?");
        }
    }

    // Source tarball without .git still builds
    let git = git_info().unwrap_or(GitInfo {
        hash: UNKNOWN.to_owned(),
        short_hash: UNKNOWN.to_owned(),
        datetime: UNKNOWN.to_owned(),
    });

    println!("cargo:rustc-env=GIT_COMMIT_HASH={}", git.hash);
    println!("cargo:rustc-env=GIT_COMMIT_SHORT_HASH={}", git.short_hash);
    println!("cargo:rustc-env=GIT_COMMIT_DATETIME={}", git.datetime);

    let hw_feature: Vec<String> = std::env::vars()
        .filter(|(key, value)| key.starts_with("CARGO_FEATURE_HW_") && value == "1")
        .map(|(key, _)| key)
        .collect();

    let hw_model = match hw_feature.as_slice() {
        [] => panic!("There's no specified hardware target"),
        [single] => single
            .trim_start_matches("CARGO_FEATURE_HW_")
            .replace('_', "-"),
        _ => panic!("Cannot specify multiple hardware"),
    };

    println!("cargo:rustc-env=HW_MODEL={}", hw_model);

    Ok(())
}
