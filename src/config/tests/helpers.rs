//! Shared test helpers for configuration tests.

use std::ffi::OsString;

use ortho_config::{MergeComposer, OrthoConfig};
use serde_json::Value;

use crate::LedgerConfig;
use crate::config::{LEGACY_API_KEY_ENV, LEGACY_API_URL_ENV};

/// Environment variables that would otherwise leak into argument parsing.
const ISOLATED_VARS: [&str; 7] = [
    "TECHLEDGER_TEMPLATE",
    "TECHLEDGER_FILTER",
    "TECHLEDGER_PAGE",
    "TECHLEDGER_PAGE_SIZE",
    "TECHLEDGER_SLUG",
    LEGACY_API_URL_ENV,
    LEGACY_API_KEY_ENV,
];

/// Pushes `value` onto the composer as the named layer.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Merges `(layer_type, value)` pairs into a [`LedgerConfig`].
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> LedgerConfig {
    let mut composer = MergeComposer::new();
    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }
    LedgerConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Parses `techledger <cli_args>` with home, XDG, and ledger variables
/// isolated so no local `.techledger.toml` or shell export interferes.
pub fn load_from_args(cli_args: &[&str]) -> LedgerConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut overrides: Vec<(&str, Option<&str>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, None))
        .collect();
    overrides.push(("HOME", Some(home.as_str())));
    overrides.push(("XDG_CONFIG_HOME", Some(home.as_str())));
    let _guard = env_lock::lock_env(overrides);

    let args = std::iter::once("techledger")
        .chain(cli_args.iter().copied())
        .map(OsString::from);
    LedgerConfig::load_from_iter(args).expect("config should load")
}
