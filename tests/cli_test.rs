//! Command-line tests against the built binary.

mod common;

use common::fixtures::{self, HERO_SIZE};
use common::TestWorkspace;
use std::process::{Command, Output};

fn palettemap(ws: &TestWorkspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_palettemap"))
        .args(args)
        .current_dir(ws.root())
        .env_remove("PALETTEMAP_CONFIG")
        .env("RUST_LOG", "palettemap=warn")
        .output()
        .expect("failed to run palettemap")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_status_without_command() {
    let ws = TestWorkspace::new();
    let output = palettemap(&ws, &[]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("PALETTEMAP_CONFIG = (not set)"));
    assert!(text.contains("Configuration: defaults"));
}

#[test]
fn test_map_then_edit_group() {
    let ws = TestWorkspace::new();
    let (w, h) = HERO_SIZE;
    ws.write_image("hero.png", w, h, &fixtures::hero_sprite());

    let output = palettemap(&ws, &["map", "hero.png"]);
    assert!(output.status.success(), "{output:?}");
    common::assert_png_file(&ws.path("hero_PaletteMap.png"));
    common::assert_png_file(&ws.path("hero_PaletteKey.png"));

    let output = palettemap(
        &ws,
        &["group", "hero_PaletteGroup.asset", "add-variant", "--name", "Night"],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Added palette 1"));

    let output = palettemap(
        &ws,
        &["group", "hero_PaletteGroup.asset", "set-color", "1", "0", "#140a05"],
    );
    assert!(output.status.success(), "{output:?}");

    let output = palettemap(&ws, &["group", "hero_PaletteGroup.asset", "show"]);
    let text = stdout(&output);
    assert!(text.contains("[1] Night"));
    assert!(text.contains("#140A05FF"));
}

#[test]
fn test_locked_group_edit_fails() {
    let ws = TestWorkspace::new();
    ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());
    assert!(palettemap(&ws, &["extract", "hero.png"]).status.success());

    let output = palettemap(
        &ws,
        &["group", "hero_PaletteGroup.asset", "remove-slot", "0"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("locked"));
}

#[test]
fn test_invalid_color_is_rejected() {
    let ws = TestWorkspace::new();
    ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());
    assert!(palettemap(&ws, &["extract", "hero.png"]).status.success());

    let output = palettemap(
        &ws,
        &["group", "hero_PaletteGroup.asset", "add-slot", "#zzzzzz"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid color"));
}
