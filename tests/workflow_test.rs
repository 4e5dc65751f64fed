//! End-to-end workflow tests: extract, recolor, redesign, remap.

mod common;

use common::fixtures::{self, colors, HERO_SIZE};
use common::TestWorkspace;
use palette_engine::{Color, PaletteError, PLACEHOLDER};
use palettemap::error::ArtifactError;
use palettemap::models::AppConfig;
use pretty_assertions::assert_eq;

#[test]
fn test_map_without_group_writes_all_artifacts() {
    let mut ws = TestWorkspace::new();
    let (w, h) = HERO_SIZE;
    let source = ws.write_image("hero.png", w, h, &fixtures::hero_sprite());

    let result = ws.pipeline.map(&source, None, &mut ws.rng).unwrap();

    assert!(result.sync.is_none());
    assert_eq!(
        result.group.base().colors(),
        &[colors::BOOTS, Color::CLEAR, colors::SHIRT, colors::SKIN]
    );
    assert_eq!(result.artifacts.group, Some(ws.path("hero_PaletteGroup.asset")));
    assert_eq!(result.artifacts.key, Some(ws.path("hero_PaletteKey.png")));
    assert_eq!(result.artifacts.map, Some(ws.path("hero_PaletteMap.png")));

    let alpha = common::read_index_alpha(&ws.path("hero_PaletteMap.png"));
    assert_eq!(alpha, vec![0, 85, 0, 170, 170, 170, 85, 252, 85]);
}

#[test]
fn test_redesign_sync_keeps_recolors() {
    let mut ws = TestWorkspace::new();
    let (w, h) = HERO_SIZE;
    let source = ws.write_image("hero.png", w, h, &fixtures::hero_sprite());
    let group_path = ws
        .pipeline
        .extract(&source, &mut ws.rng)
        .unwrap()
        .artifacts
        .group
        .unwrap();

    // Paint a night variant
    let night_boots = Color::from_u8(20, 10, 5, 255);
    let night_skin = Color::from_u8(120, 100, 80, 255);
    ws.pipeline
        .edit_group(&group_path, |group| {
            let v = group.add_variant();
            group.set_color(v, 0, night_boots)?;
            group.set_color(v, 3, night_skin)?;
            Ok(())
        })
        .unwrap();

    // Redesign: shirt replaced by belt
    ws.write_image("hero.png", w, h, &fixtures::hero_sprite_with_belt());
    let result = ws.pipeline.map(&source, Some(&group_path), &mut ws.rng).unwrap();

    let report = result.sync.unwrap();
    assert_eq!(report.added, vec![colors::BELT]);
    assert_eq!(report.removed, vec![colors::SHIRT]);

    let group = ws.pipeline.load_group(&group_path).unwrap();
    assert_eq!(
        group.base().colors(),
        &[colors::BOOTS, Color::CLEAR, colors::SKIN, colors::BELT]
    );
    assert_eq!(
        group.palette(1).unwrap().colors(),
        &[night_boots, Color::CLEAR, night_skin, PLACEHOLDER]
    );
    assert!(group.is_locked(), "sync must restore the group lock");

    let alpha = common::read_index_alpha(&ws.path("hero_PaletteMap.png"));
    assert_eq!(alpha, vec![0, 85, 0, 252, 252, 252, 85, 170, 85]);
}

#[test]
fn test_diff_reports_without_writing() {
    let mut ws = TestWorkspace::new();
    let (w, h) = HERO_SIZE;
    let source = ws.write_image("hero.png", w, h, &fixtures::hero_sprite());
    let group_path = ws
        .pipeline
        .extract(&source, &mut ws.rng)
        .unwrap()
        .artifacts
        .group
        .unwrap();
    let before = std::fs::read(&group_path).unwrap();

    let changed = ws.write_image("hero_v2.png", w, h, &fixtures::hero_sprite_with_belt());
    let diff = ws.pipeline.diff(&changed, &group_path).unwrap();

    assert_eq!(diff.insertions, vec![colors::BELT]);
    assert_eq!(diff.deletions, vec![colors::SHIRT]);
    assert_eq!(std::fs::read(&group_path).unwrap(), before);
    assert!(!ws.path("hero_v2_PaletteMap.png").exists());
}

#[test]
fn test_locked_group_rejects_slot_edit_and_file_is_unchanged() {
    let mut ws = TestWorkspace::new();
    let source = ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());
    let group_path = ws
        .pipeline
        .extract(&source, &mut ws.rng)
        .unwrap()
        .artifacts
        .group
        .unwrap();
    let before = std::fs::read(&group_path).unwrap();

    let err = ws
        .pipeline
        .edit_group(&group_path, |group| Ok(group.add_color_slot(colors::BELT)?))
        .unwrap_err();

    assert!(matches!(
        err,
        ArtifactError::Engine(palette_engine::MapError::Palette(PaletteError::Locked { .. }))
    ));
    assert_eq!(std::fs::read(&group_path).unwrap(), before);
}

#[test]
fn test_map_refuses_to_overwrite_existing_map() {
    let mut ws = TestWorkspace::new();
    let source = ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());
    std::fs::write(ws.path("hero_PaletteMap.png"), b"keep me").unwrap();

    let err = ws.pipeline.map(&source, None, &mut ws.rng).unwrap_err();

    assert!(matches!(err, ArtifactError::OverwriteRefused { .. }));
    assert_eq!(std::fs::read(ws.path("hero_PaletteMap.png")).unwrap(), b"keep me");
    assert!(!ws.path("hero_PaletteGroup.asset").exists());
}

#[test]
fn test_overwrite_config_replaces_artifacts() {
    let config = AppConfig {
        overwrite: true,
        ..Default::default()
    };
    let mut ws = TestWorkspace::with_config(config);
    let source = ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());

    ws.pipeline.extract(&source, &mut ws.rng).unwrap();
    let second = ws.pipeline.extract(&source, &mut ws.rng).unwrap();

    assert_eq!(second.artifacts.group, Some(ws.path("hero_PaletteGroup.asset")));
    assert!(!ws.path("hero_PaletteGroup 1.asset").exists());
}

#[test]
fn test_sorted_extract_into_output_dir() {
    let mut ws = TestWorkspace::new();
    let out = ws.path("generated");
    ws.pipeline = palettemap::services::ArtifactPipeline::new(AppConfig {
        output_dir: Some(out.clone()),
        sort_palette: true,
        ..Default::default()
    });
    let source = ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());

    let result = ws.pipeline.extract(&source, &mut ws.rng).unwrap();

    // Translucent first, then ascending grayscale
    assert_eq!(
        result.group.base().colors(),
        &[Color::CLEAR, colors::BOOTS, colors::SHIRT, colors::SKIN]
    );
    common::assert_png_file(&out.join("hero_PaletteKey.png"));
}

#[test]
fn test_export_and_import_key_grid() {
    let mut ws = TestWorkspace::new();
    let source = ws.write_image("hero.png", 3, 3, &fixtures::hero_sprite());
    let group_path = ws
        .pipeline
        .extract(&source, &mut ws.rng)
        .unwrap()
        .artifacts
        .group
        .unwrap();
    let (original, _) = ws
        .pipeline
        .edit_group(&group_path, |group| {
            let v = group.add_variant();
            group.set_color(v, 2, Color::from_u8(0, 0, 200, 255))?;
            Ok(())
        })
        .unwrap();

    let imported = ws
        .pipeline
        .import(&ws.path("hero_PaletteKey.png"), "hero_copy", &mut ws.rng)
        .unwrap();

    assert_eq!(imported.group.name(), "hero_copy");
    assert_eq!(imported.group.len(), 2);
    assert_eq!(imported.group.base().colors(), original.base().colors());
    assert_eq!(
        imported.group.palette(1).unwrap().colors(),
        original.palette(1).unwrap().colors()
    );
    assert!(ws.path("hero_copy_PaletteGroup.asset").exists());
}

#[test]
fn test_map_with_group_adopts_new_colors() {
    let mut ws = TestWorkspace::new();
    let a = ws.write_image("a.png", 2, 1, &[colors::SKIN, colors::BOOTS]);
    let b = ws.write_image("b.png", 2, 1, &[colors::BELT, colors::SKIN]);
    let group_path = ws.pipeline.extract(&a, &mut ws.rng).unwrap().artifacts.group.unwrap();

    let result = ws.pipeline.map(&b, Some(&group_path), &mut ws.rng).unwrap();

    assert_eq!(result.group.base().colors(), &[colors::SKIN, colors::BELT]);
    let alpha = common::read_index_alpha(&ws.path("b_PaletteMap.png"));
    assert_eq!(alpha, vec![252, 0]);
}
