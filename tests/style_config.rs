use plotters::style::RGBColor;
use vizstyle::StyleConfig;
use vizstyle::style::{parse_hex, to_hex};

#[test]
fn default_theme_matches_documented_values() {
    let style = StyleConfig::default();
    assert_eq!(style.colors.primary, "#2E86AB");
    assert_eq!(style.colors.palette.len(), 6);
    assert_eq!(style.fonts.title, 16);
    assert_eq!(style.fonts.label, 12);
    assert_eq!(style.fonts.tick, 10);
    assert_eq!(style.lines.width, 2.5);
    assert_eq!(style.figure.width, 1000);
    assert_eq!(style.figure.height, 600);
    assert_eq!(style.axes.grid_alpha, 0.3);
}

#[test]
fn palette_color_cycles() {
    let style = StyleConfig::default();
    assert_eq!(style.palette_color(0), parse_hex("#2E86AB").unwrap());
    assert_eq!(style.palette_color(6), parse_hex("#2E86AB").unwrap());
    assert_eq!(style.palette_color(7), parse_hex("#A23B72").unwrap());
}

#[test]
fn json_round_trip_preserves_the_theme() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.json");

    let mut style = StyleConfig::default();
    style.colors.primary = "#123456".into();
    style.fonts.title = 20;
    style.save_json(&path).unwrap();

    let loaded = StyleConfig::from_json(&path).unwrap();
    assert_eq!(loaded, style);
}

#[test]
fn loading_malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(StyleConfig::from_json(&path).is_err());
    assert!(StyleConfig::from_json(dir.path().join("missing.json")).is_err());
}

#[test]
fn hex_helpers_round_trip() {
    let c = RGBColor(0xF1, 0x8F, 0x01);
    assert_eq!(parse_hex(&to_hex(c)).unwrap(), c);
    assert_eq!(to_hex(c), "#F18F01");
}
