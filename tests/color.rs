use backdrop_wasm::color::{interpolate, Rgb};
use backdrop_wasm::EffectError;

#[test]
fn parses_hex_forms() {
    assert_eq!("#61dca3".parse::<Rgb>().unwrap(), Rgb::new(0x61, 0xdc, 0xa3));
    assert_eq!("2b4539".parse::<Rgb>().unwrap(), Rgb::new(0x2b, 0x45, 0x39));
    assert_eq!("#999".parse::<Rgb>().unwrap(), Rgb::new(0x99, 0x99, 0x99));
    assert_eq!("#AbC".parse::<Rgb>().unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
}

#[test]
fn parses_its_own_output() {
    let rgb = Rgb::new(12, 34, 56);
    assert_eq!(rgb.to_string(), "rgb(12, 34, 56)");
    assert_eq!(rgb.to_string().parse::<Rgb>().unwrap(), rgb);
    assert_eq!("rgb(1,2,3)".parse::<Rgb>().unwrap(), Rgb::new(1, 2, 3));
}

#[test]
fn rejects_malformed_colors() {
    for bad in ["", "nonsense", "#12345", "#ggg", "rgb(1, 2)", "rgb(1, 2, 3, 4)", "rgb(300, 0, 0)"] {
        let err = bad.parse::<Rgb>().unwrap_err();
        assert!(matches!(err, EffectError::Color(_)), "{bad:?} -> {err}");
        assert!(err.to_string().starts_with("color error:"));
    }
}

#[test]
fn lerp_is_exact_at_both_ends() {
    let start = Rgb::new(0x2b, 0x45, 0x39);
    let end = Rgb::new(0x61, 0xb3, 0xdc);
    assert_eq!(start.lerp(end, 0.0), start);
    assert_eq!(start.lerp(end, 1.0), end);
    // out-of-range progress clamps
    assert_eq!(start.lerp(end, -3.0), start);
    assert_eq!(start.lerp(end, 1.7), end);
}

#[test]
fn lerp_rounds_per_channel() {
    let black = Rgb::new(0, 0, 0);
    let white = Rgb::new(255, 255, 255);
    assert_eq!(black.lerp(white, 0.5), Rgb::new(128, 128, 128));
    assert_eq!(white.lerp(black, 0.25), Rgb::new(191, 191, 191));
}

#[test]
fn interpolate_skips_unparseable_endpoints() {
    assert_eq!(interpolate("#000", "#fff", 1.0), Some(Rgb::new(255, 255, 255)));
    assert_eq!(interpolate("bogus", "#fff", 0.5), None);
    assert_eq!(interpolate("#000", "bogus", 0.5), None);
}
