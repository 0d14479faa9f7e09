//! Integration test: paint frames from in-memory assets and export them
//! at print density.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mugprint_export::{OVERSAMPLING, export_frame};
use mugprint_scene::{
    Action, AssetCache, Assets, Dimensions, FontArc, MUGS, Pixmap, SelectionState,
    compose_default, decode_image,
};

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

fn seeded_images() -> AssetCache<Pixmap> {
    let state = SelectionState::default();
    let black = MUGS.get("black").unwrap();
    let mut images = AssetCache::new();
    for (url, rgba) in [
        (state.mug.image_url, [255, 255, 255, 255]),
        (black.image_url, [0, 0, 0, 255]),
        (state.design.image_url, [200, 30, 30, 255]),
    ] {
        images.request(url);
        images.resolve(url, decode_image(&png_bytes(30, 25, rgba)));
    }
    images
}

#[test]
fn oversampling_three_yields_1800_by_1500() {
    let images = seeded_images();
    let fonts = AssetCache::<FontArc>::new();
    let assets = Assets::new(&images, &fonts);
    let frame = compose_default(&SelectionState::default(), &assets).unwrap();

    let export = export_frame(&frame, &assets, OVERSAMPLING).unwrap();
    assert_eq!(
        export.dimensions,
        Dimensions {
            width: 1800,
            height: 1500
        }
    );
    let decoded = image::load_from_memory(&export.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1800, 1500));
}

#[test]
fn exporting_twice_is_byte_identical() {
    let images = seeded_images();
    let fonts = AssetCache::<FontArc>::new();
    let assets = Assets::new(&images, &fonts);
    let frame = compose_default(&SelectionState::default(), &assets).unwrap();

    let first = export_frame(&frame, &assets, OVERSAMPLING).unwrap();
    let second = export_frame(&frame, &assets, OVERSAMPLING).unwrap();
    assert_eq!(first.png, second.png);
}

#[test]
fn scenario_black_mug_design_d1_no_name() {
    let images = seeded_images();
    let fonts = AssetCache::<FontArc>::new();
    let assets = Assets::new(&images, &fonts);

    let state = SelectionState::default()
        .apply(Action::SelectMug(MUGS.get("black").unwrap()))
        .and_then(|s| s.apply(Action::SetDisplayName(String::new())))
        .unwrap();
    let frame = compose_default(&state, &assets).unwrap();
    let export = export_frame(&frame, &assets, OVERSAMPLING).unwrap();

    let img = image::load_from_memory(&export.png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1800, 1500));
    // Black mug around the placement area.
    assert_eq!(img.get_pixel(60, 60).0, [0, 0, 0, 255]);
    // Design d1 inside (250,140)-(430,370), scaled by 3.
    assert_eq!(img.get_pixel(1020, 765).0, [200, 30, 30, 255]);
    // Label band shows only the mug.
    assert_eq!(img.get_pixel(1020, 1185).0, [0, 0, 0, 255]);
}

#[test]
fn export_reflects_the_painted_frame_not_later_loads() {
    let state = SelectionState::default();
    let mut images = seeded_images();
    let fonts = AssetCache::<FontArc>::new();

    // Paint before d2 has loaded.
    let d2 = state.select_design_by_id("d2").unwrap();
    images.request(d2.design.image_url);
    let frame = compose_default(&d2, &Assets::new(&images, &fonts)).unwrap();

    // d2 arrives, then the user exports without another paint.
    images.resolve(
        d2.design.image_url,
        decode_image(&png_bytes(4, 4, [0, 255, 0, 255])),
    );
    let export = export_frame(&frame, &Assets::new(&images, &fonts), OVERSAMPLING).unwrap();
    let img = image::load_from_memory(&export.png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(1020, 765).0, [255, 255, 255, 255]);
}

#[test]
fn default_name_is_printed_centered_in_the_label_band() {
    let images = seeded_images();
    let fonts = AssetCache::<FontArc>::new();
    let assets = Assets::new(&images, &fonts);
    let frame = compose_default(&SelectionState::default(), &assets).unwrap();
    assert!(frame.omitted.is_empty(), "omitted: {:?}", frame.omitted);

    let export = export_frame(&frame, &assets, OVERSAMPLING).unwrap();
    let img = image::load_from_memory(&export.png).unwrap().to_rgba8();

    // Below the design, everything not white is label ink.
    let inked: Vec<(u32, u32)> = img
        .enumerate_pixels()
        .filter(|&(_, y, p)| y >= 1120 && p.0 != [255, 255, 255, 255])
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(inked.len() > 3000, "{} inked pixels", inked.len());
    let x0 = inked.iter().map(|p| p.0).min().unwrap();
    let x1 = inked.iter().map(|p| p.0).max().unwrap();
    let y0 = inked.iter().map(|p| p.1).min().unwrap();
    let y1 = inked.iter().map(|p| p.1).max().unwrap();
    assert!(x0 >= 750 && x1 < 1290, "x {x0}..={x1}");
    assert!(y0 >= 1140 && y1 < 1260, "y {y0}..={y1}");
    assert!((i64::from(x0 + x1) / 2 - 1020).abs() <= 12, "x {x0}..={x1}");
}
