//! mugprint-render: render a mug design to a print-ready PNG without a
//! browser.
//!
//! Catalog URLs such as `/front.png` are resolved against a local asset
//! directory. Assets that are missing or fail to decode are reported and
//! their layer is left out, exactly as in the web preview.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin mugprint-render -- --assets public -o mug.png
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mugprint_export::{OVERSAMPLING, export_frame};
use mugprint_scene::{
    Action, AssetCache, Assets, CatalogEntry, DEFAULT_DISPLAY_NAME, DESIGNS, FontArc,
    FrameGeometry, LayerKind, MUGS, Pixmap, SelectionState, TextStyle, build_scene,
    decode_font, decode_image, render,
};
use serde::Serialize;

/// Render a mug design to PNG.
///
/// Composites the mug, the design and the display name with the same
/// geometry as the web preview, then exports at print density.
#[derive(Parser)]
#[command(name = "mugprint-render", version)]
struct Cli {
    /// Directory that catalog URLs are resolved against.
    #[arg(long, default_value = "public")]
    assets: PathBuf,

    /// Label font file. Defaults to the font built into the renderer.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Design id.
    #[arg(long, default_value = "d1", value_parser = parse_design)]
    design: &'static CatalogEntry,

    /// Mug color id.
    #[arg(long, default_value = "white", value_parser = parse_mug)]
    mug: &'static CatalogEntry,

    /// Display name printed under the design. May be empty.
    #[arg(long, default_value = DEFAULT_DISPLAY_NAME)]
    name: String,

    /// Oversampling factor relative to the 600x500 preview.
    #[arg(long, default_value_t = OVERSAMPLING, value_parser = parse_scale)]
    scale: u32,

    /// Print a JSON summary of the render on stdout.
    #[arg(long)]
    summary_json: bool,

    /// Output PNG path.
    #[arg(short, long)]
    output: PathBuf,
}

fn parse_design(id: &str) -> Result<&'static CatalogEntry, String> {
    DESIGNS
        .get(id)
        .ok_or_else(|| format!("unknown design '{id}' (known: {})", DESIGNS.ids()))
}

fn parse_mug(id: &str) -> Result<&'static CatalogEntry, String> {
    MUGS.get(id)
        .ok_or_else(|| format!("unknown mug '{id}' (known: {})", MUGS.ids()))
}

fn parse_scale(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(scale @ 1..=16) => Ok(scale),
        Ok(scale) => Err(format!("scale {scale} is outside 1..=16")),
        Err(e) => Err(e.to_string()),
    }
}

/// Machine-readable result of one render.
#[derive(Debug, Serialize)]
struct RenderSummary<'a> {
    design: &'a str,
    mug: &'a str,
    name: &'a str,
    width: u32,
    height: u32,
    omitted: &'a [LayerKind],
    output: &'a Path,
}

/// Map a catalog URL to a file under `root`.
///
/// Only site-relative URLs are supported; anything with a scheme is
/// rejected.
fn resolve_asset(root: &Path, url: &str) -> Result<PathBuf, String> {
    if url.contains("://") {
        return Err(format!("remote asset not supported: {url}"));
    }
    let relative = url.trim_start_matches('/');
    if relative.is_empty() {
        return Err(format!("empty asset path: '{url}'"));
    }
    Ok(root.join(relative))
}

/// Label style, drawing with the font file at `font` when given.
///
/// The path doubles as the font's cache key.
fn label_style(font: Option<&Path>) -> TextStyle {
    TextStyle {
        font_url: font.map(|p| p.display().to_string()),
        ..TextStyle::default()
    }
}

/// Read and decode one asset into `cache`, recording failures so the
/// layer is omitted rather than aborting the render.
fn load_into<T, E: std::fmt::Display>(
    cache: &mut AssetCache<T>,
    url: &str,
    path: Result<PathBuf, String>,
    decode: impl FnOnce(Vec<u8>) -> Result<T, E>,
) {
    if !cache.request(url) {
        return;
    }
    let result = path
        .and_then(|p| std::fs::read(&p).map_err(|e| format!("{}: {e}", p.display())))
        .and_then(|bytes| decode(bytes).map_err(|e| e.to_string()));
    if let Err(ref e) = result {
        eprintln!("Warning: asset {url} unavailable, layer omitted: {e}");
    }
    cache.resolve(url, result);
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let state = match [
        Action::SelectDesign(cli.design),
        Action::SelectMug(cli.mug),
        Action::SetDisplayName(cli.name.clone()),
    ]
    .into_iter()
    .try_fold(SelectionState::default(), |state, action| state.apply(action))
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Selection error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let style = label_style(cli.font.as_deref());
    let scene = match build_scene(&state, &FrameGeometry::default(), &style) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Scene error: {e}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Design: {} ({}), mug: {} ({}), name: {:?}",
        state.design.id, state.design.label, state.mug.id, state.mug.label, state.display_name,
    );

    let mut images = AssetCache::<Pixmap>::new();
    for url in scene.image_urls() {
        load_into(&mut images, url, resolve_asset(&cli.assets, url), |bytes| {
            decode_image(&bytes)
        });
    }

    let mut fonts = AssetCache::<FontArc>::new();
    for url in scene.font_urls() {
        let path = cli.font.clone().ok_or_else(|| format!("no font file for {url}"));
        load_into(&mut fonts, url, path, decode_font);
    }

    let assets = Assets::new(&images, &fonts);
    let frame = match render(&scene, &assets, 1.0) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Render error: {e}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!("Exporting at {}x...", cli.scale);
    let export = match export_frame(&frame, &assets, cli.scale) {
        Ok(export) => export,
        Err(e) => {
            eprintln!("Export error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&cli.output, &export.png) {
        eprintln!("Error writing {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }
    eprintln!(
        "PNG written to {} ({}x{}, {} bytes)",
        cli.output.display(),
        export.dimensions.width,
        export.dimensions.height,
        export.png.len(),
    );

    if cli.summary_json {
        let summary = RenderSummary {
            design: state.design.id,
            mug: state.mug.id,
            name: &state.display_name,
            width: export.dimensions.width,
            height: export.dimensions.height,
            omitted: &frame.omitted,
            output: &cli.output,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing summary: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
