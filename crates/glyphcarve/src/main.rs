use anyhow::{anyhow, Context, Result};
use glyphcarve::*;
use log::info;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let format = args.get(1).map(|s| s.as_str());

    match format {
        Some(format @ ("svg" | "json")) if args.len() >= 4 => {
            if let Err(e) = run(format, &args[2], &args[3], args.get(4)) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        _ => print_usage(),
    }
}

fn print_usage() {
    println!("Usage: glyphcarve <svg|json> <font-file> <text> [size]");
    println!("  svg   - Print the layout as an SVG document");
    println!("  json  - Print the layout as JSON");
    println!();
    println!("Remaining parameters are read from ~/.glyphcarve/settings.json");
}

fn run(format: &str, font_path: &str, text: &str, size: Option<&String>) -> Result<()> {
    let settings_path = ShapeStringSettings::default_settings_path()?;
    let settings = ShapeStringSettings::load_from_path(&settings_path)?;

    let mut params = settings.params_for(text);
    if let Some(size) = size {
        params.size = size
            .parse()
            .map_err(|_| anyhow!("size must be a number, got {size:?}"))?;
    }

    let font = TtfFont::from_path(font_path)?;
    let layout = build_shape_string(&font, &params)
        .with_context(|| format!("build shape string {text:?}"))?;
    info!(
        "built {} shape(s), {:.3} x {:.3}, filled: {}",
        layout.shape().len(),
        layout.width(),
        layout.height(),
        layout.is_filled()
    );
    for diagnostic in &layout.report().diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    match format {
        "json" => println!("{}", layout_to_json(&layout)?),
        _ => print!("{}", layout_to_svg(&layout)),
    }
    Ok(())
}
