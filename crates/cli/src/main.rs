mod args;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use buildlane_core::font::BUILTIN_FAMILY;
use buildlane_core::model::{DisplayMode, TimelineSnapshot};
use buildlane_core::svg::render_svg_view;
use buildlane_core::{
    CommandRecorder, FaceRegistry, FontFace, FrameInput, JobsRenderer, RenderConfig, TextStyle,
};
use buildlane_protocol::theme::{self, ThemeMode};
use buildlane_protocol::Paint;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mode = if args.light {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    };

    let data = read(&args.snapshot)?;
    let mut frame = TimelineSnapshot::from_json(&data)
        .and_then(|snapshot| snapshot.into_frame(mode))
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    if args.compact {
        frame.mode = DisplayMode::Compact;
    }

    let config = match &args.config {
        Some(path) => RenderConfig::from_json(&read(path)?)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let mut registry = FaceRegistry::with_builtin();
    let mut style = TextStyle::default();
    if let Some(path) = &args.font {
        let face = FontFace::from_json(&read(path)?)
            .with_context(|| format!("loading font {}", path.display()))?;
        style.family = face.family.clone();
        registry.register(face);
    }
    if let Some(size) = args.font_size {
        style.size = size;
    }

    let mut renderer = JobsRenderer::new(config);
    // Labels are optional: an unusable font still yields the job shapes.
    if let Err(err) = renderer.fonts_mut().apply_style(style, &registry) {
        let known: Vec<&str> = registry.families().collect();
        tracing::warn!(error = %err, families = ?known, "rendering without job labels");
    }

    let view = frame.visible_area(renderer.config());
    let background = Paint::solid(theme::background_color(mode));
    let input = FrameInput {
        background: Some((view, &background)),
        ..frame.input()
    };

    let mut recorder = CommandRecorder::new();
    let stats = renderer.render(&mut recorder, &input);
    tracing::info!(
        drawn = stats.drawn,
        skipped = stats.skipped,
        labels = stats.labels,
        overlays = stats.overlays,
        "timeline rendered"
    );

    let family = renderer
        .fonts()
        .metrics()
        .map(|metrics| metrics.family())
        .filter(|family| *family != BUILTIN_FAMILY)
        .unwrap_or("sans-serif");
    let svg = render_svg_view(recorder.commands(), view, family);
    match &args.output {
        Some(path) => std::fs::write(path, svg)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if let Some(path) = &args.bounds {
        let bounds: Vec<_> = renderer
            .bounds()
            .to_sorted_vec()
            .into_iter()
            .map(|(id, rect)| serde_json::json!({ "id": id, "rect": rect }))
            .collect();
        let json = serde_json::to_string_pretty(&bounds)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}
