use std::sync::Mutex;

use buildlane_core::model::{JobId, TimelineSnapshot};
use buildlane_core::{
    CommandRecorder, FaceRegistry, FontFace, FrameInput, JobsRenderer, PassStats, RenderConfig,
    TextStyle,
};
use buildlane_protocol::theme::{self, ThemeMode};
use buildlane_protocol::{Paint, Point, Rect, RenderCommand};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Renderer state shared across calls from the host page.
struct Session {
    renderer: JobsRenderer,
    fonts: FaceRegistry,
}

impl Session {
    fn new() -> Self {
        let fonts = FaceRegistry::with_builtin();
        let mut renderer = JobsRenderer::new(RenderConfig::default());
        if let Err(err) = renderer.fonts_mut().apply_style(TextStyle::default(), &fonts) {
            tracing::warn!(error = %err, "builtin font unavailable, labels suppressed");
        }
        Self { renderer, fonts }
    }
}

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, JsError>) -> Result<T, JsError> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| JsError::new("renderer state poisoned"))?;
    f(guard.get_or_insert_with(Session::new))
}

fn js_err(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

#[derive(Serialize)]
struct BoundsEntry {
    id: JobId,
    rect: Rect,
}

#[derive(Serialize)]
struct RenderOutput {
    commands: Vec<RenderCommand>,
    bounds: Vec<BoundsEntry>,
    stats: PassStats,
}

/// Replace the renderer config with a JSON document of overrides.
#[wasm_bindgen]
pub fn set_config(json: &str) -> Result<(), JsError> {
    let config = RenderConfig::from_json(json.as_bytes()).map_err(js_err)?;
    with_session(|session| {
        session.renderer.set_config(config);
        Ok(())
    })
}

/// Register a font face table. Returns its family name.
#[wasm_bindgen]
pub fn register_font(json: &str) -> Result<String, JsError> {
    let face = FontFace::from_json(json.as_bytes()).map_err(js_err)?;
    let family = face.family.clone();
    with_session(|session| {
        session.fonts.register(face);
        // Faces registered under the active family take effect immediately.
        let Session { renderer, fonts } = session;
        if renderer.fonts().style().is_some_and(|s| s.family == family) {
            renderer.fonts_mut().refresh(fonts).map_err(js_err)?;
        }
        Ok(family)
    })
}

/// Switch the job label style. Labels are suppressed if the family is unknown.
#[wasm_bindgen]
pub fn set_text_style(family: &str, size: f64) -> Result<(), JsError> {
    let style = TextStyle {
        family: family.to_string(),
        size,
    };
    with_session(|session| {
        let Session { renderer, fonts } = session;
        renderer.fonts_mut().apply_style(style, fonts).map_err(js_err)
    })
}

/// Render a snapshot, returning `{ commands, bounds, stats }` as JSON.
#[wasm_bindgen]
pub fn render_snapshot(json: &str, light: bool) -> Result<String, JsError> {
    let mode = if light {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    };
    let frame = TimelineSnapshot::from_json(json.as_bytes())
        .and_then(|snapshot| snapshot.into_frame(mode))
        .map_err(js_err)?;

    with_session(|session| {
        let renderer = &mut session.renderer;
        let area = frame.visible_area(renderer.config());
        let background = Paint::solid(theme::background_color(mode));
        let input = FrameInput {
            background: Some((area, &background)),
            ..frame.input()
        };

        let mut recorder = CommandRecorder::new();
        let stats = renderer.render(&mut recorder, &input);
        let output = RenderOutput {
            commands: recorder.into_commands(),
            bounds: renderer
                .bounds()
                .to_sorted_vec()
                .into_iter()
                .map(|(id, rect)| BoundsEntry { id, rect })
                .collect(),
            stats,
        };
        serde_json::to_string(&output).map_err(js_err)
    })
}

/// Job under the given canvas point in the latest render, if any.
#[wasm_bindgen]
pub fn hit_test(x: f64, y: f64) -> Result<Option<u64>, JsError> {
    with_session(|session| {
        Ok(session
            .renderer
            .bounds()
            .hit_test(Point::new(x, y))
            .map(|id| id.0))
    })
}
