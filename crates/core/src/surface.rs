use buildlane_protocol::{GlyphRun, Paint, Rect, RenderCommand, Stroke};

/// The drawing backend a render pass writes to.
///
/// Paints are borrowed for the duration of the call; a surface that needs to
/// keep them must clone.
pub trait DrawSurface {
    fn draw_rect(&mut self, rect: Rect, fill: &Paint, stroke: Option<&Stroke>);

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, fill: &Paint, stroke: Option<&Stroke>);

    fn draw_glyph_run(&mut self, run: &GlyphRun, paint: &Paint);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn draw_rect(&mut self, rect: Rect, fill: &Paint, stroke: Option<&Stroke>) {
        (**self).draw_rect(rect, fill, stroke);
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, fill: &Paint, stroke: Option<&Stroke>) {
        (**self).draw_rounded_rect(rect, radius, fill, stroke);
    }

    fn draw_glyph_run(&mut self, run: &GlyphRun, paint: &Paint) {
        (**self).draw_glyph_run(run, paint);
    }
}

/// Records every draw call as a [`RenderCommand`].
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<RenderCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn glyph_runs(&self) -> impl Iterator<Item = (&GlyphRun, &Paint)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            RenderCommand::DrawGlyphRun { run, paint } => Some((run, paint)),
            _ => None,
        })
    }
}

impl DrawSurface for CommandRecorder {
    fn draw_rect(&mut self, rect: Rect, fill: &Paint, stroke: Option<&Stroke>) {
        self.commands.push(RenderCommand::DrawRect {
            rect,
            fill: fill.clone(),
            stroke: stroke.cloned(),
        });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, fill: &Paint, stroke: Option<&Stroke>) {
        self.commands.push(RenderCommand::DrawRoundedRect {
            rect,
            radius,
            fill: fill.clone(),
            stroke: stroke.cloned(),
        });
    }

    fn draw_glyph_run(&mut self, run: &GlyphRun, paint: &Paint) {
        self.commands.push(RenderCommand::DrawGlyphRun {
            run: run.clone(),
            paint: paint.clone(),
        });
    }
}
