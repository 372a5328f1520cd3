use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::app::App;
use crate::console::{TITLE, USE_PICKER};

pub struct Renderer {
    pub width: u16,
    pub height: u16,
}

impl Renderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Rows available to the transcript: everything except the title bar,
    /// the prompt line and the completion line when it is shown
    pub fn transcript_height(&self, app: &App) -> usize {
        let completion = usize::from(app.completion.is_visible());
        (self.height as usize).saturating_sub(2 + completion)
    }

    pub fn render(&self, app: &App) -> io::Result<()> {
        let mut stdout = stdout();
        let theme = &app.theme;

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide)?;
        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;

        self.render_title_bar(&mut stdout, app)?;
        self.render_transcript(&mut stdout, app)?;
        self.render_completion(&mut stdout, app)?;
        self.render_prompt(&mut stdout, app)?;

        // One terminal bell per pending boundary or empty completion
        for _ in 0..app.bell.take_pending() {
            queue!(stdout, Print('\x07'))?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn render_title_bar(&self, stdout: &mut impl Write, app: &App) -> io::Result<()> {
        let theme = &app.theme;
        queue!(stdout, MoveTo(0, 0))?;
        queue!(stdout, SetBackgroundColor(theme.title_bar_bg.to_crossterm()))?;
        queue!(stdout, SetForegroundColor(theme.title_bar_fg.to_crossterm()))?;
        queue!(stdout, SetAttribute(Attribute::Bold))?;

        let object = app
            .session
            .object()
            .map(|object| object.type_name().to_string())
            .unwrap_or_else(|| "no object".to_string());
        let left = format!(" {TITLE} | {object}");
        let right = if USE_PICKER { "C-o: pick object " } else { "" };

        queue!(stdout, Print(fit(&left, right, self.width as usize)))?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;
        Ok(())
    }

    fn render_transcript(&self, stdout: &mut impl Write, app: &App) -> io::Result<()> {
        let theme = &app.theme;
        let height = self.transcript_height(app);
        let lines = app.transcript.window(height, app.scroll);

        // Bottom-align so the newest line sits right above the prompt
        let top = 1 + (height - lines.len()) as u16;
        for row in 1..top {
            queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        }
        for (i, line) in lines.iter().enumerate() {
            queue!(stdout, MoveTo(0, top + i as u16))?;
            queue!(stdout, SetForegroundColor(theme.line_color(line).to_crossterm()))?;
            queue!(stdout, Clear(ClearType::CurrentLine))?;
            queue!(stdout, Print(truncate(line, self.width as usize)))?;
        }
        Ok(())
    }

    fn render_completion(&self, stdout: &mut impl Write, app: &App) -> io::Result<()> {
        let Some(text) = app.completion.text() else {
            return Ok(());
        };
        let row = self.height.saturating_sub(2);
        queue!(stdout, MoveTo(0, row))?;
        queue!(stdout, SetForegroundColor(app.theme.completion.to_crossterm()))?;
        queue!(stdout, Clear(ClearType::CurrentLine))?;
        queue!(stdout, Print(truncate(&text, self.width as usize)))?;
        Ok(())
    }

    fn render_prompt(&self, stdout: &mut impl Write, app: &App) -> io::Result<()> {
        let theme = &app.theme;
        let row = self.height.saturating_sub(1);
        let marker = app.session.prompt().marker();
        let marker_width = marker.chars().count();
        let entry = app.session.entry();

        // Scroll the entry horizontally so the caret stays visible
        let room = (self.width as usize).saturating_sub(marker_width + 1).max(1);
        let offset = entry.caret().saturating_sub(room);
        let visible: String = entry.text().chars().skip(offset).take(room).collect();

        queue!(stdout, MoveTo(0, row))?;
        queue!(stdout, Clear(ClearType::CurrentLine))?;
        queue!(stdout, SetForegroundColor(theme.prompt.to_crossterm()))?;
        queue!(stdout, Print(marker))?;
        queue!(stdout, SetForegroundColor(theme.foreground.to_crossterm()))?;
        queue!(stdout, Print(visible))?;

        let cursor_x = (marker_width + entry.caret() - offset) as u16;
        queue!(stdout, MoveTo(cursor_x, row))?;
        queue!(stdout, SetCursorStyle::BlinkingBar)?;
        queue!(stdout, Show)?;
        Ok(())
    }
}

/// At most `width` characters of `text`
fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// `left` and `right` on one line of exactly `width` characters
fn fit(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let line = if used <= width {
        format!("{left}{}{right}", " ".repeat(width - used))
    } else {
        left.to_string()
    };
    truncate(&line, width)
}
