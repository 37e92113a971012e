use std::{
    fmt::Write as _,
    io::{self, Write},
};

use citycast_core::{DisplayFields, RenderPort};
use parking_lot::Mutex;
use tracing::warn;

const ERROR_TEXT: &str = "Could not load weather data. Please check the city name and try again.";
const LOADING_TEXT: &str = "Loading...";
const ERASE_LINE: &str = "\r\x1b[2K";

#[derive(Debug)]
struct Screen<W> {
    out: W,
    loading: bool,
}

/// Renders the widget as text on a terminal (or any writer).
///
/// Write failures are logged and otherwise ignored; a closed pipe must not
/// take the search loop down with it.
#[derive(Debug)]
pub struct TerminalView<W: Write + Send = io::Stdout> {
    screen: Mutex<Screen<W>>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { screen: Mutex::new(Screen { out, loading: false }) }
    }

    fn emit(screen: &mut Screen<W>, text: &str) {
        let written = screen.out.write_all(text.as_bytes()).and_then(|()| screen.out.flush());
        if let Err(err) = written {
            warn!(error = %err, "Failed to write to terminal");
        }
    }
}

#[cfg(test)]
impl TerminalView<Vec<u8>> {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.screen.lock().out).into_owned()
    }
}

impl<W: Write + Send> RenderPort for TerminalView<W> {
    fn show_loading(&self) {
        let mut screen = self.screen.lock();
        screen.loading = true;
        Self::emit(&mut screen, LOADING_TEXT);
    }

    fn hide_loading(&self) {
        let mut screen = self.screen.lock();
        if screen.loading {
            screen.loading = false;
            Self::emit(&mut screen, ERASE_LINE);
        }
    }

    fn show_error(&self) {
        Self::emit(&mut self.screen.lock(), &format!("{ERROR_TEXT}\n"));
    }

    // Errors scroll away with the terminal; nothing to take back.
    fn hide_error(&self) {}

    fn show_result(&self, fields: &DisplayFields) {
        Self::emit(&mut self.screen.lock(), &render_result(fields));
    }
}

/// Lay out the result view as plain text.
pub fn render_result(fields: &DisplayFields) -> String {
    let mut out = String::new();
    let metrics = &fields.metrics;

    let _ = writeln!(out, "{}", fields.location_label);
    let _ = writeln!(out, "{}", fields.date_label);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        fields.icon.glyph(),
        fields.temperature_label(),
        fields.description
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Feels like {:<9} Humidity {}",
        metrics.feels_like_label(),
        metrics.humidity_label()
    );
    let _ = writeln!(
        out,
        "  Wind       {:<9} Pressure {}",
        metrics.wind_speed_label(),
        metrics.pressure_label()
    );

    if !fields.forecast.is_empty() {
        let _ = writeln!(out);
        for card in &fields.forecast {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                card.day_name,
                card.icon.glyph(),
                card.range_label()
            );
        }
    }

    out
}
