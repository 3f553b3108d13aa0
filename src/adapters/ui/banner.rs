//! Welcome banner: figlet title shaded from pathway teal to disease magenta.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

pub const DEFAULT_TITLE: &str = "KEGG-FINDER";
pub const DEFAULT_SUBTITLE: &str = "UniProt -> KEGG pathway and disease finder";

type Rgb = (u8, u8, u8);

/// Pathway Teal (#00b3a4).
const PATHWAY_TEAL: Rgb = (0x00, 0xb3, 0xa4);
/// Disease Magenta (#e0218a).
const DISEASE_MAGENTA: Rgb = (0xe0, 0x21, 0x8a);

/// Integer blend of `from` toward `to` at `step / last`.
fn blend(from: Rgb, to: Rgb, step: usize, last: usize) -> Rgb {
    if last == 0 {
        return to;
    }
    let mix = |a: u8, b: u8| -> u8 {
        let (a, b) = (i64::from(a), i64::from(b));
        let (step, last) = (step.min(last) as i64, last as i64);
        // Round half away from zero so both endpoints are exact.
        let delta = (b - a) * step;
        let offset = if delta >= 0 { last / 2 } else { -(last / 2) };
        (a + (delta + offset) / last) as u8
    };
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

pub struct Banner {
    title: String,
    subtitle: String,
}

impl Banner {
    /// Blank values fall back to the defaults.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        let title = title.into();
        let subtitle = subtitle.into();
        Self {
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            subtitle: if subtitle.trim().is_empty() {
                DEFAULT_SUBTITLE.to_string()
            } else {
                subtitle
            },
        }
    }

    /// Title as figlet art, or the plain title when the font can't render it.
    fn art(&self) -> String {
        FIGfont::standard()
            .ok()
            .and_then(|font| font.convert(&self.title).map(|f| f.to_string()))
            .unwrap_or_else(|| self.title.clone())
    }

    /// Non-blank art lines paired with their shade, top line teal and bottom line magenta.
    fn shaded_lines(&self) -> Vec<(String, Rgb)> {
        let art = self.art();
        let lines: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();
        let last = lines.len().saturating_sub(1);
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| (line.to_string(), blend(PATHWAY_TEAL, DISEASE_MAGENTA, i, last)))
            .collect()
    }

    /// Prints the shaded title, then version and subtitle in teal.
    pub fn print(&self) {
        let mut out = stdout();
        for (line, (r, g, b)) in self.shaded_lines() {
            let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
            let _ = out.execute(Print(format!("{}\r\n", line)));
        }
        let (r, g, b) = PATHWAY_TEAL;
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(format!(
            "v{}  {}\r\n",
            env!("CARGO_PKG_VERSION"),
            self.subtitle
        )));
        let _ = out.execute(ResetColor);
        let _ = out.flush();
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_SUBTITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints_and_midpoint() {
        assert_eq!(blend(PATHWAY_TEAL, DISEASE_MAGENTA, 0, 4), PATHWAY_TEAL);
        assert_eq!(blend(PATHWAY_TEAL, DISEASE_MAGENTA, 4, 4), DISEASE_MAGENTA);
        assert_eq!(blend((0, 200, 10), (100, 0, 10), 1, 2), (50, 100, 10));
        assert_eq!(blend(PATHWAY_TEAL, DISEASE_MAGENTA, 0, 0), DISEASE_MAGENTA);
    }

    #[test]
    fn test_shaded_lines_span_gradient() {
        let lines = Banner::default().shaded_lines();
        assert!(lines.len() > 1);
        assert_eq!(lines.first().map(|l| l.1), Some(PATHWAY_TEAL));
        assert_eq!(lines.last().map(|l| l.1), Some(DISEASE_MAGENTA));
    }

    #[test]
    fn test_blank_title_and_subtitle_use_defaults() {
        let banner = Banner::new("  ", "");
        assert_eq!(banner.title, DEFAULT_TITLE);
        assert_eq!(banner.subtitle, DEFAULT_SUBTITLE);

        let custom = Banner::new("LAB", "Insulin pathway screen");
        assert_eq!(custom.title, "LAB");
        assert_eq!(custom.subtitle, "Insulin pathway screen");
    }
}
