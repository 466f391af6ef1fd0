//! ASCII banner with a vertical color gradient (MILESTONES).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Sunrise Orange (#ff8c42).
const SUNRISE_ORANGE: (u8, u8, u8) = (0xff, 0x8c, 0x42);
/// Deep Teal (#1fc9a7).
const DEEP_TEAL: (u8, u8, u8) = (0x1f, 0xc9, 0xa7);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "MILESTONES" in FIGlet standard font with a
/// gradient from Sunrise Orange to Deep Teal, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let font = FIGfont::standard().expect("figlet standard font");
    let figure = font.convert("MILESTONES").expect("figlet convert MILESTONES");
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(SUNRISE_ORANGE, DEEP_TEAL, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: DEEP_TEAL.0,
        g: DEEP_TEAL.1,
        b: DEEP_TEAL.2,
    }));
    let _ = out.execute(Print(format!("v{} - daily goals, one task at a time\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
