use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const YELLOW: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
}

pub mod box_chars {
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";
    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const ARROW_RIGHT: &str = "▶";
}

/// Prints `lines` inside a rounded box, padding by display width so titles
/// with accents or wide glyphs stay aligned.
pub fn print_box(title: &str, lines: &[String]) {
    use box_chars::*;

    let inner_width = lines
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(title.width() + 2))
        .max()
        .unwrap_or(0);

    let title_fill = inner_width - title.width();
    println!(
        "{}{} {}{}{}",
        ROUND_TOP_LEFT.with(colors::DIM),
        SINGLE_HORIZONTAL.with(colors::DIM),
        title.with(colors::CYAN).bold(),
        SINGLE_HORIZONTAL.repeat(title_fill).with(colors::DIM),
        ROUND_TOP_RIGHT.with(colors::DIM)
    );
    for line in lines {
        let padding = " ".repeat(inner_width - line.width());
        println!(
            "{} {}{} {}",
            SINGLE_VERTICAL.with(colors::DIM),
            line,
            padding,
            SINGLE_VERTICAL.with(colors::DIM)
        );
    }
    println!(
        "{}{}{}",
        ROUND_BOTTOM_LEFT.with(colors::DIM),
        SINGLE_HORIZONTAL.repeat(inner_width + 2).with(colors::DIM),
        ROUND_BOTTOM_RIGHT.with(colors::DIM)
    );
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".with(colors::GREEN).bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".with(colors::RED).bold(), msg.with(colors::RED));
}

pub fn print_notice(msg: &str) {
    println!("{} {}", box_chars::ARROW_RIGHT.with(colors::YELLOW), msg);
}
