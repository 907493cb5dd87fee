use std::io::{stdout, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::grid::{Cell, CELL_NUM_X, CELL_NUM_Y};
use crate::menu::SelectList;
use crate::round::Round;
use crate::store::LeaderboardEntry;

const BORDER_TOP: i16 = 2;

fn food_color(value: u32) -> Color {
    match value {
        1 => Color::Grey,
        5 => Color::Yellow,
        _ => Color::Magenta,
    }
}

fn put(out: &mut impl Write, cell: Cell, color: Color, glyph: char) -> std::io::Result<()> {
    queue!(
        out,
        MoveTo(cell.x as u16, cell.y as u16),
        SetForegroundColor(color),
        Print(glyph)
    )
}

fn put_text(out: &mut impl Write, x: u16, y: u16, color: Color, text: &str) -> std::io::Result<()> {
    queue!(out, MoveTo(x, y), SetForegroundColor(color), Print(text))
}

fn centered(text: &str) -> u16 {
    (CELL_NUM_X as u16).saturating_sub(text.len() as u16) / 2
}

pub fn draw_playfield(round: &Round) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    let score_text = format!("Score: {}", round.score);
    put_text(&mut out, centered(&score_text), 1, Color::White, &score_text)?;

    // Border ring around the interior play field.
    for x in 0..CELL_NUM_X {
        put(&mut out, Cell::new(x, BORDER_TOP), Color::DarkGrey, '#')?;
        put(&mut out, Cell::new(x, CELL_NUM_Y - 1), Color::DarkGrey, '#')?;
    }
    for y in BORDER_TOP..CELL_NUM_Y {
        put(&mut out, Cell::new(0, y), Color::DarkGrey, '#')?;
        put(&mut out, Cell::new(CELL_NUM_X - 1, y), Color::DarkGrey, '#')?;
    }

    let food = round.food.active_item();
    put(&mut out, food.cell, food_color(food.value), '*')?;

    for cell in round.snake.body() {
        put(&mut out, cell, Color::Green, 'o')?;
    }
    let head = round.snake.head();
    if head.in_interior() {
        put(&mut out, head, Color::DarkGreen, 'O')?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

pub fn draw_menu(title: &str, list: &SelectList) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    put_text(&mut out, centered(title), 3, Color::White, title)?;

    let start_y = (CELL_NUM_Y as u16 - list.items().len() as u16 * 2) / 2;
    for (i, item) in list.items().iter().enumerate() {
        let selected = i == list.selected_index();
        let label = if selected {
            format!("> {} <", item)
        } else {
            item.to_string()
        };
        let color = if selected { Color::White } else { Color::DarkGrey };
        put_text(&mut out, centered(&label), start_y + i as u16 * 2, color, &label)?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

pub fn draw_leaderboard(tabs: &SelectList, shown: &str, entries: &[LeaderboardEntry]) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    put_text(&mut out, centered("Leaderboards"), 1, Color::White, "Leaderboards")?;

    // Horizontal tab row.
    let mut x = 3u16;
    for (i, item) in tabs.items().iter().enumerate() {
        let selected = i == tabs.selected_index();
        let color = if selected { Color::White } else { Color::DarkGrey };
        let label = if selected {
            format!("[{}]", item)
        } else {
            format!(" {} ", item)
        };
        put_text(&mut out, x, 3, color, &label)?;
        x += label.len() as u16 + 2;
    }

    put_text(&mut out, 3, 5, Color::Grey, &format!("{} mode", shown))?;
    if entries.is_empty() {
        put_text(&mut out, 3, 7, Color::DarkGrey, "No entries yet")?;
    }
    for (i, entry) in entries.iter().enumerate() {
        let line = format!("{:>2}. {:<16} {:>6}  {}", i + 1, entry.name, entry.score, entry.date);
        put_text(&mut out, 3, 7 + i as u16, Color::Grey, &line)?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

pub fn draw_options(list: &SelectList, music_volume: u8, sfx_volume: u8) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    put_text(&mut out, centered("Options"), 3, Color::White, "Options")?;

    for (i, item) in list.items().iter().enumerate() {
        let selected = i == list.selected_index();
        let color = if selected { Color::White } else { Color::DarkGrey };
        let y = 7 + i as u16 * 3;
        put_text(&mut out, 6, y, color, item)?;
        let volume = match i {
            0 => Some(music_volume),
            1 => Some(sfx_volume),
            _ => None,
        };
        if let Some(volume) = volume {
            let filled = (volume / 5) as usize;
            let bar = format!("[{}{}] {:>3}", "=".repeat(filled), " ".repeat(20 - filled), volume);
            put_text(&mut out, 6, y + 1, color, &bar)?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

pub fn draw_credits(list: &SelectList) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    put_text(&mut out, centered("Credits"), 3, Color::White, "Credits")?;

    let lines = [
        "Programmed by the slinker contributors",
        "",
        "Music by Abstraction (abstractionmusic.com):",
        "Ludum Dare 30 - Track 6",
        "Ludum Dare 38 - Track 2",
        "",
        "SFX by OmegaPixelArt",
    ];
    for (i, line) in lines.iter().enumerate() {
        put_text(&mut out, centered(line), 6 + i as u16, Color::Grey, line)?;
    }

    let back = if list.selected_index() == 0 { "> Back <" } else { "Back" };
    put_text(&mut out, centered(back), CELL_NUM_Y as u16 - 3, Color::White, back)?;
    queue!(out, ResetColor)?;
    out.flush()
}

pub fn draw_name_prompt(message: &str, input: &str) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    let mid = CELL_NUM_Y as u16 / 2;
    put_text(&mut out, centered("Game over"), mid - 4, Color::White, "Game over")?;
    put_text(&mut out, centered(message), mid - 2, Color::Grey, message)?;
    let field = if input.len() < 16 {
        format!("{}_", input)
    } else {
        input.to_string()
    };
    put_text(&mut out, centered(&field), mid, Color::White, &field)?;
    let hint = "Press ENTER to continue";
    put_text(&mut out, centered(hint), mid + 2, Color::DarkGrey, hint)?;
    queue!(out, ResetColor)?;
    out.flush()
}
