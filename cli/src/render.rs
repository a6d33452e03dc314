use std::fmt::Write;

use minefield_core::{ClientView, Tile};

fn symbol(tile: Tile) -> char {
    if tile.is_flagged() {
        'F'
    } else if tile.is_hidden() {
        '#'
    } else if tile.is_bomb() {
        '*'
    } else {
        match tile.adjacent_count() {
            0 => '.',
            count => char::from_digit(count.into(), 10).unwrap_or('?'),
        }
    }
}

/// Text board with a status line, column digits wrap every 10.
pub fn board(view: &ClientView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:?}, {} bombs, {}x{}",
        view.state, view.bombs, view.width, view.height
    );

    out.push_str("   ");
    for x in 0..view.width {
        out.push(char::from_digit(u32::from(x % 10), 10).unwrap_or(' '));
    }
    out.push('\n');

    for (y, row) in view.tiles.iter().enumerate() {
        let _ = write!(out, "{y:>2} ");
        out.extend(row.iter().map(|&bits| symbol(Tile::from_bits_retain(bits))));
        out.push('\n');
    }
    out
}
