// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text rendering of the board and droplet legend.

use std::fmt::Write as _;

use droplet_app_core::prefs::BoardPrefs;
use droplet_model::DropletId;

use crate::tween::Sprite;

const EMPTY: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cell: usize,
}

impl From<&BoardPrefs> for Board {
    fn from(prefs: &BoardPrefs) -> Self {
        let to_usize = |v: u32| usize::try_from(v).unwrap_or(usize::MAX);
        Self {
            width: to_usize(prefs.width),
            height: to_usize(prefs.height),
            cell: to_usize(prefs.cell_size).max(1),
        }
    }
}

/// Letter used to draw a droplet.
pub fn glyph(id: DropletId) -> char {
    let offset = u8::try_from(id.id % 26).unwrap_or(0);
    char::from(b'A' + offset)
}

/// Nearest cell for an interpolated coordinate; `None` when off the board.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell(v: f64, limit: usize) -> Option<usize> {
    let r = v.round();
    if !r.is_finite() || r < 0.0 {
        return None;
    }
    let idx = r as usize;
    (idx < limit).then_some(idx)
}

/// Append the board, a legend line per droplet and `status` to `out`.
pub fn draw(board: &Board, sprites: &[Sprite], status: &str, out: &mut String) {
    let mut grid = vec![vec![EMPTY; board.width]; board.height];
    for sprite in sprites {
        let (Some(x0), Some(y0)) = (cell(sprite.x, board.width), cell(sprite.y, board.height))
        else {
            continue;
        };
        let dims = sprite.snapshot.extent.dimensions;
        let w = usize::try_from(dims.x.max(1)).unwrap_or(1);
        let h = usize::try_from(dims.y.max(1)).unwrap_or(1);
        for row in grid.iter_mut().skip(y0).take(h) {
            for slot in row.iter_mut().skip(x0).take(w) {
                *slot = glyph(sprite.snapshot.id);
            }
        }
    }

    for row in &grid {
        for ch in row {
            for _ in 0..board.cell {
                out.push(*ch);
            }
        }
        out.push('\n');
    }
    for sprite in sprites {
        let snap = &sprite.snapshot;
        let _ = write!(
            out,
            "{} {} at {} vol {:.2}",
            glyph(snap.id),
            snap.id,
            snap.location,
            snap.extent.volume
        );
        if !snap.label.is_empty() {
            let _ = write!(out, " {}", snap.label);
        }
        out.push('\n');
    }
    out.push_str(status);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use droplet_model::{EntitySnapshot, Extent, Location};

    fn sprite(id: u64, x: f64, y: f64) -> Sprite {
        Sprite {
            snapshot: EntitySnapshot::new(DropletId::new(id), Location::xy(0, 0)),
            x,
            y,
        }
    }

    #[test]
    fn draws_droplets_at_rounded_cells() {
        let board = Board {
            width: 3,
            height: 2,
            cell: 1,
        };
        let mut out = String::new();
        draw(&board, &[sprite(1, 1.4, 0.0), sprite(2, 1.6, 1.0)], "ok", &mut out);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], ".B.");
        assert_eq!(lines[1], "..C");
        assert_eq!(lines.last(), Some(&"ok"));
    }

    #[test]
    fn footprint_and_cell_width_expand_glyphs() {
        let board = Board {
            width: 3,
            height: 2,
            cell: 2,
        };
        let mut wide = sprite(0, 0.0, 0.0);
        wide.snapshot = wide.snapshot.with_extent(Extent {
            volume: 2.0,
            dimensions: Location::xy(2, 2),
        });
        let mut out = String::new();
        draw(&board, &[wide], "", &mut out);
        assert!(out.starts_with("AAAA..\nAAAA..\n"));
    }

    #[test]
    fn legend_lists_droplets_with_labels() {
        let board = Board {
            width: 2,
            height: 1,
            cell: 1,
        };
        let mut mixed = sprite(3, 0.0, 0.0);
        mixed.snapshot = mixed.snapshot.with_label("mix 2:1");
        let mut out = String::new();
        draw(&board, &[mixed, sprite(4, 1.0, 0.0)], "", &mut out);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "DE");
        assert_eq!(lines[1], "D 0:3 at (0, 0) vol 1.00 mix 2:1");
        assert_eq!(lines[2], "E 0:4 at (0, 0) vol 1.00");
    }

    #[test]
    fn off_board_sprites_are_skipped() {
        let board = Board {
            width: 2,
            height: 1,
            cell: 1,
        };
        let mut out = String::new();
        draw(&board, &[sprite(1, -3.0, 0.0), sprite(2, 5.0, 0.0)], "", &mut out);
        assert!(out.starts_with("..\n"));
    }
}
