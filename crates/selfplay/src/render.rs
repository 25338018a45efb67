use gomoku3d_core::{Board, Coord, Player};

/// Draw the board as one 2D slice per depth level.
///
/// Stones of `player_a` are shown as `X`, those of `player_b` as `O`. Rows
/// are printed from the highest `h` down, columns from `w = 0`.
pub fn render(board: &Board, player_a: Player, player_b: Player) -> String {
    let mut out = String::new();
    out.push_str(&format!("Player {} with X\n", player_a.id()));
    out.push_str(&format!("Player {} with O\n", player_b.id()));
    out.push_str("\nBoard state by depth level:\n");

    for d in 0..board.depth() {
        out.push_str(&format!("\nDepth level {d}:\n"));
        out.push_str("    ");
        for w in 0..board.width() {
            out.push_str(&format!("{w:>4}"));
        }
        out.push('\n');

        for h in (0..board.height()).rev() {
            out.push_str(&format!("{h:>4}"));
            for w in 0..board.width() {
                let stone = board
                    .coord_to_move(Coord::new(d, h, w))
                    .and_then(|mv| board.cell(mv));
                let symbol = match stone {
                    Some(p) if p == player_a => "X",
                    Some(p) if p == player_b => "O",
                    _ => "_",
                };
                out.push_str(&format!("{symbol:^4}"));
            }
            out.push('\n');
        }
    }

    out
}
