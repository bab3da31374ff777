use chrono::{DateTime, Utc};
use sweeper_core::*;

pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn title(difficulty: Difficulty) -> String {
    format!("Minesweeper - {}", difficulty)
}

pub fn status_line(board: &Board, now: DateTime<Utc>) -> String {
    format!(
        "Mines: {}  Time: {}",
        board.remaining_mine_count(),
        format_time(board.elapsed_seconds(now))
    )
}

fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count),
        CellView::TriggeredMine => '@',
        CellView::Mine => '*',
        CellView::Misflagged => 'X',
    }
}

/// Text grid with row and column indices along the edges.
pub fn grid(board: &Board) -> String {
    let (rows, cols) = board.size();
    let width = (rows.max(cols) - 1).to_string().len();

    let header: String = (0..cols).map(|col| format!(" {:>width$}", col)).collect();
    let mut out = format!("{:width$}{}\n", "", header);
    for row in 0..rows {
        let cells: String = (0..cols)
            .map(|col| {
                let view = board.cell_view((row, col)).unwrap_or(CellView::Hidden);
                format!(" {:>width$}", glyph(view))
            })
            .collect();
        out.push_str(&format!("{:>width$}{}\n", row, cells));
    }
    out
}

pub fn scores(scores: &HighScores) -> String {
    let mut out = String::new();
    for difficulty in Difficulty::ALL {
        out.push_str(&format!("{}:\n", difficulty));
        let entries = scores.top_entries(difficulty, MAX_ENTRIES);
        if entries.is_empty() {
            out.push_str("  No scores yet!\n");
        }
        for (rank, &seconds) in entries.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", rank + 1, format_time(seconds)));
        }
    }
    out
}

pub fn rejection(reason: Rejection) -> &'static str {
    match reason {
        Rejection::OutOfBounds => "That cell is off the board",
        Rejection::GameOver => "The game is over, type n for a new one",
        Rejection::AlreadyRevealed => "That cell is already open",
        Rejection::Flagged => "Unflag that cell before revealing it",
        Rejection::FlagLimit => "No flags left",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn grid_shows_what_the_player_knows() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 2)]).unwrap();
        let mut board = Board::from_layout(layout);
        board.toggle_flag((1, 2));
        board.reveal_at((0, 0), DateTime::<Utc>::UNIX_EPOCH);

        assert_eq!(grid(&board), "  0 1 2\n0 . 1 #\n1 . 1 F\n");
    }

    #[test]
    fn wide_grid_pads_every_column() {
        let mut board = Board::from_layout(MineLayout::from_mine_coords((1, 11), &[]).unwrap());
        board.reveal_at((0, 0), DateTime::<Utc>::UNIX_EPOCH);

        let text = grid(&board);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "    0  1  2  3  4  5  6  7  8  9 10");
        assert_eq!(lines[1], format!(" 0{}", "  .".repeat(11)));
    }

    #[test]
    fn lost_grid_shows_mines() {
        let layout = MineLayout::from_mine_coords((1, 3), &[(0, 0), (0, 2)]).unwrap();
        let mut board = Board::from_layout(layout);
        board.reveal_at((0, 2), DateTime::<Utc>::UNIX_EPOCH);

        assert_eq!(grid(&board), "  0 1 2\n0 * # @\n");
    }

    #[test]
    fn empty_tiers_have_a_placeholder() {
        let mut ledger = Ledger::load(MemoryStore::default());
        ledger.record(Difficulty::Expert, 125);

        let text = scores(ledger.scores());

        assert_eq!(
            text,
            "Beginner:\n  No scores yet!\nIntermediate:\n  No scores yet!\nExpert:\n   1. 02:05\n"
        );
    }
}
