//! Line evaluation: how many rows, columns, and diagonals a selection
//! has fully marked.

use crate::{SIDE, Selection};

/// Counts completed lines on a selection: 5 rows, 5 columns, the main
/// diagonal, and the anti-diagonal. Games end at 5 lines, well short of
/// the 12 a fully marked board would score.
///
/// Always recomputed from scratch. One claim can finish several lines at
/// once (a corner cell may complete a row, a column, and a diagonal in
/// the same move), so there is deliberately no incremental counting.
pub fn count_lines(selection: &Selection) -> u8 {
    let cells = selection.cells();
    let mut lines = 0;

    for row in 0..SIDE {
        if (0..SIDE).all(|col| cells[row * SIDE + col]) {
            lines += 1;
        }
    }
    for col in 0..SIDE {
        if (0..SIDE).all(|row| cells[row * SIDE + col]) {
            lines += 1;
        }
    }
    if (0..SIDE).all(|i| cells[i * SIDE + i]) {
        lines += 1;
    }
    if (0..SIDE).all(|i| cells[i * SIDE + (SIDE - 1 - i)]) {
        lines += 1;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CELLS;

    fn selection_with(marked: &[usize]) -> Selection {
        let mut sel = Selection::new();
        for &i in marked {
            sel.mark(i);
        }
        sel
    }

    #[test]
    fn test_empty_selection_has_zero_lines() {
        assert_eq!(count_lines(&Selection::new()), 0);
    }

    #[test]
    fn test_full_selection_completes_every_structure() {
        // 5 rows + 5 columns + 2 diagonals.
        let sel = selection_with(&(0..CELLS).collect::<Vec<_>>());
        assert_eq!(count_lines(&sel), 12);
    }

    #[test]
    fn test_each_row() {
        for row in 0..SIDE {
            let cells: Vec<usize> = (0..SIDE).map(|col| row * SIDE + col).collect();
            assert_eq!(count_lines(&selection_with(&cells)), 1, "row {row}");
        }
    }

    #[test]
    fn test_each_column() {
        for col in 0..SIDE {
            let cells: Vec<usize> = (0..SIDE).map(|row| row * SIDE + col).collect();
            assert_eq!(count_lines(&selection_with(&cells)), 1, "col {col}");
        }
    }

    #[test]
    fn test_diagonals() {
        let main: Vec<usize> = (0..SIDE).map(|i| i * SIDE + i).collect();
        assert_eq!(count_lines(&selection_with(&main)), 1);

        let anti: Vec<usize> = (0..SIDE).map(|i| i * SIDE + (SIDE - 1 - i)).collect();
        assert_eq!(count_lines(&selection_with(&anti)), 1);
    }

    #[test]
    fn test_four_in_a_row_is_not_a_line() {
        assert_eq!(count_lines(&selection_with(&[0, 1, 2, 3])), 0);
    }

    #[test]
    fn test_one_mark_can_complete_several_lines() {
        // Row 0 and column 0 both missing only the corner cell 0.
        let mut cells: Vec<usize> = (1..SIDE).collect(); // rest of row 0
        cells.extend((1..SIDE).map(|row| row * SIDE)); // rest of col 0
        let mut sel = selection_with(&cells);
        assert_eq!(count_lines(&sel), 0);

        sel.mark(0);
        assert_eq!(count_lines(&sel), 2);
    }

    #[test]
    fn test_count_is_pure_and_idempotent() {
        let sel = selection_with(&[0, 1, 2, 3, 4, 6, 12, 18, 24]);
        let first = count_lines(&sel);
        assert_eq!(count_lines(&sel), first);
        assert_eq!(count_lines(&sel), first);
    }
}
