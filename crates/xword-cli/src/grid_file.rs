//! Plain-text grid files.
//!
//! One grid row per line. Blank lines and lines starting with `;` are
//! skipped. `.` is a black square, `-` a square with no letter, and any other
//! character a single letter. All rows must have the same width.

use xword_core::{Grid, Position, SquareError};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GridFileError {
    #[display("grid file has no rows")]
    Empty,
    #[display("row {row} has {found} squares, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("answers are {found_width}x{found_height}, grid is {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
    #[display("invalid square at column {col}, row {row}: {source}")]
    Square {
        col: usize,
        row: usize,
        source: SquareError,
    },
}

/// Parses a grid file into a grid holding the solution.
pub fn parse_solution(text: &str) -> Result<Grid, GridFileError> {
    let rows = rows(text)?;
    let mut grid = Grid::new(rows[0].len(), rows.len());
    for (pos, ch) in cells(&rows) {
        let square = &mut grid[pos];
        let result = match ch {
            '-' => square.set_solution(xword_core::square::BLANK),
            ch => square.set_solution(&ch.to_string()),
        };
        result.map_err(|source| square_error(pos, source))?;
    }
    Ok(grid)
}

/// Fills the player's entries of `grid` from a grid file of the same size.
///
/// Black squares in the answers are ignored.
pub fn parse_answers(text: &str, grid: &mut Grid) -> Result<(), GridFileError> {
    let rows = rows(text)?;
    let (found_width, found_height) = (rows[0].len(), rows.len());
    if (found_width, found_height) != (grid.width(), grid.height()) {
        return Err(GridFileError::SizeMismatch {
            width: grid.width(),
            height: grid.height(),
            found_width,
            found_height,
        });
    }
    for (pos, ch) in cells(&rows) {
        let result = match ch {
            '.' => continue,
            '-' => grid[pos].set_text(xword_core::square::BLANK),
            ch => grid[pos].set_text(&ch.to_string()),
        };
        result.map_err(|source| square_error(pos, source))?;
    }
    Ok(())
}

/// Formats a grid as a grid file, using `f` to pick each square's character.
pub fn format(grid: &Grid, f: impl Fn(&xword_core::Square) -> char) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        out.extend((0..grid.width()).map(|col| f(&grid[Position::new(col, row)])));
        out.push('\n');
    }
    out
}

fn rows(text: &str) -> Result<Vec<Vec<char>>, GridFileError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(|line| line.chars().collect())
        .collect();
    let expected = rows.first().ok_or(GridFileError::Empty)?.len();
    if let Some((row, found)) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != expected)
    {
        return Err(GridFileError::RaggedRow {
            row,
            expected,
            found,
        });
    }
    Ok(rows)
}

fn cells(rows: &[Vec<char>]) -> impl Iterator<Item = (Position, char)> + '_ {
    rows.iter().enumerate().flat_map(|(row, chars)| {
        chars
            .iter()
            .enumerate()
            .map(move |(col, &ch)| (Position::new(col, row), ch))
    })
}

fn square_error(pos: Position, source: SquareError) -> GridFileError {
    GridFileError::Square {
        col: pos.col(),
        row: pos.row(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; a comment
.AB

CDE
FG.
";

    #[test]
    fn test_parse_solution() {
        let grid = parse_solution(SAMPLE).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert!(grid[Position::new(0, 0)].is_black());
        assert_eq!(grid.solution_string("/"), ".AB/CDE/FG./");
    }

    #[test]
    fn test_blank_solution() {
        let grid = parse_solution("A-\n-B\n").unwrap();
        assert!(grid[Position::new(1, 0)].is_solution_blank());
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            parse_solution("ABC\nAB\n"),
            Err(GridFileError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(parse_solution("; nothing\n\n"), Err(GridFileError::Empty)));
    }

    #[test]
    fn test_invalid_square() {
        assert!(matches!(
            parse_solution("A!\n"),
            Err(GridFileError::Square { col: 1, row: 0, .. })
        ));
    }

    #[test]
    fn test_parse_answers() {
        let mut grid = parse_solution(SAMPLE).unwrap();
        parse_answers(".AX\nC-E\nFG.\n", &mut grid).unwrap();
        assert_eq!(grid.check_grid(false, false), [Position::new(2, 0)]);
        assert_eq!(
            grid.check_grid(true, false),
            [Position::new(2, 0), Position::new(1, 1)]
        );

        assert!(matches!(
            parse_answers("AB\n", &mut grid),
            Err(GridFileError::SizeMismatch { found_width: 2, .. })
        ));
    }

    #[test]
    fn test_format() {
        let grid = parse_solution(SAMPLE).unwrap();
        let text = format(&grid, |sq| if sq.is_black() { '#' } else { '_' });
        assert_eq!(text, "#__\n___\n__#\n");
    }
}
