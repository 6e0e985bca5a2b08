//! Command-line tool for numbering, checking, checksumming, and scrambling
//! crossword grids.
//!
//! Grids are read from plain-text files, one row per line (see
//! [`grid_file`]).
//!
//! # Usage
//!
//! ```sh
//! xword number grid.txt
//! xword check grid.txt --answers answers.txt
//! xword checksum grid.txt --title "Daily" --clues clues.txt
//! xword scramble grid.txt --key 1234
//! xword unscramble scrambled.txt --key 1234 --checksum 0x1a2b
//! xword brute-force scrambled.txt --checksum 0x1a2b
//! ```
//!
//! Set `RUST_LOG=debug` to see why a scramble or checksum was refused.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use xword_core::{
    Direction, Grid, GridFlags,
    scramble::{MAX_KEY, MIN_KEY},
};
use xword_puz::{Checksummer, Puzzle, PuzzleError, encoding::DEFAULT_VERSION};

use crate::grid_file::GridFileError;

mod grid_file;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Number the grid and list the squares that start a word.
    Number {
        /// Grid file with the solution.
        file: PathBuf,
    },
    /// Check a player's answers against the solution.
    Check {
        /// Grid file with the solution.
        file: PathBuf,
        /// Grid file with the player's answers.
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
        /// Count blank squares as incorrect.
        #[arg(long)]
        check_blank: bool,
        /// Require rebus answers to match in full.
        #[arg(long)]
        strict_rebus: bool,
    },
    /// Compute the `.puz` header checksums.
    Checksum {
        /// Grid file with the solution.
        file: PathBuf,
        /// Grid file with the player's answers.
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,
        /// Clue file with one clue per line, in grid order.
        #[arg(long, value_name = "FILE")]
        clues: Option<PathBuf>,
        /// Puzzle title.
        #[arg(long)]
        title: Option<String>,
        /// Puzzle author.
        #[arg(long)]
        author: Option<String>,
        /// Puzzle copyright.
        #[arg(long)]
        copyright: Option<String>,
        /// Puzzle notes.
        #[arg(long)]
        notes: Option<String>,
        /// `.puz` format version times ten, e.g. 13 for 1.3.
        #[arg(long, default_value_t = DEFAULT_VERSION)]
        version: u16,
    },
    /// Scramble the solution.
    Scramble {
        /// Grid file with the solution.
        file: PathBuf,
        /// Four digit key; a random key is chosen if omitted.
        #[arg(long, value_parser = parse_key)]
        key: Option<u16>,
    },
    /// Unscramble a scrambled solution.
    Unscramble {
        /// Grid file with the scrambled solution.
        file: PathBuf,
        /// Four digit key.
        #[arg(long, value_parser = parse_key)]
        key: u16,
        /// Checksum of the unscrambled solution.
        #[arg(long, value_parser = parse_checksum)]
        checksum: u16,
    },
    /// Search every key for one that unscrambles the solution.
    BruteForce {
        /// Grid file with the scrambled solution.
        file: PathBuf,
        /// Checksum of the unscrambled solution.
        #[arg(long, value_parser = parse_checksum)]
        checksum: u16,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum Error {
    #[display("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("{_0}")]
    GridFile(#[from] GridFileError),
    #[display("{_0}")]
    Puzzle(#[from] PuzzleError),
    #[display("solution cannot be scrambled; run with RUST_LOG=debug for details")]
    Scramble,
    #[display("key {key} does not match checksum {checksum:#06x}")]
    Unscramble { key: u16, checksum: u16 },
    #[display("no key matches checksum {checksum:#06x}")]
    NoKey { checksum: u16 },
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Number { file } => number(&file),
        Command::Check {
            file,
            answers,
            check_blank,
            strict_rebus,
        } => check(&file, &answers, check_blank, strict_rebus),
        Command::Checksum {
            file,
            answers,
            clues,
            title,
            author,
            copyright,
            notes,
            version,
        } => {
            let mut puzzle = Puzzle::with_grid(read_grid(&file)?);
            puzzle.set_version(version);
            if let Some(answers) = answers {
                grid_file::parse_answers(&read(&answers)?, puzzle.grid_mut())?;
            }
            for (key, value) in [
                ("title", title),
                ("author", author),
                ("copyright", copyright),
                ("notes", notes),
            ] {
                if let Some(value) = value {
                    puzzle.set_meta(key, value);
                }
            }
            match clues {
                Some(clues) => puzzle.set_all_clues(read(&clues)?.lines())?,
                None => puzzle.grid_mut().number_grid(),
            }
            checksum(&puzzle)
        }
        Command::Scramble { file, key } => scramble(&file, key.unwrap_or(0)),
        Command::Unscramble {
            file,
            key,
            checksum,
        } => unscramble(&file, key, checksum),
        Command::BruteForce { file, checksum } => brute_force(&file, checksum),
    }
}

fn number(file: &Path) -> Result<(), Error> {
    let mut grid = read_grid(file)?;
    grid.number_grid();

    print!(
        "{}",
        grid_file::format(&grid, |sq| {
            if sq.is_black() {
                '#'
            } else if sq.has_number() {
                '*'
            } else {
                '.'
            }
        })
    );
    println!();

    for (title, dir) in [("Across", Direction::Across), ("Down", Direction::Down)] {
        println!("{title}:");
        for pos in grid.positions() {
            if !grid.wants_clue(pos, dir) {
                continue;
            }
            if let Some(word) = grid.word_at(pos, dir) {
                let answer: String = word
                    .positions()
                    .map(|p| char::from(grid[p].plain_solution()))
                    .collect();
                println!("  {:>3}. {answer} (at {pos})", grid[pos].number());
            }
        }
    }
    let (across, down) = grid.count_clues();
    log::info!("{across} across and {down} down clues");
    Ok(())
}

fn check(file: &Path, answers: &Path, check_blank: bool, strict_rebus: bool) -> Result<(), Error> {
    let mut grid = read_grid(file)?;
    grid_file::parse_answers(&read(answers)?, &mut grid)?;

    let incorrect = grid.check_grid(check_blank, strict_rebus);
    if incorrect.is_empty() {
        println!("All answers are correct.");
    } else {
        println!("{} incorrect square(s):", incorrect.len());
        for pos in incorrect {
            println!("  {pos}: {} (expected {})", grid[pos].text(), grid[pos].solution());
        }
    }
    Ok(())
}

fn checksum(puzzle: &Puzzle) -> Result<(), Error> {
    let checksummer = Checksummer::from_puzzle(puzzle)?;
    let checksums = checksummer.checksums();
    println!("CIB:     {:#06x}", checksums.cib);
    println!("Primary: {:#06x}", checksums.primary);
    let masked: Vec<_> = checksums.masked.iter().map(|b| format!("{b:02x}")).collect();
    println!("Masked:  {}", masked.join(" "));
    log::info!(
        "checksummed {} clues at version {}",
        checksummer.clues().len(),
        checksummer.version()
    );
    Ok(())
}

fn scramble(file: &Path, key: u16) -> Result<(), Error> {
    let mut grid = read_grid(file)?;
    if !grid.scramble_solution(key) {
        return Err(Error::Scramble);
    }
    print!("{}", grid.solution_string("\n"));
    println!();
    println!("Key:      {}", grid.key());
    println!("Checksum: {:#06x}", grid.checksum());
    Ok(())
}

fn unscramble(file: &Path, key: u16, checksum: u16) -> Result<(), Error> {
    let mut grid = read_scrambled_grid(file, checksum)?;
    if !grid.unscramble_solution(key) {
        return Err(Error::Unscramble { key, checksum });
    }
    print!("{}", grid.solution_string("\n"));
    Ok(())
}

fn brute_force(file: &Path, checksum: u16) -> Result<(), Error> {
    let grid = read_scrambled_grid(file, checksum)?;
    let search = grid.key_search();
    log::info!("trying {} keys", search.len());

    let mut keys: Vec<u16> = (MIN_KEY..=MAX_KEY)
        .into_par_iter()
        .filter(|&key| search.test_key(key))
        .collect();
    keys.sort_unstable();
    if keys.is_empty() {
        return Err(Error::NoKey { checksum });
    }

    for key in keys {
        let mut candidate = grid.clone();
        if candidate.unscramble_solution(key) {
            println!("Key {key}:");
            print!("{}", candidate.solution_string("\n"));
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

fn read_grid(path: &Path) -> Result<Grid, Error> {
    let grid = grid_file::parse_solution(&read(path)?)?;
    log::info!("read {}x{} grid from {}", grid.width(), grid.height(), path.display());
    Ok(grid)
}

fn read_scrambled_grid(path: &Path, checksum: u16) -> Result<Grid, Error> {
    let mut grid = read_grid(path)?;
    grid.set_flags(grid.flags() | GridFlags::SCRAMBLED);
    grid.set_checksum(checksum);
    Ok(grid)
}

fn parse_key(s: &str) -> Result<u16, String> {
    let key: u16 = s.parse().map_err(|err| format!("{err}"))?;
    if (MIN_KEY..=MAX_KEY).contains(&key) {
        Ok(key)
    } else {
        Err(format!("key must be between {MIN_KEY} and {MAX_KEY}"))
    }
}

fn parse_checksum(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|err| format!("{err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("1234"), Ok(1234));
        assert!(parse_key("999").is_err());
        assert!(parse_key("10000").is_err());
        assert!(parse_key("abcd").is_err());
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum("0x1a2B"), Ok(0x1a2b));
        assert_eq!(parse_checksum("6699"), Ok(6699));
        assert!(parse_checksum("0x10000").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["xword", "unscramble", "g.txt", "--key", "1234", "--checksum", "0xbeef"])
            .unwrap();
        assert!(matches!(
            args.command,
            Command::Unscramble {
                key: 1234,
                checksum: 0xbeef,
                ..
            }
        ));
        assert!(Args::try_parse_from(["xword", "scramble", "g.txt", "--key", "12"]).is_err());
    }

    #[test]
    fn test_scrambled_grid_round_trip() {
        let mut grid = grid_file::parse_solution("ABCD\nEFGH\nIJKL\nMNOP\n").unwrap();
        assert!(grid.scramble_solution(4321));
        let checksum = grid.checksum();
        let scrambled = grid.solution_string("\n");

        let mut reread = grid_file::parse_solution(&scrambled).unwrap();
        reread.set_flags(reread.flags() | GridFlags::SCRAMBLED);
        reread.set_checksum(checksum);
        assert!(reread.key_search().test_key(4321));
        assert!(reread.unscramble_solution(4321));
        assert_eq!(reread.solution_string(""), "ABCDEFGHIJKLMNOP");
    }
}
