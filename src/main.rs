mod asm_file;
mod bmp;
mod bytes_ext;
mod error;
mod pal;
mod window;

use std::{fs, path::PathBuf};

use clap::Parser;
use terminal_size::{terminal_size, Width};

use crate::{asm_file::AsmFile, error::Error, window::Canvas};

#[derive(Debug, Parser)]
#[command(
    name = "smw2-window-extract",
    about = "Converts a window table from a Yoshi's Island source code ASM file \
             to an ASCII art style text file, or optionally a BMP file, and \
             prints the result to the terminal if it fits.",
    after_help = "Examples:
  smw2-window-extract ys_play.asm.BAK1 CCHGD0
  smw2-window-extract ys_game.asm.BAK11 CHGDT4 -f O -b _ -o boo.txt
  smw2-window-extract ys_koopa.asm KOOPA_WINDOW_DT -f '*' -i
  smw2-window-extract ys_play.asm.BAK17 CCHGDN -c -m"
)]
struct Cli {
    /// Source file path
    infile: PathBuf,
    /// Label of the window table to convert
    label: String,
    /// Destination file path, default is "window-to-txt/<infile>-<label>.txt"
    #[arg(short, long)]
    outfile: Option<PathBuf>,
    /// Character to use for blank spaces, ignored with --bitmap
    #[arg(short, long, default_value = " ")]
    blankchar: String,
    /// Character to use for filled pixels, ignored with --bitmap
    #[arg(short, long, default_value = "X")]
    filledchar: String,
    /// Do not flip the output vertically, needed for certain images
    #[arg(short = 'i', long)]
    no_invert: bool,
    /// Ignore data blocks with semicolons at the start of their lines
    #[arg(short = 'c', long)]
    ignore_commented_out: bool,
    /// Write a 3-color bitmap image instead of a text file
    #[arg(short = 'm', long)]
    bitmap: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {}
        // A missing table ends the run without output, but is not an error.
        Err(e @ Error::WindowNotFound { .. }) => println!("{}", e),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let (blank, filled) = if cli.bitmap {
        (' ', 'X')
    } else {
        (
            single_char("blank", &cli.blankchar)?,
            single_char("filled", &cli.filledchar)?,
        )
    };

    let asm = AsmFile::open(&cli.infile)?;
    let table = asm
        .find_window(&cli.label, cli.ignore_commented_out)
        .ok_or_else(|| Error::WindowNotFound {
            label: cli.label.clone(),
            path: cli.infile.clone(),
        })?;

    if table.declared_height as usize != table.rows.len() {
        return Err(Error::HeightMismatch {
            declared: table.declared_height as usize,
            parsed: table.rows.len(),
        });
    }

    let canvas = window::render(&table, !cli.no_invert);

    print_if_fits(&canvas, blank, filled);

    let bytes = if cli.bitmap {
        bmp::encode(&canvas)?
    } else {
        canvas.to_text(blank, filled).into_bytes()
    };

    let out_path = output_path(cli);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&out_path, &bytes)?;

    if fs::metadata(&out_path)?.len() == bytes.len() as u64 {
        println!("Saved \"{}\"", out_path.display());
    }

    Ok(())
}

// Prints the rendered grid unless it would wrap in the terminal.
fn print_if_fits(canvas: &Canvas, blank: char, filled: char) {
    let columns = match terminal_size() {
        Some((Width(w), _)) => w as usize,
        None => 0,
    };

    if canvas.width > columns.saturating_sub(1) {
        println!("Output is too wide for the terminal window, so it will not be printed.");
        return;
    }

    for row in &canvas.rows {
        println!("{}", row.to_line(blank, filled));
    }
}

fn output_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.outfile {
        return path.clone();
    }

    let (dir, ext) = if cli.bitmap {
        ("window-to-bmp", "bmp")
    } else {
        ("window-to-txt", "txt")
    };

    PathBuf::from(format!(
        "{}/{}-{}.{}",
        dir,
        cli.infile.display(),
        cli.label,
        ext
    ))
}

fn single_char(name: &'static str, value: &str) -> Result<char, Error> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidCharArg {
            name,
            value: value.to_string(),
        }),
    }
}
