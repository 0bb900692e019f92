use std::{fs, path::Path};

use encoding_rs::SHIFT_JIS;

use crate::error::Error;
use crate::window::{WindowRow, WindowTable};

pub struct AsmFile {
    text: String,
}

impl AsmFile {
    pub fn open(path: &Path) -> Result<AsmFile, Error> {
        let data = fs::read(path)?;

        // Listings are Shift-JIS, undecodable sequences become U+FFFD.
        let (text, _, _) = SHIFT_JIS.decode(&data);

        Ok(AsmFile::from_text(text.into_owned()))
    }

    pub fn from_text(text: String) -> AsmFile {
        AsmFile { text }
    }

    /// Finds the first window table declared under `label`. With
    /// `skip_commented` set, lines carrying leading semicolons disqualify
    /// the block they would belong to.
    pub fn find_window(&self, label: &str, skip_commented: bool) -> Option<WindowTable> {
        let lines: Vec<&str> = self.text.lines().collect();

        for (i, line) in lines.iter().enumerate() {
            if !is_declaration(line, label) {
                continue;
            }
            if let Some(table) = parse_block(&lines[i + 1..], skip_commented) {
                return Some(table);
            }
        }

        None
    }
}

fn parse_block(lines: &[&str], skip_commented: bool) -> Option<WindowTable> {
    let mut pos = 0;

    // Window pointer entries may precede the data.
    while pos < lines.len() && is_pointer_line(lines[pos], skip_commented) {
        pos += 1;
    }

    let declared_height = parse_height_line(lines.get(pos)?, skip_commented)?;
    pos += 1;

    let mut rows: Vec<WindowRow> = Vec::new();
    while pos < lines.len() {
        let Some(line_rows) = parse_data_line(lines[pos], skip_commented) else {
            break;
        };
        rows.extend(line_rows);
        pos += 1;
    }

    if rows.is_empty() {
        return None;
    }

    Some(WindowTable {
        declared_height,
        rows,
    })
}

/// `<label> EQU $<free text>`, with the label at the start of the line.
fn is_declaration(line: &str, label: &str) -> bool {
    let line = line.trim_start_matches(';');
    let Some(rest) = line.strip_prefix(label) else {
        return false;
    };
    let Some(rest) = skip_blank(rest) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix("EQU") else {
        return false;
    };
    let Some(rest) = skip_blank(rest) else {
        return false;
    };

    rest.starts_with('$')
}

/// `WORD <symbol>+hhhhH+hhhhH`
fn is_pointer_line(line: &str, skip_commented: bool) -> bool {
    let Some(body) = keyword_body(line, "WORD", skip_commented) else {
        return false;
    };

    let symbol = body
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if symbol == 0 {
        return false;
    }

    let mut rest = &body[symbol..];
    for _ in 0..2 {
        let Some(r) = rest.strip_prefix('+') else {
            return false;
        };
        let Some((_, r)) = take_hex(r, 4) else {
            return false;
        };
        let Some(r) = r.strip_prefix('H') else {
            return false;
        };
        rest = r;
    }

    rest.is_empty()
}

/// `HEX hh` carrying the declared row count.
fn parse_height_line(line: &str, skip_commented: bool) -> Option<u8> {
    let body = keyword_body(line, "HEX", skip_commented)?;
    let (value, rest) = take_hex(body, 2)?;

    if !rest.is_empty() {
        return None;
    }

    Some(value as u8)
}

/// `HEX` followed by one to four coordinate quadruples and an optional
/// bracketed size annotation, which is ignored.
fn parse_data_line(line: &str, skip_commented: bool) -> Option<Vec<WindowRow>> {
    let body = keyword_body(line, "HEX", skip_commented)?;

    let mut rows = Vec::new();
    let mut rest = body;
    loop {
        let (row, r) = parse_quad(rest)?;
        rows.push(row);
        rest = r;

        // Up to two trailing separators after each quadruple.
        for _ in 0..2 {
            if let Some(r) = rest.strip_prefix(',') {
                rest = r.strip_prefix(' ').unwrap_or(r);
            }
        }

        if rest.is_empty() || is_annotation(rest) {
            return Some(rows);
        }
        if rows.len() == 4 {
            return None;
        }
    }
}

/// Four hex pairs `hh,hh,hh,hh`, with one optional space after the second
/// comma.
fn parse_quad(s: &str) -> Option<(WindowRow, &str)> {
    let (a, s) = hex_pair(s)?;
    let s = s.strip_prefix(',')?;
    let (b, s) = hex_pair(s)?;
    let s = s.strip_prefix(',')?;
    let s = s.strip_prefix(' ').unwrap_or(s);
    let (c, s) = hex_pair(s)?;
    let s = s.strip_prefix(',')?;
    let (d, s) = hex_pair(s)?;

    Some(([a, b, c, d], s))
}

/// Exactly two uppercase hex digits, as a byte.
fn hex_pair(s: &str) -> Option<(u8, &str)> {
    let (value, rest) = take_hex(s, 2)?;
    Some((value as u8, rest))
}

/// `;[hh]`
fn is_annotation(s: &str) -> bool {
    let Some(rest) = skip_blank(s) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(";[") else {
        return false;
    };

    match take_hex(rest, 2) {
        Some((_, rest)) => rest == "]",
        None => false,
    }
}

/// Leading blanks, the keyword, more blanks; comment markers before the
/// blanks per the comment rule.
fn keyword_body<'a>(line: &'a str, keyword: &str, skip_commented: bool) -> Option<&'a str> {
    let line = strip_comment(line, skip_commented)?;
    let rest = skip_blank(line)?;
    let rest = rest.strip_prefix(keyword)?;

    skip_blank(rest)
}

fn strip_comment(line: &str, skip_commented: bool) -> Option<&str> {
    if skip_commented && line.starts_with(';') {
        return None;
    }

    Some(line.trim_start_matches(';'))
}

/// Consumes one or more spaces or tabs.
fn skip_blank(s: &str) -> Option<&str> {
    let rest = s.trim_start_matches([' ', '\t']);
    if rest.len() == s.len() {
        return None;
    }

    Some(rest)
}

/// Exactly `n` uppercase hex digits.
fn take_hex(s: &str, n: usize) -> Option<(u32, &str)> {
    let digits = s.get(..n)?;
    if !digits
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    {
        return None;
    }

    Some((u32::from_str_radix(digits, 16).ok()?, &s[n..]))
}
