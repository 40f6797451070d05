//! Tolerant multi-block PEM file reading
//!
//! Certificate bundles concatenate several PEM blocks in one file. This
//! reader surfaces every block in file order, whatever its label, for
//! callers that need to inspect raw blocks rather than feed a whole
//! bundle into a pool.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{GodrinkError, Result};

/// One decoded PEM block: the armor label and the decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    pub label: String,
    pub contents: Vec<u8>,
}

/// Decode every PEM block in the file at `path`, in file order.
///
/// All well-formed blocks are returned regardless of their label. An
/// unparsable trailing fragment ends the sequence without an error; a file
/// with no blocks at all yields an empty vec. Only an unreadable path is a
/// failure.
pub fn load_pem_file(path: impl AsRef<Path>) -> Result<Vec<PemBlock>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| GodrinkError::file_read(path, err))?;
    Ok(decode_blocks(&contents))
}

/// Scan `input` for armored blocks, decoding each in turn. Text outside
/// the armor is ignored; a malformed block stops the scan early.
fn decode_blocks(input: &str) -> Vec<PemBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in input.lines() {
        let line = line.trim();
        match &mut current {
            None => {
                if let Some(label) = armor_label(line, "BEGIN") {
                    current = Some((label.to_string(), String::new()));
                }
            }
            Some((label, body)) => {
                if let Some(end_label) = armor_label(line, "END") {
                    if end_label != label {
                        // Mismatched armor ends the sequence.
                        return blocks;
                    }
                    match BASE64.decode(body.as_bytes()) {
                        Ok(contents) => blocks.push(PemBlock {
                            label: std::mem::take(label),
                            contents,
                        }),
                        Err(_) => return blocks,
                    }
                    current = None;
                } else {
                    body.push_str(line);
                }
            }
        }
    }
    blocks
}

/// Extract the label from a `-----BEGIN X-----` / `-----END X-----` line.
fn armor_label<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.strip_prefix("-----")?
        .strip_suffix("-----")?
        .strip_prefix(marker)?
        .strip_prefix(' ')
}
