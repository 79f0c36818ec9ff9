//! Roster save files: a flat stream of little-endian character records.
//!
//! Per character, in order: name byte length (u32), name bytes, health
//! (i32), armor (i32), damage (i32), x (i32), y (i32), dead flag (u8),
//! player flag (u8). A record whose name length is zero terminates the
//! stream; the writer emits one as an end marker and the reader also accepts
//! a clean end of input in its place. The format carries no version tag.
//!
//! The dead flag is redundant here: health is the source of truth
//! everywhere else, so the writer emits the derived value and the reader
//! validates the byte and drops it.

use crate::character::Character;
use crate::grid::Position;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from reading or writing a roster stream.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("character #{index} has an empty name; a zero name length marks end of stream")]
    EmptyName { index: usize },

    #[error("name in record #{index} is not valid UTF-8")]
    BadName { index: usize },

    #[error("flag byte {value:#04x} in record #{index} is neither 0 nor 1")]
    BadFlag { index: usize, value: u8 },
}

/// Serialize `characters` in order, followed by the end marker.
///
/// An empty name is indistinguishable from the end marker on the wire, so
/// it is rejected before anything is written.
pub fn write_roster<W: Write>(writer: &mut W, characters: &[Character]) -> Result<(), PersistError> {
    if let Some(index) = characters.iter().position(|c| c.name.is_empty()) {
        return Err(PersistError::EmptyName { index });
    }

    for character in characters {
        let name = character.name.as_bytes();
        writer.write_all(&(name.len() as u32).to_le_bytes())?;
        writer.write_all(name)?;
        writer.write_all(&character.health.to_le_bytes())?;
        writer.write_all(&character.armor.to_le_bytes())?;
        writer.write_all(&character.damage.to_le_bytes())?;
        writer.write_all(&character.position.x.to_le_bytes())?;
        writer.write_all(&character.position.y.to_le_bytes())?;
        writer.write_all(&[u8::from(character.is_dead()), u8::from(character.is_player())])?;
    }
    writer.write_all(&0u32.to_le_bytes())?;
    Ok(())
}

/// Deserialize a roster stream back into characters, in stream order.
pub fn read_roster<R: Read>(reader: &mut R) -> Result<Vec<Character>, PersistError> {
    let mut characters = Vec::new();
    loop {
        let name_len = match read_record_len(reader)? {
            None | Some(0) => break,
            Some(len) => len as usize,
        };
        let index = characters.len();

        let mut name_bytes = vec![0u8; name_len];
        reader.read_exact(&mut name_bytes)?;
        let name =
            String::from_utf8(name_bytes).map_err(|_| PersistError::BadName { index })?;

        let health = read_i32(reader)?;
        let armor = read_i32(reader)?;
        let damage = read_i32(reader)?;
        let x = read_i32(reader)?;
        let y = read_i32(reader)?;
        let _dead = read_flag(reader, index)?;
        let is_player = read_flag(reader, index)?;

        characters.push(Character::from_parts(
            name,
            Position::new(x, y),
            is_player,
            health,
            armor,
            damage,
        ));
    }
    Ok(characters)
}

/// Write a roster to `path`. An existing file is replaced only on success
/// of the create; a failure is reported and nothing else changes.
pub fn save_roster(path: impl AsRef<Path>, characters: &[Character]) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_roster(&mut writer, characters)?;
    writer.flush()?;
    Ok(())
}

/// Read a roster from `path`. On failure the caller's in-memory roster is
/// simply left as it was.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Character>, PersistError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_roster(&mut reader)
}

/// Next record's name length, or `None` on a clean end of input.
fn read_record_len<R: Read>(reader: &mut R) -> Result<Option<u32>, PersistError> {
    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(u32::from_le_bytes(buf))),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, PersistError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_flag<R: Read>(reader: &mut R, index: usize) -> Result<bool, PersistError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    match buf[0] {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(PersistError::BadFlag { index, value }),
    }
}
