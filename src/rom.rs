//! Getting programs off the disk.

use crate::emulator::error::LoadError;
use crate::emulator::memory::MAX_PROGRAM_SIZE;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Read a program, refusing anything that would not fit above 0x200.
pub fn read_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    let program = fs::read(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if program.len() > MAX_PROGRAM_SIZE {
        return Err(LoadError::TooLarge {
            size: program.len(),
            max_size: MAX_PROGRAM_SIZE,
        });
    }

    log::info!("Read {} bytes from {:?}", program.len(), path);
    Ok(program)
}

/// The files directly inside `dir`, sorted by name.
pub fn list_roms(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut roms = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            roms.push(path);
        }
    }
    roms.sort();
    Ok(roms)
}

/// Ask which of `roms` to run until a valid answer is given.
/// Returns `None` if the user gives up with `q`, an empty line, or end of input.
pub fn select_rom<R: BufRead, W: Write>(
    roms: &[PathBuf],
    mut input: R,
    mut output: W,
) -> io::Result<Option<PathBuf>> {
    writeln!(output, "Select a game, or press enter to quit")?;
    for (index, rom) in roms.iter().enumerate() {
        let name = rom.file_name().unwrap_or_else(|| rom.as_os_str());
        writeln!(output, "[{}]\t{}", index, name.to_string_lossy())?;
    }

    let mut line = String::new();
    loop {
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(index) if index < roms.len() => return Ok(Some(roms[index].clone())),
            _ => writeln!(
                output,
                "Enter a number between 0 and {}",
                roms.len().saturating_sub(1)
            )?,
        }
    }
}
