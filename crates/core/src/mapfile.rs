//! Plain-text height-map parsing for initial board setup.
//! The grammar: one row of digits per line, each digit the tile-column height
//! at that cell; blank lines and lines containing `#` are skipped; interior
//! spaces are stripped.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapData {
    /// Height per `(x, z)` cell. Zero heights are recorded as holes.
    pub heights: BTreeMap<(i32, i32), u32>,
    pub width: i32,
    pub depth: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapFileError {
    BadHeightDigit { row: usize, column: usize, found: char },
}

pub fn parse_height_map(text: &str) -> Result<MapData, MapFileError> {
    let mut heights = BTreeMap::new();
    let mut width = 0;
    let mut z = 0;

    for line in text.lines() {
        if line.trim().is_empty() || line.contains('#') {
            continue;
        }
        let mut x = 0;
        for character in line.chars().filter(|character| *character != ' ') {
            let height = character
                .to_digit(10)
                .ok_or(MapFileError::BadHeightDigit { row: z as usize, column: x as usize, found: character })?;
            heights.insert((x, z), height);
            x += 1;
        }
        width = width.max(x);
        z += 1;
    }

    Ok(MapData { heights, width, depth: z })
}
