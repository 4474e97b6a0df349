//! Interpreter quirks and the command line options shared by the frontends.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use structopt::StructOpt;

pub const DEFAULT_CYCLES_PER_FRAME: u32 = 9;
pub const DEFAULT_FRAME_MILLIS: u64 = 16;

/// What `8XYE` stores in VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftFlag {
    /// The shifted out bit as it sits in the byte, 0 or 0x80.
    Raw,
    /// The shifted out bit as 0 or 1.
    Normalized,
}

/// What happens to a key after it decided an `EX9E` or `EXA1` skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRelease {
    /// The key is released by the interpreter, so each press is seen once.
    Edge,
    /// The key stays down until the input device says otherwise.
    Level,
}

/// Where `FX29` points `I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontGlyphs {
    /// `I = VX * 5`.
    Unoffset,
    /// `I = 0x050 + (VX & 0xF) * 5`, the glyph inside the loaded font.
    FontRegion,
}

/// Behaviors that differ between CHIP-8 interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub shift_flag: ShiftFlag,
    pub key_release: KeyRelease,
    pub font_glyphs: FontGlyphs,
    /// Whether `FX55`/`FX65` leave `I` pointing past the last register, as the COSMAC VIP did.
    pub load_store_increment: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            shift_flag: ShiftFlag::Raw,
            key_release: KeyRelease::Edge,
            font_glyphs: FontGlyphs::Unoffset,
            load_store_increment: false,
        }
    }
}

/// A display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb {
            r: 121,
            g: 125,
            b: 98,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected three comma separated values like `121,125,98`, got `{0}`")]
    WrongArity(String),

    #[error("color component `{0}` is not an integer between 0 and 255")]
    Component(String),
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split(',').map(str::trim).collect();
        if components.len() != 3 {
            return Err(ColorParseError::WrongArity(s.to_string()));
        }

        let parse = |component: &str| {
            component
                .parse::<u8>()
                .map_err(|_| ColorParseError::Component(component.to_string()))
        };

        Ok(Rgb {
            r: parse(components[0])?,
            g: parse(components[1])?,
            b: parse(components[2])?,
        })
    }
}

/// Instructions per frame, at least one.
pub fn parse_cycles(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) => Err("cycle rate must be at least 1 instruction per frame".to_string()),
        Ok(cycles) => Ok(cycles),
        Err(_) => Err(format!("cycle rate `{}` is not a positive integer", s)),
    }
}

/// A frame period in whole milliseconds.
pub fn parse_millis(s: &str) -> Result<Duration, String> {
    s.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("delay `{}` is not a whole number of milliseconds", s))
}

/// The options every frontend understands.
#[derive(StructOpt, Debug)]
pub struct Options {
    /// The program to execute, or a directory of programs to choose from
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,

    /// Instructions executed per frame
    #[structopt(short = "t", long, default_value = "9", parse(try_from_str = parse_cycles))]
    pub cycles: u32,

    /// Milliseconds per frame. Timers count down once per frame
    #[structopt(short = "d", long, default_value = "16", parse(try_from_str = parse_millis))]
    pub delay: Duration,

    /// Keep keys pressed after a key skip instruction has seen them
    #[structopt(long)]
    pub level_triggered_keys: bool,

    /// Store the bit shifted out by 8XYE as 0 or 1 instead of 0 or 0x80
    #[structopt(long)]
    pub normalized_shift_flag: bool,

    /// Point FX29 at the glyph inside the font at 0x050. Without this, FX29 points
    /// below 0x050 where memory is zeroed, so hex digits such as scores draw blank
    #[structopt(long)]
    pub font_region_glyphs: bool,

    /// Advance I past the registers stored or loaded by FX55 and FX65
    #[structopt(long)]
    pub load_store_increment: bool,

    /// Seed for the random number generator
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Options {
    pub fn quirks(&self) -> Quirks {
        Quirks {
            shift_flag: if self.normalized_shift_flag {
                ShiftFlag::Normalized
            } else {
                ShiftFlag::Raw
            },
            key_release: if self.level_triggered_keys {
                KeyRelease::Level
            } else {
                KeyRelease::Edge
            },
            font_glyphs: if self.font_region_glyphs {
                FontGlyphs::FontRegion
            } else {
                FontGlyphs::Unoffset
            },
            load_store_increment: self.load_store_increment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("121,125,98" => Ok(Rgb { r: 121, g: 125, b: 98 }) ; "default color")]
    #[test_case("0, 255, 7" => Ok(Rgb { r: 0, g: 255, b: 7 }) ; "spaces are allowed")]
    #[test_case("1,2" => Err(ColorParseError::WrongArity("1,2".to_string())) ; "too few")]
    #[test_case("1,2,3,4" => Err(ColorParseError::WrongArity("1,2,3,4".to_string())) ; "too many")]
    #[test_case("1,256,3" => Err(ColorParseError::Component("256".to_string())) ; "out of range")]
    #[test_case("red,0,0" => Err(ColorParseError::Component("red".to_string())) ; "not a number")]
    fn parses_colors(s: &str) -> Result<Rgb, ColorParseError> {
        s.parse()
    }

    #[test]
    fn zero_cycles_are_rejected() {
        assert!(parse_cycles("0").is_err());
        assert!(parse_cycles("-3").is_err());
        assert_eq!(parse_cycles("12"), Ok(12));
    }

    #[test]
    fn delay_is_read_as_milliseconds() {
        assert_eq!(parse_millis("16"), Ok(Duration::from_millis(16)));
        assert!(parse_millis("fast").is_err());
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let options = Options::from_iter_safe(&["chip8", "game.ch8"]).unwrap();
        assert_eq!(options.input, PathBuf::from("game.ch8"));
        assert_eq!(options.cycles, DEFAULT_CYCLES_PER_FRAME);
        assert_eq!(options.delay, Duration::from_millis(DEFAULT_FRAME_MILLIS));
        assert_eq!(options.seed, None);
        assert_eq!(options.quirks(), Quirks::default());
    }

    #[test]
    fn quirk_flags_are_applied() {
        let options = Options::from_iter_safe(&[
            "chip8",
            "game.ch8",
            "--level-triggered-keys",
            "--normalized-shift-flag",
            "--font-region-glyphs",
            "--load-store-increment",
            "-t",
            "20",
            "-d",
            "5",
        ])
        .unwrap();
        assert_eq!(
            options.quirks(),
            Quirks {
                shift_flag: ShiftFlag::Normalized,
                key_release: KeyRelease::Level,
                font_glyphs: FontGlyphs::FontRegion,
                load_store_increment: true,
            }
        );
        assert_eq!(options.cycles, 20);
        assert_eq!(options.delay, Duration::from_millis(5));
    }

    #[test]
    fn help_explains_blank_digits_without_font_region_glyphs() {
        let mut help = Vec::new();
        Options::clap().write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains("--font-region-glyphs"));
        assert!(help.contains("zeroed"));
        assert!(help.contains("blank"));
    }

    #[test]
    fn invalid_cycle_rate_is_a_parse_error() {
        assert!(Options::from_iter_safe(&["chip8", "game.ch8", "-t", "0"]).is_err());
        assert!(Options::from_iter_safe(&["chip8", "game.ch8", "-d", "soon"]).is_err());
    }
}
