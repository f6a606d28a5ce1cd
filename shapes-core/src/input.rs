/// Keyboard input: the keys the viewer reacts to, their effect on the
/// orientation, and a small textual format for scripted key presses
use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, u32 as decimal},
    combinator::opt,
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult, Offset,
};
use thiserror::Error;

use crate::transform::{Orientation, ROTATION_STEP, TRANSLATION_STEP};

/// Largest `*N` a key script accepts for a single key
pub const MAX_REPEAT: u32 = 1000;

/// A key the viewer responds to. Anything else the platform delivers is
/// simply not mapped to a `Key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    W,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::W,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::PageUp => "pageup",
            Key::PageDown => "pagedown",
            Key::Home => "home",
            Key::W => "w",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = KeyScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            "home" => Key::Home,
            "w" => Key::W,
            _ => return Err(KeyScriptError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

impl Orientation {
    /// Apply one key press. Every mapped key counts as a change and the
    /// caller repaints after it, Home included.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Left => self.rotate_y -= ROTATION_STEP,
            Key::Right => self.rotate_y += ROTATION_STEP,
            Key::Down => self.rotate_x += ROTATION_STEP,
            Key::Up => self.rotate_x -= ROTATION_STEP,
            Key::PageUp => self.rotate_z += ROTATION_STEP,
            Key::PageDown => self.rotate_z -= ROTATION_STEP,
            Key::Home => self.reset_rotation(),
            Key::W => self.translate_x += TRANSLATION_STEP,
        }
        log::trace!("{} -> {:?}", key, self);
    }

    pub fn apply_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.apply(key);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyScriptError {
    #[error("unknown key `{0}` (expected left, right, up, down, pageup, pagedown, home or w)")]
    UnknownKey(String),
    #[error("unexpected `{rest}` at offset {offset} in key script")]
    Syntax { offset: usize, rest: String },
    #[error("repeat count {count} at offset {offset} exceeds {}", MAX_REPEAT)]
    RepeatTooLarge { offset: usize, count: u32 },
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn key_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

fn repeat(input: &str) -> IResult<&str, u32> {
    preceded(char('*'), decimal)(input)
}

fn step(input: &str) -> IResult<&str, (&str, Option<u32>)> {
    pair(key_name, opt(repeat))(input)
}

fn script(input: &str) -> IResult<&str, Vec<(&str, Option<u32>)>> {
    let (input, _) = take_while(is_separator)(input)?;
    let (input, steps) = separated_list0(take_while1(is_separator), step)(input)?;
    let (input, _) = take_while(is_separator)(input)?;
    Ok((input, steps))
}

/// Parse a key script such as `"up*6, left w home"`.
///
/// Names are case-insensitive and separated by whitespace or commas; a
/// `*N` suffix repeats the key N times, up to [`MAX_REPEAT`].
pub fn parse_key_script(input: &str) -> Result<Vec<Key>, KeyScriptError> {
    let (rest, steps) = script(input).map_err(|_| KeyScriptError::Syntax {
        offset: 0,
        rest: input.to_string(),
    })?;

    if !rest.is_empty() {
        return Err(KeyScriptError::Syntax {
            offset: input.len() - rest.len(),
            rest: rest.to_string(),
        });
    }

    let mut keys = Vec::new();
    for (name, count) in steps {
        let key: Key = name.parse()?;
        let count = count.unwrap_or(1);
        if count > MAX_REPEAT {
            return Err(KeyScriptError::RepeatTooLarge {
                offset: input.offset(name),
                count,
            });
        }
        keys.extend(std::iter::repeat(key).take(count as usize));
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_key_pairs() {
        let pairs = [
            (Key::Left, Key::Right),
            (Key::Up, Key::Down),
            (Key::PageUp, Key::PageDown),
        ];
        for (a, b) in pairs {
            let mut state = Orientation::default();
            let before = state;
            state.apply(a);
            assert_ne!(state, before);
            state.apply(b);
            assert_eq!(state, before, "{} then {}", a, b);
        }
    }

    #[test]
    fn test_each_key_moves_its_axis() {
        let base = Orientation::default();
        let cases = [
            (Key::Left, (15.0, -30.0, 0.0)),
            (Key::Right, (15.0, 0.0, 0.0)),
            (Key::Down, (30.0, -15.0, 0.0)),
            (Key::Up, (0.0, -15.0, 0.0)),
            (Key::PageUp, (15.0, -15.0, 15.0)),
            (Key::PageDown, (15.0, -15.0, -15.0)),
        ];
        for (key, expected) in cases {
            let mut state = base;
            state.apply(key);
            assert_eq!((state.rotate_x, state.rotate_y, state.rotate_z), expected, "{}", key);
        }
    }

    #[test]
    fn test_home_resets_rotation_only() {
        let mut state = Orientation::default();
        state.apply_all([Key::Left, Key::PageUp, Key::Down, Key::W, Key::W]);
        state.translate_y = 7.0;

        state.apply(Key::Home);
        assert_eq!((state.rotate_x, state.rotate_y, state.rotate_z), (0.0, 0.0, 0.0));
        assert_eq!(state.translate_x, 30.0);
        assert_eq!(state.translate_y, 7.0);
    }

    #[test]
    fn test_w_accumulates_translation() {
        for n in 0..10 {
            let mut state = Orientation::default();
            state.apply_all(std::iter::repeat(Key::W).take(n));
            assert_eq!(state.translate_x, 15.0 * n as f64);
        }
    }

    #[test]
    fn test_up_six_times() {
        let mut state = Orientation::default();
        state.apply_all([Key::Up; 6]);
        assert_eq!(state.rotate_x, -75.0);
        assert_eq!(state.rotate_y, -15.0);
        assert_eq!(state.rotate_z, 0.0);
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
        assert_eq!("PgUp".parse::<Key>(), Ok(Key::PageUp));
        assert_eq!("PGDN".parse::<Key>(), Ok(Key::PageDown));
    }

    #[test]
    fn test_parse_script_with_repeats() {
        let keys = parse_key_script(" up*3, Left  w\thome ").unwrap();
        assert_eq!(
            keys,
            vec![Key::Up, Key::Up, Key::Up, Key::Left, Key::W, Key::Home]
        );
    }

    #[test]
    fn test_parse_empty_script() {
        assert_eq!(parse_key_script(""), Ok(vec![]));
        assert_eq!(parse_key_script(" , "), Ok(vec![]));
    }

    #[test]
    fn test_parse_zero_repeat() {
        assert_eq!(parse_key_script("up*0 down"), Ok(vec![Key::Down]));
    }

    #[test]
    fn test_parse_repeat_limit() {
        let keys = parse_key_script("w*1000").unwrap();
        assert_eq!(keys.len(), MAX_REPEAT as usize);
        assert_eq!(
            parse_key_script("left up*4000000000"),
            Err(KeyScriptError::RepeatTooLarge {
                offset: 5,
                count: 4_000_000_000,
            })
        );
        assert!(matches!(
            parse_key_script("home*1001"),
            Err(KeyScriptError::RepeatTooLarge { offset: 0, count: 1001 })
        ));
    }

    #[test]
    fn test_parse_unknown_key() {
        assert_eq!(
            parse_key_script("up escape"),
            Err(KeyScriptError::UnknownKey("escape".to_string()))
        );
    }

    #[test]
    fn test_parse_syntax_error_offset() {
        assert_eq!(
            parse_key_script("up left;"),
            Err(KeyScriptError::Syntax {
                offset: 7,
                rest: ";".to_string(),
            })
        );
        assert!(matches!(
            parse_key_script("up*x"),
            Err(KeyScriptError::Syntax { offset: 2, .. })
        ));
    }
}
