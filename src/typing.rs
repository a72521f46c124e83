//! Character-by-character text reveal followed by a blinking cursor.

use std::{io::Write, time::Duration};

#[derive(Debug, Clone)]
pub(crate) struct Typewriter {
    pub text: String,
    pub step: Duration,
    pub blink: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            text: "code, shield, repeat".to_string(),
            step: Duration::from_millis(80),
            blink: Duration::from_millis(600),
        }
    }
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Revealed text after each step, from the empty string to the full text.
    pub fn frames(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(0)
            .chain(self.text.char_indices().map(|(i, c)| i + c.len_utf8()))
            .map(|end| self.text[..end].to_string())
    }

    /// Cursor visibility, toggled every `blink`. Never ends.
    pub fn blink_states(&self) -> impl Iterator<Item = bool> {
        [true, false].into_iter().cycle()
    }

    /// Plays the animation on `out`, waiting through `sleep` between frames.
    pub fn play<W: Write>(
        &self,
        out: &mut W,
        blinks: usize,
        mut sleep: impl FnMut(Duration),
    ) -> std::io::Result<()> {
        for frame in self.frames() {
            write!(out, "\r{frame}")?;
            out.flush()?;
            sleep(self.step);
        }
        for visible in self.blink_states().take(blinks) {
            write!(out, "\r{}{}", self.text, if visible { "_" } else { " " })?;
            out.flush()?;
            sleep(self.blink);
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames() {
        let frames: Vec<String> = Typewriter::new("abc").frames().collect();
        assert_eq!(frames, vec!["", "a", "ab", "abc"]);
    }

    #[test]
    fn test_frames_multibyte() {
        let frames: Vec<String> = Typewriter::new("né").frames().collect();
        assert_eq!(frames, vec!["", "n", "né"]);
    }

    #[test]
    fn test_default() {
        let t = Typewriter::default();
        assert_eq!(t.frames().last().unwrap(), "code, shield, repeat");
        assert_eq!(t.frames().count(), t.text.chars().count() + 1);
        assert_eq!(t.step, Duration::from_millis(80));
        assert_eq!(t.blink, Duration::from_millis(600));
    }

    #[test]
    fn test_blink_states() {
        let states: Vec<bool> = Typewriter::default().blink_states().take(5).collect();
        assert_eq!(states, vec![true, false, true, false, true]);
    }

    #[test]
    fn test_play() {
        let t = Typewriter::new("hi");
        let mut out = vec![];
        let mut waits = vec![];
        t.play(&mut out, 2, |d| waits.push(d)).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\r\rh\rhi\rhi_\rhi \n");
        assert_eq!(
            waits,
            vec![
                Duration::from_millis(80),
                Duration::from_millis(80),
                Duration::from_millis(80),
                Duration::from_millis(600),
                Duration::from_millis(600),
            ]
        );
    }
}
