use std::str::FromStr;

use crate::Error;

/// Extension methods for path data bytes.
pub(crate) trait ByteExt {
    /// Checks if a byte is a numeric sign.
    fn is_sign(&self) -> bool;

    /// Checks if a byte is a digit.
    ///
    /// `[0-9]`
    fn is_digit(&self) -> bool;

    /// Checks if a byte is a space.
    ///
    /// `[ \r\n\t]`
    fn is_space(&self) -> bool;

    /// Checks if a byte is a space or a comma.
    fn is_separator(&self) -> bool;

    /// Checks if a byte can start a number.
    fn is_number_start(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_sign(&self) -> bool {
        matches!(*self, b'+' | b'-')
    }

    #[inline]
    fn is_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9')
    }

    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r')
    }

    #[inline]
    fn is_separator(&self) -> bool {
        self.is_space() || *self == b','
    }

    #[inline]
    fn is_number_start(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'.' | b'-' | b'+')
    }
}

/// A streaming text parsing interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the current position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Calculates the current position in chars.
    pub fn calc_char_pos(&self) -> usize {
        self.calc_char_pos_at(self.pos)
    }

    /// Calculates the position in chars for a byte position.
    pub fn calc_char_pos_at(&self, byte_pos: usize) -> usize {
        let mut pos = 1;
        for (idx, _) in self.text.char_indices() {
            if idx >= byte_pos {
                break;
            }

            pos += 1;
        }

        pos
    }

    /// Sets current position equal to the end.
    ///
    /// Used to indicate end of parsing on error.
    #[inline]
    pub fn jump_to_end(&mut self) {
        self.pos = self.text.len();
    }

    /// Checks if the stream is reached the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    #[inline]
    pub fn curr_byte(&self) -> Result<u8, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        Ok(self.curr_byte_unchecked())
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Panics
    ///
    /// - if the current position is after the end of the data
    #[inline]
    pub fn curr_byte_unchecked(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Checks that current byte is equal to provided.
    ///
    /// Returns `false` if no bytes left.
    #[inline]
    pub fn is_curr_byte_eq(&self, c: u8) -> bool {
        if !self.at_end() {
            self.curr_byte_unchecked() == c
        } else {
            false
        }
    }

    /// Advances by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Skips a single char.
    ///
    /// Unlike `advance(1)`, never stops inside a multi-byte char.
    pub fn skip_char(&mut self) {
        if let Some(c) = self.text[self.pos..].chars().next() {
            self.advance(c.len_utf8());
        }
    }

    /// Skips whitespaces.
    ///
    /// Accepted values: `' ' \n \r \t`.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_space() {
            self.advance(1);
        }
    }

    /// Skips whitespaces and commas.
    ///
    /// Both are interchangeable separators inside the path data.
    pub fn skip_separators(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_separator() {
            self.advance(1);
        }
    }

    /// Consumes bytes by the predicate.
    pub fn skip_bytes<F>(&mut self, f: F)
    where
        F: Fn(&Stream, u8) -> bool,
    {
        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if f(self, c) {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Skips digits.
    pub fn skip_digits(&mut self) {
        self.skip_bytes(|_, c| c.is_digit());
    }

    /// Slices data from `pos` to the current position.
    #[inline]
    pub fn slice_back(&self, pos: usize) -> &'a str {
        &self.text[pos..self.pos]
    }

    /// Slices data from the current position to the end.
    #[inline]
    pub fn slice_tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Parses a number from the stream.
    ///
    /// A number ends as soon as a char cannot continue it,
    /// so `10-6` is `10` followed by `-6` and `1.5.3` is `1.5` followed by `.3`.
    ///
    /// On error, the stream position is restored to the number start.
    ///
    /// # Errors
    ///
    /// - `InvalidNumber`
    pub fn parse_number(&mut self) -> Result<f64, Error> {
        self.skip_spaces();

        let start = self.pos();

        if self.at_end() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        match self.parse_number_impl() {
            Ok(n) => Ok(n),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    fn parse_number_impl(&mut self) -> Result<f64, Error> {
        let start = self.pos();

        let mut c = self.curr_byte()?;

        // Consume sign.
        if c.is_sign() {
            self.advance(1);
            c = self
                .curr_byte()
                .map_err(|_| Error::InvalidNumber(self.calc_char_pos_at(start)))?;
        }

        // Consume integer and fractional parts.
        let mut has_digits = false;
        if c.is_digit() {
            self.skip_digits();
            has_digits = true;
        }

        if self.is_curr_byte_eq(b'.') {
            self.advance(1);
            let frac_start = self.pos();
            self.skip_digits();
            has_digits |= self.pos() > frac_start;
        }

        if !has_digits {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        // Consume an exponent, but only when it's followed by actual digits.
        if let Ok(c) = self.curr_byte() {
            if matches!(c, b'e' | b'E') {
                let exp_start = self.pos();
                self.advance(1);

                if let Ok(c) = self.curr_byte() {
                    if c.is_sign() {
                        self.advance(1);
                    }
                }

                if self.curr_byte().map(|c| c.is_digit()).unwrap_or(false) {
                    self.skip_digits();
                } else {
                    self.pos = exp_start;
                }
            }
        }

        let s = self.slice_back(start);
        match f64::from_str(s) {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(Error::InvalidNumber(self.calc_char_pos_at(start))),
        }
    }

    /// Parses a number from a list of numbers.
    ///
    /// Skips the trailing separators.
    pub fn parse_list_number(&mut self) -> Result<f64, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        let n = self.parse_number()?;
        self.skip_separators();
        Ok(n)
    }

    /// Parses an arc flag.
    ///
    /// Consumes exactly one `0` or `1` char, regardless of what follows,
    /// so `012-3.9` is two flags followed by `2` and `-3.9`.
    ///
    /// # Errors
    ///
    /// - `InvalidFlag`
    /// - `UnexpectedEndOfStream`
    pub fn parse_flag(&mut self) -> Result<bool, Error> {
        self.skip_separators();

        let c = self.curr_byte()?;
        match c {
            b'0' | b'1' => {
                self.advance(1);
                Ok(c == b'1')
            }
            _ => Err(Error::InvalidFlag(self.calc_char_pos())),
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_number {
        ($name:ident, $text:expr, $n:expr, $tail:expr) => (
            #[test]
            fn $name() {
                let mut s = Stream::from($text);
                assert_eq!(s.parse_number().unwrap(), $n);
                assert_eq!(s.slice_tail(), $tail);
            }
        )
    }

    test_number!(number_1, "10", 10.0, "");
    test_number!(number_2, "-10", -10.0, "");
    test_number!(number_3, "+10", 10.0, "");
    test_number!(number_4, "10-6", 10.0, "-6");
    test_number!(number_5, "1.5.3", 1.5, ".3");
    test_number!(number_6, ".5", 0.5, "");
    test_number!(number_7, "-.5-1", -0.5, "-1");
    test_number!(number_8, "1e2", 100.0, "");
    test_number!(number_9, "1E-2 3", 0.01, " 3");
    test_number!(number_10, "5.", 5.0, "");
    // Not an exponent.
    test_number!(number_11, "1em", 1.0, "em");
    test_number!(number_12, "  7,8", 7.0, ",8");

    macro_rules! test_number_err {
        ($name:ident, $text:expr, $err:expr) => (
            #[test]
            fn $name() {
                let mut s = Stream::from($text);
                assert_eq!(s.parse_number().unwrap_err().to_string(), $err);
                // The position is restored.
                assert_eq!(s.slice_tail(), $text.trim_start());
            }
        )
    }

    test_number_err!(number_err_1, "-", "invalid number at position 1");
    test_number_err!(number_err_2, "-.", "invalid number at position 1");
    test_number_err!(number_err_3, "x", "invalid number at position 1");
    test_number_err!(number_err_4, " .e5", "invalid number at position 2");

    #[test]
    fn flags_without_separators() {
        let mut s = Stream::from("012-3.9");
        assert_eq!(s.parse_flag().unwrap(), false);
        assert_eq!(s.parse_flag().unwrap(), true);
        assert_eq!(s.parse_number().unwrap(), 2.0);
        assert_eq!(s.parse_number().unwrap(), -3.9);
        assert!(s.at_end());
    }

    #[test]
    fn number_list() {
        let mut s = Stream::from("1,2 -3, 4");
        assert_eq!(s.parse_list_number().unwrap(), 1.0);
        assert_eq!(s.parse_list_number().unwrap(), 2.0);
        assert_eq!(s.parse_list_number().unwrap(), -3.0);
        assert_eq!(s.parse_list_number().unwrap(), 4.0);
        assert!(s.at_end());
        assert_eq!(s.parse_list_number().unwrap_err(), Error::UnexpectedEndOfStream);
    }

    #[test]
    fn flag_with_separators() {
        let mut s = Stream::from(" , 1");
        assert_eq!(s.parse_flag().unwrap(), true);
    }

    #[test]
    fn invalid_flag() {
        let mut s = Stream::from("2");
        assert_eq!(s.parse_flag().unwrap_err(), Error::InvalidFlag(1));
    }

    #[test]
    fn skip_multibyte_char() {
        let mut s = Stream::from("é1");
        s.skip_char();
        assert_eq!(s.parse_number().unwrap(), 1.0);
    }
}
