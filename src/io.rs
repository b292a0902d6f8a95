use std::str::{self, FromStr};

use crate::error::{Error, Result};

pub trait InputStream {
    fn token(&mut self) -> Option<&[u8]>;

    fn value<T: FromStr>(&mut self, what: &'static str) -> Result<T> {
        let token = self.token().ok_or(Error::UnexpectedEof(what))?;
        let invalid = || Error::InvalidToken {
            token: String::from_utf8_lossy(token).into_owned(),
            what,
        };
        let token = str::from_utf8(token).map_err(|_| invalid())?;
        token.parse::<T>().map_err(|_| invalid())
    }

    fn vec<T: FromStr>(&mut self, n: usize, what: &'static str) -> Result<Vec<T>> {
        (0..n).map(|_| self.value(what)).collect()
    }
}

// cheap whitespace check
fn is_whitespace(c: u8) -> bool {
    c <= b' '
}

impl InputStream for &[u8] {
    fn token(&mut self) -> Option<&[u8]> {
        let idx = self.iter().position(|&c| !is_whitespace(c))?;
        *self = &self[idx..];
        let idx = self
            .iter()
            .position(|&c| is_whitespace(c))
            .unwrap_or(self.len());
        let (token, buf_new) = self.split_at(idx);
        *self = buf_new;
        Some(token)
    }
}
