use chrono::{DateTime, Datelike, Timelike};
use soroban_sdk::{Env, String};

pub const TEXT_CAP: usize = 384;

/// Fixed-capacity byte buffer used to build human-readable strings without
/// an allocator. Writes past the capacity are truncated.
pub struct TextBuf {
    buf: [u8; TEXT_CAP],
    len: usize,
}

impl TextBuf {
    pub fn new() -> Self {
        Self {
            buf: [0u8; TEXT_CAP],
            len: 0,
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let room = TEXT_CAP - self.len;
        let take = bytes.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
    }

    /// Appends `value` in decimal, left-padded with zeros to at least `width` digits.
    pub fn push_number(&mut self, value: u64, width: usize) {
        let mut digits = [b'0'; 20];
        let mut rest = value;
        let mut start = digits.len();
        while rest > 0 {
            start -= 1;
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        let used = digits.len() - start;
        let first = digits.len() - used.max(width.min(digits.len()));
        self.push_bytes(&digits[first..]);
    }

    /// Appends the bytes of a contract string.
    pub fn push_string(&mut self, value: &String) {
        let len = value.len() as usize;
        if len == 0 {
            return;
        }
        // copy_into_slice needs the exact length, so only strings that fit are copied.
        if len > TEXT_CAP {
            self.push_bytes(b"...");
            return;
        }
        let mut scratch = [0u8; TEXT_CAP];
        value.copy_into_slice(&mut scratch[..len]);
        self.push_bytes(&scratch[..len]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn to_string(&self, env: &Env) -> String {
        String::from_bytes(env, self.as_bytes())
    }
}

impl Default for TextBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a ledger timestamp (seconds since the Unix epoch) as RFC 3339 in UTC,
/// e.g. `2024-03-01T12:00:00Z`. Pure arithmetic; no clock is consulted.
pub fn format_rfc3339(env: &Env, timestamp: u64) -> String {
    let mut out = TextBuf::new();
    let parsed = i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    match parsed {
        Some(dt) => {
            out.push_number(u64::try_from(dt.year()).unwrap_or(0), 4);
            out.push_bytes(b"-");
            out.push_number(u64::from(dt.month()), 2);
            out.push_bytes(b"-");
            out.push_number(u64::from(dt.day()), 2);
            out.push_bytes(b"T");
            out.push_number(u64::from(dt.hour()), 2);
            out.push_bytes(b":");
            out.push_number(u64::from(dt.minute()), 2);
            out.push_bytes(b":");
            out.push_number(u64::from(dt.second()), 2);
            out.push_bytes(b"Z");
        }
        None => out.push_number(timestamp, 1),
    }

    out.to_string(env)
}
