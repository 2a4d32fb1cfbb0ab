use std::io::{self, Write};

/// Writer adapter that emits one blank line before the first byte it forwards.
///
/// Keeps a hook's output visually apart from whatever the server printed
/// before it. Nothing is written if nothing is forwarded.
#[derive(Debug)]
pub struct Separated<W> {
    inner: W,
    separated: bool,
}

impl<W: Write> Separated<W> {
    pub fn new(inner: W) -> Self {
        Separated {
            inner,
            separated: false,
        }
    }

    /// Whether the separator has been written yet.
    #[cfg(test)]
    pub(crate) fn is_separated(&self) -> bool {
        self.separated
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for Separated<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.separated {
            self.inner.write_all(b"\n")?;
            self.separated = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
