//! Line and indentation engine shared by expression and operator rendering.
//!
//! Output is built in a single pass. Newlines are requested lazily with
//! `ret` and only materialize when more text follows, so closing a block
//! never leaves a trailing blank line. Nesting goes through `block` and
//! `branch`, which always restore the indent they added.

use std::fmt::{self, Write as _};

pub(crate) struct Canon {
    buf: String,
    tab: usize,
    indent: usize,
    need_ret: bool,
    /// Suppresses the `| ` chain marker for the next operator line.
    head: bool,
}

impl Canon {
    pub(crate) fn new(tab: usize) -> Self {
        Self {
            buf: String::new(),
            tab,
            indent: 0,
            need_ret: false,
            head: true,
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.flush();
        self.buf.push_str(s);
    }

    pub(crate) fn write_args(&mut self, args: fmt::Arguments<'_>) {
        self.flush();
        // Writing into a String cannot fail.
        let _ = self.buf.write_fmt(args);
    }

    /// Request a line break before the next write.
    pub(crate) fn ret(&mut self) {
        self.need_ret = true;
    }

    /// Request a line break unless nothing has been written yet.
    pub(crate) fn start_line(&mut self) {
        if !self.buf.is_empty() {
            self.ret();
        }
    }

    fn flush(&mut self) {
        if self.need_ret {
            self.newline();
        }
    }

    fn newline(&mut self) {
        self.need_ret = false;
        self.buf.push('\n');
        self.pad();
    }

    fn pad(&mut self) {
        self.buf.extend(std::iter::repeat(' ').take(self.indent));
    }

    /// Begin the line of the next operator in the current pipeline.
    pub(crate) fn next(&mut self) {
        if self.buf.is_empty() {
            self.need_ret = false;
            self.pad();
        } else {
            self.newline();
        }
        if self.head {
            self.head = false;
        } else {
            self.buf.push_str("| ");
        }
    }

    /// Render `body` one nesting level deeper.
    pub(crate) fn block<F: FnOnce(&mut Self)>(&mut self, body: F) {
        self.indent += self.tab;
        body(self);
        self.indent -= self.tab;
    }

    /// Render a nested pipeline whose first operator starts a fresh chain.
    pub(crate) fn branch<F: FnOnce(&mut Self)>(&mut self, body: F) {
        self.block(|c| {
            c.head = true;
            body(c);
            c.head = false;
        });
    }

    /// Consume the engine; a pending line break is dropped.
    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
