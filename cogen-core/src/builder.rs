//! Line builder: the low-level text assembly machine.

use crate::rules::Rules;

/// Fluent API for assembling output line by line.
///
/// Text is collected as fragments of the current line. Indentation is
/// content-based: `shift` is the literal prefix written at the start of
/// every new line and grows by one `tab` per [`level_up`](Self::level_up).
///
/// Under `minify` every whitespace-only operation is a no-op, so the
/// builder emits the same token sequence with all cosmetic whitespace
/// removed.
///
/// # Example
///
/// ```
/// use cogen_core::LineBuilder;
///
/// let mut builder = LineBuilder::new("  ", false);
/// builder
///     .add("if (a === 1) {")
///     .level_up()
///     .add("return")
///     .level_down()
///     .add("}");
/// assert_eq!(builder.build(), "if (a === 1) {\n  return\n}");
/// ```
#[derive(Debug, Clone)]
pub struct LineBuilder {
    lines: Vec<Vec<String>>,
    line: Vec<String>,
    shift: String,
    shift_stack: Vec<String>,
    tab: String,
    tab_stack: Vec<String>,
    minify: bool,
}

impl LineBuilder {
    /// Create a builder with the given indentation unit.
    pub fn new(tab: impl Into<String>, minify: bool) -> Self {
        Self {
            lines: Vec::new(),
            line: Vec::new(),
            shift: String::new(),
            shift_stack: Vec::new(),
            tab: tab.into(),
            tab_stack: Vec::new(),
            minify,
        }
    }

    /// Create a builder configured by the top-level `tab` and `minify` rules.
    pub fn from_rules(rules: &Rules) -> Self {
        Self::new(rules.tab(), rules.minify())
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    /// Append a fragment to the current line.
    pub fn add(&mut self, part: impl Into<String>) -> &mut Self {
        self.line.push(part.into());
        self
    }

    /// Append optional whitespace; skipped when minifying.
    pub fn add_ws(&mut self, part: impl Into<String>) -> &mut Self {
        if !self.minify {
            self.line.push(part.into());
        }
        self
    }

    pub fn add_if(&mut self, condition: bool, part: impl Into<String>) -> &mut Self {
        if condition {
            self.line.push(part.into());
        }
        self
    }

    /// Append optional whitespace when `condition` holds and not minifying.
    pub fn add_ws_if(&mut self, condition: bool, part: impl Into<String>) -> &mut Self {
        if condition && !self.minify {
            self.line.push(part.into());
        }
        self
    }

    // =========================================================================
    // Indentation
    // =========================================================================

    /// Use `tab` as the indentation unit until the matching [`pop_tab`](Self::pop_tab).
    pub fn push_tab(&mut self, tab: impl Into<String>) -> &mut Self {
        if self.minify {
            return self;
        }
        let previous = std::mem::replace(&mut self.tab, tab.into());
        self.tab_stack.push(previous);
        self
    }

    /// # Panics
    ///
    /// Panics without a matching [`push_tab`](Self::push_tab).
    pub fn pop_tab(&mut self) -> &mut Self {
        if self.minify {
            return self;
        }
        self.tab = self
            .tab_stack
            .pop()
            .expect("pop_tab called without a matching push_tab");
        self
    }

    /// Terminate the current line and start a new one seeded with the shift.
    pub fn next_line(&mut self) -> &mut Self {
        self.next_line_with(true)
    }

    /// Terminate the current line; the new line starts empty unless `with_shift`.
    pub fn next_line_with(&mut self, with_shift: bool) -> &mut Self {
        if self.minify {
            return self;
        }
        let seed = if with_shift {
            self.shift.clone()
        } else {
            String::new()
        };
        let finished = std::mem::replace(&mut self.line, vec![seed]);
        self.lines.push(finished);
        self
    }

    pub fn next_line_if(&mut self, condition: bool) -> &mut Self {
        self.next_line_if_with(condition, true)
    }

    pub fn next_line_if_with(&mut self, condition: bool, with_shift: bool) -> &mut Self {
        if condition {
            self.next_line_with(with_shift);
        }
        self
    }

    /// Indent one level and move to the next line.
    pub fn level_up(&mut self) -> &mut Self {
        self.level_up_with(true)
    }

    /// Indent one level, moving to the next line only if `to_next`.
    pub fn level_up_with(&mut self, to_next: bool) -> &mut Self {
        if self.minify {
            return self;
        }
        let deeper = format!("{}{}", self.shift, self.tab);
        self.shift_stack.push(std::mem::replace(&mut self.shift, deeper));
        if to_next {
            self.next_line();
        }
        self
    }

    pub fn level_up_if(&mut self, condition: bool) -> &mut Self {
        self.level_up_if_with(condition, true)
    }

    pub fn level_up_if_with(&mut self, condition: bool, to_next: bool) -> &mut Self {
        if condition {
            self.level_up_with(to_next);
        }
        self
    }

    /// Outdent one level and move to the next line.
    pub fn level_down(&mut self) -> &mut Self {
        self.level_down_with(true)
    }

    /// Outdent one level.
    ///
    /// Without `to_next`, a current line that holds nothing but the shift
    /// being left is collapsed to the restored shift, so a closing bracket
    /// after an empty body lands at the outer depth.
    ///
    /// # Panics
    ///
    /// Panics without a matching level up or saved alignment.
    pub fn level_down_with(&mut self, to_next: bool) -> &mut Self {
        if self.minify {
            return self;
        }
        let left = self.restore_shift("level_down called without a matching level_up");
        if to_next {
            return self.next_line();
        }
        if self.join_line() == left {
            self.line = vec![self.shift.clone()];
        }
        self
    }

    /// Align following lines under the end of the current line.
    ///
    /// The shift grows by one space per character of the whole current
    /// line, indentation included.
    ///
    /// ```text
    /// let a = 1,
    ///     b = 2,
    ///     c = 3;
    /// ```
    pub fn save_alignment(&mut self) -> &mut Self {
        if self.minify {
            return self;
        }
        let width = self.join_line().chars().count();
        self.shift_stack.push(self.shift.clone());
        self.shift.push_str(&" ".repeat(width));
        self
    }

    /// # Panics
    ///
    /// Panics without a matching [`save_alignment`](Self::save_alignment).
    pub fn drop_alignment(&mut self) -> &mut Self {
        if self.minify {
            return self;
        }
        self.restore_shift("drop_alignment called without a matching save_alignment");
        self
    }

    /// Trim whitespace around the current line.
    pub fn clear_line(&mut self) -> &mut Self {
        let trimmed = self.join_line().trim().to_string();
        self.line = vec![trimmed];
        self
    }

    pub fn clear_line_if(&mut self, condition: bool) -> &mut Self {
        if condition {
            self.clear_line();
        }
        self
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Run `f` for every item, flagging the last one as the head.
    ///
    /// This is the "separator after all but the last" idiom:
    ///
    /// ```
    /// use cogen_core::LineBuilder;
    ///
    /// let mut builder = LineBuilder::new("  ", false);
    /// builder.do_for_tail_and_head([1, 2, 3], |b, value, is_head, _| {
    ///     b.add(value.to_string()).add_if(!is_head, ", ");
    /// });
    /// assert_eq!(builder.build(), "1, 2, 3");
    /// ```
    pub fn do_for_tail_and_head<T, I, F>(&mut self, items: I, mut f: F) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&mut Self, T, bool, usize),
    {
        for (item, is_head, index) in tail_and_head(items) {
            f(self, item, is_head, index);
        }
        self
    }

    /// Like [`do_for_tail_and_head`](Self::do_for_tail_and_head) with a
    /// separate callback for the last item.
    pub fn do_for_tail_and_head_split<T, I, F, G>(&mut self, items: I, mut tail: F, mut head: G) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&mut Self, T, bool, usize),
        G: FnMut(&mut Self, T, bool, usize),
    {
        for (item, is_head, index) in tail_and_head(items) {
            if is_head {
                head(self, item, true, index);
            } else {
                tail(self, item, false, index);
            }
        }
        self
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Flatten every line into the final text.
    pub fn build(&self) -> String {
        let separator = if self.minify { "" } else { "\n" };
        self.lines
            .iter()
            .chain(std::iter::once(&self.line))
            .map(|parts| parts.concat())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Collapse the current line's fragments into one and return it.
    pub fn join_line(&mut self) -> String {
        let joined = self.line.concat();
        self.line = vec![joined.clone()];
        joined
    }

    /// The current, unterminated line.
    pub fn current_line(&self) -> String {
        self.line.concat()
    }

    /// The prefix written at the start of each new line.
    pub fn shift(&self) -> &str {
        &self.shift
    }

    /// The active indentation unit.
    pub fn tab(&self) -> &str {
        &self.tab
    }

    pub fn is_minified(&self) -> bool {
        self.minify
    }

    /// Number of terminated lines.
    pub fn finished_lines(&self) -> usize {
        self.lines.len()
    }

    fn restore_shift(&mut self, violation: &str) -> String {
        let previous = self.shift_stack.pop().expect(violation);
        std::mem::replace(&mut self.shift, previous)
    }
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::from_rules(&Rules::defaults())
    }
}

/// Pair every item with `(is_head, index)`, where the head is the last item.
///
/// ```
/// let flagged: Vec<_> = cogen_core::tail_and_head(["a", "b"]).collect();
/// assert_eq!(flagged, [("a", false, 0), ("b", true, 1)]);
/// ```
pub fn tail_and_head<I>(items: I) -> TailAndHead<I::IntoIter>
where
    I: IntoIterator,
{
    TailAndHead {
        inner: items.into_iter().peekable(),
        index: 0,
    }
}

/// Iterator returned by [`tail_and_head`].
pub struct TailAndHead<I: Iterator> {
    inner: std::iter::Peekable<I>,
    index: usize,
}

impl<I: Iterator> Iterator for TailAndHead<I> {
    type Item = (I::Item, bool, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Some((item, self.inner.peek().is_none(), index))
    }
}
