//! Pattern parser.
//!
//! Recursive descent over the pattern's UTF-16 code units, per ECMA-262
//! §21.2.1 (Patterns) with the Annex B §B.1.4 extensions. Parsing runs in
//! three stages:
//!
//! 1. The flag string is validated and turned into a [`Flags`] set.
//! 2. A preprocessing scan counts capture groups and collects named
//!    captures. The semantic pass needs both up front: the legality of
//!    `\k<…>` and of bare digit escapes depends on the totals.
//! 3. The semantic recursive descent builds the [`Pattern`] tree.
//!
//! The Annex B relaxations apply only when the parser is in "additional"
//! mode (the default) and the `u` flag is absent.

use indexmap::IndexMap;

use crate::ast::{ClassChar, ClassItem, EscapeClassKind, Node, Pattern, Span};
use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::unicode;

/// Parser behavior options.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Accept the Annex B "Additional ECMAScript Features for Web
    /// Browsers" syntax (defaults to true).
    pub additional: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions { additional: true }
    }
}

impl ParserOptions {
    /// Options with Annex B syntax enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle Annex B syntax.
    pub fn with_additional(mut self, additional: bool) -> Self {
        self.additional = additional;
        self
    }
}

/// Parse a pattern with default (Annex B) options.
pub fn parse(source: &str, flags: &str) -> Result<Pattern> {
    parse_with_options(source, flags, &ParserOptions::default())
}

/// Parse a pattern with explicit options.
pub fn parse_with_options(source: &str, flags: &str, options: &ParserOptions) -> Result<Pattern> {
    let flags: Flags = flags.parse()?;
    let units: Vec<u32> = source.encode_utf16().map(u32::from).collect();
    let mut parser = Parser {
        source: units,
        pos: 0,
        flags,
        relaxed: options.additional && !flags.unicode(),
        capture_count: 0,
        names: IndexMap::new(),
        capture_index: 0,
    };
    parser.preprocess_captures()?;
    log::debug!(
        "pattern preprocessing: {} captures, {} named",
        parser.capture_count,
        parser.names.len()
    );
    parser.parse_pattern()
}

const LEAD_SURROGATE: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const TRAIL_SURROGATE: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

struct Parser {
    /// Pattern source as UTF-16 code units
    source: Vec<u32>,
    pos: usize,
    flags: Flags,
    /// Annex B relaxations active (additional mode, no `u` flag)
    relaxed: bool,
    capture_count: usize,
    names: IndexMap<String, usize>,
    /// Running paren counter of the semantic pass
    capture_index: usize,
}

impl Parser {
    // ---- low-level cursor ---------------------------------------------

    fn unicode(&self) -> bool {
        self.flags.unicode()
    }

    /// The code point at `pos`: a single code unit, or a combined
    /// surrogate pair under the `u` flag.
    fn current(&self) -> Option<u32> {
        self.char_at(self.pos).map(|(cp, _)| cp)
    }

    fn char_at(&self, pos: usize) -> Option<(u32, usize)> {
        let unit = *self.source.get(pos)?;
        if self.unicode() && LEAD_SURROGATE.contains(&unit) {
            if let Some(&trail) = self.source.get(pos + 1) {
                if TRAIL_SURROGATE.contains(&trail) {
                    let cp = 0x10000 + ((unit - 0xD800) << 10) + (trail - 0xDC00);
                    return Some((cp, 2));
                }
            }
        }
        Some((unit, 1))
    }

    /// Advance past the current character and return it.
    fn next_char(&mut self) -> Option<u32> {
        let (cp, size) = self.char_at(self.pos)?;
        self.pos += size;
        Some(cp)
    }

    fn eat(&mut self, c: u32) -> bool {
        if self.current() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn err<T>(&self, reason: &str) -> Result<T> {
        Err(Error::syntax(self.pos, reason))
    }

    /// Source text of `span`, reconstructed from the code units. A lone
    /// surrogate is rendered as its `\uXXXX` spelling.
    fn raw(&self, span: Span) -> String {
        let units: Vec<u16> = self.source[span.start..span.end].iter().map(|&u| u as u16).collect();
        if units.len() == 1 && (0xD800..=0xDFFF).contains(&units[0]) {
            return format!("\\u{:04X}", units[0]);
        }
        String::from_utf16_lossy(&units)
    }

    // ---- capture preprocessing ----------------------------------------

    /// Linear scan counting `(` captures and binding `(?<name>` groups,
    /// skipping escapes and character classes.
    fn preprocess_captures(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.source.len() {
            match self.source[i] {
                b if b == '\\' as u32 => i += 2,
                b if b == '[' as u32 => {
                    i += 1;
                    while i < self.source.len() && self.source[i] != ']' as u32 {
                        if self.source[i] == '\\' as u32 {
                            i += 2;
                        } else {
                            i += 1;
                        }
                    }
                    i += 1; // closing bracket
                }
                b if b == '(' as u32 => {
                    i += 1;
                    if self.source.get(i) != Some(&('?' as u32)) {
                        self.capture_count += 1;
                        continue;
                    }
                    if self.source.get(i + 1) == Some(&('<' as u32))
                        && self.source.get(i + 2) != Some(&('=' as u32))
                        && self.source.get(i + 2) != Some(&('!' as u32))
                    {
                        // named capture
                        i += 2;
                        self.capture_count += 1;
                        let name = self.lex_group_name_at(&mut i)?;
                        if i >= self.source.len() || self.source[i] != '>' as u32 {
                            return Err(Error::syntax(i, "invalid capture group name"));
                        }
                        i += 1;
                        let index = self.capture_count;
                        if self.names.insert(name, index).is_some() {
                            return Err(Error::syntax(i, "duplicated capture group name"));
                        }
                    }
                }
                _ => i += 1,
            }
        }
        Ok(())
    }

    // ---- group names ---------------------------------------------------

    /// Lex a group name starting at `*i`, leaving `*i` at the closing
    /// `>`. Names always combine surrogate pairs and accept `\u` escapes
    /// (ECMA-262 §21.2.1 RegExpIdentifierName).
    fn lex_group_name_at(&self, i: &mut usize) -> Result<String> {
        let mut name = String::new();
        let mut first = true;
        loop {
            match self.source.get(*i) {
                None => return Err(Error::syntax(*i, "invalid capture group name")),
                Some(&c) if c == '>' as u32 => break,
                _ => {}
            }
            let cp = self.lex_name_char(i)?;
            let ok = if first {
                cp == '$' as u32 || cp == '_' as u32 || unicode::is_id_start(cp)
            } else {
                cp == '$' as u32
                    || cp == 0x200C
                    || cp == 0x200D
                    || unicode::is_id_continue(cp)
            };
            if !ok {
                return Err(Error::syntax(*i, "invalid capture group name"));
            }
            name.push(char::from_u32(cp).ok_or_else(|| {
                Error::syntax(*i, "invalid capture group name")
            })?);
            first = false;
        }
        if name.is_empty() {
            return Err(Error::syntax(*i, "invalid capture group name"));
        }
        Ok(name)
    }

    /// One name character: a plain code point (surrogate pairs combined)
    /// or a `\uHHHH` / `\u{H…}` escape.
    fn lex_name_char(&self, i: &mut usize) -> Result<u32> {
        let c = self.source[*i];
        if c != '\\' as u32 {
            if LEAD_SURROGATE.contains(&c) {
                if let Some(&trail) = self.source.get(*i + 1) {
                    if TRAIL_SURROGATE.contains(&trail) {
                        *i += 2;
                        return Ok(0x10000 + ((c - 0xD800) << 10) + (trail - 0xDC00));
                    }
                }
            }
            *i += 1;
            return Ok(c);
        }
        *i += 1;
        if self.source.get(*i) != Some(&('u' as u32)) {
            return Err(Error::syntax(*i, "invalid capture group name"));
        }
        *i += 1;
        self.lex_unicode_escape_at(i, true)
            .ok_or_else(|| Error::syntax(*i, "invalid capture group name"))
    }

    /// `HHHH`, a lead/trail escape pair, or `{H…}` after `\u`. Returns
    /// `None` (cursor untouched on entry position) when malformed.
    fn lex_unicode_escape_at(&self, i: &mut usize, allow_extended: bool) -> Option<u32> {
        let start = *i;
        if allow_extended && self.source.get(*i) == Some(&('{' as u32)) {
            *i += 1;
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.source.get(*i).and_then(|&c| hex_digit(c)) {
                value = value.saturating_mul(16).saturating_add(d);
                digits += 1;
                *i += 1;
            }
            if digits == 0 || value > 0x10FFFF || self.source.get(*i) != Some(&('}' as u32)) {
                *i = start;
                return None;
            }
            *i += 1;
            return Some(value);
        }
        let lead = self.lex_hex4_at(i)?;
        if allow_extended && LEAD_SURROGATE.contains(&lead) {
            // try to combine a following \uDC00..\uDFFF escape
            let save = *i;
            if self.source.get(*i) == Some(&('\\' as u32))
                && self.source.get(*i + 1) == Some(&('u' as u32))
            {
                *i += 2;
                if let Some(trail) = self.lex_hex4_at(i) {
                    if TRAIL_SURROGATE.contains(&trail) {
                        return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
                    }
                }
                *i = save;
            }
        }
        Some(lead)
    }

    fn lex_hex4_at(&self, i: &mut usize) -> Option<u32> {
        let start = *i;
        let mut value = 0;
        for _ in 0..4 {
            match self.source.get(*i).and_then(|&c| hex_digit(c)) {
                Some(d) => {
                    value = value * 16 + d;
                    *i += 1;
                }
                None => {
                    *i = start;
                    return None;
                }
            }
        }
        Some(value)
    }

    // ---- semantic pass -------------------------------------------------

    fn parse_pattern(mut self) -> Result<Pattern> {
        let child = self.parse_disjunction()?;
        if self.pos < self.source.len() {
            // parse_disjunction stops only at `)` or end of input
            return self.err("unmatched close parenthesis");
        }
        debug_assert_eq!(self.capture_index, self.capture_count, "BUG: capture passes disagree");
        Ok(Pattern {
            flags: self.flags,
            capture_count: self.capture_count,
            names: self.names,
            span: Span::new(0, self.source.len()),
            child,
        })
    }

    fn parse_disjunction(&mut self) -> Result<Node> {
        let start = self.pos;
        let mut children = vec![self.parse_sequence()?];
        while self.eat('|' as u32) {
            children.push(self.parse_sequence()?);
        }
        if children.len() == 1 {
            return Ok(children.pop().unwrap());
        }
        Ok(Node::Disjunction { children, span: Span::new(start, self.pos) })
    }

    fn parse_sequence(&mut self) -> Result<Node> {
        let start = self.pos;
        let mut children = Vec::new();
        loop {
            match self.current() {
                None => break,
                Some(c) if c == '|' as u32 || c == ')' as u32 => break,
                _ => children.push(self.parse_quantifier()?),
            }
        }
        if children.len() == 1 {
            return Ok(children.pop().unwrap());
        }
        Ok(Node::Sequence { children, span: Span::new(start, self.pos) })
    }

    fn parse_quantifier(&mut self) -> Result<Node> {
        let start = self.pos;
        let atom = self.parse_atom()?;
        let quant = match self.current() {
            Some(c) if c == '*' as u32 => {
                self.pos += 1;
                Some((0, None))
            }
            Some(c) if c == '+' as u32 => {
                self.pos += 1;
                Some((1, None))
            }
            Some(c) if c == '?' as u32 => {
                self.pos += 1;
                Some((0, Some(1)))
            }
            Some(c) if c == '{' as u32 => self.try_parse_brace_quantifier()?,
            _ => None,
        };
        let (min, max) = match quant {
            Some(q) => q,
            None => return Ok(atom),
        };
        if let Some(max) = max {
            if min > max {
                return self.err("numbers out of order in {} quantifier");
            }
        }
        if atom.is_assertion() && !(self.relaxed && atom.is_look_ahead()) {
            return self.err("nothing to repeat");
        }
        let non_greedy = self.eat('?' as u32);
        let span = Span::new(start, self.pos);
        let child = Box::new(atom);
        Ok(match (min, max) {
            (0, None) => Node::Many { child, non_greedy, span },
            (1, None) => Node::Some { child, non_greedy, span },
            (0, Some(1)) => Node::Optional { child, non_greedy, span },
            (min, max) => Node::Repeat { child, min, max, non_greedy, span },
        })
    }

    /// Parse `{n}` / `{n,}` / `{n,m}` at a `{`. Returns `None` with the
    /// cursor restored when the braces do not form a quantifier; that is
    /// an error unless Annex B literal-brace tolerance applies.
    #[allow(clippy::type_complexity)]
    fn try_parse_brace_quantifier(&mut self) -> Result<Option<(usize, Option<usize>)>> {
        let save = self.pos;
        self.pos += 1; // {
        let min = match self.read_decimal() {
            Some(n) => n,
            None => return self.brace_fallback(save),
        };
        if self.eat('}' as u32) {
            return Ok(Some((min, Some(min))));
        }
        if !self.eat(',' as u32) {
            return self.brace_fallback(save);
        }
        if self.eat('}' as u32) {
            return Ok(Some((min, None)));
        }
        let max = match self.read_decimal() {
            Some(n) => n,
            None => return self.brace_fallback(save),
        };
        if !self.eat('}' as u32) {
            return self.brace_fallback(save);
        }
        Ok(Some((min, Some(max))))
    }

    #[allow(clippy::type_complexity)]
    fn brace_fallback(&mut self, save: usize) -> Result<Option<(usize, Option<usize>)>> {
        self.pos = save;
        if self.relaxed {
            // the brace is re-parsed as a literal by the caller's successor
            Ok(None)
        } else {
            self.err("lone quantifier brackets")
        }
    }

    fn read_decimal(&mut self) -> Option<usize> {
        let mut value: usize = 0;
        let mut any = false;
        while let Some(c) = self.current() {
            if !('0' as u32..='9' as u32).contains(&c) {
                break;
            }
            value = value.saturating_mul(10).saturating_add((c - '0' as u32) as usize);
            any = true;
            self.pos += 1;
        }
        any.then_some(value)
    }

    fn parse_atom(&mut self) -> Result<Node> {
        let start = self.pos;
        let c = match self.current() {
            Some(c) => c,
            None => return self.err("unexpected end of pattern"),
        };
        match c {
            c if c == '^' as u32 => {
                self.pos += 1;
                Ok(Node::LineBegin { span: Span::new(start, self.pos) })
            }
            c if c == '$' as u32 => {
                self.pos += 1;
                Ok(Node::LineEnd { span: Span::new(start, self.pos) })
            }
            c if c == '.' as u32 => {
                self.pos += 1;
                Ok(Node::Dot { span: Span::new(start, self.pos) })
            }
            c if c == '(' as u32 => self.parse_group(),
            c if c == '[' as u32 => self.parse_class(),
            c if c == '\\' as u32 => self.parse_escape(),
            c if c == '*' as u32 || c == '+' as u32 || c == '?' as u32 => {
                self.err("nothing to repeat")
            }
            c if c == '{' as u32 => {
                if !self.relaxed {
                    return self.err("lone quantifier brackets");
                }
                // A valid quantifier opener here would quantify nothing.
                let save = self.pos;
                if self.try_parse_brace_quantifier()?.is_some() {
                    self.pos = save;
                    return self.err("nothing to repeat");
                }
                self.pos += 1;
                Ok(self.literal_char(c, start))
            }
            c if c == '}' as u32 || c == ']' as u32 => {
                if !self.relaxed {
                    return self.err(if c == '}' as u32 {
                        "lone quantifier brackets"
                    } else {
                        "lone character class bracket"
                    });
                }
                self.pos += 1;
                Ok(self.literal_char(c, start))
            }
            _ => {
                let cp = self.next_char().unwrap();
                Ok(self.literal_char(cp, start))
            }
        }
    }

    fn literal_char(&self, value: u32, start: usize) -> Node {
        let span = Span::new(start, self.pos);
        Node::Char { value, raw: self.raw(span), span }
    }

    fn parse_group(&mut self) -> Result<Node> {
        let start = self.pos;
        self.pos += 1; // (
        if !self.eat('?' as u32) {
            self.capture_index += 1;
            let index = self.capture_index;
            let child = Box::new(self.parse_disjunction()?);
            if !self.eat(')' as u32) {
                return self.err("unterminated group");
            }
            return Ok(Node::Capture { index, child, span: Span::new(start, self.pos) });
        }
        if self.eat(':' as u32) {
            let child = Box::new(self.parse_disjunction()?);
            if !self.eat(')' as u32) {
                return self.err("unterminated group");
            }
            return Ok(Node::Group { child, span: Span::new(start, self.pos) });
        }
        if self.eat('=' as u32) {
            return self.finish_look_around(start, false, false);
        }
        if self.eat('!' as u32) {
            return self.finish_look_around(start, false, true);
        }
        if self.eat('<' as u32) {
            if self.eat('=' as u32) {
                return self.finish_look_around(start, true, false);
            }
            if self.eat('!' as u32) {
                return self.finish_look_around(start, true, true);
            }
            // named capture
            self.capture_index += 1;
            let index = self.capture_index;
            let mut i = self.pos;
            let name = self.lex_group_name_at(&mut i)?;
            self.pos = i + 1; // past `>`
            debug_assert_eq!(self.names.get(&name), Some(&index), "BUG: capture passes disagree");
            let child = Box::new(self.parse_disjunction()?);
            if !self.eat(')' as u32) {
                return self.err("unterminated group");
            }
            return Ok(Node::NamedCapture { name, index, child, span: Span::new(start, self.pos) });
        }
        self.err("invalid group")
    }

    fn finish_look_around(&mut self, start: usize, behind: bool, negative: bool) -> Result<Node> {
        let child = Box::new(self.parse_disjunction()?);
        if !self.eat(')' as u32) {
            return self.err("unterminated look-around");
        }
        let span = Span::new(start, self.pos);
        Ok(if behind {
            Node::LookBehind { child, negative, span }
        } else {
            Node::LookAhead { child, negative, span }
        })
    }

    // ---- character classes ---------------------------------------------

    fn parse_class(&mut self) -> Result<Node> {
        let start = self.pos;
        self.pos += 1; // [
        let invert = self.eat('^' as u32);
        let mut items: Vec<ClassItem> = Vec::new();
        loop {
            match self.current() {
                None => return self.err("unterminated character class"),
                Some(c) if c == ']' as u32 => {
                    self.pos += 1;
                    break;
                }
                _ => {}
            }
            let item = self.parse_class_atom()?;
            // a `-` forms a range unless it abuts the closing bracket
            let dash_ahead = self.current() == Some('-' as u32)
                && self.char_at(self.pos + 1).map(|(c, _)| c) != Some(']' as u32)
                && self.char_at(self.pos + 1).is_some();
            if !dash_ahead {
                items.push(item);
                continue;
            }
            let dash_start = self.pos;
            self.pos += 1; // -
            let upper = self.parse_class_atom()?;
            match (item, upper) {
                (ClassItem::Char(begin), ClassItem::Char(end)) => {
                    if begin.value > end.value {
                        return self.err("out of order in character class");
                    }
                    let span = Span::new(begin.span.start, end.span.end);
                    items.push(ClassItem::Range { begin, end, span });
                }
                (lo, hi) => {
                    // an escape class cannot bound a range
                    if !self.relaxed {
                        return self.err("invalid character class range");
                    }
                    items.push(lo);
                    items.push(ClassItem::Char(ClassChar {
                        value: '-' as u32,
                        raw: "-".to_string(),
                        span: Span::new(dash_start, dash_start + 1),
                    }));
                    items.push(hi);
                }
            }
        }
        Ok(Node::Class { items, invert, span: Span::new(start, self.pos) })
    }

    fn parse_class_atom(&mut self) -> Result<ClassItem> {
        let start = self.pos;
        let c = self.current().expect("BUG: class atom at end of input");
        if c != '\\' as u32 {
            let cp = self.next_char().unwrap();
            let span = Span::new(start, self.pos);
            return Ok(ClassItem::Char(ClassChar { value: cp, raw: self.raw(span), span }));
        }
        // backslash escapes inside a class
        match self.char_at(self.pos + 1).map(|(c, _)| c) {
            Some(c) if c == 'b' as u32 => {
                self.pos += 2;
                let span = Span::new(start, self.pos);
                // inside a class, \b is backspace
                Ok(ClassItem::Char(ClassChar { value: 0x08, raw: "\\b".to_string(), span }))
            }
            Some(c) if c == '-' as u32 => {
                self.pos += 2;
                let span = Span::new(start, self.pos);
                Ok(ClassItem::Char(ClassChar { value: '-' as u32, raw: "\\-".to_string(), span }))
            }
            Some(c) if is_escape_class_letter(c) => {
                self.pos += 2;
                let (kind, invert) = escape_class_kind(c);
                Ok(ClassItem::EscapeClass { kind, invert, span: Span::new(start, self.pos) })
            }
            Some(c) if c == 'p' as u32 || c == 'P' as u32 => {
                if let Some((kind, invert)) = self.parse_property_escape(start)? {
                    Ok(ClassItem::EscapeClass { kind, invert, span: Span::new(start, self.pos) })
                } else {
                    // Annex B: `\p` is an identity escape for `p`
                    self.pos += 2;
                    let span = Span::new(start, self.pos);
                    Ok(ClassItem::Char(ClassChar { value: c, raw: self.raw(span), span }))
                }
            }
            _ => {
                let ch = self.parse_char_escape(true)?;
                Ok(ClassItem::Char(ch))
            }
        }
    }

    // ---- escapes -------------------------------------------------------

    fn parse_escape(&mut self) -> Result<Node> {
        let start = self.pos;
        let c = match self.char_at(self.pos + 1) {
            Some((c, _)) => c,
            None => return self.err("unexpected end of pattern"),
        };
        match c {
            c if c == 'b' as u32 || c == 'B' as u32 => {
                self.pos += 2;
                Ok(Node::WordBoundary {
                    invert: c == 'B' as u32,
                    span: Span::new(start, self.pos),
                })
            }
            c if is_escape_class_letter(c) => {
                self.pos += 2;
                let (kind, invert) = escape_class_kind(c);
                Ok(Node::EscapeClass { kind, invert, span: Span::new(start, self.pos) })
            }
            c if c == 'p' as u32 || c == 'P' as u32 => {
                if let Some((kind, invert)) = self.parse_property_escape(start)? {
                    Ok(Node::EscapeClass { kind, invert, span: Span::new(start, self.pos) })
                } else {
                    self.pos += 2;
                    let span = Span::new(start, self.pos);
                    Ok(Node::Char { value: c, raw: self.raw(span), span })
                }
            }
            c if c == 'k' as u32 => self.parse_named_back_ref(start),
            c if ('1' as u32..='9' as u32).contains(&c) => self.parse_back_ref(start),
            _ => {
                let ch = self.parse_char_escape(false)?;
                Ok(Node::Char { value: ch.value, raw: ch.raw, span: ch.span })
            }
        }
    }

    fn parse_named_back_ref(&mut self, start: usize) -> Result<Node> {
        if self.names.is_empty() {
            // with no named groups in the pattern, Annex B reads `\k` as
            // an identity escape
            if self.relaxed {
                self.pos += 2;
                let span = Span::new(start, self.pos);
                return Ok(Node::Char { value: 'k' as u32, raw: "\\k".to_string(), span });
            }
            return self.err("invalid named back-reference");
        }
        self.pos += 2; // \k
        if !self.eat('<' as u32) {
            return self.err("invalid named back-reference");
        }
        let mut i = self.pos;
        let name = self.lex_group_name_at(&mut i)?;
        self.pos = i + 1; // past `>`
        if !self.names.contains_key(&name) {
            return self.err("invalid named back-reference");
        }
        Ok(Node::NamedBackRef { name, span: Span::new(start, self.pos) })
    }

    fn parse_back_ref(&mut self, start: usize) -> Result<Node> {
        let save = self.pos;
        self.pos += 1; // backslash
        let index = self.read_decimal().expect("BUG: back-reference without digits");
        if index <= self.capture_count {
            return Ok(Node::BackRef { index, span: Span::new(start, self.pos) });
        }
        if !self.relaxed {
            // out of range; the compiler reports the validation error
            return Ok(Node::BackRef { index, span: Span::new(start, self.pos) });
        }
        // Annex B: re-read as a legacy octal escape or a literal digit
        self.pos = save;
        let ch = self.parse_char_escape(false)?;
        Ok(Node::Char { value: ch.value, raw: ch.raw, span: ch.span })
    }

    /// `\p{…}` / `\P{…}`. Returns `Ok(None)` when Annex B downgrades the
    /// escape to a literal `p`.
    #[allow(clippy::type_complexity)]
    fn parse_property_escape(&mut self, start: usize) -> Result<Option<(EscapeClassKind, bool)>> {
        let invert = self.char_at(self.pos + 1).map(|(c, _)| c) == Some('P' as u32);
        if !self.unicode() {
            if self.relaxed {
                return Ok(None);
            }
            return self.err("invalid escape");
        }
        self.pos += 2; // \p
        if !self.eat('{' as u32) {
            return self.err("invalid property name");
        }
        let name = self.lex_property_word()?;
        if self.eat('=' as u32) {
            let value = self.lex_property_word()?;
            if !self.eat('}' as u32) {
                return self.err("invalid property name");
            }
            if unicode::load_property_value(&name, &value).is_none() {
                return Err(Error::syntax(start, "invalid property value"));
            }
            return Ok(Some((EscapeClassKind::PropertyValue { property: name, value }, invert)));
        }
        if !self.eat('}' as u32) {
            return self.err("invalid property name");
        }
        if unicode::load_property(&name).is_none() {
            return Err(Error::syntax(start, "invalid property name"));
        }
        Ok(Some((EscapeClassKind::Property { name }, invert)))
    }

    fn lex_property_word(&mut self) -> Result<String> {
        let mut word = String::new();
        while let Some(c) = self.current() {
            let ch = char::from_u32(c).unwrap_or('\0');
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        if word.is_empty() {
            return self.err("invalid property name");
        }
        Ok(word)
    }

    /// A single-character escape: controls, `\cX`, `\xHH`, `\uHHHH`,
    /// `\u{…}`, `\0`, legacy octal, identity escapes. Shared between the
    /// atom and class-atom grammars (`in_class` selects the Annex B
    /// carve-outs that differ).
    fn parse_char_escape(&mut self, in_class: bool) -> Result<ClassChar> {
        let start = self.pos;
        self.pos += 1; // backslash
        let c = match self.current() {
            Some(c) => c,
            None => return self.err("unexpected end of pattern"),
        };
        let simple = |this: &mut Parser, value: u32| {
            this.pos += 1;
            let span = Span::new(start, this.pos);
            Ok(ClassChar { value, raw: this.raw(span), span })
        };
        match c {
            c if c == 't' as u32 => simple(self, 0x09),
            c if c == 'n' as u32 => simple(self, 0x0A),
            c if c == 'v' as u32 => simple(self, 0x0B),
            c if c == 'f' as u32 => simple(self, 0x0C),
            c if c == 'r' as u32 => simple(self, 0x0D),
            c if c == 'c' as u32 => {
                let next = self.char_at(self.pos + 1).map(|(c, _)| c);
                let ok = match next {
                    Some(l) if is_ascii_letter(l) => true,
                    Some(l)
                        if in_class
                            && self.relaxed
                            && (('0' as u32..='9' as u32).contains(&l) || l == '_' as u32) =>
                    {
                        true
                    }
                    _ => false,
                };
                if ok {
                    self.pos += 2;
                    let value = next.unwrap() % 32;
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value, raw: self.raw(span), span });
                }
                if self.relaxed {
                    // Annex B: the backslash stands alone as a literal
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value: '\\' as u32, raw: self.raw(span), span });
                }
                self.err("invalid escape")
            }
            c if c == 'x' as u32 => {
                let mut i = self.pos + 1;
                if let Some(value) = self.lex_hex_n(&mut i, 2) {
                    self.pos = i;
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value, raw: self.raw(span), span });
                }
                if self.relaxed {
                    self.pos += 1;
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value: 'x' as u32, raw: self.raw(span), span });
                }
                self.err("invalid escape")
            }
            c if c == 'u' as u32 => {
                let mut i = self.pos + 1;
                if let Some(value) = self.lex_unicode_escape_at(&mut i, self.unicode()) {
                    self.pos = i;
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value, raw: self.raw(span), span });
                }
                if self.relaxed {
                    self.pos += 1;
                    let span = Span::new(start, self.pos);
                    return Ok(ClassChar { value: 'u' as u32, raw: self.raw(span), span });
                }
                self.err("invalid unicode escape")
            }
            c if c == '0' as u32 => {
                let next = self.char_at(self.pos + 1).map(|(c, _)| c);
                let next_is_digit =
                    next.map_or(false, |n| ('0' as u32..='9' as u32).contains(&n));
                if !next_is_digit {
                    return simple(self, 0);
                }
                if self.relaxed {
                    return self.parse_legacy_octal(start);
                }
                self.err("invalid decimal escape")
            }
            c if ('1' as u32..='9' as u32).contains(&c) => {
                // reached via the Annex B back-reference fallback, or for
                // digit escapes inside classes
                if self.relaxed {
                    if c <= '7' as u32 {
                        return self.parse_legacy_octal(start);
                    }
                    return simple(self, c); // \8 \9 are identity escapes
                }
                self.err("invalid decimal escape")
            }
            _ => {
                let (cp, size) = self.char_at(self.pos).unwrap();
                if self.unicode() {
                    // only syntax characters and `/` may be identity-escaped
                    if !is_syntax_char(cp) && cp != '/' as u32 {
                        return self.err("invalid escape");
                    }
                } else if !self.relaxed {
                    // strict mode forbids identity-escaping ID_Continue characters
                    if unicode::is_id_continue(cp) {
                        return self.err("invalid escape");
                    }
                } else if in_class && cp == 'k' as u32 && !self.names.is_empty() {
                    // with named groups present, \k is reserved even in classes
                    return self.err("invalid escape");
                }
                self.pos += size;
                let span = Span::new(start, self.pos);
                Ok(ClassChar { value: cp, raw: self.raw(span), span })
            }
        }
    }

    fn parse_legacy_octal(&mut self, start: usize) -> Result<ClassChar> {
        let mut value = 0;
        let mut digits = 0;
        while digits < 3 {
            match self.current() {
                Some(c) if ('0' as u32..='7' as u32).contains(&c) => {
                    let next = value * 8 + (c - '0' as u32);
                    if next > 0xFF {
                        break;
                    }
                    value = next;
                    digits += 1;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        debug_assert!(digits > 0, "BUG: octal escape without digits");
        let span = Span::new(start, self.pos);
        Ok(ClassChar { value, raw: self.raw(span), span })
    }

    fn lex_hex_n(&self, i: &mut usize, n: usize) -> Option<u32> {
        let start = *i;
        let mut value = 0;
        for _ in 0..n {
            match self.source.get(*i).and_then(|&c| hex_digit(c)) {
                Some(d) => {
                    value = value * 16 + d;
                    *i += 1;
                }
                None => {
                    *i = start;
                    return None;
                }
            }
        }
        Some(value)
    }
}

fn hex_digit(c: u32) -> Option<u32> {
    match c {
        _ if ('0' as u32..='9' as u32).contains(&c) => Some(c - '0' as u32),
        _ if ('a' as u32..='f' as u32).contains(&c) => Some(c - 'a' as u32 + 10),
        _ if ('A' as u32..='F' as u32).contains(&c) => Some(c - 'A' as u32 + 10),
        _ => None,
    }
}

fn is_ascii_letter(c: u32) -> bool {
    ('a' as u32..='z' as u32).contains(&c) || ('A' as u32..='Z' as u32).contains(&c)
}

fn is_escape_class_letter(c: u32) -> bool {
    matches!(
        char::from_u32(c),
        Some('d') | Some('D') | Some('w') | Some('W') | Some('s') | Some('S')
    )
}

fn escape_class_kind(c: u32) -> (EscapeClassKind, bool) {
    match char::from_u32(c).expect("BUG: escape class letter") {
        'd' => (EscapeClassKind::Digit, false),
        'D' => (EscapeClassKind::Digit, true),
        'w' => (EscapeClassKind::Word, false),
        'W' => (EscapeClassKind::Word, true),
        's' => (EscapeClassKind::Space, false),
        'S' => (EscapeClassKind::Space, true),
        c => panic!("BUG: not an escape class letter: {}", c),
    }
}

fn is_syntax_char(c: u32) -> bool {
    matches!(
        char::from_u32(c),
        Some('^') | Some('$') | Some('\\') | Some('.') | Some('*') | Some('+') | Some('?')
            | Some('(') | Some(')') | Some('[') | Some(']') | Some('{') | Some('}') | Some('|')
    )
}
