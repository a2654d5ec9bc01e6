//! The backtracking virtual machine.
//!
//! Execution state is a stack of threads ordered by backtrack priority;
//! the top thread runs until it matches, backtracks, or forks. A fork
//! clones the running thread (program counter, position, auxiliary
//! stack, captures) and parks the clone just below the top, so a failed
//! thread falls back to the most recently forked alternative.
//!
//! Look-arounds snapshot the thread-stack height on entry (`push_proc`)
//! and kill every thread spawned above it on exit (`rewind_proc`), so
//! alternatives inside a committed assertion can never be retried.

use std::sync::Arc;

use crate::matches::Match;
use crate::program::{OpCode, Program};
use crate::unicode;

impl Program {
    /// Scan `input` for a match starting at or after the UTF-16 offset
    /// `start` (exactly at `start` under the sticky flag).
    pub fn exec(&self, input: &str, start: usize) -> Option<Match> {
        let units: Arc<Vec<u16>> = Arc::new(input.encode_utf16().collect());
        let len = units.len();
        if start > len {
            return None;
        }
        let mut pos = start;
        loop {
            let mut machine = Machine { program: self, input: &units, procs: Vec::new() };
            if let Some(caps) = machine.run(pos) {
                return Some(Match::new(Arc::clone(&units), caps, Arc::clone(&self.names)));
            }
            if self.flags.sticky() || pos >= len {
                return None;
            }
            // advance one code unit, or one code point under `u`
            pos += self.size_at(&units, pos);
        }
    }

    /// Convenience wrapper: true if the pattern matches anywhere in
    /// `input`.
    pub fn test(&self, input: &str) -> bool {
        self.exec(input, 0).is_some()
    }

    fn size_at(&self, input: &[u16], pos: usize) -> usize {
        if self.flags.unicode()
            && is_lead_surrogate(input[pos])
            && pos + 1 < input.len()
            && is_trail_surrogate(input[pos + 1])
        {
            2
        } else {
            1
        }
    }
}

fn is_lead_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_trail_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// One backtracking thread.
#[derive(Debug, Clone)]
struct Proc {
    pc: usize,
    pos: usize,
    /// Saved positions, loop counters, and thread-stack snapshots
    stack: Vec<usize>,
    /// `2*(N+1)` capture offsets
    caps: Vec<Option<usize>>,
}

struct Machine<'a> {
    program: &'a Program,
    input: &'a [u16],
    /// Threads in backtrack-priority order; the last entry is running
    procs: Vec<Proc>,
}

enum Step {
    Continue,
    Backtrack,
    Matched,
}

impl Machine<'_> {
    fn run(&mut self, pos: usize) -> Option<Vec<Option<usize>>> {
        self.procs.clear();
        self.procs.push(Proc {
            pc: 0,
            pos,
            stack: Vec::with_capacity(self.program.max_stack()),
            caps: vec![None; 2 * (self.program.capture_count() + 1)],
        });
        loop {
            let top = match self.procs.last() {
                Some(_) => self.procs.len() - 1,
                None => return None,
            };
            let pc = self.procs[top].pc;
            self.procs[top].pc += 1;
            let code = &self.program.codes()[pc];
            log::trace!("#{} {} pos={}", pc, code, self.procs[top].pos);
            match self.step(top, code) {
                Step::Continue => {}
                Step::Backtrack => {
                    self.procs.pop();
                }
                Step::Matched => {
                    let caps = self.procs.pop().expect("BUG: matched without a thread").caps;
                    return Some(caps);
                }
            }
        }
    }

    fn step(&mut self, top: usize, code: &OpCode) -> Step {
        let unicode = self.program.flags().unicode();
        let ignore_case = self.program.flags().ignore_case();
        match code {
            OpCode::Any => {
                let pos = self.procs[top].pos;
                match self.code_point_at(pos) {
                    Some((cc, size))
                        if self.program.flags().dot_all() || !unicode::is_line_terminator(cc) =>
                    {
                        self.procs[top].pos += size;
                        Step::Continue
                    }
                    _ => Step::Backtrack,
                }
            }
            OpCode::Back => {
                let pos = self.procs[top].pos;
                match self.code_point_before(pos) {
                    Some((_, size)) => {
                        self.procs[top].pos -= size;
                        Step::Continue
                    }
                    None => Step::Backtrack,
                }
            }
            OpCode::CapBegin(i) => {
                let pos = self.procs[top].pos;
                self.procs[top].caps[i * 2] = Some(pos);
                Step::Continue
            }
            OpCode::CapEnd(i) => {
                let pos = self.procs[top].pos;
                self.procs[top].caps[i * 2 + 1] = Some(pos);
                Step::Continue
            }
            OpCode::CapReset(from, to) => {
                for k in *from..*to {
                    self.procs[top].caps[k * 2] = None;
                    self.procs[top].caps[k * 2 + 1] = None;
                }
                Step::Continue
            }
            OpCode::Char(c) => {
                let pos = self.procs[top].pos;
                match self.code_point_at(pos) {
                    Some((cc, size)) => {
                        let cc = if ignore_case { unicode::canonicalize(cc, unicode) } else { cc };
                        if cc == *c {
                            self.procs[top].pos += size;
                            Step::Continue
                        } else {
                            Step::Backtrack
                        }
                    }
                    None => Step::Backtrack,
                }
            }
            OpCode::Class(set) | OpCode::ClassNot(set) => {
                let invert = matches!(code, OpCode::ClassNot(_));
                let pos = self.procs[top].pos;
                match self.code_point_at(pos) {
                    Some((cc, size)) => {
                        let ok = if ignore_case {
                            unicode::uncanonicalize(cc, unicode)
                                .iter()
                                .any(|&d| set.contains(d))
                        } else {
                            set.contains(cc)
                        };
                        if ok != invert {
                            self.procs[top].pos += size;
                            Step::Continue
                        } else {
                            Step::Backtrack
                        }
                    }
                    None => Step::Backtrack,
                }
            }
            OpCode::Dec => {
                let counter = self.procs[top].stack.last_mut().expect("BUG: dec on empty stack");
                *counter -= 1;
                Step::Continue
            }
            OpCode::EmptyCheck => {
                let saved =
                    self.procs[top].stack.pop().expect("BUG: empty_check on empty stack");
                if saved == self.procs[top].pos {
                    Step::Backtrack
                } else {
                    Step::Continue
                }
            }
            OpCode::Fail => Step::Backtrack,
            OpCode::ForkCont(k) => {
                let mut clone = self.procs[top].clone();
                clone.pc = clone.pc.wrapping_add_signed(*k);
                self.procs.insert(top, clone);
                Step::Continue
            }
            OpCode::ForkNext(k) => {
                let clone = self.procs[top].clone();
                self.procs[top].pc = self.procs[top].pc.wrapping_add_signed(*k);
                self.procs.insert(top, clone);
                Step::Continue
            }
            OpCode::Jump(k) => {
                self.procs[top].pc = self.procs[top].pc.wrapping_add_signed(*k);
                Step::Continue
            }
            OpCode::LineBegin => {
                let pos = self.procs[top].pos;
                let ok = pos == 0
                    || (self.program.flags().multiline()
                        && self
                            .code_point_before(pos)
                            .is_some_and(|(cc, _)| unicode::is_line_terminator(cc)));
                if ok {
                    Step::Continue
                } else {
                    Step::Backtrack
                }
            }
            OpCode::LineEnd => {
                let pos = self.procs[top].pos;
                let ok = pos == self.input.len()
                    || (self.program.flags().multiline()
                        && self
                            .code_point_at(pos)
                            .is_some_and(|(cc, _)| unicode::is_line_terminator(cc)));
                if ok {
                    Step::Continue
                } else {
                    Step::Backtrack
                }
            }
            OpCode::Loop(k) => {
                let counter = *self.procs[top].stack.last().expect("BUG: loop on empty stack");
                if counter > 0 {
                    self.procs[top].pc = self.procs[top].pc.wrapping_add_signed(*k);
                }
                Step::Continue
            }
            OpCode::Match => Step::Matched,
            OpCode::Pop => {
                self.procs[top].stack.pop().expect("BUG: pop on empty stack");
                Step::Continue
            }
            OpCode::Push(n) => {
                self.procs[top].stack.push(*n);
                Step::Continue
            }
            OpCode::PushPos => {
                let pos = self.procs[top].pos;
                self.procs[top].stack.push(pos);
                Step::Continue
            }
            OpCode::PushProc => {
                self.procs[top].stack.push(top);
                Step::Continue
            }
            OpCode::Ref(i) => self.match_reference(top, *i, false),
            OpCode::RefBack(i) => self.match_reference(top, *i, true),
            OpCode::RestorePos => {
                let pos =
                    self.procs[top].stack.pop().expect("BUG: restore_pos on empty stack");
                self.procs[top].pos = pos;
                Step::Continue
            }
            OpCode::RewindProc => {
                let snapshot =
                    self.procs[top].stack.pop().expect("BUG: rewind_proc on empty stack");
                let current = self.procs.pop().expect("BUG: rewind_proc without a thread");
                self.procs.truncate(snapshot);
                self.procs.push(current);
                Step::Continue
            }
            OpCode::WordBoundary | OpCode::WordBoundaryNot => {
                let want = matches!(code, OpCode::WordBoundary);
                let pos = self.procs[top].pos;
                let fold = unicode && ignore_case;
                let w1 = self
                    .code_point_before(pos)
                    .is_some_and(|(cc, _)| unicode::is_word_char(cc, fold));
                let w2 = self
                    .code_point_at(pos)
                    .is_some_and(|(cc, _)| unicode::is_word_char(cc, fold));
                if (w1 ^ w2) == want {
                    Step::Continue
                } else {
                    Step::Backtrack
                }
            }
        }
    }

    /// Back-reference matching: an unset capture matches the empty
    /// string; otherwise the captured text must repeat at (forward) or
    /// end at (backward) the current position.
    fn match_reference(&mut self, top: usize, index: usize, backward: bool) -> Step {
        let (begin, end) =
            match (self.procs[top].caps[index * 2], self.procs[top].caps[index * 2 + 1]) {
                (Some(begin), Some(end)) => (begin, end),
                _ => return Step::Continue,
            };
        let length = end - begin;
        let pos = self.procs[top].pos;
        let target = if backward {
            match pos.checked_sub(length) {
                Some(target) => target,
                None => return Step::Backtrack,
            }
        } else {
            if pos + length > self.input.len() {
                return Step::Backtrack;
            }
            pos
        };
        if self.units_equal(begin, target, length) {
            self.procs[top].pos = if backward { target } else { pos + length };
            Step::Continue
        } else {
            Step::Backtrack
        }
    }

    /// Compare two input regions of equal code-unit length, code point
    /// by code point, canonicalizing under the `i` flag.
    fn units_equal(&self, a: usize, b: usize, length: usize) -> bool {
        let unicode = self.program.flags().unicode();
        if !self.program.flags().ignore_case() {
            return self.input[a..a + length] == self.input[b..b + length];
        }
        let (mut i, mut j) = (a, b);
        while i < a + length && j < b + length {
            let (ca, sa) = self.code_point_at(i).expect("BUG: capture range out of bounds");
            let (cb, sb) = self.code_point_at(j).expect("BUG: capture range out of bounds");
            if unicode::canonicalize(ca, unicode) != unicode::canonicalize(cb, unicode) {
                return false;
            }
            i += sa;
            j += sb;
        }
        i == a + length && j == b + length
    }

    /// The code point starting at `pos`: one code unit, or a surrogate
    /// pair under the `u` flag.
    fn code_point_at(&self, pos: usize) -> Option<(u32, usize)> {
        let unit = *self.input.get(pos)?;
        if self.program.flags().unicode() && is_lead_surrogate(unit) {
            if let Some(&trail) = self.input.get(pos + 1) {
                if is_trail_surrogate(trail) {
                    let cp =
                        0x10000 + ((unit as u32 - 0xD800) << 10) + (trail as u32 - 0xDC00);
                    return Some((cp, 2));
                }
            }
        }
        Some((unit as u32, 1))
    }

    /// The code point ending at `pos`.
    fn code_point_before(&self, pos: usize) -> Option<(u32, usize)> {
        if pos == 0 {
            return None;
        }
        let unit = self.input[pos - 1];
        if self.program.flags().unicode() && is_trail_surrogate(unit) && pos >= 2 {
            let lead = self.input[pos - 2];
            if is_lead_surrogate(lead) {
                let cp = 0x10000 + ((lead as u32 - 0xD800) << 10) + (unit as u32 - 0xDC00);
                return Some((cp, 2));
            }
        }
        Some((unit as u32, 1))
    }
}
