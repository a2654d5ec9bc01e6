//! AST to byte-code lowering.
//!
//! A single recursive pass over the pattern tree with two pieces of
//! threaded state: the match *direction* (look-behind bodies match right
//! to left) and a *may-have-advanced* flag that tracks whether the node
//! just compiled always consumes input. The flag drives empty-check
//! elision: a loop whose body provably advances needs no guard against
//! empty iterations.
//!
//! Loop lowering notes:
//!
//! - Loop exits are offered by re-running the fork at the head of each
//!   iteration, so the exit clone always snapshots the captures of the
//!   last completed iteration.
//! - Each iteration that may re-enter capture groups is prefixed with a
//!   `cap_reset` over the body's capture range, so iteration N cannot
//!   leak iteration N−1's captures.
//! - A mandatory first iteration (`x+`, `x{n,…}`) runs unguarded: per
//!   ECMA-262 §21.2.2.5.1 the empty-iteration cutoff applies only once
//!   the minimum count has been satisfied.

use std::sync::Arc;

use crate::ast::{ClassItem, EscapeClassKind, Node, Pattern};
use crate::char_set::CharSet;
use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::printer;
use crate::program::{OpCode, Program};
use crate::unicode;

/// Compile a parsed pattern into an executable program.
pub fn compile(pattern: &Pattern) -> Result<Program> {
    let mut compiler = Compiler {
        pattern,
        flags: pattern.flags,
        codes: Vec::new(),
        backward: false,
        advance: false,
    };
    compiler.codes.push(OpCode::CapBegin(0));
    compiler.compile_node(&pattern.child)?;
    compiler.codes.push(OpCode::CapEnd(0));
    compiler.codes.push(OpCode::Match);

    let max_stack = max_stack_depth(&compiler.codes);
    let program = Program {
        codes: compiler.codes,
        flags: pattern.flags,
        capture_count: pattern.capture_count,
        names: Arc::new(pattern.names.clone()),
        max_stack,
        source: printer::pattern_source(pattern),
    };
    log::debug!("compiled {}", program);
    Ok(program)
}

struct Compiler<'p> {
    pattern: &'p Pattern,
    flags: Flags,
    codes: Vec<OpCode>,
    /// Current match direction; true inside look-behind bodies
    backward: bool,
    /// Whether the node just compiled always consumes input
    advance: bool,
}

impl Compiler<'_> {
    fn emit(&mut self, op: OpCode) -> usize {
        self.codes.push(op);
        self.codes.len() - 1
    }

    /// Relative offset addressing `to` from the opcode at `from` (the VM
    /// pre-increments the program counter).
    fn offset(from: usize, to: usize) -> isize {
        to as isize - from as isize - 1
    }

    /// Point the jump-like opcode at `at` to the current end of code.
    fn patch_to_here(&mut self, at: usize) {
        let k = Self::offset(at, self.codes.len());
        match &mut self.codes[at] {
            OpCode::ForkCont(o) | OpCode::ForkNext(o) | OpCode::Jump(o) | OpCode::Loop(o) => {
                *o = k;
            }
            _ => panic!("BUG: invalid patch target"),
        }
    }

    fn emit_jump_to(&mut self, target: usize) {
        let from = self.codes.len();
        self.emit(OpCode::Jump(Self::offset(from, target)));
    }

    fn emit_loop_to(&mut self, target: usize) {
        let from = self.codes.len();
        self.emit(OpCode::Loop(Self::offset(from, target)));
    }

    fn fork(&mut self, non_greedy: bool) -> usize {
        // greedy prefers the fall-through (body) path; the clone takes
        // the patched exit
        self.emit(if non_greedy { OpCode::ForkNext(0) } else { OpCode::ForkCont(0) })
    }

    fn compile_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Disjunction { children, .. } => self.compile_disjunction(children),
            Node::Sequence { children, .. } => self.compile_sequence(children),
            Node::Group { child, .. } => self.compile_node(child),
            Node::Capture { index, child, .. } => self.compile_capture(*index, child),
            Node::NamedCapture { index, child, .. } => self.compile_capture(*index, child),
            Node::Many { child, non_greedy, .. } => self.compile_many(child, *non_greedy),
            Node::Some { child, non_greedy, .. } => self.compile_some(child, *non_greedy),
            Node::Optional { child, non_greedy, .. } => self.compile_optional(child, *non_greedy),
            Node::Repeat { child, min, max, non_greedy, .. } => {
                self.compile_repeat(child, *min, *max, *non_greedy)
            }
            Node::LineBegin { .. } => {
                self.emit(OpCode::LineBegin);
                self.advance = false;
                Ok(())
            }
            Node::LineEnd { .. } => {
                self.emit(OpCode::LineEnd);
                self.advance = false;
                Ok(())
            }
            Node::WordBoundary { invert, .. } => {
                self.emit(if *invert { OpCode::WordBoundaryNot } else { OpCode::WordBoundary });
                self.advance = false;
                Ok(())
            }
            Node::LookAhead { child, negative, .. } => {
                self.compile_look_around(child, *negative, false)
            }
            Node::LookBehind { child, negative, .. } => {
                self.compile_look_around(child, *negative, true)
            }
            Node::Char { value, .. } => {
                let cp = if self.flags.ignore_case() {
                    unicode::canonicalize(*value, self.flags.unicode())
                } else {
                    *value
                };
                self.emit_consuming(OpCode::Char(cp));
                self.advance = true;
                Ok(())
            }
            Node::Dot { .. } => {
                self.emit_consuming(OpCode::Any);
                self.advance = true;
                Ok(())
            }
            Node::Class { items, invert, .. } => {
                let set = self.build_class_set(items)?;
                let op = if *invert { OpCode::ClassNot(set) } else { OpCode::Class(set) };
                self.emit_consuming(op);
                self.advance = true;
                Ok(())
            }
            Node::EscapeClass { kind, invert, .. } => {
                let set = self.resolve_escape_class(kind);
                let op = if *invert { OpCode::ClassNot(set) } else { OpCode::Class(set) };
                self.emit_consuming(op);
                self.advance = true;
                Ok(())
            }
            Node::BackRef { index, .. } => self.compile_back_ref(*index),
            Node::NamedBackRef { name, .. } => {
                let index = *self
                    .pattern
                    .names
                    .get(name)
                    .unwrap_or_else(|| panic!("BUG: unresolved group name {:?}", name));
                self.compile_back_ref(index)
            }
        }
    }

    /// Consuming single-character opcodes step backward around the
    /// comparison inside look-behind bodies.
    fn emit_consuming(&mut self, op: OpCode) {
        if self.backward {
            self.emit(OpCode::Back);
            self.emit(op);
            self.emit(OpCode::Back);
        } else {
            self.emit(op);
        }
    }

    fn compile_sequence(&mut self, children: &[Node]) -> Result<()> {
        let mut any_advance = false;
        if self.backward {
            for child in children.iter().rev() {
                self.compile_node(child)?;
                any_advance |= self.advance;
            }
        } else {
            for child in children {
                self.compile_node(child)?;
                any_advance |= self.advance;
            }
        }
        self.advance = any_advance;
        Ok(())
    }

    fn compile_disjunction(&mut self, children: &[Node]) -> Result<()> {
        let mut all_advance = true;
        let mut exit_jumps = Vec::with_capacity(children.len() - 1);
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let fork_at = if last { None } else { Some(self.emit(OpCode::ForkCont(0))) };
            self.compile_node(child)?;
            all_advance &= self.advance;
            if let Some(fork_at) = fork_at {
                exit_jumps.push(self.emit(OpCode::Jump(0)));
                self.patch_to_here(fork_at);
            }
        }
        for jump in exit_jumps {
            self.patch_to_here(jump);
        }
        self.advance = all_advance;
        Ok(())
    }

    fn compile_capture(&mut self, index: usize, child: &Node) -> Result<()> {
        // swapped under backward direction so begin <= end always holds
        let (open, close) = if self.backward {
            (OpCode::CapEnd(index), OpCode::CapBegin(index))
        } else {
            (OpCode::CapBegin(index), OpCode::CapEnd(index))
        };
        self.emit(open);
        self.compile_node(child)?;
        self.emit(close);
        Ok(())
    }

    fn compile_optional(&mut self, child: &Node, non_greedy: bool) -> Result<()> {
        let fork_at = self.fork(non_greedy);
        self.compile_node(child)?;
        self.patch_to_here(fork_at);
        self.advance = false;
        Ok(())
    }

    fn compile_many(&mut self, child: &Node, non_greedy: bool) -> Result<()> {
        self.compile_loop_body(child, non_greedy)?;
        self.advance = false;
        Ok(())
    }

    fn compile_some(&mut self, child: &Node, non_greedy: bool) -> Result<()> {
        // mandatory first iteration, unguarded by the empty check
        self.compile_node(child)?;
        let mandatory_advance = self.advance;
        self.compile_loop_body(child, non_greedy)?;
        self.advance = mandatory_advance;
        Ok(())
    }

    /// The common `x*` loop: a fork at the head of every iteration, the
    /// guarded body, and a jump back to the fork.
    fn compile_loop_body(&mut self, child: &Node, non_greedy: bool) -> Result<()> {
        let reset = capture_range(child);
        let fork_at = self.fork(non_greedy);
        if let Some((from, to)) = reset {
            self.emit(OpCode::CapReset(from, to + 1));
        }
        let body_start = self.codes.len();
        self.compile_node(child)?;
        if !self.advance {
            self.codes.insert(body_start, OpCode::PushPos);
            self.emit(OpCode::EmptyCheck);
        }
        self.emit_jump_to(fork_at);
        self.patch_to_here(fork_at);
        Ok(())
    }

    fn compile_repeat(
        &mut self,
        child: &Node,
        min: usize,
        max: Option<usize>,
        non_greedy: bool,
    ) -> Result<()> {
        let reset = capture_range(child);
        let mut body_advance = false;
        match min {
            0 => {}
            1 => {
                self.compile_node(child)?;
                body_advance = self.advance;
            }
            n => {
                self.emit(OpCode::Push(n));
                let loop_start = self.codes.len();
                if let Some((from, to)) = reset {
                    self.emit(OpCode::CapReset(from, to + 1));
                }
                self.compile_node(child)?;
                body_advance = self.advance;
                self.emit(OpCode::Dec);
                self.emit_loop_to(loop_start);
                self.emit(OpCode::Pop);
            }
        }
        match max {
            None => self.compile_loop_body(child, non_greedy)?,
            Some(max) => {
                debug_assert!(max >= min, "BUG: repeat bounds out of order");
                let remainder = max - min;
                if remainder > 0 {
                    self.emit(OpCode::Push(remainder));
                    let fork_at = self.fork(non_greedy);
                    if let Some((from, to)) = reset {
                        self.emit(OpCode::CapReset(from, to + 1));
                    }
                    let body_start = self.codes.len();
                    self.compile_node(child)?;
                    if !self.advance {
                        self.codes.insert(body_start, OpCode::PushPos);
                        self.emit(OpCode::EmptyCheck);
                    }
                    self.emit(OpCode::Dec);
                    self.emit_loop_to(fork_at);
                    self.patch_to_here(fork_at);
                    self.emit(OpCode::Pop);
                }
            }
        }
        self.advance = min > 0 && body_advance;
        Ok(())
    }

    fn compile_look_around(&mut self, child: &Node, negative: bool, behind: bool) -> Result<()> {
        let saved = self.backward;
        self.backward = behind;
        self.emit(OpCode::PushPos);
        self.emit(OpCode::PushProc);
        if negative {
            let fork_at = self.emit(OpCode::ForkCont(0));
            self.compile_node(child)?;
            self.emit(OpCode::RewindProc);
            self.emit(OpCode::Fail);
            self.patch_to_here(fork_at);
            self.emit(OpCode::Pop);
            self.emit(OpCode::RestorePos);
        } else {
            self.compile_node(child)?;
            self.emit(OpCode::RewindProc);
            self.emit(OpCode::RestorePos);
        }
        self.backward = saved;
        self.advance = false;
        Ok(())
    }

    fn compile_back_ref(&mut self, index: usize) -> Result<()> {
        if index == 0 || index > self.pattern.capture_count {
            return Err(Error::InvalidBackReference {
                index,
                captures: self.pattern.capture_count,
            });
        }
        self.emit(if self.backward { OpCode::RefBack(index) } else { OpCode::Ref(index) });
        self.advance = false;
        Ok(())
    }

    fn build_class_set(&mut self, items: &[ClassItem]) -> Result<CharSet> {
        let mut set = CharSet::new();
        for item in items {
            match item {
                ClassItem::Char(c) => set.add_one(c.value),
                ClassItem::Range { begin, end, .. } => {
                    debug_assert!(begin.value <= end.value, "BUG: class range out of order");
                    set.add(begin.value, end.value + 1);
                }
                ClassItem::EscapeClass { kind, invert, .. } => {
                    let mut resolved = self.resolve_escape_class(kind);
                    if *invert {
                        resolved.invert();
                    }
                    set.add_set(&resolved);
                }
            }
        }
        Ok(set)
    }

    fn resolve_escape_class(&self, kind: &EscapeClassKind) -> CharSet {
        match kind {
            EscapeClassKind::Digit => unicode::digit_set(),
            EscapeClassKind::Word => {
                unicode::word_set(self.flags.unicode() && self.flags.ignore_case())
            }
            EscapeClassKind::Space => unicode::space_set(),
            EscapeClassKind::Property { name } => unicode::load_property(name)
                .unwrap_or_else(|| panic!("BUG: unvalidated property name {:?}", name)),
            EscapeClassKind::PropertyValue { property, value } => {
                unicode::load_property_value(property, value).unwrap_or_else(|| {
                    panic!("BUG: unvalidated property value {:?}={:?}", property, value)
                })
            }
        }
    }
}

/// The contiguous range of capture indices inside a subtree, if any.
/// Indices are assigned in source pre-order, so the captures of a
/// subtree always form one contiguous run.
fn capture_range(node: &Node) -> Option<(usize, usize)> {
    fn merge(a: Option<(usize, usize)>, b: Option<(usize, usize)>) -> Option<(usize, usize)> {
        match (a, b) {
            (Some((lo1, hi1)), Some((lo2, hi2))) => Some((lo1.min(lo2), hi1.max(hi2))),
            (some, None) | (None, some) => some,
        }
    }
    match node {
        Node::Disjunction { children, .. } | Node::Sequence { children, .. } => children
            .iter()
            .fold(None, |acc, child| merge(acc, capture_range(child))),
        Node::Group { child, .. }
        | Node::Many { child, .. }
        | Node::Some { child, .. }
        | Node::Optional { child, .. }
        | Node::Repeat { child, .. }
        | Node::LookAhead { child, .. }
        | Node::LookBehind { child, .. } => capture_range(child),
        Node::Capture { index, child, .. } | Node::NamedCapture { index, child, .. } => {
            merge(Some((*index, *index)), capture_range(child))
        }
        _ => None,
    }
}

/// Upper bound on auxiliary-stack depth: a linear walk counting
/// push-like opcodes up and pop-like opcodes down.
fn max_stack_depth(codes: &[OpCode]) -> usize {
    let mut depth: usize = 0;
    let mut max = 0;
    for code in codes {
        match code {
            OpCode::Push(_) | OpCode::PushPos | OpCode::PushProc => {
                depth += 1;
                max = max.max(depth);
            }
            OpCode::Pop | OpCode::RestorePos | OpCode::RewindProc | OpCode::EmptyCheck => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    max
}
