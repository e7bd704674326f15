//! Lowers a parsed regex (`regex-syntax`'s `Hir`) into a [`Program`].
//!
//! Grounded on `original_source/src/re2parser.cc`'s walk from a parsed regex
//! into RE2's bytecode: a Thompson-style compiler that emits one instruction
//! per syntax node and patches forward "holes" once the following fragment
//! is known, the same technique `other_examples/208a9ce2_mrityunjai01-regex-dfa__src-nfa.rs.rs`'s
//! `NfaBuilder` uses to turn a `regex_syntax::Expr` into an NFA directly.
//! This crate instead compiles to the intermediate [`Program`] bytecode
//! first, so that the closure-collapsing NFA builder in
//! `super::build` has a single, uniform opcode listing to consume
//! regardless of how a `Program` was produced.

use regex_syntax::hir::{
    Anchor, Class, Group, GroupKind, Hir, HirKind, Literal, Repetition, RepetitionKind, RepetitionRange, WordBoundary,
};
use regex_syntax::Parser;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

use super::program::{EmptyLook, Inst, Program};

const PLACEHOLDER: usize = usize::MAX;

/// A fragment of a program under construction: its entry instruction plus
/// the forward-pointing "holes" still to be patched to whatever comes next.
struct Frag {
    start: usize,
    holes: Vec<Hole>,
}

/// One unpatched out-pointer of an already-pushed instruction.
#[derive(Clone, Copy)]
enum Hole {
    Out(usize),
    Out1(usize),
}

struct Compiler {
    prog: Program,
}

impl Compiler {
    fn new() -> Self {
        Compiler { prog: Program::new() }
    }

    fn push(&mut self, inst: Inst) -> usize {
        self.prog.push(inst)
    }

    fn patch(&mut self, holes: &[Hole], target: usize) {
        for &hole in holes {
            match hole {
                Hole::Out(i) => match &mut self.prog.insts[i] {
                    Inst::Alt { out, .. }
                    | Inst::AltMatch { out, .. }
                    | Inst::ByteRange { out, .. }
                    | Inst::Capture { out, .. }
                    | Inst::EmptyWidth { out, .. }
                    | Inst::Nop { out } => *out = target,
                    Inst::Match | Inst::Fail => unreachable!("Match/Fail carry no out hole"),
                },
                Hole::Out1(i) => match &mut self.prog.insts[i] {
                    Inst::Alt { out1, .. } | Inst::AltMatch { out1, .. } => *out1 = target,
                    _ => unreachable!("only Alt/AltMatch carry an out1 hole"),
                },
            }
        }
    }

    fn compile(&mut self, hir: &Hir) -> Frag {
        match hir.kind() {
            HirKind::Empty => self.compile_empty(),
            HirKind::Literal(lit) => self.compile_literal(lit),
            HirKind::Class(class) => self.compile_class(class),
            HirKind::Anchor(anchor) => self.compile_anchor(anchor),
            HirKind::WordBoundary(wb) => self.compile_word_boundary(wb),
            HirKind::Repetition(rep) => self.compile_repetition(rep),
            HirKind::Group(group) => self.compile_group(group),
            HirKind::Concat(subs) => self.compile_concat(subs),
            HirKind::Alternation(subs) => self.compile_alternation(subs),
        }
    }

    fn compile_empty(&mut self) -> Frag {
        let idx = self.push(Inst::Nop { out: PLACEHOLDER });
        Frag { start: idx, holes: vec![Hole::Out(idx)] }
    }

    fn compile_literal(&mut self, lit: &Literal) -> Frag {
        let sym: Symbol = match *lit {
            Literal::Unicode(c) => c as Symbol,
            Literal::Byte(b) => b as Symbol,
        };
        let idx = self.push(Inst::ByteRange { lo: sym, hi: sym, out: PLACEHOLDER, foldcase: false });
        Frag { start: idx, holes: vec![Hole::Out(idx)] }
    }

    fn compile_class(&mut self, class: &Class) -> Frag {
        let ranges: Vec<(Symbol, Symbol)> = match class {
            Class::Unicode(u) => u
                .ranges()
                .iter()
                .filter_map(|r| {
                    let start = r.start() as u32;
                    let end = (r.end() as u32).min(0x7f);
                    if start > 0x7f || start > end {
                        None
                    } else {
                        Some((start as Symbol, end as Symbol))
                    }
                })
                .collect(),
            Class::Bytes(b) => b.ranges().iter().map(|r| (r.start() as Symbol, r.end() as Symbol)).collect(),
        };
        self.compile_class_ranges(ranges)
    }

    fn compile_class_ranges(&mut self, ranges: Vec<(Symbol, Symbol)>) -> Frag {
        if ranges.is_empty() {
            let idx = self.push(Inst::Fail);
            return Frag { start: idx, holes: Vec::new() };
        }
        let mut frags: Vec<Frag> = ranges
            .into_iter()
            .map(|(lo, hi)| {
                let idx = self.push(Inst::ByteRange { lo, hi, out: PLACEHOLDER, foldcase: false });
                Frag { start: idx, holes: vec![Hole::Out(idx)] }
            })
            .collect();
        let mut acc = frags.pop().expect("checked non-empty above");
        while let Some(prev) = frags.pop() {
            let alt = self.push(Inst::Alt { out: prev.start, out1: acc.start });
            let mut holes = prev.holes;
            holes.extend(acc.holes);
            acc = Frag { start: alt, holes };
        }
        acc
    }

    fn compile_anchor(&mut self, anchor: &Anchor) -> Frag {
        let look = match anchor {
            Anchor::StartLine => EmptyLook::BeginLine,
            Anchor::EndLine => EmptyLook::EndLine,
            Anchor::StartText => EmptyLook::BeginText,
            Anchor::EndText => EmptyLook::EndText,
        };
        self.compile_empty_width(look)
    }

    fn compile_word_boundary(&mut self, wb: &WordBoundary) -> Frag {
        let look = match wb {
            WordBoundary::Unicode | WordBoundary::Ascii => EmptyLook::WordBoundary,
            WordBoundary::UnicodeNegate | WordBoundary::AsciiNegate => EmptyLook::NotWordBoundary,
        };
        self.compile_empty_width(look)
    }

    fn compile_empty_width(&mut self, look: EmptyLook) -> Frag {
        let idx = self.push(Inst::EmptyWidth { look, out: PLACEHOLDER });
        Frag { start: idx, holes: vec![Hole::Out(idx)] }
    }

    fn compile_repetition(&mut self, rep: &Repetition) -> Frag {
        match rep.kind {
            RepetitionKind::ZeroOrOne => {
                let sub = self.compile(&rep.hir);
                self.compile_quest(sub, rep.greedy)
            }
            RepetitionKind::ZeroOrMore => {
                let sub = self.compile(&rep.hir);
                self.compile_star(sub, rep.greedy)
            }
            RepetitionKind::OneOrMore => {
                let sub = self.compile(&rep.hir);
                self.compile_plus(sub, rep.greedy)
            }
            RepetitionKind::Range(range) => self.compile_range(&rep.hir, range, rep.greedy),
        }
    }

    fn compile_quest(&mut self, sub: Frag, greedy: bool) -> Frag {
        let alt = self.push(Inst::Alt { out: PLACEHOLDER, out1: PLACEHOLDER });
        if greedy {
            self.patch(&[Hole::Out(alt)], sub.start);
            let mut holes = sub.holes;
            holes.push(Hole::Out1(alt));
            Frag { start: alt, holes }
        } else {
            self.patch(&[Hole::Out1(alt)], sub.start);
            let mut holes = sub.holes;
            holes.push(Hole::Out(alt));
            Frag { start: alt, holes }
        }
    }

    fn compile_star(&mut self, sub: Frag, greedy: bool) -> Frag {
        let alt = self.push(Inst::Alt { out: PLACEHOLDER, out1: PLACEHOLDER });
        self.patch(&sub.holes, alt);
        if greedy {
            self.patch(&[Hole::Out(alt)], sub.start);
            Frag { start: alt, holes: vec![Hole::Out1(alt)] }
        } else {
            self.patch(&[Hole::Out1(alt)], sub.start);
            Frag { start: alt, holes: vec![Hole::Out(alt)] }
        }
    }

    fn compile_plus(&mut self, sub: Frag, greedy: bool) -> Frag {
        let alt = self.push(Inst::Alt { out: PLACEHOLDER, out1: PLACEHOLDER });
        self.patch(&sub.holes, alt);
        if greedy {
            self.patch(&[Hole::Out(alt)], sub.start);
            Frag { start: sub.start, holes: vec![Hole::Out1(alt)] }
        } else {
            self.patch(&[Hole::Out1(alt)], sub.start);
            Frag { start: sub.start, holes: vec![Hole::Out(alt)] }
        }
    }

    /// Unrolls bounded repetition into concatenated copies, one `compile`
    /// call per copy: simpler and, since this crate's NFAs only ever decide
    /// membership (never leftmost-longest capture extraction), exactly as
    /// correct as RE2's own nested-optional encoding for `{m,n}`.
    fn compile_range(&mut self, hir: &Hir, range: RepetitionRange, greedy: bool) -> Frag {
        match range {
            RepetitionRange::Exactly(m) => self.compile_repeat_exact(hir, m as usize),
            RepetitionRange::AtLeast(m) => {
                let m = m as usize;
                if m == 0 {
                    let sub = self.compile(hir);
                    return self.compile_star(sub, greedy);
                }
                let required = self.compile_repeat_exact(hir, m - 1);
                let tail_sub = self.compile(hir);
                let tail = self.compile_plus(tail_sub, greedy);
                self.concat_frags(required, tail)
            }
            RepetitionRange::Bounded(m, n) => {
                let (m, n) = (m as usize, n as usize);
                let mut acc = self.compile_repeat_exact(hir, m);
                for _ in 0..n.saturating_sub(m) {
                    let sub = self.compile(hir);
                    let optional = self.compile_quest(sub, greedy);
                    acc = self.concat_frags(acc, optional);
                }
                acc
            }
        }
    }

    fn compile_repeat_exact(&mut self, hir: &Hir, m: usize) -> Frag {
        if m == 0 {
            return self.compile_empty();
        }
        let mut acc = self.compile(hir);
        for _ in 1..m {
            let next = self.compile(hir);
            acc = self.concat_frags(acc, next);
        }
        acc
    }

    fn compile_group(&mut self, group: &Group) -> Frag {
        let slot = match &group.kind {
            GroupKind::CaptureIndex(i) => Some(*i as usize),
            GroupKind::CaptureName { index, .. } => Some(*index as usize),
            GroupKind::NonCapturing => None,
        };
        let Some(index) = slot else { return self.compile(&group.hir) };
        let open = self.push(Inst::Capture { slot: 2 * index, out: PLACEHOLDER });
        let inner = self.compile(&group.hir);
        self.patch(&[Hole::Out(open)], inner.start);
        let close = self.push(Inst::Capture { slot: 2 * index + 1, out: PLACEHOLDER });
        self.patch(&inner.holes, close);
        Frag { start: open, holes: vec![Hole::Out(close)] }
    }

    fn compile_concat(&mut self, subs: &[Hir]) -> Frag {
        if subs.is_empty() {
            return self.compile_empty();
        }
        let mut start = 0;
        let mut holes = Vec::new();
        for (i, sub) in subs.iter().enumerate() {
            let frag = self.compile(sub);
            if i == 0 {
                start = frag.start;
            } else {
                self.patch(&holes, frag.start);
            }
            holes = frag.holes;
        }
        Frag { start, holes }
    }

    fn compile_alternation(&mut self, subs: &[Hir]) -> Frag {
        let mut frags: Vec<Frag> = subs.iter().map(|h| self.compile(h)).collect();
        let mut acc = frags.pop().expect("alternation has at least one branch");
        while let Some(prev) = frags.pop() {
            let alt = self.push(Inst::Alt { out: prev.start, out1: acc.start });
            let mut holes = prev.holes;
            holes.extend(acc.holes);
            acc = Frag { start: alt, holes };
        }
        acc
    }

    fn concat_frags(&mut self, a: Frag, b: Frag) -> Frag {
        self.patch(&a.holes, b.start);
        Frag { start: a.start, holes: b.holes }
    }
}

/// Parses `pattern` and compiles it into a [`Program`]. Parse failures
/// surface as [`Error::ParseFailure`], this crate's `parse-failure` category.
pub fn compile_pattern(pattern: &str) -> Result<Program> {
    let hir = Parser::new().parse(pattern).map_err(|e| Error::ParseFailure(e.to_string()))?;
    let mut c = Compiler::new();
    let frag = c.compile(&hir);
    let match_inst = c.push(Inst::Match);
    c.patch(&frag.holes, match_inst);
    c.prog.start = frag.start;
    Ok(c.prog)
}
