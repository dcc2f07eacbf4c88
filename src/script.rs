//! The `.vops` operation language: one container operation per line.
//!
//! ```text
//! # build and reshape
//! push 10
//! push 20
//! insert 1 15        # offset from begin()
//! erase 0
//! expect [15, 20]
//! expect capacity 2
//! ```

use my_vector::{MyVector, VectorError};
use std::fmt;

/// A single operation on the script's `MyVector<i64>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Push(i64),
    Pop,
    Insert(isize, i64), // offset from begin(), value
    Erase(isize),
    Clear,
    At(usize),
    Front,
    Back,
    Size,
    Capacity,
    Print,
    Expect(Vec<i64>),
    ExpectCapacity(usize),
}

/// An operation together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line: usize,
    pub op: Op,
}

peg::parser!(pub grammar parser() for str {
    use super::Op;

    pub rule line() -> Option<Op>
        = _ op:op()? _ comment()? { op }

    rule op() -> Op
        = "push" __ n:int() { Op::Push(n) }
        / "pop" { Op::Pop }
        / "insert" __ i:offset() __ n:int() { Op::Insert(i, n) }
        / "erase" __ i:offset() { Op::Erase(i) }
        / "clear" { Op::Clear }
        / "at" __ i:index() { Op::At(i) }
        / "front" { Op::Front }
        / "back" { Op::Back }
        / "size" { Op::Size }
        / "capacity" { Op::Capacity }
        / "print" { Op::Print }
        / "expect" __ "capacity" __ n:index() { Op::ExpectCapacity(n) }
        / "expect" _ "[" _ items:(int() ** (_ "," _)) _ "]" { Op::Expect(items) }

    rule int() -> i64
        = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("64-bit integer")) }

    rule offset() -> isize
        = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("cursor offset")) }

    rule index() -> usize
        = n:$(['0'..='9']+) {? n.parse().or(Err("index")) }

    rule comment() = "#" [_]*

    rule _() = quiet!{[' ' | '\t' | '\r']*}
    rule __() = quiet!{[' ' | '\t']+}
});

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    Parse {
        line: usize,
        message: String,
    },
    Vector {
        line: usize,
        source: VectorError,
    },
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },
}

impl ScriptError {
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Parse { line, .. }
            | ScriptError::Vector { line, .. }
            | ScriptError::Mismatch { line, .. } => *line,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse { line, message } => {
                write!(f, "line {}: parse error: {}", line, message)
            }
            ScriptError::Vector { line, source } => write!(f, "line {}: {}", line, source),
            ScriptError::Mismatch {
                line,
                expected,
                actual,
            } => write!(f, "line {}: expected {}, found {}", line, expected, actual),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Vector { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parses a whole script, skipping blank and comment-only lines.
pub fn parse(source: &str) -> Result<Vec<Statement>, ScriptError> {
    let mut stmts = Vec::new();
    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let op = parser::line(text).map_err(|e| ScriptError::Parse {
            line,
            message: e.to_string(),
        })?;
        if let Some(op) = op {
            stmts.push(Statement { line, op });
        }
    }
    Ok(stmts)
}

/// What a finished run produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    /// Values printed by `pop`, `at`, `front`, `back`, `size`, `capacity`
    /// and `print`, in order.
    pub output: Vec<String>,
    /// Number of statements executed.
    pub executed: usize,
    /// How many times the buffer had to grow.
    pub reallocations: usize,
}

/// Executes statements against one `MyVector<i64>`.
pub struct Runner {
    vec: MyVector<i64>,
    verbose: u8,
    report: Report,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Runner {
    pub fn new(verbose: u8) -> Self {
        Self {
            vec: MyVector::new(),
            verbose,
            report: Report::default(),
        }
    }

    /// The container as left by the statements run so far.
    pub fn vector(&self) -> &MyVector<i64> {
        &self.vec
    }

    /// Parses and runs `source` from a fresh container.
    pub fn run_source(&mut self, source: &str) -> Result<Report, ScriptError> {
        let stmts = parse(source)?;
        self.run(&stmts)
    }

    /// Runs `stmts` in order, stopping at the first failure.
    pub fn run(&mut self, stmts: &[Statement]) -> Result<Report, ScriptError> {
        self.vec = MyVector::new();
        self.report = Report::default();

        for stmt in stmts {
            let before = self.vec.capacity();
            if self.verbose >= 1 {
                println!("[{:>3}] {:?}", stmt.line, stmt.op);
            }
            self.step(stmt)?;
            if self.vec.capacity() != before {
                self.report.reallocations += 1;
            }
            if self.verbose >= 2 {
                println!(
                    "      len={} cap={}",
                    self.vec.len(),
                    self.vec.capacity()
                );
            }
            self.report.executed += 1;
        }

        Ok(self.report.clone())
    }

    fn step(&mut self, stmt: &Statement) -> Result<(), ScriptError> {
        let line = stmt.line;
        let fail = move |source: VectorError| ScriptError::Vector { line, source };
        let v = &mut self.vec;

        match &stmt.op {
            Op::Push(n) => v.push_back(*n),
            Op::Pop => {
                let n = v.pop_back().map_err(fail)?;
                self.emit(n.to_string());
            }
            Op::Insert(offset, n) => {
                let pos = v.begin() + *offset;
                v.insert(pos, *n).map_err(fail)?;
            }
            Op::Erase(offset) => {
                let pos = v.begin() + *offset;
                v.erase(pos).map_err(fail)?;
            }
            Op::Clear => v.clear(),
            Op::At(i) => {
                let n = *v.at(*i).map_err(fail)?;
                self.emit(n.to_string());
            }
            Op::Front => {
                let n = *v.front().map_err(fail)?;
                self.emit(n.to_string());
            }
            Op::Back => {
                let n = *v.back().map_err(fail)?;
                self.emit(n.to_string());
            }
            Op::Size => {
                let n = v.len();
                self.emit(n.to_string());
            }
            Op::Capacity => {
                let n = v.capacity();
                self.emit(n.to_string());
            }
            Op::Print => {
                let text = format!("{:?}", v);
                self.emit(text);
            }
            Op::Expect(items) => {
                if *v != *items {
                    return Err(ScriptError::Mismatch {
                        line,
                        expected: format!("{:?}", items),
                        actual: format!("{:?}", v),
                    });
                }
            }
            Op::ExpectCapacity(cap) => {
                if v.capacity() != *cap {
                    return Err(ScriptError::Mismatch {
                        line,
                        expected: format!("capacity {}", cap),
                        actual: format!("capacity {}", v.capacity()),
                    });
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, text: String) {
        self.report.output.push(text);
    }
}
