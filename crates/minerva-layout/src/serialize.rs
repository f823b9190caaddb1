//! Canonical textual serialization.
//!
//! Writes an infix rendering of a tree into a caller-supplied byte
//! buffer. The writer never overruns the buffer; it keeps counting the
//! virtual length past the end, so the return value is the length the
//! full text would occupy and callers detect truncation by comparing it
//! to the buffer capacity.

use minerva_core::{
    text_for_special_symbols, Constant, ExprNode, FloatDisplayMode, NodeRef, NodePool,
};

use crate::float_format::format_float;

/// Serializes the tree at `node` into `buffer`.
///
/// Returns the number of bytes the full text occupies; when this is at
/// least `buffer.len()` the output was truncated. Multi-byte characters
/// are never split: a character that does not fit entirely is counted
/// but not written.
pub fn serialize(
    pool: &NodePool,
    node: NodeRef,
    buffer: &mut [u8],
    float_mode: FloatDisplayMode,
    significant_digits: usize,
) -> usize {
    let mut writer = BoundedWriter::new(buffer);
    write_node(pool, node, &mut writer, float_mode, significant_digits, 0);
    writer.virtual_len()
}

/// Infix binding strength, loosest first.
fn precedence(node: &ExprNode) -> u8 {
    match node {
        ExprNode::Add(_) => 1,
        ExprNode::Neg(_) => 2,
        ExprNode::Mul(_) | ExprNode::Div { .. } => 3,
        ExprNode::Pow { .. } => 4,
        _ => 5,
    }
}

struct BoundedWriter<'a> {
    buffer: &'a mut [u8],
    written: usize,
    virtual_len: usize,
    saturated: bool,
}

impl<'a> BoundedWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            written: 0,
            virtual_len: 0,
            saturated: false,
        }
    }

    fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            let mut encoded = [0u8; 4];
            let bytes = c.encode_utf8(&mut encoded).as_bytes();
            // Once a character does not fit, nothing further is written,
            // so the output is always a contiguous prefix of the text.
            if !self.saturated && self.written + bytes.len() <= self.buffer.len() {
                self.buffer[self.written..self.written + bytes.len()].copy_from_slice(bytes);
                self.written += bytes.len();
            } else {
                self.saturated = true;
            }
            self.virtual_len += bytes.len();
        }
    }

    fn virtual_len(&self) -> usize {
        self.virtual_len
    }
}

fn write_node(
    pool: &NodePool,
    node: NodeRef,
    w: &mut BoundedWriter<'_>,
    float_mode: FloatDisplayMode,
    digits: usize,
    parent_precedence: u8,
) {
    let n = pool.get(node);
    let own = precedence(n);
    let parenthesize = own < parent_precedence;
    if parenthesize {
        w.push_str("(");
    }

    match n {
        ExprNode::Integer(i) => w.push_str(&i.to_string()),
        ExprNode::Rational(num, den) => {
            w.push_str(&num.to_string());
            w.push_str("/");
            w.push_str(&den.to_string());
        }
        ExprNode::Float(f) => w.push_str(&format_float(*f, float_mode, digits)),
        ExprNode::Constant(Constant::Pi) => w.push_str("π"),
        ExprNode::Constant(Constant::E) => w.push_str("e"),
        ExprNode::Symbol(name) => match text_for_special_symbols(*name) {
            Some(token) => w.push_str(token),
            None => w.push_str(&char::from(name.code()).to_string()),
        },
        ExprNode::Add(args) => {
            for (i, &arg) in args.iter().enumerate() {
                // A negated term supplies its own sign.
                if let ExprNode::Neg(inner) = pool.get(arg) {
                    w.push_str("-");
                    write_node(pool, *inner, w, float_mode, digits, precedence(n) + 1);
                } else {
                    if i > 0 {
                        w.push_str("+");
                    }
                    write_node(pool, arg, w, float_mode, digits, precedence(n));
                }
            }
        }
        ExprNode::Mul(args) => {
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    w.push_str("*");
                }
                write_node(pool, arg, w, float_mode, digits, own);
            }
        }
        ExprNode::Pow { base, exp } => {
            // Exponentiation is right-associative: parenthesize an
            // exponent-shaped base.
            write_node(pool, *base, w, float_mode, digits, own + 1);
            w.push_str("^");
            write_node(pool, *exp, w, float_mode, digits, own);
        }
        ExprNode::Neg(arg) => {
            w.push_str("-");
            write_node(pool, *arg, w, float_mode, digits, own + 1);
        }
        ExprNode::Div { num, den } => {
            write_node(pool, *num, w, float_mode, digits, own);
            w.push_str("/");
            write_node(pool, *den, w, float_mode, digits, own + 1);
        }
        ExprNode::Function { kind, arg } => {
            w.push_str(kind.name());
            w.push_str("(");
            write_node(pool, *arg, w, float_mode, digits, 0);
            w.push_str(")");
        }
        ExprNode::Undefined => w.push_str("undef"),
        ExprNode::AllocationFailed => {}
    }

    if parenthesize {
        w.push_str(")");
    }
}
