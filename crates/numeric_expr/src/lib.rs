//! # numeric_expr
//!
//! The numeric expression grammar behind the calculator-aware form fields.
//!
//! Two operations cover the whole contract:
//! - [`is_valid_numeric_input`]: is this string an acceptable *partial*
//!   state of the grammar? Checked on every keystroke, so strings like
//!   `"3+"` or `"-"` are valid input even though they are not yet
//!   evaluable.
//! - [`evaluate_numeric_expression`]: reduce a complete expression to a
//!   finite number, or `None` when the text is empty, partial, malformed,
//!   or the result is not finite.
//!
//! The grammar is deliberately small (no parentheses, no whitespace):
//!
//! ```text
//! expr    := term (op term)*
//! op      := '+' | '-' | '*' | '/'
//! term    := '-'? number
//! number  := digits ('.' digits?)? | '.' digits
//! ```
//!
//! `*` and `/` bind tighter than `+` and `-`; equal precedence associates
//! left.

mod eval;
mod lexer;
mod validate;

pub use eval::evaluate_numeric_expression;
pub use validate::is_valid_numeric_input;
