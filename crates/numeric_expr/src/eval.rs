//! Recursive-descent evaluation of complete expressions.

use crate::lexer::{Token, lex};

/// Evaluate `text` to a finite number.
///
/// Returns `None` when the text is empty, is only a partial expression
/// (`"3+"`), contains characters outside the grammar, or reduces to a
/// non-finite value (`"1/0"`).
///
/// Evaluation is a pure function of its input: the same text always yields
/// the same result.
///
/// # Examples
///
/// ```
/// use numeric_expr::evaluate_numeric_expression;
///
/// assert_eq!(evaluate_numeric_expression("3+4"), Some(7.0));
/// assert_eq!(evaluate_numeric_expression("2+3*4"), Some(14.0));
/// assert_eq!(evaluate_numeric_expression("2*-3"), Some(-6.0));
/// assert_eq!(evaluate_numeric_expression("3+"), None);
/// assert_eq!(evaluate_numeric_expression(""), None);
/// assert_eq!(evaluate_numeric_expression("1/0"), None);
/// ```
pub fn evaluate_numeric_expression(text: &str) -> Option<f64> {
    let tokens = lex(text)?;
    if tokens.is_empty() {
        return None;
    }
    log::trace!(target: "numeric_expr.eval", "tokens for {text:?}: {tokens:?}");

    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return None;
    }

    value.is_finite().then_some(value)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expr(&mut self) -> Option<f64> {
        let mut acc = self.product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc += self.product()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc -= self.product()?;
                }
                _ => return Some(acc),
            }
        }
    }

    fn product(&mut self) -> Option<f64> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    acc /= self.unary()?;
                }
                _ => return Some(acc),
            }
        }
    }

    fn unary(&mut self) -> Option<f64> {
        match self.bump()? {
            Token::Minus => Some(-self.unary()?),
            Token::Number(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(evaluate_numeric_expression("2+3*4"), Some(14.0));
        assert_eq!(evaluate_numeric_expression("10-4-3"), Some(3.0));
        assert_eq!(evaluate_numeric_expression("12/4/3"), Some(1.0));
        assert_eq!(evaluate_numeric_expression("1+6/2"), Some(4.0));
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate_numeric_expression("-3"), Some(-3.0));
        assert_eq!(evaluate_numeric_expression("3--2"), Some(5.0));
        assert_eq!(evaluate_numeric_expression("2*-3"), Some(-6.0));
        assert_eq!(evaluate_numeric_expression("-.5"), Some(-0.5));
    }

    #[test]
    fn trailing_dot_and_leading_dot_literals() {
        assert_eq!(evaluate_numeric_expression("3."), Some(3.0));
        assert_eq!(evaluate_numeric_expression(".5"), Some(0.5));
        assert_eq!(evaluate_numeric_expression("3.+2"), Some(5.0));
    }

    #[test]
    fn partial_or_malformed_input_is_none() {
        for s in ["", "3+", "-", ".", "3*", "abc", "1.2.3", "3 + 4"] {
            assert_eq!(evaluate_numeric_expression(s), None, "{s:?}");
        }
    }

    #[test]
    fn non_finite_results_are_none() {
        assert_eq!(evaluate_numeric_expression("1/0"), None);
        assert_eq!(evaluate_numeric_expression("0/0"), None);
        assert_eq!(evaluate_numeric_expression("-1/0"), None);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let text = "1.5+2.25*2";
        assert_eq!(
            evaluate_numeric_expression(text),
            evaluate_numeric_expression(text)
        );
        assert_eq!(evaluate_numeric_expression(text), Some(6.0));
    }
}
