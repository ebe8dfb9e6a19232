use crate::{
    ast::Token,
    interpreter::{
        parser::{core::Structurer, utils::continues_exponent},
        rules,
    },
};

impl Structurer<'_> {
    /// Escapes a unary sign that has just been read.
    ///
    /// The text up to the next bracket, operator character or comma is the
    /// signed operand. Depending on what it finds, the sign becomes:
    ///
    /// - `(±1 * operand)` as one group, for a plain literal or name: `-pi`.
    /// - `(±1 * 1) *` followed by whatever comes next, when the operand is
    ///   empty or opens a group: `-(2+3)`, `-sin(30)`, `-+1`. The cursor is
    ///   not advanced, so the following text is structured normally.
    /// - The bare operator, when the input ends right after it: `1+-`. The
    ///   reducer then rejects the expression.
    ///
    /// Escaped signs keep their binding tighter than `**`: `-2**2` is `4`.
    pub(crate) fn escape_sign(&mut self, sign: &'static str, tokens: &mut Vec<Token>) {
        let mut operand = String::new();
        let mut end = self.pos;
        while let Some(&c) = self.chars.get(end) {
            let in_exponent = matches!(c, '+' | '-') && continues_exponent(&operand);
            if !in_exponent && (rules::is_special(c) || c == ',') {
                break;
            }
            operand.push(c);
            end += 1;
        }

        let operand = operand.trim();
        let unit = Token::atom(format!("{sign}1"));
        let stopped_at_group = self.chars.get(end).copied().is_some_and(rules::is_open_bracket);

        if operand.is_empty() && end >= self.chars.len() {
            tokens.push(Token::Operator(sign));
        } else if operand.is_empty() || stopped_at_group {
            tokens.push(Token::Group(vec![unit, Token::Operator("*"), Token::atom("1")]));
            tokens.push(Token::Operator("*"));
        } else {
            tokens.push(Token::Group(vec![unit, Token::Operator("*"), Token::atom(operand)]));
            self.pos = end;
        }
    }
}
