use tracing::trace;

use crate::{
    ast::Token,
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::core::Reducer,
        lexer::{self, AtomToken},
        namespace::core::Symbol,
        rules::{self, OperatorEntry},
        value::core::Value,
    },
};

/// One element of a flattened bracket level, ready for folding.
#[derive(Debug, Clone)]
pub enum Item {
    /// A fully evaluated operand.
    Value(Value),
    /// A bound operator.
    Operator(&'static OperatorEntry),
    /// The previous identifier named a function; the next group is its
    /// argument list. The function itself waits on the reducer's stack.
    PendingFunction,
    /// A comma between function arguments.
    ArgSeparator,
}

/// The outcome of reducing one bracket level.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduced {
    /// The level held a single expression.
    Value(Value),
    /// The level was a comma-separated list.
    Args(Vec<Value>),
    /// The level held nothing: `()`.
    Empty,
}

impl Reduced {
    /// Turns the outcome into call arguments.
    pub(crate) fn into_args(self) -> Vec<Value> {
        match self {
            Self::Value(value) => vec![value],
            Self::Args(values) => values,
            Self::Empty => Vec::new(),
        }
    }
}

impl Reducer {
    /// Reduces one bracket level: explores it, then folds the result.
    pub(crate) fn reduce_level(&mut self, tokens: &[Token], depth: usize) -> CalcResult<Reduced> {
        // Escaped signs wrap their operand in one extra group.
        if depth > self.options.max_depth + 1 {
            return Err(ErrorKind::NestingTooDeep { limit: self.options.max_depth }.into());
        }
        let items = self.explore(tokens, depth)?;
        Self::reduce(items)
    }

    /// Flattens a bracket level into items, evaluating nested groups and
    /// applying pending functions as it goes.
    fn explore(&mut self, tokens: &[Token], depth: usize) -> CalcResult<Vec<Item>> {
        let mut items: Vec<Item> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let pending = matches!(items.last(), Some(Item::PendingFunction));

            match token {
                Token::Group(inner) => {
                    let reduced = self.reduce_level(inner, depth + 1)?;
                    if pending {
                        items.pop();
                        let value = self.apply_pending(reduced)?;
                        items.push(Item::Value(value));
                    } else {
                        items.push(Item::Value(group_value(reduced)?));
                    }
                },
                _ if pending => return Err(self.missing_argument_list()),
                Token::Operator(symbol) => {
                    let entry = rules::lookup(symbol)
                        .ok_or_else(|| ErrorKind::UnsupportedOperator { symbol: (*symbol).to_string() })?;
                    items.push(Item::Operator(entry));
                },
                Token::Atom(text) => self.convert_atom(text, &mut items)?,
            }
        }

        if matches!(items.last(), Some(Item::PendingFunction)) {
            return Err(self.missing_argument_list());
        }
        Ok(items)
    }

    /// Pops the most recent pending function and calls it.
    fn apply_pending(&mut self, reduced: Reduced) -> CalcResult<Value> {
        let function = self.functions
                           .pop()
                           .ok_or_else(|| ErrorKind::malformed("argument list without a function"))?;
        let args = reduced.into_args();
        trace!(function = function.name(), args = args.len(), "applying function");
        function.call(&args)
    }

    fn missing_argument_list(&self) -> crate::error::CalcError {
        let name = self.functions.last().map_or("function", |function| function.name());
        ErrorKind::malformed(format!("'{name}' must be followed by an argument list")).into()
    }

    /// Converts literal text into items.
    ///
    /// Text holding commas is an argument list fragment: each comma becomes
    /// an [`Item::ArgSeparator`] and each non-empty piece is converted on its
    /// own. Nested calls were already split out as groups, so every comma
    /// seen here belongs to this level.
    fn convert_atom(&mut self, text: &str, items: &mut Vec<Item>) -> CalcResult<()> {
        if !text.contains(',') {
            let item = self.convert_piece(text)?;
            items.push(item);
            return Ok(());
        }

        for (index, piece) in text.split(',').enumerate() {
            if index > 0 {
                items.push(Item::ArgSeparator);
            }
            let piece = piece.trim();
            if !piece.is_empty() {
                let item = self.convert_piece(piece)?;
                items.push(item);
            }
        }
        Ok(())
    }

    /// Converts a single literal or identifier.
    fn convert_piece(&mut self, text: &str) -> CalcResult<Item> {
        match lexer::classify(text) {
            Some(AtomToken::Integer(n)) => Ok(Item::Value(Value::Integer(n))),
            Some(AtomToken::Real(r)) => Ok(Item::Value(Value::Real(r))),
            Some(AtomToken::Identifier(name)) => match self.namespaces.lookup(&name)? {
                Symbol::Constant(value) => Ok(Item::Value(value)),
                Symbol::Function(function) => {
                    self.functions.push(function);
                    Ok(Item::PendingFunction)
                },
            },
            None => Err(ErrorKind::malformed(format!("cannot read '{text}'")).into()),
        }
    }
}

/// The value of a group that is not an argument list.
fn group_value(reduced: Reduced) -> CalcResult<Value> {
    match reduced {
        Reduced::Value(value) => Ok(value),
        Reduced::Args(values) => Ok(Value::Tuple(values)),
        Reduced::Empty => Err(ErrorKind::MissingOperand.into()),
    }
}
