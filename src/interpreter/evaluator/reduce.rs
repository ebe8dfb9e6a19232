use tracing::trace;

use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::{
            core::Reducer,
            explore::{Item, Reduced},
        },
        rules::Associativity,
        value::core::Value,
    },
};

impl Reducer {
    /// Reduces the items of one explored bracket level.
    ///
    /// A level holding argument separators is an argument list: each segment
    /// is folded on its own and the results are returned in order. Any other
    /// level is folded into a single value.
    pub(in crate::interpreter::evaluator) fn reduce(items: Vec<Item>) -> CalcResult<Reduced> {
        if items.is_empty() {
            return Ok(Reduced::Empty);
        }

        if !items.iter().any(|item| matches!(item, Item::ArgSeparator)) {
            return fold(items).map(Reduced::Value);
        }

        let mut args = Vec::new();
        let mut segment = Vec::new();
        for item in items {
            if matches!(item, Item::ArgSeparator) {
                args.push(fold(std::mem::take(&mut segment))?);
            } else {
                segment.push(item);
            }
        }
        args.push(fold(segment)?);

        Ok(Reduced::Args(args))
    }
}

/// Folds a flat operand/operator sequence into one value.
///
/// Each step picks the operator with the highest priority and replaces it
/// and its two neighbors with the result. Among operators sharing that
/// priority, left-associative tiers pick the earliest one and
/// right-associative tiers the latest, so `8-2-1` is `5` while `2**3**2` is
/// `512`.
///
/// # Errors
/// - `MissingOperand` if the chosen operator lacks a value on either side,
///   or if the sequence is empty.
/// - `MalformedExpression` if two values are adjacent with no operator
///   between them.
/// - Any error raised by the operator itself.
fn fold(mut items: Vec<Item>) -> CalcResult<Value> {
    while items.len() > 1 {
        let Some(index) = next_operator(&items) else {
            return Err(ErrorKind::malformed("operands are not separated by an operator").into());
        };
        let Item::Operator(entry) = items[index] else {
            return Err(ErrorKind::MissingOperand.into());
        };

        let (Some(Item::Value(left)), Some(Item::Value(right))) =
            (index.checked_sub(1).and_then(|i| items.get(i)), items.get(index + 1))
        else {
            return Err(ErrorKind::MissingOperand.into());
        };

        let result = (entry.function)(left, right)?;
        trace!(operator = entry.symbol, %left, %right, %result, "folded");
        items.splice(index - 1..=index + 1, [Item::Value(result)]);
    }

    match items.pop() {
        Some(Item::Value(value)) => Ok(value),
        _ => Err(ErrorKind::MissingOperand.into()),
    }
}

/// Finds the operator that folds next.
fn next_operator(items: &[Item]) -> Option<usize> {
    let operators = || {
        items.iter().enumerate().filter_map(|(index, item)| match item {
                                    Item::Operator(entry) => Some((index, *entry)),
                                    _ => None,
                                })
    };

    let top = operators().map(|(_, entry)| entry.priority).max()?;
    let mut candidates = operators().filter(|(_, entry)| entry.priority == top);
    let (first, entry) = candidates.next()?;

    match entry.associativity() {
        Associativity::Left => Some(first),
        Associativity::Right => Some(candidates.last().map_or(first, |(index, _)| index)),
    }
}
