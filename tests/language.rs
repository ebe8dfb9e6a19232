use std::{
    fs,
    path::Path,
    sync::Arc,
    thread,
};

use infixcalc::{
    CalcResult, EvalOptions, NamespaceRef, Reducer, Value, calculate,
    interpreter::{
        namespace::{
            core::{Arity, TableNamespace},
            registry::{NamespaceRegistry, Namespaces},
        },
    },
    structure_with,
};
use walkdir::WalkDir;

#[test]
fn case_files_hold() {
    let mut count = 0;
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cases");

    for entry in WalkDir::new(&root).into_iter()
                                    .filter_map(Result::ok)
                                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((expression, expected)) = line.rsplit_once(" => ") else {
                panic!("{path:?}:{} is not of the form `expression => expected`", line_number + 1);
            };

            count += 1;
            let result = calculate(expression, &[]);
            match (expected.strip_prefix('!'), result) {
                (Some(kind), Err(e)) => assert_eq!(e.kind.name(),
                                                   kind,
                                                   "{path:?}:{}: `{expression}` failed with {e}",
                                                   line_number + 1),
                (Some(kind), Ok(value)) => {
                    panic!("{path:?}:{}: `{expression}` gave {value}, expected {kind}", line_number + 1)
                },
                (None, Ok(value)) => assert_eq!(value.to_string(),
                                                expected,
                                                "{path:?}:{}: `{expression}`",
                                                line_number + 1),
                (None, Err(e)) => panic!("{path:?}:{}: `{expression}` failed: {e}", line_number + 1),
            }
        }
    }

    assert!(count > 0, "No cases found in {root:?}");
}

fn assert_success(src: &str, expected: &str) {
    match calculate(src, &[]) {
        Ok(value) => assert_eq!(value.to_string(), expected, "`{src}`"),
        Err(e) => panic!("Expression failed: {e}"),
    }
}

fn assert_failure(src: &str, message: &str) {
    match calculate(src, &[]) {
        Ok(value) => panic!("Expression succeeded with {value} but was expected to fail"),
        Err(e) => assert_eq!(e.to_string(), message),
    }
}

#[test]
fn nested_groups_and_functions() {
    assert_success("2 * (sin(pi / 2) + 3)", "8.0");
    assert_success("max(1, min(4, 2), -3)", "2");
    assert_success("((((1))))", "1");
    assert_success("pow(2, 2 + 1)", "8.0");
    assert_success("abs(-(3 - 5) * 2)", "4");
}

#[test]
fn error_messages_quote_the_expression() {
    assert_failure("", "ERROR: Empty expression string was provided.");
    assert_failure("1+", "ERROR: Malformed expression: expression ends with operator '+': \"1+\"");
    assert_failure("1 + nope", "ERROR: Unknown symbol \"nope\".: \"1 + nope\"");
    assert_failure("1/0", "ERROR: Division by zero.: \"1/0\"");
    assert_failure("sqrt(-1)", "ERROR: Math domain error in 'sqrt'.: \"sqrt(-1)\"");
    assert_failure("2^3", "ERROR: Operator '^' is not supported.: \"2^3\"");
}

#[test]
fn named_namespaces_come_before_defaults() {
    let refs = [NamespaceRef::from("statistics")];
    assert_eq!(calculate("mean(1, 2, 6)", &refs).unwrap(), Value::Real(3.0));
    assert_eq!(calculate("median((5, 1, 3)) + pi * 0", &refs).unwrap(), Value::Real(3.0));

    // `math.pow` shadows the modular `pow` unless `builtins` is named first.
    assert_eq!(calculate("pow(2, 10, 7)", &[]).unwrap_err().kind.name(), "ArityMismatch");
    assert_eq!(calculate("pow(2, 10, 7)", &["builtins".into()]).unwrap(), Value::Integer(2));

    let err = calculate("1", &["nope".into()]).unwrap_err();
    assert_eq!(err.to_string(), "ERROR: Unknown namespace \"nope\".: \"1\"");
}

#[test]
fn caller_namespace_shadows_math() {
    let custom = TableNamespace::new("custom").constant("pi", 3_i64)
                                              .function("twice", Arity::Exact(1), |args| {
                                                  Ok(Value::Integer(args[0].as_integer()? * 2))
                                              });
    let refs = [NamespaceRef::from(Arc::new(custom))];

    assert_eq!(calculate("twice(pi)", &refs).unwrap(), Value::Integer(6));
    assert_eq!(calculate("twice(0.5)", &refs).unwrap_err().kind.name(), "ArityMismatch");
    assert_eq!(calculate("e > 2", &refs).unwrap(), Value::Bool(true));
}

fn evaluate_with_depth(expression: &str, max_depth: usize) -> CalcResult<Value> {
    let options = EvalOptions { max_depth };
    let tokens = structure_with(expression, &options)?;
    Reducer::new(expression, Namespaces::standard(), options).evaluate(&tokens)
}

#[test]
fn nesting_limit_is_configurable() {
    let nested = format!("{}1{}", "(".repeat(10), ")".repeat(10));
    assert_eq!(evaluate_with_depth(&nested, 10).unwrap(), Value::Integer(1));
    assert_eq!(evaluate_with_depth(&nested, 9).unwrap_err().kind.name(), "NestingTooDeep");

    let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_eq!(calculate(&deep, &[]).unwrap_err().kind.name(), "NestingTooDeep");
}

#[test]
fn reducer_is_reusable_after_failure() {
    let mut reducer = Reducer::new("reuse", Namespaces::standard(), EvalOptions::default());
    let failing = structure_with("sin(1, 2)", &EvalOptions::default()).unwrap();
    let passing = structure_with("cos(0)", &EvalOptions::default()).unwrap();

    assert!(reducer.evaluate(&failing).is_err());
    assert_eq!(reducer.evaluate(&passing).unwrap(), Value::Real(1.0));
}

#[test]
fn evaluations_run_on_separate_threads() {
    let registry = NamespaceRegistry::standard();
    let handles = (1..=4_i64).map(|n| {
                                 let namespaces = Namespaces::resolve(&["statistics".into()], registry).unwrap();
                                 thread::spawn(move || {
                                     let expression = format!("sum({n}, {n}) * mean(1, 3)");
                                     let tokens = structure_with(&expression, &EvalOptions::default()).unwrap();
                                     Reducer::new(expression, namespaces, EvalOptions::default()).evaluate(&tokens)
                                 })
                             })
                             .collect::<Vec<_>>();

    for (n, handle) in (1..=4_i64).zip(handles) {
        #[allow(clippy::cast_precision_loss)]
        let expected = Value::Real((2 * n) as f64 * 2.0);
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
}
