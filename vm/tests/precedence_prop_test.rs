use proptest::prelude::*;
use vm::{RecordingHost, Scalar, VM};

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
        }
    }
}

/// Reference evaluation: fold products first, then sums left to right.
fn evaluate(first: i32, rest: &[(Op, i32)]) -> i32 {
    let mut terms: Vec<(Op, i32)> = vec![(Op::Add, first)];
    for &(op, value) in rest {
        match op {
            Op::Mul => {
                let last = terms.last_mut().expect("at least one term");
                last.1 = last.1.wrapping_mul(value);
            }
            _ => terms.push((op, value)),
        }
    }
    terms.into_iter().fold(0i32, |acc, (op, value)| match op {
        Op::Sub => acc.wrapping_sub(value),
        _ => acc.wrapping_add(value),
    })
}

fn run(source: &str) -> Vec<Scalar> {
    let program = compiler::compile(source).expect("compile failed");
    let mut vm = VM::load(&program, 4096, RecordingHost::new()).expect("load failed");
    vm.interpret().expect("run failed");
    vm.into_host().displayed()
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Add), Just(Op::Sub), Just(Op::Mul)]
}

proptest! {
    #[test]
    fn flat_chains_follow_precedence(
        first in 0i32..1000,
        rest in prop::collection::vec((op(), 0i32..1000), 0..12),
    ) {
        let mut expr = first.to_string();
        for (op, value) in &rest {
            expr.push_str(&format!(" {} {value}", op.symbol()));
        }

        let displayed = run(&format!("int x\nx <- {expr}\ndisplay x"));
        prop_assert_eq!(displayed, vec![Scalar::Int(evaluate(first, &rest))]);
    }

    #[test]
    fn parenthesized_sum_is_multiplied_as_a_whole(
        a in 0i32..500,
        b in 0i32..500,
        c in 0i32..500,
    ) {
        let source = format!(
            "int a\nint b\nint x\na <- {a}\nb <- {b}\nx <- (a + b) * {c}\ndisplay x"
        );
        prop_assert_eq!(run(&source), vec![Scalar::Int((a + b) * c)]);
    }
}
