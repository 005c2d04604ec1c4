use compiler::Compiler;
use proptest::prelude::*;

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i32..1000).prop_map(|n| n.to_string()),
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
    ]
}

/// Random well-formed int expressions over the declared variables.
fn expression() -> impl Strategy<Value = String> {
    operand().prop_recursive(4, 32, 2, |inner| {
        (
            inner.clone(),
            prop::sample::select(vec!["+", "-", "*", "/"]),
            inner,
            any::<bool>(),
        )
            .prop_map(|(l, op, r, paren)| {
                if paren {
                    format!("({l} {op} {r})")
                } else {
                    format!("{l} {op} {r}")
                }
            })
    })
}

fn script() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(vec!["a", "b", "c"]), expression()),
        1..8,
    )
    .prop_map(|lines| {
        let mut source = String::from("int a\nint b\nint c\n");
        for (target, expr) in lines {
            source.push_str(&format!("{target} <- {expr}\n"));
        }
        source
    })
}

proptest! {
    #[test]
    fn compiling_twice_is_byte_identical(source in script()) {
        let first = Compiler::new().compile(&source).unwrap();
        let second = Compiler::new().compile(&source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn valid_scripts_end_in_halt(source in script()) {
        let program = compiler::compile(&source).unwrap();
        prop_assert_eq!(program.last().copied(), Some(0x0A));
        prop_assert_eq!(&program[5..9], &12u32.to_le_bytes()[..]);
    }
}
