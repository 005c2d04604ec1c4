use compiler::{Compiler, Symbol, VarType};
use vm::instruction::{decode_program, Instruction};

#[test]
fn test_function_locals_do_not_alias() {
    let mut compiler = Compiler::new();
    let program = compiler
        .compile("start a\nint x\nx <- 1\nend\nstart b\nfloat x\nx <- 2\nend")
        .unwrap();

    // Both locals sit at the first local slot, each below its own frame base,
    // and neither leaks into the global frame.
    let stores: Vec<Instruction> = decode_program(&program)
        .unwrap()
        .into_iter()
        .map(|(_, inst)| inst)
        .filter(|inst| matches!(inst, Instruction::StoreVar(_)))
        .collect();
    assert_eq!(stores, vec![Instruction::StoreVar(4), Instruction::StoreVar(4)]);
    assert_eq!(program[5..9], 0u32.to_le_bytes());
    assert!(compiler.scopes.globals.is_empty());
}

#[test]
fn test_globals_are_hidden_inside_functions() {
    let result = Compiler::new().compile("int g\nstart f\ng <- 1\nend");
    assert!(result.is_err());
}

#[test]
fn test_locals_are_gone_after_end() {
    let result = Compiler::new().compile("start f\nint l\nend\nl <- 1");
    assert!(result.is_err());
}

#[test]
fn test_globals_survive_function_bodies() {
    let mut compiler = Compiler::new();
    compiler
        .compile("int g\nstart f\nint l\nend\nfloat h\ng <- 1")
        .unwrap();
    assert_eq!(
        compiler.scopes.globals.resolve("h"),
        Some(Symbol {
            ty: VarType::Float,
            offset: 8
        })
    );
}

#[test]
fn test_redeclaration_switches_type() {
    let mut compiler = Compiler::new();
    compiler.compile("int x\nfloat x\nx <- 1.5").unwrap();
    assert_eq!(
        compiler.scopes.globals.resolve("x"),
        Some(Symbol {
            ty: VarType::Float,
            offset: 8
        })
    );
    assert_eq!(compiler.scopes.globals.frame_size(), 8);
}
