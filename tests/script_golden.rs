use estdiff::ast::build::*;
use estdiff::ast::*;
use estdiff::script_formatter::{PlainScriptFormatter, ScriptFormatter};
use estdiff::{compute_diff, Algorithm, Loc};
use goldenfile::Mint;
use std::rc::Rc;

fn span(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Loc {
    Loc::new(start_line, start_column, end_line, end_column)
}

fn check_script(test_name: &str, origin: &Rc<Program>, modified: &Rc<Program>) {
    let mut mint = Mint::new("tests/goldenfiles");
    let golden = mint
        .new_goldenfile(format!("{}.golden", test_name))
        .unwrap();
    let script = compute_diff(Algorithm::Standard, origin, modified);
    PlainScriptFormatter::new(golden)
        .write_script(&script)
        .unwrap();
}

#[test]
fn rename() {
    // var x = 1;  ->  var y = 1;
    let init = number_expr(span(1, 8, 1, 9), 1.0, "1");
    let make = |name: &str| {
        program(
            span(1, 0, 1, 10),
            vec![var_decl_stmt(
                span(1, 0, 1, 10),
                VariableKind::Var,
                vec![declarator(
                    span(1, 4, 1, 9),
                    ident_pattern(span(1, 4, 1, 5), name),
                    Some(init.clone()),
                )],
            )],
        )
    };
    check_script("rename", &make("x"), &make("y"));
}

#[test]
fn insert_head() {
    // b();  ->  a(); b();
    let b_stmt = call_stmt(span(1, 7, 1, 11), "b");
    let a_stmt = call_stmt(span(1, 2, 1, 6), "a");
    let origin = program(span(1, 0, 1, 13), vec![b_stmt.clone()]);
    let modified = program(span(1, 0, 1, 13), vec![a_stmt, b_stmt]);
    check_script("insert_head", &origin, &modified);
}

#[test]
fn delete_middle() {
    // a(); b(); c();  ->  a(); c();
    let a_stmt = call_stmt(span(1, 0, 1, 4), "a");
    let b_stmt = call_stmt(span(2, 0, 2, 4), "b");
    let c_stmt = call_stmt(span(3, 0, 3, 4), "c");
    let origin = program(
        span(1, 0, 3, 4),
        vec![a_stmt.clone(), b_stmt, c_stmt.clone()],
    );
    let modified = program(span(1, 0, 3, 4), vec![a_stmt, c_stmt]);
    check_script("delete_middle", &origin, &modified);
}

#[test]
fn return_annotation() {
    // function f() {}  ->  function f(): T {}
    let f_id = ident(span(1, 9, 1, 10), "f");
    let shared_params = params(span(1, 10, 1, 12), vec![]);
    let shared_body = block(span(1, 13, 1, 15), vec![]);
    let make = |return_type: TypeAnnotationHint| {
        program(
            span(1, 0, 1, 15),
            vec![stmt(
                span(1, 0, 1, 15),
                StatementKind::FunctionDeclaration(Rc::new(Function {
                    loc: span(1, 0, 1, 15),
                    id: Some(f_id.clone()),
                    params: shared_params.clone(),
                    body: FunctionBody::Block(shared_body.clone()),
                    is_async: false,
                    generator: false,
                    predicate: None,
                    return_type,
                    tparams: None,
                })),
            )],
        )
    };
    let origin = make(TypeAnnotationHint::Missing(span(1, 12, 1, 12)));
    let modified = make(TypeAnnotationHint::Available(type_annotation(
        span(1, 12, 1, 15),
        Ty::Named("T".to_owned()),
    )));
    check_script("return_annotation", &origin, &modified);
}
