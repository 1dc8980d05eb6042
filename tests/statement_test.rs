mod common;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_hello_world() {
    let (r, rt) = run("10 PRINT \"HELLO WORLD\"\n20 END");
    assert!(r.is_ok());
    assert_eq!(rt.outputs(), &["HELLO WORLD\n"]);
}

#[test]
fn test_for_loop_on_one_line() {
    let (r, rt) = run("10 FOR I=1 TO 3: PRINT I: NEXT I");
    assert!(r.is_ok());
    assert_eq!(rt.outputs(), &["1\n", "2\n", "3\n"]);
}

#[test]
fn test_nested_loops() {
    assert_eq!(
        exec("10 FOR I=1 TO 2:FOR J=1 TO 2:PRINT I*10+J;\" \";:NEXT J,I:PRINT"),
        "11 12 21 22 \n"
    );
}

#[test]
fn test_lines_run_in_textual_order() {
    assert_eq!(exec("20 PRINT \"B\"\n10 PRINT \"A\""), "B\nA\n");
}

#[test]
fn test_goto() {
    assert_eq!(exec("10 GOTO 30\n20 PRINT \"NO\"\n30 PRINT \"YES\""), "YES\n");
}

#[test]
fn test_return_resumes_at_next_line() {
    assert_eq!(
        exec("10 GOSUB 100\n20 PRINT \"BACK\":END\n100 PRINT \"SUB\":RETURN"),
        "SUB\nBACK\n"
    );
}

#[test]
fn test_return_skips_rest_of_gosub_line() {
    assert_eq!(
        exec("10 GOSUB 100:PRINT \"SAME LINE\"\n20 PRINT \"NEXT LINE\":END\n100 RETURN"),
        "NEXT LINE\n"
    );
}

#[test]
fn test_return_from_last_line_ends_program() {
    assert_eq!(
        exec("10 GOTO 30\n20 PRINT \"SUB\":RETURN\n30 GOSUB 20:PRINT \"NO\""),
        "SUB\n"
    );
}

#[test]
fn test_nested_gosub() {
    assert_eq!(
        exec("10 GOSUB 100\n20 END\n100 PRINT 1:GOSUB 200\n110 PRINT 3:RETURN\n200 PRINT 2:RETURN"),
        "1\n2\n3\n"
    );
}

#[test]
fn test_if_then_forms() {
    assert_eq!(
        exec(
            "10 A=5\n\
             20 IF A>3 THEN PRINT \"BIG\":PRINT \"REST\"\n\
             30 IF A<3 THEN PRINT \"SMALL\":PRINT \"SKIPPED\"\n\
             40 IF A=5 GOTO 60\n\
             50 PRINT \"NO\"\n\
             60 PRINT \"END\""
        ),
        "BIG\nREST\nEND\n"
    );
}

#[test]
fn test_if_then_line_number() {
    assert_eq!(exec("10 IF 1 THEN 30\n20 PRINT \"NO\"\n30 PRINT \"YES\""), "YES\n");
}

#[test]
fn test_on_goto_gosub() {
    assert_eq!(
        exec(
            "10 FOR I=0 TO 3\n\
             20 ON I GOSUB 100,200\n\
             30 NEXT:END\n\
             100 PRINT \"A\";:RETURN\n\
             200 PRINT \"B\";:RETURN"
        ),
        "AB"
    );
}

#[test]
fn test_end_halts() {
    assert_eq!(exec("10 PRINT 1:END:PRINT 2\n20 PRINT 3"), "1\n");
}

#[test]
fn test_stop() {
    let (r, rt) = run("10 PRINT 1\n20 STOP\n30 PRINT 2");
    assert!(r.is_ok());
    assert_eq!(rt.output(), "1\nBREAK IN 20\n");
}

#[test]
fn test_rem() {
    assert_eq!(exec("10 REM PRINT \"NO\":PRINT \"NO\"\n20 PRINT \"YES\""), "YES\n");
}

#[test]
fn test_let_keyword_optional() {
    assert_eq!(exec("10 LET A=1:B=2:PRINT A+B"), "3\n");
}

#[test]
fn test_variable_names_fold() {
    assert_eq!(exec("10 CAT=5:PRINT CA;CAB"), "5 5\n");
}

#[test]
fn test_string_and_number_namespaces() {
    assert_eq!(exec("10 A=1:A$=\"X\":PRINT A;A$"), "1 X\n");
}

#[test]
fn test_undefined_variables_are_zero() {
    assert_eq!(exec("10 PRINT X;\"[\";X$;\"]\""), "0[]\n");
}

#[test]
fn test_run_clears_state() {
    let (r, rt) = run_with_input(
        "10 DIM B(2):PRINT A:A=5:INPUT X:IF X=1 THEN RUN",
        &["1", "0"],
    );
    assert!(r.is_ok());
    assert_eq!(rt.output(), "0\n0\n");
}

#[test]
fn test_def_fn() {
    assert_eq!(
        exec("10 X=7:DEF FNS(X)=X*X+1\n20 PRINT FNS(3);X"),
        "10 7\n"
    );
}

#[test]
fn test_def_fn_uses_globals() {
    assert_eq!(exec("10 K=2:DEF FNM(A)=A*K\n20 K=3:PRINT FNM(5)"), "15\n");
}

#[test]
fn test_question_mark_is_print() {
    assert_eq!(exec("10 ?\"HI\""), "HI\n");
}

#[test]
fn test_print_clear_screen() {
    let (r, rt) = run("10 PRINT CHR$(147);\"TOP\"");
    assert!(r.is_ok());
    assert_eq!(rt.clears(), 1);
    assert_eq!(rt.output(), "TOP\n");
}

#[test]
fn test_reserved_time_variables() {
    let out = exec("10 T=TI:PRINT LEN(TI$);T>=0");
    assert_eq!(out, "6-1\n");
    assert_eq!(fail("10 TI=5"), "?SYNTAX ERROR IN 10");
    assert_eq!(fail("10 TI$=\"000000\""), "?SYNTAX ERROR IN 10");
}
