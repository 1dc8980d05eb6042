mod common;
use common::*;

#[test]
fn test_math() {
    assert_eq!(exec("10 PRINT ABS(-2);INT(2.7);INT(-2.5);SGN(-4);SQR(9)"), "2 2-3-1 3\n");
    assert_eq!(exec("10 PRINT SIN(0);COS(0);ATN(0);EXP(0);LOG(1)"), "0 1 0 1 0\n");
    assert_eq!(exec("10 PRINT INT(TAN(0.5)*1000)"), "546\n");
}

#[test]
fn test_math_domain_errors() {
    assert_eq!(fail("10 PRINT SQR(-1)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT LOG(0)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT EXP(1000)"), "?OVERFLOW ERROR IN 10");
}

#[test]
fn test_string_functions() {
    assert_eq!(
        exec("10 A$=\"HELLO\":PRINT LEFT$(A$,2);\"-\";RIGHT$(A$,2);\"-\";MID$(A$,2,3)"),
        "HE-LO-ELL\n"
    );
    assert_eq!(exec("10 PRINT LEN(\"ABC\");ASC(\"A\");CHR$(66)"), "3 65 B\n");
    assert_eq!(exec("10 PRINT VAL(\"12.5\")+1;VAL(\"X\")"), "13.5 0\n");
    assert_eq!(exec("10 PRINT \"[\";STR$(7);\"]\""), "[ 7]\n");
    assert_eq!(exec("10 PRINT \"A\";SPC(3);\"B\""), "A   B\n");
}

#[test]
fn test_string_function_errors() {
    assert_eq!(fail("10 PRINT ASC(\"\")"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT MID$(\"A\",0)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT LEFT$(\"A\",-1)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT LEN(5)"), "?TYPE MISMATCH ERROR IN 10");
    assert_eq!(fail("10 PRINT LEFT$(\"A\")"), "?SYNTAX ERROR IN 10");
}

#[test]
fn test_rnd_reseed_is_repeatable() {
    let out = exec(
        "10 X=RND(-3):A=RND(1):B=RND(0)\n\
         20 X=RND(-3):C=RND(1)\n\
         30 PRINT A=B;A=C;A>=0 AND A<1",
    );
    assert_eq!(out, "-1-1-1\n");
}

#[test]
fn test_fre() {
    assert_eq!(exec("10 PRINT FRE(0)>0"), "-1\n");
}

#[test]
fn test_user_function_errors() {
    assert_eq!(fail("10 PRINT FNA(1)"), "?UNDEF'D FUNCTION ERROR IN 10");
    assert_eq!(
        fail("10 DEF FNR(X)=FNR(X)+1\n20 PRINT FNR(1)"),
        "?STACK OVERFLOW ERROR IN 20"
    );
}
