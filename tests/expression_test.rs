mod common;
use common::*;

#[test]
fn test_precedence() {
    let (r, rt) = run("10 PRINT 2+3*4\n20 PRINT (2+3)*4");
    assert!(r.is_ok());
    assert_eq!(rt.outputs(), &["14\n", "20\n"]);
}

#[test]
fn test_left_assoc() {
    assert_eq!(exec("10 PRINT 1.5/2*3"), "2.25\n");
    assert_eq!(exec("10 PRINT 1.5/(2*3)"), "0.25\n");
    assert_eq!(exec("10 PRINT 10-4-3"), "3\n");
}

#[test]
fn test_division_is_real() {
    assert_eq!(exec("10 PRINT 10/4"), "2.5\n");
}

#[test]
fn test_power() {
    assert_eq!(exec("10 PRINT 2^10"), "1024\n");
    assert_eq!(exec("10 PRINT -2^2"), "-4\n");
    assert_eq!(exec("10 PRINT 2^-1"), "0.5\n");
    assert_eq!(fail("10 PRINT (-8)^(1/3)"), "?ILLEGAL QUANTITY ERROR IN 10");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(exec("10 A$=\"AB\"+\"CD\":PRINT A$+\"!\""), "ABCD!\n");
}

#[test]
fn test_numeric_strings_add() {
    assert_eq!(exec("10 PRINT \"2\"+\"3\""), "5\n");
    assert_eq!(exec("10 PRINT 1+\"2\""), "3\n");
    assert_eq!(fail("10 PRINT 1+\"X\""), "?TYPE MISMATCH ERROR IN 10");
    assert_eq!(fail("10 PRINT \"2\"*3"), "?TYPE MISMATCH ERROR IN 10");
}

#[test]
fn test_comparisons() {
    assert_eq!(exec("10 PRINT 1<2;1>2;2=2;1<>1;2>=2;1<=0"), "-1 0-1 0-1 0\n");
    assert_eq!(exec("10 PRINT \"A\"<\"B\";\"B\"=\"B\""), "-1-1\n");
    assert_eq!(fail("10 IF \"1\"=1 THEN END"), "?TYPE MISMATCH ERROR IN 10");
}

#[test]
fn test_logic() {
    assert_eq!(exec("10 PRINT 12 AND 10;12 OR 3;NOT 0"), "8 15-1\n");
    assert_eq!(exec("10 IF 1=1 AND 2=2 THEN PRINT \"BOTH\""), "BOTH\n");
    assert_eq!(exec("10 IF NOT 1=2 THEN PRINT \"NOT\""), "NOT\n");
}

#[test]
fn test_truthiness() {
    assert_eq!(exec("10 A$=\"X\":IF A$ THEN PRINT \"STRING\""), "STRING\n");
    assert_eq!(exec("10 IF 0.5 THEN PRINT \"HALF\""), "HALF\n");
}

#[test]
fn test_number_formatting() {
    assert_eq!(exec("10 PRINT 1/3"), "0.3333333333333333\n");
    assert_eq!(exec("10 PRINT 1E3;-0"), "1000 0\n");
    assert_eq!(exec("10 PRINT .5"), "0.5\n");
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        fail("10 A=1\n20 B=0\n30 PRINT A/B"),
        "?DIVISION BY ZERO ERROR IN 30"
    );
}

#[test]
fn test_overflow() {
    assert_eq!(fail("10 PRINT 10^300*10^300"), "?OVERFLOW ERROR IN 10");
}
