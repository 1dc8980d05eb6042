mod common;
use common::*;

#[test]
fn test_array_basics() {
    assert_eq!(
        exec("10 DIM A$(100),X(10,10)\n\
              20 A$(42)=\"THE ANSWER\"\n\
              30 X(4,2)=2.7182818\n\
              40 PRINT A$(42)+\"!\";X(4,2)"),
        "THE ANSWER!2.7182818\n"
    );
}

#[test]
fn test_dim_size_is_highest_index() {
    assert_eq!(exec("10 DIM A(3):A(0)=1:A(3)=4:PRINT A(0)+A(3)"), "5\n");
    assert_eq!(fail("10 DIM A(3):A(4)=1"), "?BAD SUBSCRIPT ERROR IN 10");
}

#[test]
fn test_redimension() {
    assert_eq!(fail("10 DIM A(5)\n20 DIM A(5)"), "?REDIM'D ARRAY ERROR IN 20");
}

#[test]
fn test_auto_dimension() {
    assert_eq!(exec("10 B(10)=7:PRINT B(10);B(0)"), "7 0\n");
    assert_eq!(fail("10 B(11)=7"), "?BAD SUBSCRIPT ERROR IN 10");
    assert_eq!(fail("10 X=B(1)\n20 DIM B(20)"), "?REDIM'D ARRAY ERROR IN 20");
}

#[test]
fn test_illegal_subscripts() {
    assert_eq!(fail("10 DIM A(-1)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 DIM A(2.5)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 PRINT A(-1)"), "?ILLEGAL QUANTITY ERROR IN 10");
    assert_eq!(fail("10 DIM A(2,2):PRINT A(1)"), "?BAD SUBSCRIPT ERROR IN 10");
}

#[test]
fn test_array_types() {
    assert_eq!(fail("10 DIM A$(2):A$(1)=5"), "?TYPE MISMATCH ERROR IN 10");
    assert_eq!(exec("10 DIM A$(2):PRINT \"[\";A$(1);\"]\""), "[]\n");
}

#[test]
fn test_arrays_and_scalars_are_separate() {
    assert_eq!(exec("10 A=1:A(1)=2:PRINT A;A(1)"), "1 2\n");
}

#[test]
fn test_array_in_loop() {
    assert_eq!(
        exec("10 DIM S(4)\n\
              20 FOR I=0 TO 4:S(I)=I*I:NEXT\n\
              30 T=0:FOR I=0 TO 4:T=T+S(I):NEXT\n\
              40 PRINT T"),
        "30\n"
    );
}

#[test]
fn test_too_large() {
    assert_eq!(fail("10 DIM A(300,300)"), "?OUT OF MEMORY ERROR IN 10");
}
