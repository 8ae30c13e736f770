macro_rules! assert_matches {
    ($pat:pat $(if $cond:expr)*, $expr:expr $(,)*) => {{
        let e = $expr;
        match e {
            $pat $(if $cond)* => {},
            _ => panic!(
                "assert_matches failed!\nExpected: {}\n  Actual: {:#?}",
                stringify!($pat), e,
            ),
        }
    }}
}
