// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Send a status line to an optional progress sink and to the log.
#[macro_export]
macro_rules! report {
    ($progress:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::logf!("{}", msg);
        if let Some(p) = $progress.as_deref_mut() {
            p.log(&msg);
        }
    }};
}
